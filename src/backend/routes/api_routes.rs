/**
 * API Route Handlers
 *
 * This module registers every REST endpoint under `/api`.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Revoke the caller's token
 * - `POST /api/auth/verify-token` - Re-activate a stored token
 *
 * ## Users
 * - `GET /api/users`, `GET /api/users/search/{query}`
 * - `GET /api/users/{id}/profile`, `PUT /api/users/{id}`
 * - `GET /api/users/{id}/followers`, `GET /api/users/{id}/following`
 *
 * ## Posts, feed, likes and comments
 * - `GET|POST /api/posts`, `PUT|DELETE /api/posts/{id}`, `GET /api/feed`
 * - `POST|DELETE /api/posts/{id}/like`
 * - `GET|POST /api/posts/{id}/comments`, `DELETE /api/comments/{id}`
 *
 * ## Follows
 * - `POST|DELETE /api/follow/{userId}`
 *
 * ## Direct messages
 * - `POST /api/messages`, `GET|DELETE /api/messages/{id}`
 * - `PUT /api/messages/{id}/read`, `POST /api/messages/{id}/like`
 * - `GET /api/conversations`
 *
 * ## Notifications
 * - `GET|DELETE /api/notifications`, `PUT /api/notifications/{id}/read`
 *
 * ## Admin
 * - `GET /api/admin/users`, `DELETE /api/admin/users/{id}`
 * - `DELETE /api/admin/clear-all`
 *
 * `GET /api/messages/{id}` takes the other user's id while `DELETE` takes a
 * message id; both share one path pattern.
 */
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::admin::{clear_all, delete_user, list_all_users};
use crate::backend::auth::{login, logout, register, verify_token};
use crate::backend::follows::{follow_user, unfollow_user};
use crate::backend::messaging::{
    get_messages, list_conversations, mark_message_read, retract_message, send_message,
    toggle_message_like,
};
use crate::backend::notifications::{
    clear_notifications, list_notifications, mark_notification_read,
};
use crate::backend::posts::{
    create_comment, create_post, delete_comment, delete_post, get_feed, like_post, list_comments,
    list_posts, unlike_post, update_post,
};
use crate::backend::server::state::AppState;
use crate::backend::users::{
    get_profile, list_followers, list_following, list_users, search_users, update_user,
};

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Authentication
///
/// Everything except register, login and verify-token requires an active
/// bearer token; admin routes additionally require `isAdmin`. Both checks
/// happen in the handlers' extractors.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/verify-token", post(verify_token))
        // User directory
        .route("/api/users", get(list_users))
        .route("/api/users/search/{query}", get(search_users))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}/profile", get(get_profile))
        .route("/api/users/{id}/followers", get(list_followers))
        .route("/api/users/{id}/following", get(list_following))
        // Posts and feed
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", put(update_post).delete(delete_post))
        .route("/api/feed", get(get_feed))
        .route("/api/posts/{id}/like", post(like_post).delete(unlike_post))
        .route(
            "/api/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/api/comments/{id}", delete(delete_comment))
        // Follows
        .route("/api/follow/{id}", post(follow_user).delete(unfollow_user))
        // Direct messages
        .route("/api/messages", post(send_message))
        .route("/api/messages/{id}", get(get_messages).delete(retract_message))
        .route("/api/messages/{id}/read", put(mark_message_read))
        .route("/api/messages/{id}/like", post(toggle_message_like))
        .route("/api/conversations", get(list_conversations))
        // Notifications
        .route(
            "/api/notifications",
            get(list_notifications).delete(clear_notifications),
        )
        .route("/api/notifications/{id}/read", put(mark_notification_read))
        // Admin
        .route("/api/admin/users", get(list_all_users))
        .route("/api/admin/users/{id}", delete(delete_user))
        .route("/api/admin/clear-all", delete(clear_all))
}
