/**
 * User Directory Handlers
 *
 * # Routes
 *
 * - `GET /api/users` - every user as `{id, username, avatar}`
 * - `GET /api/users/search/{query}` - case-insensitive username search
 * - `GET /api/users/{id}/profile` - profile with post and follow counts
 * - `PUT /api/users/{id}` - edit own bio, email and avatar
 * - `GET /api/users/{id}/followers` - users following `{id}`
 * - `GET /api/users/{id}/following` - users `{id}` follows
 */
use std::collections::HashSet;

use axum::{
    extract::State,
    response::Json,
};

use crate::backend::auth::users::find_user;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::backend::users::types::{Profile, SearchResult, UpdateUserRequest, UpdatedUser};
use crate::shared::api::{UserCard, UserSummary};
use crate::shared::error::SharedError;
use crate::shared::models::{Follow, Post, User, UserId};

/// Prefix marking an inline (base64) avatar image
const INLINE_IMAGE_PREFIX: &str = "data:image";

fn follower_count(follows: &[Follow], user_id: &str) -> usize {
    follows.iter().filter(|f| f.following_id == user_id).count()
}

fn following_count(follows: &[Follow], user_id: &str) -> usize {
    follows.iter().filter(|f| f.follower_id == user_id).count()
}

fn is_following(follows: &[Follow], follower: &str, target: &str) -> bool {
    follows
        .iter()
        .any(|f| f.follower_id == follower && f.following_id == target)
}

fn post_count(posts: &[Post], user_id: &str) -> usize {
    posts.iter().filter(|p| p.author_id == user_id).count()
}

/// List every user
pub async fn list_users(
    State(app_state): State<AppState>,
    _caller: AuthUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let users: Vec<User> = app_state.store.load().await?;
    Ok(Json(users.iter().map(UserSummary::from).collect()))
}

/// Search users by username
///
/// Matches case-insensitive substrings and never returns the caller.
pub async fn search_users(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(query): ApiPath<String>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let needle = query.to_lowercase();
    let users: Vec<User> = app_state.store.load().await?;
    let follows: Vec<Follow> = app_state.store.load().await?;
    let posts: Vec<Post> = app_state.store.load().await?;

    let results = users
        .iter()
        .filter(|u| u.id != caller.user_id && u.username.to_lowercase().contains(&needle))
        .map(|u| SearchResult {
            id: u.id.clone(),
            username: u.username.clone(),
            avatar: u.avatar.clone(),
            bio: u.bio.clone(),
            is_following: is_following(&follows, &caller.user_id, &u.id),
            posts_count: post_count(&posts, &u.id),
            followers_count: follower_count(&follows, &u.id),
            following_count: following_count(&follows, &u.id),
        })
        .collect();

    Ok(Json(results))
}

/// Get a user's profile
///
/// # Errors
///
/// * `404 Not Found` - If the user does not exist
pub async fn get_profile(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<Profile>> {
    let user = find_user(&app_state.store, &id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    let follows: Vec<Follow> = app_state.store.load().await?;
    let posts: Vec<Post> = app_state.store.load().await?;

    let is_following = if caller.user_id == user.id {
        None
    } else {
        Some(is_following(&follows, &caller.user_id, &user.id))
    };

    Ok(Json(Profile {
        posts_count: post_count(&posts, &user.id),
        followers: follower_count(&follows, &user.id),
        following: following_count(&follows, &user.id),
        is_following,
        id: user.id,
        username: user.username,
        avatar: user.avatar,
        email: user.email,
        bio: user.bio,
    }))
}

/// Edit the caller's own profile
///
/// # Errors
///
/// * `403 Forbidden` - If `{id}` is not the caller
/// * `404 Not Found` - If the user does not exist
/// * `413 Payload Too Large` - If an inline avatar exceeds the avatar limit
pub async fn update_user(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UpdatedUser>> {
    if id != caller.user_id {
        return Err(BackendError::forbidden("You can only edit your own profile"));
    }

    let avatar_limit = app_state.config.avatar_limit_bytes;
    if let Some(avatar) = &request.avatar {
        if avatar.starts_with(INLINE_IMAGE_PREFIX) && avatar.len() > avatar_limit {
            return Err(SharedError::too_large("avatar", avatar.len(), avatar_limit).into());
        }
    }

    let user = app_state
        .store
        .update(|users: &mut Vec<User>| {
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| BackendError::not_found("User not found"))?;
            if let Some(bio) = request.bio {
                user.bio = bio;
            }
            if let Some(email) = request.email {
                user.email = email;
            }
            if let Some(avatar) = request.avatar {
                user.avatar = avatar;
            }
            Ok::<_, BackendError>(user.clone())
        })
        .await?;

    tracing::info!("Profile of {} updated", user.id);
    Ok(Json(UpdatedUser {
        id: user.id,
        username: user.username,
        avatar: user.avatar,
        email: user.email,
        bio: user.bio,
    }))
}

async fn related_users(
    app_state: &AppState,
    related: impl Fn(&Follow) -> Option<&str>,
) -> ApiResult<Vec<UserCard>> {
    let follows: Vec<Follow> = app_state.store.load().await?;
    let users: Vec<User> = app_state.store.load().await?;
    let ids: HashSet<&str> = follows.iter().filter_map(related).collect();
    Ok(users
        .iter()
        .filter(|u| ids.contains(u.id.as_str()))
        .map(UserCard::from)
        .collect())
}

/// Users following `{id}`
pub async fn list_followers(
    State(app_state): State<AppState>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<Vec<UserCard>>> {
    let followers = related_users(&app_state, |f| {
        (f.following_id == id).then_some(f.follower_id.as_str())
    })
    .await?;
    Ok(Json(followers))
}

/// Users `{id}` follows
pub async fn list_following(
    State(app_state): State<AppState>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<Vec<UserCard>>> {
    let following = related_users(&app_state, |f| {
        (f.follower_id == id).then_some(f.following_id.as_str())
    })
    .await?;
    Ok(Json(following))
}
