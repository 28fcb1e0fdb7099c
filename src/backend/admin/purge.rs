/**
 * User Purge
 *
 * Removes a set of users together with everything that references them:
 *
 * - their posts, and the likes and comments on those posts
 * - follows in either direction
 * - likes and comments they wrote on other posts
 * - messages they sent or received
 * - notifications addressed to them
 *
 * Each collection is rewritten once under its own lock. Afterwards the
 * removed users' tokens are revoked, their sockets are closed, and post
 * subscribers get a `post-update` delete for every removed post.
 */
use std::collections::HashSet;

use crate::backend::realtime::broadcast_post_update;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::event::UpdateAction;
use crate::shared::models::{
    Comment, Follow, Like, Message, Notification, Post, RecordId, User, UserId,
};

/// Records removed by [`purge_users`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSummary {
    pub users: usize,
    pub posts: usize,
    pub follows: usize,
    pub likes: usize,
    pub comments: usize,
    pub messages: usize,
    pub notifications: usize,
    pub tokens: usize,
    pub connections: usize,
}

/// Remove `items` matching `doomed`, returning how many went
fn remove_where<T>(items: &mut Vec<T>, doomed: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !doomed(item));
    before - items.len()
}

/// Remove `user_ids` and all of their data
pub async fn purge_users(
    app_state: &AppState,
    user_ids: &HashSet<UserId>,
) -> Result<PurgeSummary, StoreError> {
    let mut summary = PurgeSummary::default();
    if user_ids.is_empty() {
        return Ok(summary);
    }
    let store = &app_state.store;

    summary.users = store
        .update(|users: &mut Vec<User>| {
            Ok::<_, StoreError>(remove_where(users, |u| user_ids.contains(&u.id)))
        })
        .await?;

    let removed: Vec<Post> = store
        .update(|posts: &mut Vec<Post>| {
            let (doomed, kept): (Vec<Post>, Vec<Post>) = std::mem::take(posts)
                .into_iter()
                .partition(|p| user_ids.contains(&p.author_id));
            *posts = kept;
            Ok::<_, StoreError>(doomed)
        })
        .await?;
    let removed_posts: HashSet<RecordId> = removed.iter().map(|p| p.id).collect();
    summary.posts = removed.len();

    summary.follows = store
        .update(|follows: &mut Vec<Follow>| {
            Ok::<_, StoreError>(remove_where(follows, |f| {
                user_ids.contains(&f.follower_id) || user_ids.contains(&f.following_id)
            }))
        })
        .await?;

    summary.likes = store
        .update(|likes: &mut Vec<Like>| {
            Ok::<_, StoreError>(remove_where(likes, |l| {
                user_ids.contains(&l.user_id) || removed_posts.contains(&l.post_id)
            }))
        })
        .await?;

    summary.comments = store
        .update(|comments: &mut Vec<Comment>| {
            Ok::<_, StoreError>(remove_where(comments, |c| {
                user_ids.contains(&c.user_id) || removed_posts.contains(&c.post_id)
            }))
        })
        .await?;

    summary.messages = store
        .update(|messages: &mut Vec<Message>| {
            Ok::<_, StoreError>(remove_where(messages, |m| {
                user_ids.contains(&m.sender_id) || user_ids.contains(&m.recipient_id)
            }))
        })
        .await?;

    summary.notifications = store
        .update(|notifications: &mut Vec<Notification>| {
            Ok::<_, StoreError>(remove_where(notifications, |n| {
                user_ids.contains(&n.user_id)
            }))
        })
        .await?;

    summary.tokens = user_ids
        .iter()
        .map(|id| app_state.tokens.revoke_user(id))
        .sum();
    summary.connections = user_ids
        .iter()
        .map(|id| app_state.connections.remove_user(id))
        .sum();
    for post in &removed {
        broadcast_post_update(&app_state.connections, UpdateAction::Delete, post);
    }

    tracing::info!("Purged {} users: {:?}", user_ids.len(), summary);
    Ok(summary)
}
