/**
 * Feed
 *
 * `GET /api/feed` returns the posts written by the caller and by every user
 * the caller follows, newest first. Each entry carries its like count,
 * whether the caller liked it and its comment count.
 */
use std::collections::{HashMap, HashSet};

use axum::{extract::State, response::Json};

use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::backend::posts::types::FeedPost;
use crate::backend::server::state::AppState;
use crate::shared::models::{Comment, Follow, Like, Post, RecordId};

/// Assemble a user's feed from whole collections
pub fn build_feed(
    user_id: &str,
    posts: Vec<Post>,
    follows: &[Follow],
    likes: &[Like],
    comments: &[Comment],
) -> Vec<FeedPost> {
    let mut authors: HashSet<&str> = follows
        .iter()
        .filter(|f| f.follower_id == user_id)
        .map(|f| f.following_id.as_str())
        .collect();
    authors.insert(user_id);

    let mut like_counts: HashMap<RecordId, usize> = HashMap::new();
    let mut liked_by_caller: HashSet<RecordId> = HashSet::new();
    for like in likes {
        *like_counts.entry(like.post_id).or_default() += 1;
        if like.user_id == user_id {
            liked_by_caller.insert(like.post_id);
        }
    }

    let mut comment_counts: HashMap<RecordId, usize> = HashMap::new();
    for comment in comments {
        *comment_counts.entry(comment.post_id).or_default() += 1;
    }

    let mut feed: Vec<FeedPost> = posts
        .into_iter()
        .filter(|p| authors.contains(p.author_id.as_str()))
        .map(|post| FeedPost {
            like_count: like_counts.get(&post.id).copied().unwrap_or(0),
            is_liked: liked_by_caller.contains(&post.id),
            comment_count: comment_counts.get(&post.id).copied().unwrap_or(0),
            post,
        })
        .collect();

    feed.sort_by(|a, b| {
        b.post
            .created_at
            .cmp(&a.post.created_at)
            .then(b.post.id.cmp(&a.post.id))
    });
    feed
}

/// Feed handler
pub async fn get_feed(
    State(app_state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<FeedPost>>> {
    let store = &app_state.store;
    let posts: Vec<Post> = store.load().await?;
    let follows: Vec<Follow> = store.load().await?;
    let likes: Vec<Like> = store.load().await?;
    let comments: Vec<Comment> = store.load().await?;

    Ok(Json(build_feed(
        &caller.user_id,
        posts,
        &follows,
        &likes,
        &comments,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post(id: RecordId, author: &str, age_minutes: i64) -> Post {
        let at = Utc::now() - Duration::minutes(age_minutes);
        Post {
            id,
            title: format!("post {}", id),
            content: String::new(),
            author_id: author.to_string(),
            author: author.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn follow(follower: &str, following: &str) -> Follow {
        Follow {
            id: 1,
            follower_id: follower.to_string(),
            following_id: following.to_string(),
            created_at: Utc::now(),
        }
    }

    fn like(post_id: RecordId, user: &str) -> Like {
        Like {
            id: 1,
            post_id,
            user_id: user.to_string(),
            created_at: Utc::now(),
        }
    }

    fn comment(post_id: RecordId) -> Comment {
        Comment {
            id: 1,
            post_id,
            user_id: "x".to_string(),
            content: "c".to_string(),
            username: "x".to_string(),
            avatar: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_feed_contains_own_and_followed_posts_newest_first() {
        let posts = vec![
            post(1, "me", 30),
            post(2, "friend", 10),
            post(3, "stranger", 5),
            post(4, "me", 1),
        ];
        let follows = vec![follow("me", "friend"), follow("stranger", "me")];

        let feed = build_feed("me", posts, &follows, &[], &[]);
        let ids: Vec<RecordId> = feed.iter().map(|f| f.post.id).collect();
        assert_eq!(ids, vec![4, 2, 1]);
    }

    #[test]
    fn test_feed_counts() {
        let posts = vec![post(1, "me", 2), post(2, "me", 1)];
        let likes = vec![like(1, "me"), like(1, "friend"), like(2, "friend")];
        let comments = vec![comment(1), comment(1), comment(1)];

        let feed = build_feed("me", posts, &[], &likes, &comments);
        let first = feed.iter().find(|f| f.post.id == 1).unwrap();
        assert_eq!(first.like_count, 2);
        assert!(first.is_liked);
        assert_eq!(first.comment_count, 3);

        let second = feed.iter().find(|f| f.post.id == 2).unwrap();
        assert_eq!(second.like_count, 1);
        assert!(!second.is_liked);
        assert_eq!(second.comment_count, 0);
    }

    #[test]
    fn test_feed_post_serializes_flat() {
        let feed = build_feed("me", vec![post(1, "me", 0)], &[], &[], &[]);
        let value = serde_json::to_value(&feed[0]).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["authorId"], "me");
        assert_eq!(value["likeCount"], 0);
        assert_eq!(value["isLiked"], false);
        assert_eq!(value["commentCount"], 0);
    }
}
