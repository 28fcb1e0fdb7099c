/**
 * User Records
 *
 * Lookups and creation of user records in `users.json`. Usernames are
 * unique and compared exactly (case-sensitive).
 */
use chrono::Utc;

use crate::backend::error::BackendError;
use crate::backend::store::{IdGenerator, JsonStore, StoreError};
use crate::shared::error::SharedError;
use crate::shared::models::{default_avatar, User};

/// Fields accepted when creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Avatar URL; the generated default is used when `None`
    pub avatar: Option<String>,
}

/// Get user by id
pub async fn find_user(store: &JsonStore, id: &str) -> Result<Option<User>, StoreError> {
    let users: Vec<User> = store.load().await?;
    Ok(users.into_iter().find(|u| u.id == id))
}

/// Get user by username
pub async fn find_user_by_username(
    store: &JsonStore,
    username: &str,
) -> Result<Option<User>, StoreError> {
    let users: Vec<User> = store.load().await?;
    Ok(users.into_iter().find(|u| u.username == username))
}

/// Create a new user
///
/// # Errors
///
/// * `ValidationError` (400) - if the username is already taken
/// * `StoreError` (500) - if `users.json` cannot be written
pub async fn create_user(
    store: &JsonStore,
    ids: &IdGenerator,
    new_user: NewUser,
) -> Result<User, BackendError> {
    store
        .update(|users: &mut Vec<User>| {
            if users.iter().any(|u| u.username == new_user.username) {
                return Err(BackendError::from(SharedError::validation(
                    "username",
                    "Username already exists",
                )));
            }

            let avatar = new_user
                .avatar
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| default_avatar(&new_user.username));
            let user = User {
                id: ids.next_user_id(),
                username: new_user.username,
                password: new_user.password,
                email: new_user.email,
                avatar,
                bio: String::new(),
                is_admin: false,
                created_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(user)
        })
        .await
}
