/**
 * Session Tokens
 *
 * Tokens are opaque strings of the form `userId-timestamp`. A token is valid
 * exactly while it is a member of the registry; nothing is signed and
 * nothing expires. The registry lives in memory only, so a restart logs
 * everyone out until the client re-activates its token through
 * `POST /api/auth/verify-token`.
 *
 * # Origins
 *
 * The registry remembers whether a token was issued by a login on this
 * process or restored from a client's claim. Restored tokens are accepted
 * for ordinary requests but not for admin routes, since anyone can claim a
 * token of the right shape.
 *
 * # Uniqueness
 *
 * The timestamp part is strictly increasing per registry, so two logins in
 * the same millisecond still get distinct tokens.
 */
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::shared::models::UserId;

/// How a token entered the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Created by a successful login
    Issued,
    /// Re-activated through verify-token
    Restored,
}

/// Set of active bearer tokens
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Arc<RwLock<HashMap<String, TokenOrigin>>>,
    last_stamp: Arc<AtomicI64>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue and activate a fresh token for `user_id`
    pub fn issue(&self, user_id: &str) -> String {
        let token = format!("{}-{}", user_id, self.next_stamp());
        self.write(|tokens| {
            tokens.insert(token.clone(), TokenOrigin::Issued);
        });
        token
    }

    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last_stamp.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev + 1);
            match self.last_stamp.compare_exchange_weak(
                prev,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Whether `token` is currently active
    pub fn contains(&self, token: &str) -> bool {
        self.origin(token).is_some()
    }

    /// How an active token was activated, `None` if it is not active
    pub fn origin(&self, token: &str) -> Option<TokenOrigin> {
        match self.tokens.read() {
            Ok(tokens) => tokens.get(token).copied(),
            Err(poisoned) => poisoned.into_inner().get(token).copied(),
        }
    }

    /// Whether `token` is active and was issued by a login
    pub fn is_issued(&self, token: &str) -> bool {
        self.origin(token) == Some(TokenOrigin::Issued)
    }

    /// Re-activate a token presented by a client
    ///
    /// A token that is already active keeps its origin.
    pub fn restore(&self, token: &str) {
        self.write(|tokens| {
            tokens
                .entry(token.to_string())
                .or_insert(TokenOrigin::Restored);
        });
    }

    /// Deactivate one token; returns whether it was active
    pub fn revoke(&self, token: &str) -> bool {
        self.write(|tokens| tokens.remove(token).is_some())
    }

    /// Deactivate every token belonging to `user_id`
    ///
    /// Returns the number of tokens removed.
    pub fn revoke_user(&self, user_id: &str) -> usize {
        self.write(|tokens| {
            let before = tokens.len();
            tokens.retain(|token, _| Self::user_id_of(token) != Some(user_id));
            before - tokens.len()
        })
    }

    pub fn len(&self) -> usize {
        match self.tokens.read() {
            Ok(tokens) => tokens.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The user a token was issued to: the text before the first `-`
    ///
    /// Returns `None` when the token has no `-` separator.
    pub fn user_id_of(token: &str) -> Option<&str> {
        token.split_once('-').map(|(user_id, _)| user_id)
    }

    /// Owned variant of [`TokenRegistry::user_id_of`]
    pub fn owner(token: &str) -> Option<UserId> {
        Self::user_id_of(token).map(str::to_string)
    }

    fn write<R>(&self, f: impl FnOnce(&mut HashMap<String, TokenOrigin>) -> R) -> R {
        // The map stays consistent even if a writer panicked.
        let mut guard = match self.tokens.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}
