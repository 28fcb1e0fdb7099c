/**
 * Connection Registry
 *
 * Tracks the open WebSocket connections that can receive pushed events.
 *
 * # Structure
 *
 * - **Chat connections**: user id → (connection id → sender). A user may
 *   have several tabs or devices open; each gets its own entry.
 * - **Post subscribers**: connection id → sender for every socket that sent
 *   `subscribe-posts`.
 *
 * Each sender is the write half of an unbounded channel drained by the
 * socket's writer task, so pushing an event never awaits.
 *
 * # Locking
 *
 * Both maps sit behind one `std::sync::Mutex`. The lock is only held for map
 * updates and for cloning senders out; it is never held across an await.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::ws;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::models::UserId;

/// Write half of a connection's outbound channel
pub type ConnectionSender = mpsc::UnboundedSender<ws::Message>;

/// Identifier assigned to each accepted socket
pub type ConnectionId = Uuid;

#[derive(Debug, Default)]
struct Connections {
    chat: HashMap<UserId, HashMap<ConnectionId, ConnectionSender>>,
    posts: HashMap<ConnectionId, ConnectionSender>,
}

impl Connections {
    fn detach_from_users(&mut self, id: ConnectionId) -> Option<UserId> {
        let mut previous = None;
        self.chat.retain(|user_id, sockets| {
            if sockets.remove(&id).is_some() {
                previous = Some(user_id.clone());
            }
            !sockets.is_empty()
        });
        previous
    }
}

/// Registry of live sockets, shared by the socket tasks and the handlers
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<Connections>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Connections> {
        // A panic while holding the lock cannot leave the maps half-updated.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Bind a connection to `user_id`
    ///
    /// A connection belongs to at most one user; re-authenticating moves it.
    /// Returns the user the connection was previously bound to, if any.
    pub fn register_user(
        &self,
        id: ConnectionId,
        user_id: &str,
        sender: ConnectionSender,
    ) -> Option<UserId> {
        let mut connections = self.lock();
        let previous = connections.detach_from_users(id);
        connections
            .chat
            .entry(user_id.to_string())
            .or_default()
            .insert(id, sender);
        previous
    }

    /// Add a connection to the post subscribers
    pub fn subscribe_posts(&self, id: ConnectionId, sender: ConnectionSender) {
        self.lock().posts.insert(id, sender);
    }

    /// Forget a closed connection
    ///
    /// Removes it from its user's set (dropping the user entry once empty)
    /// and from the post subscribers.
    pub fn remove(&self, id: ConnectionId) {
        let mut connections = self.lock();
        let user = connections.detach_from_users(id);
        let subscribed = connections.posts.remove(&id).is_some();
        tracing::debug!(
            "[Realtime] Connection {} removed (user: {:?}, post subscriber: {})",
            id,
            user,
            subscribed
        );
    }

    /// Drop every connection bound to `user_id`, e.g. after the account is
    /// deleted
    ///
    /// Each dropped connection is also unsubscribed from posts and sent a
    /// close frame. Returns the number of connections dropped.
    pub fn remove_user(&self, user_id: &str) -> usize {
        let mut connections = self.lock();
        let Some(sockets) = connections.chat.remove(user_id) else {
            return 0;
        };
        for (id, sender) in &sockets {
            connections.posts.remove(id);
            // The writer task forwards the close frame to the client.
            let _ = sender.send(ws::Message::Close(None));
        }
        tracing::debug!(
            "[Realtime] Dropped {} connections of user {}",
            sockets.len(),
            user_id
        );
        sockets.len()
    }

    /// Senders of every connection bound to `user_id`
    pub fn user_senders(&self, user_id: &str) -> Vec<ConnectionSender> {
        self.lock()
            .chat
            .get(user_id)
            .map(|sockets| sockets.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Senders of every post subscriber
    pub fn post_senders(&self) -> Vec<ConnectionSender> {
        self.lock().posts.values().cloned().collect()
    }

    pub fn user_connection_count(&self, user_id: &str) -> usize {
        self.lock().chat.get(user_id).map_or(0, HashMap::len)
    }

    pub fn post_subscriber_count(&self) -> usize {
        self.lock().posts.len()
    }

    /// Number of users with at least one open connection
    pub fn connected_user_count(&self) -> usize {
        self.lock().chat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (ConnectionSender, mpsc::UnboundedReceiver<ws::Message>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_register_multiple_connections_per_user() {
        let registry = ConnectionRegistry::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();
        registry.register_user(Uuid::new_v4(), "alice", tx1);
        registry.register_user(Uuid::new_v4(), "alice", tx2);

        assert_eq!(registry.user_connection_count("alice"), 2);
        assert_eq!(registry.user_senders("alice").len(), 2);
        assert_eq!(registry.connected_user_count(), 1);
    }

    #[test]
    fn test_reauth_moves_connection() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();
        let (tx, _rx) = channel();
        assert_eq!(registry.register_user(id, "alice", tx.clone()), None);
        assert_eq!(
            registry.register_user(id, "bob", tx),
            Some("alice".to_string())
        );

        assert_eq!(registry.user_connection_count("alice"), 0);
        assert_eq!(registry.user_connection_count("bob"), 1);
        assert_eq!(registry.connected_user_count(), 1);
    }

    #[test]
    fn test_remove_cleans_both_maps() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (tx, _rx) = channel();
        registry.register_user(id, "alice", tx.clone());
        registry.register_user(other, "alice", tx.clone());
        registry.subscribe_posts(id, tx);

        registry.remove(id);
        assert_eq!(registry.user_connection_count("alice"), 1);
        assert_eq!(registry.post_subscriber_count(), 0);

        registry.remove(other);
        assert_eq!(registry.connected_user_count(), 0);
    }

    #[test]
    fn test_remove_unknown_connection_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.remove(Uuid::new_v4());
        assert_eq!(registry.post_subscriber_count(), 0);
    }

    #[test]
    fn test_remove_user_closes_all_their_connections() {
        let registry = ConnectionRegistry::new();
        let (alice_tx, mut alice_rx) = channel();
        let (bob_tx, mut bob_rx) = channel();
        let phone = Uuid::new_v4();
        registry.register_user(Uuid::new_v4(), "alice", alice_tx.clone());
        registry.register_user(phone, "alice", alice_tx.clone());
        registry.subscribe_posts(phone, alice_tx);
        registry.register_user(Uuid::new_v4(), "bob", bob_tx);

        assert_eq!(registry.remove_user("alice"), 2);
        assert_eq!(registry.user_connection_count("alice"), 0);
        assert_eq!(registry.post_subscriber_count(), 0);
        assert_eq!(registry.user_connection_count("bob"), 1);
        assert!(matches!(alice_rx.try_recv(), Ok(ws::Message::Close(None))));
        assert!(bob_rx.try_recv().is_err());

        assert_eq!(registry.remove_user("alice"), 0);
    }

    #[test]
    fn test_unknown_user_has_no_senders() {
        let registry = ConnectionRegistry::new();
        assert!(registry.user_senders("nobody").is_empty());
    }
}
