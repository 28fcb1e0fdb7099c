/**
 * WebSocket Endpoint
 *
 * Handler for `GET /ws`. Each accepted socket is served by two tasks:
 *
 * 1. A writer task draining the connection's unbounded channel into the
 *    socket sink. Broadcasts and replies only ever touch the channel.
 * 2. The reader loop below, which parses client frames and updates the
 *    connection registry.
 *
 * # Client Frames
 *
 * - `{"type":"auth","userId":"42"}` binds the socket to user 42. When the
 *   frame carries a `token`, the token must be active and the user id is
 *   taken from it instead.
 * - `{"type":"subscribe-posts"}` adds the socket to the post subscribers.
 *
 * A `?token=` query parameter on the upgrade request authenticates the
 * socket right away. Frames that do not parse are logged and ignored.
 *
 * # Lifecycle
 *
 * When the client closes the socket (or the stream errors), the connection
 * is removed from the registry and the writer task is stopped.
 */
use axum::{
    extract::{
        ws::{self, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::auth::tokens::TokenRegistry;
use crate::backend::realtime::broadcast::send_event;
use crate::backend::realtime::registry::{ConnectionId, ConnectionRegistry, ConnectionSender};
use crate::backend::server::state::AppState;
use crate::shared::event::{ClientFrame, ServerEvent};
use crate::shared::models::UserId;

/// Query parameters accepted on the upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct SocketQuery {
    /// Active token to authenticate the socket at connect time
    pub token: Option<String>,
}

/// Upgrade handler for `GET /ws`
pub async fn handle_socket_upgrade(
    ws: WebSocketUpgrade,
    Query(query): Query<SocketQuery>,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, app_state, query.token))
}

/// Per-connection state owned by the reader loop
struct SocketSession {
    id: ConnectionId,
    sender: ConnectionSender,
    user_id: Option<UserId>,
    connections: ConnectionRegistry,
    tokens: TokenRegistry,
}

impl SocketSession {
    fn handle_text(&mut self, text: &str) {
        let frame = match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("[Realtime] Ignoring unparsable frame on {}: {}", self.id, e);
                return;
            }
        };

        tracing::debug!("[Realtime] Frame on {}: {:?}", self.id, frame);
        match frame {
            ClientFrame::Auth { user_id, token } => self.authenticate(user_id, token),
            ClientFrame::SubscribePosts => {
                self.connections.subscribe_posts(self.id, self.sender.clone());
                send_event(&self.sender, &ServerEvent::subscribed_to_posts());
            }
        }
    }

    fn authenticate(&mut self, claimed: Option<UserId>, token: Option<String>) {
        let user_id = match token {
            Some(token) => {
                if !self.tokens.contains(&token) {
                    tracing::warn!("[Realtime] Rejected inactive token on {}", self.id);
                    send_event(&self.sender, &ServerEvent::error("Invalid token"));
                    return;
                }
                match TokenRegistry::owner(&token) {
                    Some(user_id) => user_id,
                    None => {
                        send_event(&self.sender, &ServerEvent::error("Invalid token"));
                        return;
                    }
                }
            }
            None => match claimed.filter(|id| !id.is_empty()) {
                Some(user_id) => user_id,
                None => {
                    send_event(&self.sender, &ServerEvent::error("userId is required"));
                    return;
                }
            },
        };

        self.connections
            .register_user(self.id, &user_id, self.sender.clone());
        tracing::info!("[Realtime] User {} connected ({})", user_id, self.id);
        send_event(
            &self.sender,
            &ServerEvent::AuthOk {
                user_id: user_id.clone(),
            },
        );
        self.user_id = Some(user_id);
    }
}

/// Serve one accepted socket until it closes
pub async fn serve_socket(socket: WebSocket, app_state: AppState, token: Option<String>) {
    let id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (sender, mut outbound) = mpsc::unbounded_channel::<ws::Message>();

    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let mut session = SocketSession {
        id,
        sender,
        user_id: None,
        connections: app_state.connections.clone(),
        tokens: app_state.tokens.clone(),
    };
    tracing::debug!("[Realtime] Connection {} opened", id);

    if token.is_some() {
        session.authenticate(None, token);
    }

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(ws::Message::Text(text)) => session.handle_text(text.as_str()),
            Ok(ws::Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("[Realtime] Connection {} errored: {}", id, e);
                break;
            }
        }
    }

    app_state.connections.remove(id);
    if let Some(user_id) = &session.user_id {
        tracing::info!("[Realtime] User {} disconnected ({})", user_id, id);
    }
    writer.abort();
}
