//! WebSocket integration tests
//!
//! These run over a real HTTP transport so the upgrade goes through hyper.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

#[tokio::test]
async fn test_auth_frame_and_direct_message() {
    let app = TestApp::with_http_transport().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;

    let mut socket = app.server.get_websocket("/ws").await.into_websocket().await;
    socket.send_json(&json!({ "type": "auth", "userId": bob.id })).await;
    let ack: Value = socket.receive_json().await;
    assert_eq!(ack, json!({ "type": "auth-ok", "userId": bob.id }));

    app.server
        .post("/api/messages")
        .authorization_bearer(&alice.token)
        .json(&json!({ "recipientId": bob.id, "content": "live" }))
        .await
        .assert_status(StatusCode::CREATED);

    let pushed: Value = socket.receive_json().await;
    assert_eq!(pushed["type"], "new-message");
    assert_eq!(pushed["data"]["content"], "live");
    assert_eq!(pushed["data"]["senderId"], Value::String(alice.id.clone()));

    let notification: Value = socket.receive_json().await;
    assert_eq!(notification["type"], "notification");
    assert_eq!(notification["data"]["type"], "message");
}

#[tokio::test]
async fn test_token_query_authenticates() {
    let app = TestApp::with_http_transport().await;
    let alice = app.user("alice").await;

    let mut socket = app
        .server
        .get_websocket(&format!("/ws?token={}", alice.token))
        .await
        .into_websocket()
        .await;
    let ack: Value = socket.receive_json().await;
    assert_eq!(ack["type"], "auth-ok");
    assert_eq!(ack["userId"], Value::String(alice.id.clone()));
    assert_eq!(app.state.connections.user_connection_count(&alice.id), 1);
}

#[tokio::test]
async fn test_post_subscribers_see_post_updates() {
    let app = TestApp::with_http_transport().await;
    let alice = app.user("alice").await;

    let mut socket = app.server.get_websocket("/ws").await.into_websocket().await;
    socket.send_json(&json!({ "type": "subscribe-posts" })).await;
    let ack: Value = socket.receive_json().await;
    assert_eq!(ack, json!({ "type": "subscribed", "channel": "posts" }));

    let post = app.post_as(&alice, "breaking").await;
    let added: Value = socket.receive_json().await;
    assert_eq!(added["type"], "post-update");
    assert_eq!(added["action"], "add");
    assert_eq!(added["data"]["id"], post["id"]);

    app.server
        .post(&format!("/api/posts/{}/comments", post["id"]))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "self reply" }))
        .await
        .assert_status(StatusCode::CREATED);
    let comment: Value = socket.receive_json().await;
    assert_eq!(comment["type"], "comment-update");
    assert_eq!(comment["action"], "add");

    app.server
        .delete(&format!("/api/posts/{}", post["id"]))
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();
    let deleted: Value = socket.receive_json().await;
    assert_eq!(deleted["action"], "delete");
}

#[tokio::test]
async fn test_closed_socket_is_removed() {
    let app = TestApp::with_http_transport().await;
    let alice = app.user("alice").await;

    let mut socket = app.server.get_websocket("/ws").await.into_websocket().await;
    socket.send_json(&json!({ "type": "auth", "token": alice.token })).await;
    let _ack: Value = socket.receive_json().await;
    assert_eq!(app.state.connections.user_connection_count(&alice.id), 1);

    socket.close().await;

    let mut remaining = 1;
    for _ in 0..50 {
        remaining = app.state.connections.user_connection_count(&alice.id);
        if remaining == 0 {
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(remaining, 0);
}
