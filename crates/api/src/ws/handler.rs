use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use sceneflow_store::Collection;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::identity_from_token;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters for the WebSocket upgrade.
///
/// Browsers cannot set headers on WebSocket upgrades, so the token rides
/// in the query string. An absent token fails validation like any other
/// bad token.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    token: String,
}

/// Frames a client may send after the upgrade.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    Subscribe { collection: String },
    Unsubscribe { collection: String },
}

/// GET /api/v1/ws -- authenticate and upgrade to WebSocket.
///
/// The upgrade is refused with 401 unless the token resolves to a
/// verified identity; every frame delivered on the socket afterwards is
/// scoped to that identity.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let identity = identity_from_token(&query.token, &state.config.jwt)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, identity.email)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes subscribe/unsubscribe frames on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, owner_email: String) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, owner = %owner_email, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), owner_email).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_frame(&ws_manager, &conn_id, &text).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Apply one client frame to the connection's subscription set.
///
/// Undecodable frames and unknown collection names are logged and
/// dropped; the stream protocol has no error channel worth building for
/// a client that is already broken.
async fn handle_frame(ws_manager: &WsManager, conn_id: &str, text: &str) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Undecodable client frame");
            return;
        }
    };

    match frame {
        ClientFrame::Subscribe { collection } => match Collection::from_str(&collection) {
            Some(collection) => {
                ws_manager.subscribe(conn_id, collection).await;
                tracing::debug!(conn_id = %conn_id, collection = collection.as_str(), "Subscribed");
            }
            None => {
                tracing::debug!(conn_id = %conn_id, collection = %collection, "Unknown collection");
            }
        },
        ClientFrame::Unsubscribe { collection } => {
            if let Some(collection) = Collection::from_str(&collection) {
                ws_manager.unsubscribe(conn_id, collection).await;
                tracing::debug!(conn_id = %conn_id, collection = collection.as_str(), "Unsubscribed");
            }
        }
    }
}
