use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use sceneflow_core::types::Timestamp;
use sceneflow_store::Collection;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// The verified owner identity the upgrade authenticated as. Change
    /// events are only delivered to connections whose owner matches the
    /// event's resolved owner.
    pub owner_email: String,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// Collections this connection has subscribed to.
    pub subscriptions: HashSet<Collection>,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new authenticated connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink. A fresh connection has no
    /// subscriptions; the client opts into collections explicitly.
    pub async fn add(
        &self,
        conn_id: String,
        owner_email: String,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            owner_email,
            sender: tx,
            subscriptions: HashSet::new(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID. Unknown IDs are a no-op.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Add a collection to a connection's subscription set.
    ///
    /// Returns `false` if the connection is unknown (already removed).
    pub async fn subscribe(&self, conn_id: &str, collection: Collection) -> bool {
        let mut conns = self.connections.write().await;
        match conns.get_mut(conn_id) {
            Some(conn) => {
                conn.subscriptions.insert(collection);
                true
            }
            None => false,
        }
    }

    /// Remove a collection from a connection's subscription set.
    pub async fn unsubscribe(&self, conn_id: &str, collection: Collection) {
        let mut conns = self.connections.write().await;
        if let Some(conn) = conns.get_mut(conn_id) {
            conn.subscriptions.remove(&collection);
        }
    }

    /// Deliver a change frame to every connection owned by `owner_email`
    /// that is subscribed to `collection`.
    ///
    /// Returns the number of connections the message was sent to.
    /// Connections whose send channels are closed are silently skipped
    /// (they are cleaned up by their own receive loops).
    pub async fn deliver(
        &self,
        collection: Collection,
        owner_email: &str,
        message: Message,
    ) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.owner_email == owner_email && conn.subscriptions.contains(&collection) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connection.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
