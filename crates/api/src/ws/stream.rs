//! Change-stream fan-out.
//!
//! [`StreamRouter`] pumps each collection's store feed into the WebSocket
//! manager. An event only reaches connections whose authenticated owner
//! matches the event's resolved owner and whose subscription set contains
//! the collection, so cross-tenant delivery cannot happen here. Events
//! with no resolvable owner are delivered to nobody.

use std::sync::Arc;

use axum::extract::ws::Message;
use sceneflow_store::{FeedEvent, RecordStore, StoredRecord};
use serde::Serialize;
use serde_json::json;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Background tasks forwarding store change feeds to WebSocket clients.
pub struct StreamRouter {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl StreamRouter {
    /// Subscribe to every collection feed and start one pump task per
    /// collection.
    pub fn start(store: &dyn RecordStore, ws_manager: Arc<WsManager>) -> Self {
        let cancel = CancellationToken::new();
        let handles = vec![
            tokio::spawn(pump(
                store.character_feed(),
                Arc::clone(&ws_manager),
                cancel.clone(),
            )),
            tokio::spawn(pump(
                store.scene_feed(),
                Arc::clone(&ws_manager),
                cancel.clone(),
            )),
            tokio::spawn(pump(store.video_feed(), ws_manager, cancel.clone())),
        ];
        Self { cancel, handles }
    }

    /// Stop all pump tasks and wait for them to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

/// Forward one collection's feed until cancelled or the feed closes.
async fn pump<T>(
    mut receiver: broadcast::Receiver<FeedEvent<T>>,
    ws_manager: Arc<WsManager>,
    cancel: CancellationToken,
) where
    T: StoredRecord + Serialize + Clone + Send + 'static,
{
    let collection = T::COLLECTION;
    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            result = receiver.recv() => match result {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Clients reconcile dropped events on their next reload.
                    tracing::warn!(
                        collection = collection.as_str(),
                        skipped,
                        "Change feed lagged"
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(
                        collection = collection.as_str(),
                        "Change feed closed, stream router stopping"
                    );
                    break;
                }
            },
        };

        // No resolvable owner means no recipient.
        let Some(owner_email) = event.owner_email else {
            continue;
        };

        let mut frame = match serde_json::to_value(&event.change) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode change frame");
                continue;
            }
        };
        frame["type"] = json!("change");
        frame["collection"] = json!(collection.as_str());

        let message = Message::Text(frame.to_string().into());
        let sent = ws_manager.deliver(collection, &owner_email, message).await;
        tracing::debug!(
            collection = collection.as_str(),
            owner = %owner_email,
            sent,
            "Change frame routed"
        );
    }
}
