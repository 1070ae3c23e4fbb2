//! Change event sources.
//!
//! An [`EventSource`] is where a live collection's changes come from.
//! [`FeedSource`] consumes a record store's broadcast feed directly,
//! which is how in-process consumers and tests subscribe. [`WsSource`]
//! speaks the gateway's WebSocket protocol for remote clients. Both
//! yield plain [`Change`] values and perform no transformation of record
//! contents.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use sceneflow_core::types::RecordId;
use sceneflow_store::change::{Change, FeedEvent};
use sceneflow_store::StoredRecord;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;

/// Pull interface for a live change subscription.
///
/// Yields the next change addressed to this subscriber, or `None` once
/// the subscription has ended. Dropping the source releases the
/// subscription.
#[async_trait]
pub trait EventSource<T>: Send {
    async fn next_event(&mut self) -> Option<Change<T>>;
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Identity scope applied to a feed subscription.
///
/// Every subscription is scoped to an owner; single-record views narrow
/// further to one record id.
#[derive(Debug, Clone)]
pub struct Scope {
    owner_email: String,
    record_id: Option<RecordId>,
}

impl Scope {
    /// Everything owned by one identity.
    pub fn owner(owner_email: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into(),
            record_id: None,
        }
    }

    /// One record owned by one identity.
    pub fn record(owner_email: impl Into<String>, record_id: RecordId) -> Self {
        Self {
            owner_email: owner_email.into(),
            record_id: Some(record_id),
        }
    }

    /// Whether an event falls inside this scope.
    ///
    /// Events that resolved to no owner are admitted nowhere.
    pub fn admits<T: StoredRecord>(&self, event: &FeedEvent<T>) -> bool {
        if event.owner_email.as_deref() != Some(self.owner_email.as_str()) {
            return false;
        }
        match self.record_id {
            Some(id) => event.change.record_id() == id,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// FeedSource
// ---------------------------------------------------------------------------

/// Event source over a record store's broadcast feed.
pub struct FeedSource<T> {
    receiver: broadcast::Receiver<FeedEvent<T>>,
    scope: Scope,
}

impl<T> FeedSource<T> {
    pub fn new(receiver: broadcast::Receiver<FeedEvent<T>>, scope: Scope) -> Self {
        Self { receiver, scope }
    }
}

#[async_trait]
impl<T> EventSource<T> for FeedSource<T>
where
    T: StoredRecord + Clone + Send + 'static,
{
    async fn next_event(&mut self) -> Option<Change<T>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.scope.admits(&event) {
                        return Some(event.change);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Dropped events will be reconciled by the next reload.
                    tracing::warn!(skipped, "change feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// WsSource
// ---------------------------------------------------------------------------

/// Event source over the gateway's WebSocket change stream.
///
/// The gateway authenticates the upgrade with a bearer token and scopes
/// delivery to the token's identity, so no scope filter is applied here.
pub struct WsSource<T> {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    _record: std::marker::PhantomData<T>,
}

impl<T: StoredRecord> WsSource<T> {
    /// Connect to a gateway and subscribe to this record type's
    /// collection.
    ///
    /// * `ws_url` - WebSocket base URL, e.g. `ws://host:8080`.
    /// * `token`  - the caller's access token.
    pub async fn connect(ws_url: &str, token: &str) -> Result<Self, ClientError> {
        let url = format!("{ws_url}/api/v1/ws?token={token}");
        let (mut stream, _response) = connect_async(&url).await.map_err(|e| {
            ClientError::Connection(format!("failed to connect to {ws_url}: {e}"))
        })?;

        let subscribe = serde_json::json!({
            "type": "subscribe",
            "collection": T::COLLECTION.as_str(),
        });
        stream
            .send(Message::Text(subscribe.to_string()))
            .await
            .map_err(|e| ClientError::Connection(format!("subscribe failed: {e}")))?;

        tracing::debug!(collection = T::COLLECTION.as_str(), "subscribed to change stream");
        Ok(Self {
            stream,
            _record: std::marker::PhantomData,
        })
    }
}

#[async_trait]
impl<T> EventSource<T> for WsSource<T>
where
    T: StoredRecord + DeserializeOwned + Send,
{
    async fn next_event(&mut self) -> Option<Change<T>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(error = %e, "change stream transport error");
                    return None;
                }
            };

            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => return None,
                // Pings are answered by the transport; everything else
                // on this stream is envelope frames.
                _ => continue,
            };

            let frame: serde_json::Value = match serde_json::from_str(&text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable stream frame");
                    continue;
                }
            };
            if frame.get("type").and_then(|v| v.as_str()) != Some("change") {
                continue;
            }
            if frame.get("collection").and_then(|v| v.as_str()) != Some(T::COLLECTION.as_str()) {
                continue;
            }

            match serde_json::from_value::<Change<T>>(frame) {
                Ok(change) => return Some(change),
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable change payload");
                }
            }
        }
    }
}
