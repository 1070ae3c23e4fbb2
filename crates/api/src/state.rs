use std::sync::Arc;

use sceneflow_relay::RelayClient;
use sceneflow_store::RecordStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The authoritative record store.
    pub store: Arc<dyn RecordStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// One-way client for the rendering pipeline's webhooks.
    pub relay: Arc<RelayClient>,
}
