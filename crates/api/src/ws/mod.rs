//! WebSocket change streaming.
//!
//! Provides connection management, the authenticated HTTP upgrade
//! handler, the store-feed fan-out, and heartbeat monitoring.

mod handler;
mod heartbeat;
pub mod manager;
mod stream;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use stream::StreamRouter;
