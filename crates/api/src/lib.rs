//! Sceneflow gateway library.
//!
//! Exposes the building blocks (config, state, error handling, guard,
//! routes, WebSocket streaming) so integration tests and the binary
//! entrypoint share the same router and middleware stack.

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
