//! Request handlers for the gateway.
//!
//! Workflow handlers (`character::create`, `scene::create`,
//! `scene::approve`, `scene::reject`) compose identity verification,
//! payload validation, the ownership/state guard, and the pipeline
//! relay; the rest are owner-scoped reads and the pipeline's ingest
//! surface. Handlers map errors via [`crate::error::AppError`].

pub mod character;
pub mod credit;
pub mod pipeline;
pub mod scene;
pub mod video;
