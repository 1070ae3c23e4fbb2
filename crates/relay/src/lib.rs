//! One-way client for the external rendering pipeline.
//!
//! The gateway hands accepted work to the pipeline's job webhooks and
//! passes the pipeline's immediate acknowledgment back to the caller.
//! Nothing here retries, polls, or waits for results: the eventual
//! outcome of a job arrives later through the record store's change
//! feeds, written by the pipeline's own ingest calls.

pub mod client;
pub mod endpoints;
pub mod job;

pub use client::{RelayClient, RelayError};
pub use endpoints::RelayEndpoints;
pub use job::{CharacterJob, SceneJob};
