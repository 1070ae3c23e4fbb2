//! Authentication extractors.
//!
//! - [`auth::AuthIdentity`] -- the verified user identity from a JWT
//!   Bearer token. Fail closed: no valid token, no handler.
//! - [`pipeline::PipelineAuth`] -- shared-token authentication for the
//!   rendering pipeline's ingest surface.

pub mod auth;
pub mod pipeline;
