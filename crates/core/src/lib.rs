//! Domain types shared across the sceneflow services: record identifiers,
//! the approval state machine, creative option catalogs, request
//! validation, and the core error type.

pub mod credits;
pub mod error;
pub mod options;
pub mod status;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use types::{RecordId, Timestamp};
