//! Shared response envelope for read endpoints.
//!
//! Reads use a `{ "data": ... }` envelope. Workflow endpoints are exempt:
//! they pass the pipeline acknowledgment through verbatim, so their body
//! shape belongs to the pipeline.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
