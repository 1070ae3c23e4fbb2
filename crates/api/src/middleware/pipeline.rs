//! Shared-token authentication for the pipeline ingest surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sceneflow_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Marker extractor proving the request came from the rendering
/// pipeline.
///
/// The pipeline authenticates with the shared `X-Pipeline-Token` header.
/// Fail closed: a missing or mismatched token is 401, indistinguishable
/// between the two cases.
#[derive(Debug, Clone, Copy)]
pub struct PipelineAuth;

impl FromRequestParts<AppState> for PipelineAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-pipeline-token")
            .and_then(|v| v.to_str().ok());

        match token {
            Some(token) if token == state.config.pipeline_token => Ok(PipelineAuth),
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Invalid pipeline token".into(),
            ))),
        }
    }
}
