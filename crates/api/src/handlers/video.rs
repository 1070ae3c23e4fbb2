//! Video read handlers.

use axum::extract::State;
use axum::Json;

use sceneflow_store::models::Video;

use crate::error::AppResult;
use crate::middleware::auth::AuthIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/videos
///
/// The caller's videos, newest first. Ownership resolves through each
/// video's scene; a video whose scene is gone belongs to nobody and is
/// never listed.
pub async fn list_videos(
    auth: AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = state.store.videos_for(&auth.email).await?;
    Ok(Json(DataResponse { data: videos }))
}
