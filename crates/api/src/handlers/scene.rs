//! Scene workflow, review decision, and read handlers.

use axum::extract::{Path, State};
use axum::Json;

use sceneflow_core::error::CoreError;
use sceneflow_core::status::Decision;
use sceneflow_core::types::RecordId;
use sceneflow_core::validation::{validate_create_scene, CreateSceneRequest};
use sceneflow_relay::SceneJob;
use sceneflow_store::models::{Scene, Video};

use crate::error::AppResult;
use crate::guard::authorize_scene_transition;
use crate::middleware::auth::AuthIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/scenes
///
/// Validate the payload and relay a scene generation job to the
/// pipeline. The acknowledgment is returned verbatim.
pub async fn create_scene(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<CreateSceneRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let draft = validate_create_scene(&input)?;
    let job = SceneJob::new(draft, auth.email);

    let ack = state.relay.submit_scene(&job).await?;

    tracing::info!(scene_name = %job.scene_name, "Scene submitted to pipeline");
    Ok(Json(ack))
}

/// POST /api/v1/scenes/{id}/approve
///
/// Claim the approval through the guard, then notify the pipeline to
/// start rendering. A relay failure after the claim does not roll the
/// decision back; the scene stays approved and the error surfaces as
/// 502.
pub async fn approve_scene(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Path(scene_id): Path<RecordId>,
) -> AppResult<Json<serde_json::Value>> {
    authorize_scene_transition(
        state.store.as_ref(),
        scene_id,
        &auth.email,
        Decision::Approve,
    )
    .await?;

    let ack = state.relay.approve_scene(scene_id).await?;

    tracing::info!(scene_id = %scene_id, "Scene approved");
    Ok(Json(ack))
}

/// POST /api/v1/scenes/{id}/reject
pub async fn reject_scene(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Path(scene_id): Path<RecordId>,
) -> AppResult<Json<serde_json::Value>> {
    authorize_scene_transition(
        state.store.as_ref(),
        scene_id,
        &auth.email,
        Decision::Reject,
    )
    .await?;

    let ack = state.relay.reject_scene(scene_id).await?;

    tracing::info!(scene_id = %scene_id, "Scene rejected");
    Ok(Json(ack))
}

/// GET /api/v1/scenes
///
/// The caller's scenes, newest first.
pub async fn list_scenes(
    auth: AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Scene>>>> {
    let scenes = state.store.scenes_for(&auth.email).await?;
    Ok(Json(DataResponse { data: scenes }))
}

/// GET /api/v1/scenes/{id}
///
/// A foreign scene is indistinguishable from an absent one.
pub async fn get_scene(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Scene>>> {
    match state.store.scene(id).await? {
        Some(scene) if scene.user_email == auth.email => Ok(Json(DataResponse { data: scene })),
        _ => Err(CoreError::NotFound { entity: "Scene", id }.into()),
    }
}

/// GET /api/v1/scenes/{id}/video
///
/// The video rendered from a scene, `null` while the pipeline has not
/// reported back. Ownership is checked on the scene; the video inherits
/// it.
pub async fn get_scene_video(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Option<Video>>>> {
    match state.store.scene(id).await? {
        Some(scene) if scene.user_email == auth.email => {
            let video = state.store.video_for_scene(id).await?;
            Ok(Json(DataResponse { data: video }))
        }
        _ => Err(CoreError::NotFound { entity: "Scene", id }.into()),
    }
}
