//! Pipeline ingest handlers.
//!
//! The rendering pipeline writes its results back through these
//! endpoints, authenticated by the shared `X-Pipeline-Token` header.
//! Status changes go through the store's conditional transitions -- the
//! same chokepoint the gateway guard uses -- so a decision arriving here
//! can never double-apply either.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use sceneflow_core::error::CoreError;
use sceneflow_core::status::Decision;
use sceneflow_core::types::RecordId;
use sceneflow_store::models::{
    Character, CharacterPatch, CreditBalance, NewCharacter, NewScene, NewVideo, Scene, ScenePatch,
    Video,
};

use crate::error::AppResult;
use crate::middleware::pipeline::PipelineAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// A review decision as sent by the pipeline.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub decision: String,
}

impl DecisionRequest {
    fn parse(&self) -> Result<Decision, CoreError> {
        Decision::from_str(self.decision.trim()).ok_or(CoreError::Validation {
            field: "decision",
            message: "decision must be one of: approve, reject".to_string(),
        })
    }
}

/// Completion report for a rendered video.
#[derive(Debug, Deserialize)]
pub struct CompleteVideoRequest {
    pub video_url: String,
    pub duration_seconds: Option<f64>,
}

/// Absolute balance written by the payment system via the pipeline.
#[derive(Debug, Deserialize)]
pub struct SetCreditsRequest {
    pub credit_units: i64,
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// POST /api/v1/pipeline/characters -- insert a pending character.
pub async fn ingest_character(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Json(new): Json<NewCharacter>,
) -> AppResult<Json<DataResponse<Character>>> {
    let character = state.store.insert_character(new).await?;
    tracing::info!(character_id = %character.id, "Pipeline ingested character");
    Ok(Json(DataResponse { data: character }))
}

/// PATCH /api/v1/pipeline/characters/{id} -- write derived fields.
pub async fn patch_character(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<CharacterPatch>,
) -> AppResult<Json<DataResponse<Character>>> {
    match state.store.patch_character(id, patch).await? {
        Some(character) => Ok(Json(DataResponse { data: character })),
        None => Err(CoreError::NotFound {
            entity: "Character",
            id,
        }
        .into()),
    }
}

/// POST /api/v1/pipeline/characters/{id}/decision -- conditional
/// approve/reject of a pending character.
pub async fn decide_character(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<DecisionRequest>,
) -> AppResult<Json<DataResponse<Character>>> {
    let decision = request.parse()?;

    if state.store.character(id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Character",
            id,
        }
        .into());
    }

    match state.store.transition_character(id, decision).await? {
        Some(character) => {
            tracing::info!(
                character_id = %id,
                decision = decision.as_str(),
                "Pipeline decided character"
            );
            Ok(Json(DataResponse { data: character }))
        }
        None => Err(CoreError::InvalidState("Character is not pending approval".into()).into()),
    }
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

/// POST /api/v1/pipeline/scenes -- insert a pending scene.
pub async fn ingest_scene(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Json(new): Json<NewScene>,
) -> AppResult<Json<DataResponse<Scene>>> {
    let scene = state.store.insert_scene(new).await?;
    tracing::info!(scene_id = %scene.id, "Pipeline ingested scene");
    Ok(Json(DataResponse { data: scene }))
}

/// PATCH /api/v1/pipeline/scenes/{id} -- write the enhanced prompt and
/// first-frame preview.
pub async fn patch_scene(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<ScenePatch>,
) -> AppResult<Json<DataResponse<Scene>>> {
    match state.store.patch_scene(id, patch).await? {
        Some(scene) => Ok(Json(DataResponse { data: scene })),
        None => Err(CoreError::NotFound { entity: "Scene", id }.into()),
    }
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// POST /api/v1/pipeline/videos -- insert a processing video.
pub async fn ingest_video(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Json(new): Json<NewVideo>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = state.store.insert_video(new).await?;
    tracing::info!(video_id = %video.id, "Pipeline ingested video");
    Ok(Json(DataResponse { data: video }))
}

/// POST /api/v1/pipeline/videos/{id}/complete -- conditional
/// processing→completed with the output URL and duration.
pub async fn complete_video(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<CompleteVideoRequest>,
) -> AppResult<Json<DataResponse<Video>>> {
    if state.store.video(id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "Video", id }.into());
    }

    match state
        .store
        .complete_video(id, request.video_url, request.duration_seconds)
        .await?
    {
        Some(video) => {
            tracing::info!(video_id = %id, "Pipeline completed video");
            Ok(Json(DataResponse { data: video }))
        }
        None => Err(CoreError::InvalidState("Video is not processing".into()).into()),
    }
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// PUT /api/v1/pipeline/credits/{email} -- upsert a balance to an
/// absolute unit count.
pub async fn put_credits(
    _auth: PipelineAuth,
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<SetCreditsRequest>,
) -> AppResult<Json<DataResponse<CreditBalance>>> {
    let balance = state
        .store
        .set_credit_units(&email, request.credit_units)
        .await?;
    Ok(Json(DataResponse { data: balance }))
}
