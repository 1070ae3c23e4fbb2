//! Character workflow and read handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use sceneflow_core::error::CoreError;
use sceneflow_core::types::RecordId;
use sceneflow_core::validation::{validate_create_character, CreateCharacterRequest};
use sceneflow_relay::CharacterJob;
use sceneflow_store::models::Character;

use crate::error::AppResult;
use crate::middleware::auth::AuthIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/characters
///
/// Validate the payload and relay a character generation job to the
/// pipeline. The job carries the verified token identity; nothing from
/// the request body can override it. The pipeline's acknowledgment is
/// returned verbatim.
pub async fn create_character(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<CreateCharacterRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let draft = validate_create_character(&input)?;
    let job = CharacterJob::new(draft, auth.email);

    let ack = state.relay.submit_character(&job).await?;

    tracing::info!(avatar_name = %job.avatar_name, "Character submitted to pipeline");
    Ok(Json(ack))
}

/// Query parameters for listing characters.
#[derive(Debug, Deserialize)]
pub struct CharacterListQuery {
    /// Narrow to characters available for scene generation.
    #[serde(default)]
    pub only_approved: bool,
}

/// GET /api/v1/characters
///
/// The caller's characters, newest first.
pub async fn list_characters(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<CharacterListQuery>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    let characters = state
        .store
        .characters_for(&auth.email, query.only_approved)
        .await?;
    Ok(Json(DataResponse { data: characters }))
}

/// GET /api/v1/characters/{id}
///
/// A foreign character is indistinguishable from an absent one.
pub async fn get_character(
    auth: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Character>>> {
    match state.store.character(id).await? {
        Some(character) if character.user_email == auth.email => {
            Ok(Json(DataResponse { data: character }))
        }
        _ => Err(CoreError::NotFound {
            entity: "Character",
            id,
        }
        .into()),
    }
}
