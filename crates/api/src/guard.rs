//! Ownership and state guard for scene review decisions.
//!
//! Every path that flips a scene's review status runs through
//! [`authorize_scene_transition`]: fetch, ownership check, then the
//! store's conditional transition. The conditional transition is what
//! makes concurrent decisions safe; two racing approvals see exactly one
//! success, so the relay behind it fires at most once.

use sceneflow_core::error::CoreError;
use sceneflow_core::status::Decision;
use sceneflow_core::types::RecordId;
use sceneflow_store::models::Scene;
use sceneflow_store::RecordStore;

use crate::error::AppResult;

/// Authorize and atomically claim a scene review decision.
///
/// Failure order is fixed: absent scene is `NotFound`, foreign scene is
/// `Forbidden` with a message that reveals nothing about the record, and
/// a scene no longer pending is `InvalidState`. A scene deleted between
/// the fetch and the claim surfaces as `InvalidState` as well; the claim
/// itself is the authority.
pub async fn authorize_scene_transition(
    store: &dyn RecordStore,
    scene_id: RecordId,
    caller_email: &str,
    decision: Decision,
) -> AppResult<Scene> {
    let scene = store.scene(scene_id).await?.ok_or(CoreError::NotFound {
        entity: "Scene",
        id: scene_id,
    })?;

    if scene.user_email != caller_email {
        return Err(CoreError::Forbidden("You do not have access to this scene".into()).into());
    }

    match store.transition_scene(scene_id, decision).await? {
        Some(updated) => Ok(updated),
        None => Err(CoreError::InvalidState("Scene is not pending approval".into()).into()),
    }
}
