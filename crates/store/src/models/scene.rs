//! Scene entity model and DTOs.

use sceneflow_core::options::{CameraShot, Mood, VisualStyle};
use sceneflow_core::status::ReviewStatus;
use sceneflow_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::change::{Collection, StoredRecord};

/// A scene record.
///
/// `avatar_name` is a soft reference: scenes name the character they
/// feature rather than holding a foreign key, so deleting a character
/// never cascades into scene history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: RecordId,
    pub user_email: String,
    pub avatar_name: String,
    pub scene_name: String,
    pub action_description: String,
    pub location: String,
    pub mood_atmosphere: Mood,
    pub camera_shot: CameraShot,
    pub visual_style: VisualStyle,
    // -- Derived by the rendering pipeline --
    pub enhanced_prompt: Option<String>,
    pub first_frame_url: Option<String>,
    // -- Review lifecycle: exactly one of approved_at/rejected_at is ever
    //    set, matching a terminal status --
    pub status: ReviewStatus,
    pub created_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub rejected_at: Option<Timestamp>,
}

impl StoredRecord for Scene {
    const COLLECTION: Collection = Collection::Scenes;

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// DTO for inserting a new scene.
///
/// The store assigns the id, creation time, and the initial
/// `pending_approval` status.
#[derive(Debug, Clone, Deserialize)]
pub struct NewScene {
    pub user_email: String,
    pub avatar_name: String,
    pub scene_name: String,
    pub action_description: String,
    pub location: String,
    pub mood_atmosphere: Mood,
    pub camera_shot: CameraShot,
    pub visual_style: VisualStyle,
    pub enhanced_prompt: Option<String>,
    pub first_frame_url: Option<String>,
}

/// DTO for patching pipeline-derived fields. `None` leaves the current
/// value in place. Status is deliberately absent: transitions go through
/// the store's conditional transition only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenePatch {
    pub enhanced_prompt: Option<String>,
    pub first_frame_url: Option<String>,
}
