//! Character entity model and DTOs.

use sceneflow_core::options::{AgeRange, Gender, VisualStyle};
use sceneflow_core::status::ReviewStatus;
use sceneflow_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::change::{Collection, StoredRecord};

/// A character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: RecordId,
    pub user_email: String,
    pub avatar_name: String,
    pub user_description: String,
    pub visual_style: VisualStyle,
    pub gender: Gender,
    pub age_range: AgeRange,
    // -- Derived by the rendering pipeline --
    pub canonical_description: Option<String>,
    pub reference_image_url: Option<String>,
    // -- Review lifecycle --
    pub status: ReviewStatus,
    pub created_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}

impl StoredRecord for Character {
    const COLLECTION: Collection = Collection::Characters;

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// DTO for inserting a new character.
///
/// The store assigns the id, creation time, and the initial
/// `pending_approval` status.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCharacter {
    pub user_email: String,
    pub avatar_name: String,
    pub user_description: String,
    pub visual_style: VisualStyle,
    pub gender: Gender,
    pub age_range: AgeRange,
    pub canonical_description: Option<String>,
    pub reference_image_url: Option<String>,
}

/// DTO for patching pipeline-derived fields. `None` leaves the current
/// value in place. Status is deliberately absent: transitions go through
/// the store's conditional transition only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterPatch {
    pub canonical_description: Option<String>,
    pub reference_image_url: Option<String>,
}
