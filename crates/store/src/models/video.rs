//! Video entity model and DTOs.

use sceneflow_core::status::VideoStatus;
use sceneflow_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::change::{Collection, StoredRecord};

/// A rendered (or rendering) video.
///
/// Videos carry no owner of their own: ownership resolves through the
/// scene back-reference. A video whose scene is gone resolves to no
/// owner and is visible to nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: RecordId,
    pub scene_id: Option<RecordId>,
    pub status: VideoStatus,
    /// Set when the render completes.
    pub video_url: Option<String>,
    pub duration_seconds: Option<f64>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl StoredRecord for Video {
    const COLLECTION: Collection = Collection::Videos;

    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// DTO for inserting a new video in `processing` state.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub scene_id: Option<RecordId>,
}
