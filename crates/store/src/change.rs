//! Change events emitted by the record store.
//!
//! Every mutation on a streamed collection produces a [`FeedEvent`] on
//! that collection's broadcast feed. Events carry the owner they resolved
//! to at emit time so routing layers can scope delivery without touching
//! the store again.

use sceneflow_core::types::RecordId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Names of the record collections the store can stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Characters,
    Scenes,
    Videos,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Scenes => "scenes",
            Self::Videos => "videos",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "characters" => Some(Self::Characters),
            "scenes" => Some(Self::Scenes),
            "videos" => Some(Self::Videos),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Changes
// ---------------------------------------------------------------------------

/// Implemented by record types that live in a streamed collection.
pub trait StoredRecord {
    /// The collection this record type belongs to.
    const COLLECTION: Collection;

    /// The record's identifier.
    fn record_id(&self) -> RecordId;
}

/// A single mutation observed on a collection.
///
/// Inserts and updates carry the full post-mutation record; deletes carry
/// only the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum Change<T> {
    Insert(T),
    Update(T),
    Delete(RecordId),
}

impl<T: StoredRecord> Change<T> {
    /// The id of the record this change concerns.
    pub fn record_id(&self) -> RecordId {
        match self {
            Self::Insert(record) | Self::Update(record) => record.record_id(),
            Self::Delete(id) => *id,
        }
    }
}

/// A change paired with the owner it resolved to when emitted.
///
/// `owner_email` is `None` when no owner could be resolved (a video whose
/// scene is missing); such events are delivered to nobody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent<T> {
    pub owner_email: Option<String>,
    pub change: Change<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Video;
    use chrono::Utc;
    use sceneflow_core::status::VideoStatus;

    fn video(id: RecordId) -> Video {
        Video {
            id,
            scene_id: None,
            status: VideoStatus::Processing,
            video_url: None,
            duration_seconds: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_change_serializes_tagged() {
        let id = RecordId::new_v4();
        let json = serde_json::to_value(Change::Insert(video(id))).unwrap();
        assert_eq!(json["op"], "insert");
        assert_eq!(json["data"]["id"], id.to_string());

        let json = serde_json::to_value(Change::<Video>::Delete(id)).unwrap();
        assert_eq!(json["op"], "delete");
        assert_eq!(json["data"], id.to_string());
    }

    #[test]
    fn test_change_record_id_covers_all_ops() {
        let id = RecordId::new_v4();
        assert_eq!(Change::Insert(video(id)).record_id(), id);
        assert_eq!(Change::Update(video(id)).record_id(), id);
        assert_eq!(Change::<Video>::Delete(id).record_id(), id);
    }

    #[test]
    fn test_collection_round_trip() {
        for c in [Collection::Characters, Collection::Scenes, Collection::Videos] {
            assert_eq!(Collection::from_str(c.as_str()), Some(c));
        }
        assert_eq!(Collection::from_str("credits"), None);
    }
}
