//! The record store facade.
//!
//! [`RecordStore`] is the seam between the gateway and whatever holds the
//! records. Implementations must make each method atomic with respect to
//! the others; in particular the conditional transitions are the only way
//! any caller changes a review or render status, and a second caller's
//! transition must observe the first caller's result.

use async_trait::async_trait;
use sceneflow_core::status::Decision;
use sceneflow_core::types::RecordId;
use tokio::sync::broadcast;

use crate::change::FeedEvent;
use crate::models::{
    Character, CharacterPatch, CreditBalance, NewCharacter, NewScene, NewVideo, Scene, ScenePatch,
    Video,
};

/// Failure inside a record store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store failure: {0}")]
    Backend(String),
}

/// Async facade over the record store.
///
/// Reads scoped by owner return newest-first. Lookups return `Ok(None)`
/// for absent records; conditional mutations return `Ok(None)` when the
/// record was not in the required state (or vanished), so callers can
/// map a lost race without re-reading.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // -- Characters --

    async fn insert_character(&self, new: NewCharacter) -> Result<Character, StoreError>;

    async fn character(&self, id: RecordId) -> Result<Option<Character>, StoreError>;

    /// All characters owned by `owner_email`, newest first, optionally
    /// narrowed to approved ones.
    async fn characters_for(
        &self,
        owner_email: &str,
        only_approved: bool,
    ) -> Result<Vec<Character>, StoreError>;

    async fn patch_character(
        &self,
        id: RecordId,
        patch: CharacterPatch,
    ) -> Result<Option<Character>, StoreError>;

    /// Claim the `pending_approval -> terminal` transition. Returns the
    /// updated record, or `None` if the character was not pending.
    async fn transition_character(
        &self,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<Character>, StoreError>;

    async fn delete_character(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Subscribe to character changes.
    fn character_feed(&self) -> broadcast::Receiver<FeedEvent<Character>>;

    // -- Scenes --

    async fn insert_scene(&self, new: NewScene) -> Result<Scene, StoreError>;

    async fn scene(&self, id: RecordId) -> Result<Option<Scene>, StoreError>;

    async fn scenes_for(&self, owner_email: &str) -> Result<Vec<Scene>, StoreError>;

    async fn patch_scene(&self, id: RecordId, patch: ScenePatch)
        -> Result<Option<Scene>, StoreError>;

    /// Claim the `pending_approval -> terminal` transition. Returns the
    /// updated record, or `None` if the scene was not pending.
    async fn transition_scene(
        &self,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<Scene>, StoreError>;

    async fn delete_scene(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Subscribe to scene changes.
    fn scene_feed(&self) -> broadcast::Receiver<FeedEvent<Scene>>;

    // -- Videos --

    async fn insert_video(&self, new: NewVideo) -> Result<Video, StoreError>;

    async fn video(&self, id: RecordId) -> Result<Option<Video>, StoreError>;

    /// All videos whose scene is owned by `owner_email`, newest first.
    async fn videos_for(&self, owner_email: &str) -> Result<Vec<Video>, StoreError>;

    /// The video produced by a scene, if any.
    async fn video_for_scene(&self, scene_id: RecordId) -> Result<Option<Video>, StoreError>;

    /// Claim the `processing -> completed` transition. Returns the updated
    /// record, or `None` if the video was not processing.
    async fn complete_video(
        &self,
        id: RecordId,
        video_url: String,
        duration_seconds: Option<f64>,
    ) -> Result<Option<Video>, StoreError>;

    async fn delete_video(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Subscribe to video changes.
    fn video_feed(&self) -> broadcast::Receiver<FeedEvent<Video>>;

    // -- Credits --

    async fn credit_balance(&self, owner_email: &str) -> Result<Option<CreditBalance>, StoreError>;

    /// Upsert a balance to an absolute unit count.
    async fn set_credit_units(
        &self,
        owner_email: &str,
        units: i64,
    ) -> Result<CreditBalance, StoreError>;
}
