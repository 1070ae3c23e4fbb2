//! In-memory record store.
//!
//! [`MemoryStore`] keeps every collection behind a single `RwLock`, which
//! is what makes the conditional transitions atomic: a transition holds
//! the write lock across its check and its mutation, so a concurrent
//! caller always observes the post-transition state. Each mutation emits
//! a [`FeedEvent`] on the collection's broadcast feed with the owner
//! resolved at emit time.

use std::collections::HashMap;

use chrono::Utc;
use sceneflow_core::status::{Decision, ReviewStatus, VideoStatus};
use sceneflow_core::types::RecordId;
use tokio::sync::{broadcast, RwLock};

use crate::change::{Change, FeedEvent};
use crate::models::{
    Character, CharacterPatch, CreditBalance, NewCharacter, NewScene, NewVideo, Scene, ScenePatch,
    Video,
};
use crate::store::{RecordStore, StoreError};

/// Buffer capacity for each collection feed.
///
/// When a feed buffer is full the oldest un-consumed events are dropped
/// and slow receivers observe `RecvError::Lagged`.
const FEED_CAPACITY: usize = 1024;

pub struct MemoryStore {
    inner: RwLock<Inner>,
    character_tx: broadcast::Sender<FeedEvent<Character>>,
    scene_tx: broadcast::Sender<FeedEvent<Scene>>,
    video_tx: broadcast::Sender<FeedEvent<Video>>,
}

#[derive(Default)]
struct Inner {
    characters: Vec<Character>,
    scenes: Vec<Scene>,
    videos: Vec<Video>,
    credits: HashMap<String, CreditBalance>,
}

impl Inner {
    /// Resolve a video's owner through its scene back-reference.
    fn video_owner(&self, video: &Video) -> Option<String> {
        let scene_id = video.scene_id?;
        self.scenes
            .iter()
            .find(|s| s.id == scene_id)
            .map(|s| s.user_email.clone())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (character_tx, _) = broadcast::channel(FEED_CAPACITY);
        let (scene_tx, _) = broadcast::channel(FEED_CAPACITY);
        let (video_tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            inner: RwLock::new(Inner::default()),
            character_tx,
            scene_tx,
            video_tx,
        }
    }

    fn send_character(&self, owner_email: Option<String>, change: Change<Character>) {
        // A SendError only means there are zero subscribers right now.
        let _ = self.character_tx.send(FeedEvent { owner_email, change });
    }

    fn send_scene(&self, owner_email: Option<String>, change: Change<Scene>) {
        let _ = self.scene_tx.send(FeedEvent { owner_email, change });
    }

    fn send_video(&self, owner_email: Option<String>, change: Change<Video>) {
        let _ = self.video_tx.send(FeedEvent { owner_email, change });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    // -- Characters --

    async fn insert_character(&self, new: NewCharacter) -> Result<Character, StoreError> {
        let character = Character {
            id: RecordId::new_v4(),
            user_email: new.user_email,
            avatar_name: new.avatar_name,
            user_description: new.user_description,
            visual_style: new.visual_style,
            gender: new.gender,
            age_range: new.age_range,
            canonical_description: new.canonical_description,
            reference_image_url: new.reference_image_url,
            status: ReviewStatus::PendingApproval,
            created_at: Utc::now(),
            approved_at: None,
        };
        self.inner.write().await.characters.push(character.clone());
        self.send_character(
            Some(character.user_email.clone()),
            Change::Insert(character.clone()),
        );
        Ok(character)
    }

    async fn character(&self, id: RecordId) -> Result<Option<Character>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn characters_for(
        &self,
        owner_email: &str,
        only_approved: bool,
    ) -> Result<Vec<Character>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .characters
            .iter()
            .rev()
            .filter(|c| c.user_email == owner_email)
            .filter(|c| !only_approved || c.status == ReviewStatus::Approved)
            .cloned()
            .collect())
    }

    async fn patch_character(
        &self,
        id: RecordId,
        patch: CharacterPatch,
    ) -> Result<Option<Character>, StoreError> {
        let updated = {
            let mut inner = self.inner.write().await;
            let character = match inner.characters.iter_mut().find(|c| c.id == id) {
                Some(c) => c,
                None => return Ok(None),
            };
            if let Some(v) = patch.canonical_description {
                character.canonical_description = Some(v);
            }
            if let Some(v) = patch.reference_image_url {
                character.reference_image_url = Some(v);
            }
            character.clone()
        };
        self.send_character(
            Some(updated.user_email.clone()),
            Change::Update(updated.clone()),
        );
        Ok(Some(updated))
    }

    async fn transition_character(
        &self,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<Character>, StoreError> {
        let updated = {
            let mut inner = self.inner.write().await;
            let character = match inner.characters.iter_mut().find(|c| c.id == id) {
                Some(c) => c,
                None => return Ok(None),
            };
            if !character.status.can_transition(decision.target_status()) {
                return Ok(None);
            }
            character.status = decision.target_status();
            if decision == Decision::Approve {
                character.approved_at = Some(Utc::now());
            }
            character.clone()
        };
        self.send_character(
            Some(updated.user_email.clone()),
            Change::Update(updated.clone()),
        );
        Ok(Some(updated))
    }

    async fn delete_character(&self, id: RecordId) -> Result<bool, StoreError> {
        let removed = {
            let mut inner = self.inner.write().await;
            match inner.characters.iter().position(|c| c.id == id) {
                Some(pos) => inner.characters.remove(pos),
                None => return Ok(false),
            }
        };
        self.send_character(Some(removed.user_email), Change::Delete(id));
        Ok(true)
    }

    fn character_feed(&self) -> broadcast::Receiver<FeedEvent<Character>> {
        self.character_tx.subscribe()
    }

    // -- Scenes --

    async fn insert_scene(&self, new: NewScene) -> Result<Scene, StoreError> {
        let scene = Scene {
            id: RecordId::new_v4(),
            user_email: new.user_email,
            avatar_name: new.avatar_name,
            scene_name: new.scene_name,
            action_description: new.action_description,
            location: new.location,
            mood_atmosphere: new.mood_atmosphere,
            camera_shot: new.camera_shot,
            visual_style: new.visual_style,
            enhanced_prompt: new.enhanced_prompt,
            first_frame_url: new.first_frame_url,
            status: ReviewStatus::PendingApproval,
            created_at: Utc::now(),
            approved_at: None,
            rejected_at: None,
        };
        self.inner.write().await.scenes.push(scene.clone());
        self.send_scene(Some(scene.user_email.clone()), Change::Insert(scene.clone()));
        Ok(scene)
    }

    async fn scene(&self, id: RecordId) -> Result<Option<Scene>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.scenes.iter().find(|s| s.id == id).cloned())
    }

    async fn scenes_for(&self, owner_email: &str) -> Result<Vec<Scene>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .scenes
            .iter()
            .rev()
            .filter(|s| s.user_email == owner_email)
            .cloned()
            .collect())
    }

    async fn patch_scene(
        &self,
        id: RecordId,
        patch: ScenePatch,
    ) -> Result<Option<Scene>, StoreError> {
        let updated = {
            let mut inner = self.inner.write().await;
            let scene = match inner.scenes.iter_mut().find(|s| s.id == id) {
                Some(s) => s,
                None => return Ok(None),
            };
            if let Some(v) = patch.enhanced_prompt {
                scene.enhanced_prompt = Some(v);
            }
            if let Some(v) = patch.first_frame_url {
                scene.first_frame_url = Some(v);
            }
            scene.clone()
        };
        self.send_scene(Some(updated.user_email.clone()), Change::Update(updated.clone()));
        Ok(Some(updated))
    }

    async fn transition_scene(
        &self,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<Scene>, StoreError> {
        let updated = {
            let mut inner = self.inner.write().await;
            let scene = match inner.scenes.iter_mut().find(|s| s.id == id) {
                Some(s) => s,
                None => return Ok(None),
            };
            if !scene.status.can_transition(decision.target_status()) {
                return Ok(None);
            }
            scene.status = decision.target_status();
            match decision {
                Decision::Approve => scene.approved_at = Some(Utc::now()),
                Decision::Reject => scene.rejected_at = Some(Utc::now()),
            }
            scene.clone()
        };
        self.send_scene(Some(updated.user_email.clone()), Change::Update(updated.clone()));
        Ok(Some(updated))
    }

    async fn delete_scene(&self, id: RecordId) -> Result<bool, StoreError> {
        let removed = {
            let mut inner = self.inner.write().await;
            match inner.scenes.iter().position(|s| s.id == id) {
                Some(pos) => inner.scenes.remove(pos),
                None => return Ok(false),
            }
        };
        self.send_scene(Some(removed.user_email), Change::Delete(id));
        Ok(true)
    }

    fn scene_feed(&self) -> broadcast::Receiver<FeedEvent<Scene>> {
        self.scene_tx.subscribe()
    }

    // -- Videos --

    async fn insert_video(&self, new: NewVideo) -> Result<Video, StoreError> {
        let video = Video {
            id: RecordId::new_v4(),
            scene_id: new.scene_id,
            status: VideoStatus::Processing,
            video_url: None,
            duration_seconds: None,
            created_at: Utc::now(),
            completed_at: None,
        };
        let owner = {
            let mut inner = self.inner.write().await;
            inner.videos.push(video.clone());
            inner.video_owner(&video)
        };
        self.send_video(owner, Change::Insert(video.clone()));
        Ok(video)
    }

    async fn video(&self, id: RecordId) -> Result<Option<Video>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn videos_for(&self, owner_email: &str) -> Result<Vec<Video>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .videos
            .iter()
            .rev()
            .filter(|v| inner.video_owner(v).as_deref() == Some(owner_email))
            .cloned()
            .collect())
    }

    async fn video_for_scene(&self, scene_id: RecordId) -> Result<Option<Video>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .videos
            .iter()
            .rev()
            .find(|v| v.scene_id == Some(scene_id))
            .cloned())
    }

    async fn complete_video(
        &self,
        id: RecordId,
        video_url: String,
        duration_seconds: Option<f64>,
    ) -> Result<Option<Video>, StoreError> {
        let (updated, owner) = {
            let mut inner = self.inner.write().await;
            let video = match inner.videos.iter().position(|v| v.id == id) {
                Some(pos) => &mut inner.videos[pos],
                None => return Ok(None),
            };
            if video.status != VideoStatus::Processing {
                return Ok(None);
            }
            video.status = VideoStatus::Completed;
            video.video_url = Some(video_url);
            video.duration_seconds = duration_seconds;
            video.completed_at = Some(Utc::now());
            let updated = video.clone();
            let owner = inner.video_owner(&updated);
            (updated, owner)
        };
        self.send_video(owner, Change::Update(updated.clone()));
        Ok(Some(updated))
    }

    async fn delete_video(&self, id: RecordId) -> Result<bool, StoreError> {
        let owner = {
            let mut inner = self.inner.write().await;
            let removed = match inner.videos.iter().position(|v| v.id == id) {
                Some(pos) => inner.videos.remove(pos),
                None => return Ok(false),
            };
            inner.video_owner(&removed)
        };
        self.send_video(owner, Change::Delete(id));
        Ok(true)
    }

    fn video_feed(&self) -> broadcast::Receiver<FeedEvent<Video>> {
        self.video_tx.subscribe()
    }

    // -- Credits --

    async fn credit_balance(&self, owner_email: &str) -> Result<Option<CreditBalance>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.credits.get(owner_email).cloned())
    }

    async fn set_credit_units(
        &self,
        owner_email: &str,
        units: i64,
    ) -> Result<CreditBalance, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let balance = inner
            .credits
            .entry(owner_email.to_string())
            .and_modify(|b| {
                b.credit_units = units;
                b.updated_at = now;
            })
            .or_insert_with(|| CreditBalance {
                id: RecordId::new_v4(),
                user_email: owner_email.to_string(),
                credit_units: units,
                created_at: now,
                updated_at: now,
            });
        Ok(balance.clone())
    }
}
