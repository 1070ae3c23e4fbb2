//! Job payloads relayed to the pipeline.
//!
//! Both payloads carry the server-verified caller email. The only
//! constructors take the email as a separate argument from the validated
//! draft, so a client-supplied identity field can never reach a job.

use sceneflow_core::options::{AgeRange, CameraShot, Gender, Mood, VisualStyle};
use sceneflow_core::validation::{CharacterDraft, SceneDraft};
use serde::Serialize;

/// A character generation job.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterJob {
    pub avatar_name: String,
    pub user_description: String,
    pub visual_style: VisualStyle,
    pub gender: Gender,
    pub age_range: AgeRange,
    pub user_email: String,
}

impl CharacterJob {
    pub fn new(draft: CharacterDraft, user_email: String) -> Self {
        Self {
            avatar_name: draft.avatar_name,
            user_description: draft.user_description,
            visual_style: draft.visual_style,
            gender: draft.gender,
            age_range: draft.age_range,
            user_email,
        }
    }
}

/// A scene generation job.
#[derive(Debug, Clone, Serialize)]
pub struct SceneJob {
    pub avatar_name: String,
    pub scene_name: String,
    pub action: String,
    pub location: String,
    pub mood_atmosphere: Mood,
    pub camera_shot: CameraShot,
    pub visual_style: VisualStyle,
    pub user_email: String,
}

impl SceneJob {
    pub fn new(draft: SceneDraft, user_email: String) -> Self {
        Self {
            avatar_name: draft.avatar_name,
            scene_name: draft.scene_name,
            action: draft.action,
            location: draft.location,
            mood_atmosphere: draft.mood_atmosphere,
            camera_shot: draft.camera_shot,
            visual_style: draft.visual_style,
            user_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_serializes_labels_and_email() {
        let draft = CharacterDraft {
            avatar_name: "Mira".to_string(),
            user_description: "a cartographer".to_string(),
            visual_style: VisualStyle::StudioGhibli,
            gender: Gender::Female,
            age_range: AgeRange::YoungAdult,
        };
        let job = CharacterJob::new(draft, "a@example.com".to_string());
        let json = serde_json::to_value(&job).unwrap();

        assert_eq!(json["visual_style"], "Studio Ghibli");
        assert_eq!(json["age_range"], "Young Adult (18-25)");
        assert_eq!(json["user_email"], "a@example.com");
    }
}
