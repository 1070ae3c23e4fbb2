//! Request validation for the creation endpoints.
//!
//! Checks run rule-major: presence of every required field, then length
//! bounds, then catalog membership. The first failing check wins and the
//! error names the offending field. Every check operates on the trimmed
//! value, and the trimmed values are what the normalized drafts carry
//! downstream.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::options::{AgeRange, CameraShot, Gender, Mood, VisualStyle};

// ---------------------------------------------------------------------------
// Length limits
// ---------------------------------------------------------------------------

/// Maximum length for name-class fields (character and scene names).
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for description-class fields.
pub const MAX_DESCRIPTION_LEN: usize = 2_000;

/// Maximum length for a scene location.
pub const MAX_LOCATION_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Raw requests
// ---------------------------------------------------------------------------

/// Create-character request as received from the client.
///
/// Fields default to empty so an absent field reports as missing rather
/// than failing JSON extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    #[serde(default)]
    pub avatar_name: String,
    #[serde(default)]
    pub user_description: String,
    #[serde(default)]
    pub visual_style: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age_range: String,
}

/// Create-scene request as received from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSceneRequest {
    #[serde(default)]
    pub avatar_name: String,
    #[serde(default)]
    pub scene_name: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mood_atmosphere: String,
    #[serde(default)]
    pub camera_shot: String,
    #[serde(default)]
    pub visual_style: String,
}

// ---------------------------------------------------------------------------
// Normalized drafts
// ---------------------------------------------------------------------------

/// A validated, normalized character submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDraft {
    pub avatar_name: String,
    pub user_description: String,
    pub visual_style: VisualStyle,
    pub gender: Gender,
    pub age_range: AgeRange,
}

/// A validated, normalized scene submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDraft {
    pub avatar_name: String,
    pub scene_name: String,
    pub action: String,
    pub location: String,
    pub mood_atmosphere: Mood,
    pub camera_shot: CameraShot,
    pub visual_style: VisualStyle,
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a character submission, producing a normalized draft.
pub fn validate_create_character(req: &CreateCharacterRequest) -> Result<CharacterDraft, CoreError> {
    let avatar_name = req.avatar_name.trim();
    let user_description = req.user_description.trim();
    let visual_style = req.visual_style.trim();
    let gender = req.gender.trim();
    let age_range = req.age_range.trim();

    require("avatar_name", avatar_name)?;
    require("user_description", user_description)?;
    require("visual_style", visual_style)?;
    require("gender", gender)?;
    require("age_range", age_range)?;

    check_len("avatar_name", "Avatar name", avatar_name, MAX_NAME_LEN)?;
    check_len(
        "user_description",
        "Description",
        user_description,
        MAX_DESCRIPTION_LEN,
    )?;

    let visual_style = VisualStyle::from_str(visual_style).ok_or_else(|| {
        CoreError::validation(
            "visual_style",
            format!("Invalid visual style. Must be one of: {}", VisualStyle::allowed()),
        )
    })?;
    let gender = Gender::from_str(gender).ok_or_else(|| {
        CoreError::validation(
            "gender",
            format!("Invalid gender. Must be one of: {}", Gender::allowed()),
        )
    })?;
    let age_range = AgeRange::from_str(age_range).ok_or_else(|| {
        CoreError::validation(
            "age_range",
            format!("Invalid age range. Must be one of: {}", AgeRange::allowed()),
        )
    })?;

    Ok(CharacterDraft {
        avatar_name: avatar_name.to_string(),
        user_description: user_description.to_string(),
        visual_style,
        gender,
        age_range,
    })
}

/// Validate a scene submission, producing a normalized draft.
pub fn validate_create_scene(req: &CreateSceneRequest) -> Result<SceneDraft, CoreError> {
    let avatar_name = req.avatar_name.trim();
    let scene_name = req.scene_name.trim();
    let action = req.action.trim();
    let location = req.location.trim();
    let mood_atmosphere = req.mood_atmosphere.trim();
    let camera_shot = req.camera_shot.trim();
    let visual_style = req.visual_style.trim();

    require("avatar_name", avatar_name)?;
    require("scene_name", scene_name)?;
    require("action", action)?;
    require("location", location)?;
    require("mood_atmosphere", mood_atmosphere)?;
    require("camera_shot", camera_shot)?;
    require("visual_style", visual_style)?;

    check_len("avatar_name", "Avatar name", avatar_name, MAX_NAME_LEN)?;
    check_len("scene_name", "Scene name", scene_name, MAX_NAME_LEN)?;
    check_len("action", "Action description", action, MAX_DESCRIPTION_LEN)?;
    check_len("location", "Location", location, MAX_LOCATION_LEN)?;

    let visual_style = VisualStyle::from_str(visual_style).ok_or_else(|| {
        CoreError::validation(
            "visual_style",
            format!("Invalid visual style. Must be one of: {}", VisualStyle::allowed()),
        )
    })?;
    let mood_atmosphere = Mood::from_str(mood_atmosphere).ok_or_else(|| {
        CoreError::validation(
            "mood_atmosphere",
            format!("Invalid mood/atmosphere. Must be one of: {}", Mood::allowed()),
        )
    })?;
    let camera_shot = CameraShot::from_str(camera_shot).ok_or_else(|| {
        CoreError::validation(
            "camera_shot",
            format!("Invalid camera shot. Must be one of: {}", CameraShot::allowed()),
        )
    })?;

    Ok(SceneDraft {
        avatar_name: avatar_name.to_string(),
        scene_name: scene_name.to_string(),
        action: action.to_string(),
        location: location.to_string(),
        mood_atmosphere,
        camera_shot,
        visual_style,
    })
}

fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::validation(
            field,
            format!("Missing required field: {field}"),
        ));
    }
    Ok(())
}

fn check_len(field: &'static str, label: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::validation(
            field,
            format!("{label} must be less than {max} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn character_request() -> CreateCharacterRequest {
        CreateCharacterRequest {
            avatar_name: "Mira".to_string(),
            user_description: "A wandering cartographer with a silver compass".to_string(),
            visual_style: "Studio Ghibli".to_string(),
            gender: "Female".to_string(),
            age_range: "Young Adult (18-25)".to_string(),
        }
    }

    fn scene_request() -> CreateSceneRequest {
        CreateSceneRequest {
            avatar_name: "Mira".to_string(),
            scene_name: "Harbor at dawn".to_string(),
            action: "Mira unrolls a map against the wind".to_string(),
            location: "A fog-wrapped fishing harbor".to_string(),
            mood_atmosphere: "Calm & Peaceful".to_string(),
            camera_shot: "Wide Shot".to_string(),
            visual_style: "Studio Ghibli".to_string(),
        }
    }

    #[test]
    fn test_valid_character_normalizes_trimmed() {
        let mut req = character_request();
        req.avatar_name = "  Mira  ".to_string();
        req.user_description = "\tcartographer\n".to_string();

        let draft = validate_create_character(&req).unwrap();
        assert_eq!(draft.avatar_name, "Mira");
        assert_eq!(draft.user_description, "cartographer");
        assert_eq!(draft.visual_style, VisualStyle::StudioGhibli);
    }

    #[test]
    fn test_missing_field_reports_first_in_declaration_order() {
        let mut req = character_request();
        req.user_description = String::new();
        req.gender = String::new();

        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "user_description", .. });
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut req = character_request();
        req.avatar_name = "   ".to_string();

        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "avatar_name", .. });
    }

    #[test]
    fn test_presence_beats_length_and_enum() {
        // avatar_name missing, description over limit, style out of set:
        // presence must win.
        let req = CreateCharacterRequest {
            avatar_name: String::new(),
            user_description: "x".repeat(3000),
            visual_style: "Impressionist".to_string(),
            gender: "Female".to_string(),
            age_range: "Adult (26-40)".to_string(),
        };

        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "avatar_name", .. });
    }

    #[test]
    fn test_length_beats_enum() {
        let mut req = character_request();
        req.avatar_name = "a".repeat(101);
        req.visual_style = "Impressionist".to_string();

        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "avatar_name", .. });
    }

    #[test]
    fn test_description_boundary() {
        let mut req = character_request();
        req.user_description = "d".repeat(2000);
        assert!(validate_create_character(&req).is_ok());

        req.user_description = "d".repeat(2001);
        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation { field: "user_description", message }
                if message == "Description must be less than 2000 characters"
        );
    }

    #[test]
    fn test_length_measured_after_trim() {
        let mut req = character_request();
        // 2000 characters of content padded with whitespace passes.
        req.user_description = format!("  {}  ", "d".repeat(2000));
        assert!(validate_create_character(&req).is_ok());
    }

    #[test]
    fn test_character_enum_membership() {
        let mut req = character_request();
        req.gender = "Unknown".to_string();

        let err = validate_create_character(&req).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation { field: "gender", message } if message.contains("Non-binary")
        );
    }

    #[test]
    fn test_every_catalog_value_accepted() {
        for style in VisualStyle::ALL {
            for gender in Gender::ALL {
                for age in AgeRange::ALL {
                    let mut req = character_request();
                    req.visual_style = style.as_str().to_string();
                    req.gender = gender.as_str().to_string();
                    req.age_range = age.as_str().to_string();
                    let draft = validate_create_character(&req).unwrap();
                    assert_eq!(draft.visual_style, *style);
                    assert_eq!(draft.gender, *gender);
                    assert_eq!(draft.age_range, *age);
                }
            }
        }
    }

    #[test]
    fn test_valid_scene_passes() {
        let draft = validate_create_scene(&scene_request()).unwrap();
        assert_eq!(draft.scene_name, "Harbor at dawn");
        assert_eq!(draft.mood_atmosphere, Mood::CalmPeaceful);
        assert_eq!(draft.camera_shot, CameraShot::WideShot);
    }

    #[test]
    fn test_scene_location_limit() {
        let mut req = scene_request();
        req.location = "l".repeat(501);

        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation { field: "location", message }
                if message == "Location must be less than 500 characters"
        );
    }

    #[test]
    fn test_scene_avatar_name_limit() {
        let mut req = scene_request();
        req.avatar_name = "a".repeat(101);

        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "avatar_name", .. });
    }

    #[test]
    fn test_scene_enum_order_style_first() {
        let mut req = scene_request();
        req.visual_style = "Pointillism".to_string();
        req.mood_atmosphere = "Gloomy".to_string();
        req.camera_shot = "Dutch Angle".to_string();

        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "visual_style", .. });
    }

    #[test]
    fn test_scene_mood_and_shot_membership() {
        let mut req = scene_request();
        req.mood_atmosphere = "Gloomy".to_string();
        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation { field: "mood_atmosphere", message }
                if message.starts_with("Invalid mood/atmosphere")
        );

        let mut req = scene_request();
        req.camera_shot = "Dutch Angle".to_string();
        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "camera_shot", .. });
    }

    #[test]
    fn test_scene_missing_fields_report_declaration_order() {
        let req = CreateSceneRequest::default();
        let err = validate_create_scene(&req).unwrap_err();
        assert_matches!(err, CoreError::Validation { field: "avatar_name", .. });
    }
}
