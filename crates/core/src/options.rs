//! Creative option catalogs for character and scene submissions.
//!
//! Each catalog is a closed set of display labels. The labels are the
//! wire representation: they appear verbatim in request payloads, stored
//! records, and relayed job payloads, so serde renames map each variant
//! to its exact label. Matching is exact, with no case folding.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Visual style
// ---------------------------------------------------------------------------

/// Rendering style applied to characters and scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualStyle {
    Realistic,
    Anime,
    #[serde(rename = "Studio Ghibli")]
    StudioGhibli,
    Cyberpunk,
    Watercolor,
}

impl VisualStyle {
    pub const ALL: &'static [Self] = &[
        Self::Realistic,
        Self::Anime,
        Self::StudioGhibli,
        Self::Cyberpunk,
        Self::Watercolor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Anime => "Anime",
            Self::StudioGhibli => "Studio Ghibli",
            Self::Cyberpunk => "Cyberpunk",
            Self::Watercolor => "Watercolor",
        }
    }

    /// Parse an exact label. Returns `None` for anything outside the set.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// All labels joined for validation messages.
    pub fn allowed() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
    Other,
}

impl Gender {
    pub const ALL: &'static [Self] = &[Self::Male, Self::Female, Self::NonBinary, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
            Self::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn allowed() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

// ---------------------------------------------------------------------------
// Age range
// ---------------------------------------------------------------------------

/// Age bracket for a character. Labels carry the year spans shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "Child (5-12)")]
    Child,
    #[serde(rename = "Teen (13-17)")]
    Teen,
    #[serde(rename = "Young Adult (18-25)")]
    YoungAdult,
    #[serde(rename = "Adult (26-40)")]
    Adult,
    #[serde(rename = "Middle Age (41-60)")]
    MiddleAge,
    #[serde(rename = "Senior (60+)")]
    Senior,
}

impl AgeRange {
    pub const ALL: &'static [Self] = &[
        Self::Child,
        Self::Teen,
        Self::YoungAdult,
        Self::Adult,
        Self::MiddleAge,
        Self::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "Child (5-12)",
            Self::Teen => "Teen (13-17)",
            Self::YoungAdult => "Young Adult (18-25)",
            Self::Adult => "Adult (26-40)",
            Self::MiddleAge => "Middle Age (41-60)",
            Self::Senior => "Senior (60+)",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn allowed() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

// ---------------------------------------------------------------------------
// Mood / atmosphere
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Calm & Peaceful")]
    CalmPeaceful,
    #[serde(rename = "Tense & Suspenseful")]
    TenseSuspenseful,
    #[serde(rename = "Joyful & Uplifting")]
    JoyfulUplifting,
    #[serde(rename = "Dark & Dramatic")]
    DarkDramatic,
    #[serde(rename = "Mysterious & Ethereal")]
    MysteriousEthereal,
    #[serde(rename = "Adventurous & Exciting")]
    AdventurousExciting,
}

impl Mood {
    pub const ALL: &'static [Self] = &[
        Self::CalmPeaceful,
        Self::TenseSuspenseful,
        Self::JoyfulUplifting,
        Self::DarkDramatic,
        Self::MysteriousEthereal,
        Self::AdventurousExciting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalmPeaceful => "Calm & Peaceful",
            Self::TenseSuspenseful => "Tense & Suspenseful",
            Self::JoyfulUplifting => "Joyful & Uplifting",
            Self::DarkDramatic => "Dark & Dramatic",
            Self::MysteriousEthereal => "Mysterious & Ethereal",
            Self::AdventurousExciting => "Adventurous & Exciting",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn allowed() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

// ---------------------------------------------------------------------------
// Camera shot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraShot {
    #[serde(rename = "Close-up")]
    CloseUp,
    #[serde(rename = "Medium Shot")]
    MediumShot,
    #[serde(rename = "Wide Shot")]
    WideShot,
    #[serde(rename = "Over-the-shoulder")]
    OverTheShoulder,
    #[serde(rename = "Low Angle")]
    LowAngle,
    #[serde(rename = "High Angle")]
    HighAngle,
    #[serde(rename = "Tracking Shot")]
    TrackingShot,
}

impl CameraShot {
    pub const ALL: &'static [Self] = &[
        Self::CloseUp,
        Self::MediumShot,
        Self::WideShot,
        Self::OverTheShoulder,
        Self::LowAngle,
        Self::HighAngle,
        Self::TrackingShot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloseUp => "Close-up",
            Self::MediumShot => "Medium Shot",
            Self::WideShot => "Wide Shot",
            Self::OverTheShoulder => "Over-the-shoulder",
            Self::LowAngle => "Low Angle",
            Self::HighAngle => "High Angle",
            Self::TrackingShot => "Tracking Shot",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    pub fn allowed() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
