//! Record models and their insert/patch DTOs.

pub mod character;
pub mod credit;
pub mod scene;
pub mod video;

pub use character::{Character, CharacterPatch, NewCharacter};
pub use credit::CreditBalance;
pub use scene::{NewScene, Scene, ScenePatch};
pub use video::{NewVideo, Video};
