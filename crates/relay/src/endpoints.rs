//! Pipeline webhook endpoint configuration.

use sceneflow_core::types::RecordId;

/// Webhook URLs for the rendering pipeline, one per operation.
///
/// Creation jobs POST to their URL; approve/reject address a specific
/// scene by appending its id to the operation's base URL.
#[derive(Debug, Clone)]
pub struct RelayEndpoints {
    pub create_character_url: String,
    pub create_scene_url: String,
    pub approve_scene_url: String,
    pub reject_scene_url: String,
}

impl RelayEndpoints {
    /// Load endpoints from the environment, falling back to a local
    /// pipeline instance.
    ///
    /// * `RELAY_CREATE_CHARACTER_URL`
    /// * `RELAY_CREATE_SCENE_URL`
    /// * `RELAY_APPROVE_SCENE_URL`
    /// * `RELAY_REJECT_SCENE_URL`
    pub fn from_env() -> Self {
        Self {
            create_character_url: std::env::var("RELAY_CREATE_CHARACTER_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/create-avatar".to_string()),
            create_scene_url: std::env::var("RELAY_CREATE_SCENE_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/create-scene".to_string()),
            approve_scene_url: std::env::var("RELAY_APPROVE_SCENE_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/approve-scene".to_string()),
            reject_scene_url: std::env::var("RELAY_REJECT_SCENE_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/reject-scene".to_string()),
        }
    }

    /// The approve webhook address for one scene.
    pub fn approve_scene(&self, scene_id: RecordId) -> String {
        format!("{}/{}", self.approve_scene_url, scene_id)
    }

    /// The reject webhook address for one scene.
    pub fn reject_scene(&self, scene_id: RecordId) -> String {
        format!("{}/{}", self.reject_scene_url, scene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_urls_embed_the_id() {
        let endpoints = RelayEndpoints {
            create_character_url: "http://pipeline/create-avatar".to_string(),
            create_scene_url: "http://pipeline/create-scene".to_string(),
            approve_scene_url: "http://pipeline/approve-scene".to_string(),
            reject_scene_url: "http://pipeline/reject-scene".to_string(),
        };
        let id = RecordId::new_v4();
        assert_eq!(
            endpoints.approve_scene(id),
            format!("http://pipeline/approve-scene/{id}")
        );
        assert_eq!(
            endpoints.reject_scene(id),
            format!("http://pipeline/reject-scene/{id}")
        );
    }
}
