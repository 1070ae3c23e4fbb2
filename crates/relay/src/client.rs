//! HTTP client for the pipeline webhooks.

use sceneflow_core::types::RecordId;

use crate::endpoints::RelayEndpoints;
use crate::job::{CharacterJob, SceneJob};

/// Errors from the relay layer.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The pipeline returned a non-2xx status code.
    #[error("pipeline error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// One-way client for the pipeline webhooks.
///
/// Every call is fire-and-acknowledge: the pipeline's immediate JSON
/// acknowledgment is returned verbatim, failures surface as
/// [`RelayError`], and there is no retry. The transport's defaults are
/// the only timeout; the pipeline acks quickly or not at all.
pub struct RelayClient {
    client: reqwest::Client,
    endpoints: RelayEndpoints,
}

impl RelayClient {
    pub fn new(endpoints: RelayEndpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, endpoints: RelayEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Submit a character generation job.
    pub async fn submit_character(&self, job: &CharacterJob) -> Result<serde_json::Value, RelayError> {
        tracing::info!(avatar_name = %job.avatar_name, "relaying character job");
        let response = self
            .client
            .post(&self.endpoints.create_character_url)
            .json(job)
            .send()
            .await?;
        Self::parse_ack(response).await
    }

    /// Submit a scene generation job.
    pub async fn submit_scene(&self, job: &SceneJob) -> Result<serde_json::Value, RelayError> {
        tracing::info!(scene_name = %job.scene_name, "relaying scene job");
        let response = self
            .client
            .post(&self.endpoints.create_scene_url)
            .json(job)
            .send()
            .await?;
        Self::parse_ack(response).await
    }

    /// Kick off rendering for an approved scene.
    ///
    /// The pipeline's approve webhook is addressed by scene id and takes
    /// no body, so this is a GET.
    pub async fn approve_scene(&self, scene_id: RecordId) -> Result<serde_json::Value, RelayError> {
        tracing::info!(scene_id = %scene_id, "relaying scene approval");
        let response = self
            .client
            .get(self.endpoints.approve_scene(scene_id))
            .send()
            .await?;
        Self::parse_ack(response).await
    }

    /// Notify the pipeline that a scene was rejected.
    pub async fn reject_scene(&self, scene_id: RecordId) -> Result<serde_json::Value, RelayError> {
        tracing::info!(scene_id = %scene_id, "relaying scene rejection");
        let response = self
            .client
            .get(self.endpoints.reject_scene(scene_id))
            .send()
            .await?;
        Self::parse_ack(response).await
    }

    /// Turn a pipeline response into its JSON acknowledgment, or a
    /// [`RelayError::Status`] carrying the status and body text.
    async fn parse_ack(response: reqwest::Response) -> Result<serde_json::Value, RelayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
