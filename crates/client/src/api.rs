//! HTTP client for the gateway.
//!
//! Thin typed wrapper over the gateway's REST surface. Mutating calls
//! return the pipeline acknowledgment verbatim as JSON; reads return the
//! caller's own records, newest first. Every call carries a bearer token
//! and the token's identity is what scopes the results, so there is no
//! user parameter anywhere in this API.

use reqwest::Client;
use sceneflow_core::types::RecordId;
use sceneflow_core::validation::{CreateCharacterRequest, CreateSceneRequest};
use sceneflow_store::models::{Character, CreditBalance, Scene, Video};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: Option<String>,
}

/// The gateway's `{ "data": ... }` read envelope.
#[derive(Debug, Deserialize)]
struct DataBody<T> {
    data: T,
}

/// Client for the gateway's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - gateway origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    // -- workflow operations ------------------------------------------------

    /// Submit a character for generation. Returns the pipeline
    /// acknowledgment.
    pub async fn create_character(
        &self,
        token: &str,
        request: &CreateCharacterRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(self.url("/characters"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        parse(response).await
    }

    /// Submit a scene for generation. Returns the pipeline
    /// acknowledgment.
    pub async fn create_scene(
        &self,
        token: &str,
        request: &CreateSceneRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(self.url("/scenes"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        parse(response).await
    }

    /// Approve a pending scene, triggering video rendering.
    pub async fn approve_scene(
        &self,
        token: &str,
        scene_id: RecordId,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/scenes/{scene_id}/approve")))
            .bearer_auth(token)
            .send()
            .await?;
        parse(response).await
    }

    /// Reject a pending scene.
    pub async fn reject_scene(
        &self,
        token: &str,
        scene_id: RecordId,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/scenes/{scene_id}/reject")))
            .bearer_auth(token)
            .send()
            .await?;
        parse(response).await
    }

    // -- reads --------------------------------------------------------------

    /// The caller's characters, newest first. `only_approved` narrows to
    /// characters available for scene generation.
    pub async fn list_characters(
        &self,
        token: &str,
        only_approved: bool,
    ) -> Result<Vec<Character>, ClientError> {
        let mut request = self.client.get(self.url("/characters")).bearer_auth(token);
        if only_approved {
            request = request.query(&[("only_approved", "true")]);
        }
        parse_data(request.send().await?).await
    }

    pub async fn get_character(
        &self,
        token: &str,
        id: RecordId,
    ) -> Result<Character, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/characters/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }

    pub async fn list_scenes(&self, token: &str) -> Result<Vec<Scene>, ClientError> {
        let response = self
            .client
            .get(self.url("/scenes"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }

    pub async fn get_scene(&self, token: &str, id: RecordId) -> Result<Scene, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/scenes/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }

    pub async fn list_videos(&self, token: &str) -> Result<Vec<Video>, ClientError> {
        let response = self
            .client
            .get(self.url("/videos"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }

    /// The video produced by a scene, `None` while rendering has not
    /// reported back.
    pub async fn scene_video(
        &self,
        token: &str,
        scene_id: RecordId,
    ) -> Result<Option<Video>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/scenes/{scene_id}/video")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }

    /// The caller's credit balance. Zero units when no balance exists
    /// yet.
    pub async fn credit_balance(&self, token: &str) -> Result<CreditBalance, ClientError> {
        let response = self
            .client
            .get(self.url("/credits"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_data(response).await
    }
}

/// Decode a workflow response: the pipeline acknowledgment verbatim.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(api_error(status, response).await)
}

/// Decode a read response, unwrapping the `{ "data": ... }` envelope.
async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let body: DataBody<T> = response.json().await?;
        return Ok(body.data);
    }
    Err(api_error(status, response).await)
}

async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            message: body.error,
            code: body.code,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            message: format!("request failed with status {status}"),
            code: None,
        },
    }
}
