#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sceneflow_api::auth::jwt::{generate_access_token, JwtConfig};
use sceneflow_api::config::ServerConfig;
use sceneflow_api::router::build_app_router;
use sceneflow_api::state::AppState;
use sceneflow_api::ws::{StreamRouter, WsManager};
use sceneflow_core::options::{AgeRange, CameraShot, Gender, Mood, VisualStyle};
use sceneflow_relay::{RelayClient, RelayEndpoints};
use sceneflow_store::models::{NewCharacter, NewScene, NewVideo};
use sceneflow_store::{MemoryStore, RecordStore};

/// HMAC secret shared between the tests' token mint and the router.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Shared token the stub pipeline authenticates with.
pub const TEST_PIPELINE_TOKEN: &str = "test-pipeline-token";

// ---------------------------------------------------------------------------
// Stub pipeline
// ---------------------------------------------------------------------------

/// One request the stub pipeline received.
#[derive(Debug, Clone)]
pub struct StubHit {
    pub method: String,
    pub path: String,
    pub body: serde_json::Value,
}

/// Loopback stand-in for the rendering pipeline.
///
/// Records every request it receives and acknowledges with a fixed JSON
/// body, so tests can assert both what was relayed and that the gateway
/// passes the acknowledgment through verbatim.
#[derive(Clone, Default)]
pub struct StubPipeline {
    hits: Arc<Mutex<Vec<StubHit>>>,
}

impl StubPipeline {
    pub fn hits(&self) -> Vec<StubHit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    /// The acknowledgment body every stub response carries.
    pub fn ack() -> serde_json::Value {
        serde_json::json!({ "status": "queued", "source": "stub-pipeline" })
    }
}

async fn record_hit(State(stub): State<StubPipeline>, req: Request) -> Json<serde_json::Value> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let bytes = req
        .into_body()
        .collect()
        .await
        .expect("stub body should collect")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    stub.hits.lock().unwrap().push(StubHit { method, path, body });
    Json(StubPipeline::ack())
}

/// Bind the stub pipeline on an ephemeral port.
///
/// Returns the recorder and the base URL the relay should target.
pub async fn spawn_stub_pipeline() -> (StubPipeline, String) {
    let stub = StubPipeline::default();
    let app = Router::new().fallback(record_hit).with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server error");
    });

    (stub, format!("http://{addr}"))
}

/// An address nothing listens on, for upstream-unreachable tests.
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe should bind");
    let addr = listener.local_addr().expect("probe should have an address");
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// App fixture
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointing the relay at `relay_base`.
pub fn test_config(relay_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        pipeline_token: TEST_PIPELINE_TOKEN.to_string(),
        relay: RelayEndpoints {
            create_character_url: format!("{relay_base}/webhook/create-avatar"),
            create_scene_url: format!("{relay_base}/webhook/create-scene"),
            approve_scene_url: format!("{relay_base}/webhook/approve-scene"),
            reject_scene_url: format!("{relay_base}/webhook/reject-scene"),
        },
    }
}

/// A fully wired router plus the handles tests poke at directly.
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub pipeline: StubPipeline,
}

/// Build the full application router with all middleware layers, backed
/// by a fresh in-memory store and a recording stub pipeline.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub async fn spawn_test_app() -> TestApp {
    let (pipeline, relay_base) = spawn_stub_pipeline().await;
    let store = Arc::new(MemoryStore::new());
    let app = build_router(Arc::clone(&store), &relay_base);
    TestApp {
        app,
        store,
        pipeline,
    }
}

/// Build a router over an existing store with the relay aimed anywhere.
pub fn build_router(store: Arc<MemoryStore>, relay_base: &str) -> Router {
    let config = test_config(relay_base);
    let ws_manager = Arc::new(WsManager::new());
    let store: Arc<dyn RecordStore> = store;

    // Keep the change-stream fan-out running, as in production.
    let _router = StreamRouter::start(store.as_ref(), Arc::clone(&ws_manager));

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager,
        relay: Arc::new(RelayClient::new(config.relay.clone())),
    };
    build_app_router(state, &config)
}

/// Serve a router on an ephemeral port for tests that need a real
/// transport (WebSocket upgrades). Returns the bound address.
pub async fn serve(app: Router) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test server should bind");
    let addr = listener.local_addr().expect("test server should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server error");
    });
    addr
}

/// Mint an access token for `email` with the test secret.
pub fn token_for(email: &str) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    };
    generate_access_token("test-subject", email, &config).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a request to the pipeline ingest surface with the shared token.
pub async fn pipeline_request(
    app: Router,
    method: &str,
    path: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("x-pipeline-token", TEST_PIPELINE_TOKEN)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert a response is an error with the given status and `code`.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub fn new_character(owner: &str, name: &str) -> NewCharacter {
    NewCharacter {
        user_email: owner.to_string(),
        avatar_name: name.to_string(),
        user_description: "A wandering cartographer with a weathered satchel".to_string(),
        visual_style: VisualStyle::Watercolor,
        gender: Gender::Female,
        age_range: AgeRange::YoungAdult,
        canonical_description: None,
        reference_image_url: None,
    }
}

pub fn new_scene(owner: &str, name: &str) -> NewScene {
    NewScene {
        user_email: owner.to_string(),
        avatar_name: "Mira".to_string(),
        scene_name: name.to_string(),
        action_description: "Unrolls a map on a rain-slick table".to_string(),
        location: "Harbour tavern at night".to_string(),
        mood_atmosphere: Mood::MysteriousEthereal,
        camera_shot: CameraShot::CloseUp,
        visual_style: VisualStyle::Watercolor,
        enhanced_prompt: None,
        first_frame_url: None,
    }
}

pub fn new_video(scene_id: Option<sceneflow_core::types::RecordId>) -> NewVideo {
    NewVideo { scene_id }
}
