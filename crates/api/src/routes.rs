//! Route definitions.
//!
//! Route hierarchy:
//!
//! ```text
//! /health                              service health (root level)
//!
//! /api/v1/ws                           change-stream WebSocket (token in query)
//!
//! /api/v1/characters                   create (POST), list (GET)
//! /api/v1/characters/{id}              get
//! /api/v1/scenes                       create (POST), list (GET)
//! /api/v1/scenes/{id}                  get
//! /api/v1/scenes/{id}/approve          approve (POST)
//! /api/v1/scenes/{id}/reject           reject (POST)
//! /api/v1/scenes/{id}/video            the scene's rendered video (GET)
//! /api/v1/videos                       list
//! /api/v1/credits                      the caller's balance (GET)
//!
//! /api/v1/pipeline/characters          ingest (POST)
//! /api/v1/pipeline/characters/{id}     derived fields (PATCH)
//! /api/v1/pipeline/characters/{id}/decision   approve/reject (POST)
//! /api/v1/pipeline/scenes              ingest (POST)
//! /api/v1/pipeline/scenes/{id}         derived fields (PATCH)
//! /api/v1/pipeline/videos              ingest (POST)
//! /api/v1/pipeline/videos/{id}/complete       completion report (POST)
//! /api/v1/pipeline/credits/{email}     balance upsert (PUT)
//! ```
//!
//! User-facing routes authenticate with a JWT bearer token; the
//! `/pipeline` subtree authenticates with the shared pipeline token.

use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Serialize;

use crate::handlers::{character, credit, pipeline, scene, video};
use crate::state::AppState;
use crate::ws;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- returns service health.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route(
            "/characters",
            post(character::create_character).get(character::list_characters),
        )
        .route("/characters/{id}", get(character::get_character))
        .route("/scenes", post(scene::create_scene).get(scene::list_scenes))
        .route("/scenes/{id}", get(scene::get_scene))
        .route("/scenes/{id}/approve", post(scene::approve_scene))
        .route("/scenes/{id}/reject", post(scene::reject_scene))
        .route("/scenes/{id}/video", get(scene::get_scene_video))
        .route("/videos", get(video::list_videos))
        .route("/credits", get(credit::get_credits))
        .nest("/pipeline", pipeline_routes())
}

/// The rendering pipeline's ingest surface.
fn pipeline_routes() -> Router<AppState> {
    Router::new()
        .route("/characters", post(pipeline::ingest_character))
        .route("/characters/{id}", patch(pipeline::patch_character))
        .route("/characters/{id}/decision", post(pipeline::decide_character))
        .route("/scenes", post(pipeline::ingest_scene))
        .route("/scenes/{id}", patch(pipeline::patch_scene))
        .route("/videos", post(pipeline::ingest_video))
        .route("/videos/{id}/complete", post(pipeline::complete_video))
        .route("/credits/{email}", put(pipeline::put_credits))
}
