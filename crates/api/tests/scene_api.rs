//! HTTP-level tests for the scene workflow: creation, the review
//! decision endpoints, and the reads behind the sync layer.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, get_auth, post_auth, post_json_auth, token_for, StubPipeline,
};
use sceneflow_core::status::ReviewStatus;
use sceneflow_store::{MemoryStore, RecordStore};
use serde_json::json;

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

fn valid_payload() -> serde_json::Value {
    json!({
        "avatar_name": "Mira",
        "scene_name": "Harbour at dawn",
        "action": "Unrolls a map on a rain-slick table",
        "location": "Harbour tavern",
        "mood_atmosphere": "Mysterious & Ethereal",
        "camera_shot": "Close-up",
        "visual_style": "Watercolor",
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// A valid submission relays once with the verified identity.
#[tokio::test]
async fn test_create_scene_relays_with_verified_identity() {
    let fixture = common::spawn_test_app().await;

    let mut payload = valid_payload();
    payload["user_email"] = json!("attacker@example.com");

    let response =
        post_json_auth(fixture.app, "/api/v1/scenes", &token_for(ALICE), payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, StubPipeline::ack());

    let hits = fixture.pipeline.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "/webhook/create-scene");
    assert_eq!(hits[0].body["user_email"], ALICE);
    assert_eq!(hits[0].body["mood_atmosphere"], "Mysterious & Ethereal");
}

/// Scene catalogs reject out-of-set values, naming the field.
#[tokio::test]
async fn test_scene_catalog_membership() {
    let fixture = common::spawn_test_app().await;

    for (field, bad_value) in [
        ("mood_atmosphere", "Gloomy"),
        ("camera_shot", "Dutch Angle"),
        ("visual_style", "Oil Painting"),
    ] {
        let mut payload = valid_payload();
        payload[field] = json!(bad_value);

        let response = post_json_auth(
            fixture.app.clone(),
            "/api/v1/scenes",
            &token_for(ALICE),
            payload,
        )
        .await;

        let json = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
        assert_eq!(json["field"], field);
    }
    assert_eq!(fixture.pipeline.hit_count(), 0);
}

/// Location is bounded at 500 characters.
#[tokio::test]
async fn test_location_length_boundary() {
    let fixture = common::spawn_test_app().await;

    let mut payload = valid_payload();
    payload["location"] = json!("x".repeat(501));

    let response =
        post_json_auth(fixture.app, "/api/v1/scenes", &token_for(ALICE), payload).await;

    let json = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert_eq!(json["field"], "location");
}

// ---------------------------------------------------------------------------
// Approve / reject
// ---------------------------------------------------------------------------

/// Approving a pending scene claims the transition, relays once, and
/// stamps approved_at only.
#[tokio::test]
async fn test_approve_pending_scene() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();

    let response = post_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/approve", scene.id),
        &token_for(ALICE),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, StubPipeline::ack());

    let hits = fixture.pipeline.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "GET");
    assert_eq!(hits[0].path, format!("/webhook/approve-scene/{}", scene.id));

    let stored = fixture.store.scene(scene.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReviewStatus::Approved);
    assert!(stored.approved_at.is_some());
    assert!(stored.rejected_at.is_none());
}

/// Rejecting a pending scene stamps rejected_at only.
#[tokio::test]
async fn test_reject_pending_scene() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();

    let response = post_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/reject", scene.id),
        &token_for(ALICE),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = fixture.store.scene(scene.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReviewStatus::Rejected);
    assert!(stored.rejected_at.is_some());
    assert!(stored.approved_at.is_none());
}

/// The second decision on a scene is InvalidState, whichever order the
/// decisions arrive in, and the relay fires only for the winner.
#[tokio::test]
async fn test_second_decision_is_invalid_state() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();
    let token = token_for(ALICE);

    let approve = post_auth(
        fixture.app.clone(),
        &format!("/api/v1/scenes/{}/approve", scene.id),
        &token,
    )
    .await;
    assert_eq!(approve.status(), StatusCode::OK);

    let reject = post_auth(
        fixture.app.clone(),
        &format!("/api/v1/scenes/{}/reject", scene.id),
        &token,
    )
    .await;
    assert_error(reject, StatusCode::BAD_REQUEST, "INVALID_STATE").await;

    let again = post_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/approve", scene.id),
        &token,
    )
    .await;
    assert_error(again, StatusCode::BAD_REQUEST, "INVALID_STATE").await;

    // Only the winning decision reached the pipeline.
    assert_eq!(fixture.pipeline.hit_count(), 1);
    let stored = fixture.store.scene(scene.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReviewStatus::Approved);
    assert!(stored.rejected_at.is_none());
}

/// Concurrent approvals of the same pending scene produce exactly one
/// success and exactly one relay call.
#[tokio::test]
async fn test_concurrent_approvals_have_one_winner() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();
    let token = token_for(ALICE);
    let path = format!("/api/v1/scenes/{}/approve", scene.id);

    let (first, second) = tokio::join!(
        post_auth(fixture.app.clone(), &path, &token),
        post_auth(fixture.app.clone(), &path, &token),
    );

    let successes = [first.status(), second.status()]
        .iter()
        .filter(|s| **s == StatusCode::OK)
        .count();
    assert_eq!(successes, 1, "exactly one approval may win");
    assert_eq!(fixture.pipeline.hit_count(), 1);
}

/// A foreign caller gets Forbidden and the scene stays pending.
#[tokio::test]
async fn test_foreign_approval_is_forbidden() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(BOB, "Bob's scene"))
        .await
        .unwrap();

    let response = post_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/approve", scene.id),
        &token_for(ALICE),
    )
    .await;

    let json = assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    // The error must not reveal who owns the scene.
    assert!(!json["error"].as_str().unwrap().contains(BOB));

    assert_eq!(fixture.pipeline.hit_count(), 0);
    let stored = fixture.store.scene(scene.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReviewStatus::PendingApproval);
}

/// Deciding an unknown scene is NotFound.
#[tokio::test]
async fn test_approve_unknown_scene_is_not_found() {
    let fixture = common::spawn_test_app().await;

    let response = post_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/approve", uuid::Uuid::new_v4()),
        &token_for(ALICE),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// An unreachable pipeline surfaces as 502 and the claim stands: the
/// decision is not rolled back.
#[tokio::test]
async fn test_relay_failure_after_claim_is_upstream_error() {
    let store = Arc::new(MemoryStore::new());
    let relay_base = common::unreachable_base().await;
    let app = common::build_router(Arc::clone(&store), &relay_base);

    let scene = store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();

    let response = post_auth(
        app,
        &format!("/api/v1/scenes/{}/approve", scene.id),
        &token_for(ALICE),
    )
    .await;

    assert_error(response, StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR").await;
    let stored = store.scene(scene.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReviewStatus::Approved);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Scene lists are owner-scoped and newest-first.
#[tokio::test]
async fn test_list_scenes_is_owner_scoped() {
    let fixture = common::spawn_test_app().await;
    let mine = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Mine"))
        .await
        .unwrap();
    fixture
        .store
        .insert_scene(common::new_scene(BOB, "Foreign"))
        .await
        .unwrap();

    let response = get_auth(fixture.app, "/api/v1/scenes", &token_for(ALICE)).await;

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], mine.id.to_string());
}

/// A scene's video reads through the scene's ownership; absent video is
/// null, foreign scene is 404.
#[tokio::test]
async fn test_get_scene_video() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();

    // No video yet.
    let response = get_auth(
        fixture.app.clone(),
        &format!("/api/v1/scenes/{}/video", scene.id),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::Value::Null);

    let video = fixture
        .store
        .insert_video(common::new_video(Some(scene.id)))
        .await
        .unwrap();

    let response = get_auth(
        fixture.app.clone(),
        &format!("/api/v1/scenes/{}/video", scene.id),
        &token_for(ALICE),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], video.id.to_string());

    // Foreign caller cannot see the scene, so not its video either.
    let response = get_auth(
        fixture.app,
        &format!("/api/v1/scenes/{}/video", scene.id),
        &token_for(BOB),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// Videos resolve to the caller through the scene back-reference; an
/// orphaned video is listed for nobody.
#[tokio::test]
async fn test_list_videos_resolves_ownership_through_scene() {
    let fixture = common::spawn_test_app().await;
    let scene = fixture
        .store
        .insert_scene(common::new_scene(ALICE, "Harbour"))
        .await
        .unwrap();
    let mine = fixture
        .store
        .insert_video(common::new_video(Some(scene.id)))
        .await
        .unwrap();
    // Orphan: no scene back-reference.
    fixture
        .store
        .insert_video(common::new_video(None))
        .await
        .unwrap();

    let response = get_auth(fixture.app.clone(), "/api/v1/videos", &token_for(ALICE)).await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], mine.id.to_string());

    let response = get_auth(fixture.app, "/api/v1/videos", &token_for(BOB)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
