//! End-to-end smoke tests for the full roombookd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repository, real services, real axum router) and exercises the HTTP layer
//! via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, SecondsFormat, Utc};
use http_body_util::BodyExt;
use roombook_adapter_http_axum::router;
use roombook_adapter_http_axum::state::AppState;
use roombook_adapter_storage_sqlite_sqlx::{Config, SqliteRoomRepository};
use roombook_app::notification_bus::InProcessNotificationBus;
use roombook_app::ports::SystemClock;
use roombook_app::room_locks::RoomLocks;
use roombook_app::services::booking_system::BookingSystem;
use roombook_app::services::room_service::RoomService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config::in_memory()
        .build()
        .await
        .expect("in-memory database should initialise");

    let repo = Arc::new(SqliteRoomRepository::new(db.pool().clone()));
    let bus = Arc::new(InProcessNotificationBus::new(256));
    let locks = RoomLocks::new();

    let state = AppState::new(
        BookingSystem::with_locks(SystemClock, Arc::clone(&repo), Arc::clone(&bus), locks.clone()),
        RoomService::new(repo, locks),
    );

    router::build(state)
}

fn at(hours_from_now: i64) -> String {
    (Utc::now() + Duration::hours(hours_from_now)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &axum::Router, id: &str) {
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/rooms", &json!({ "id": id })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

async fn book(app: &axum::Router, room: &str, start: i64, end: i64) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            &json!({ "room_id": room, "start_time": at(start), "end_time": at(end) }),
        ))
        .await
        .unwrap()
}

async fn available_ids(app: &axum::Router, start: i64, end: i64) -> Vec<String> {
    let uri = format!(
        "/api/rooms/available?start_time={}&end_time={}",
        at(start),
        at(end)
    );
    let resp = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_register_and_list_rooms_in_registration_order() {
    let app = app().await;
    register(&app, "zeta").await;
    register(&app, "alpha").await;

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/api/rooms"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ids: Vec<String> = body_json(resp)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);

    let missing = app
        .oneshot(empty_request("GET", "/api/rooms/ghost"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_blank_room_id() {
    let resp = app()
        .await
        .oneshot(json_request("POST", "/api/rooms", &json!({ "id": "  " })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Booking lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_persist_booking_and_prevent_double_booking() {
    let app = app().await;
    register(&app, "room1").await;

    let first = book(&app, "room1", 1, 3).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let booking = body_json(first).await;

    let overlapping = book(&app, "room1", 2, 4).await;
    assert_eq!(overlapping.status(), StatusCode::CONFLICT);

    let back_to_back = book(&app, "room1", 3, 5).await;
    assert_eq!(back_to_back.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(empty_request("GET", "/api/rooms/room1"))
        .await
        .unwrap();
    let room = body_json(resp).await;
    let bookings = room["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["id"], booking["id"]);
}

#[tokio::test]
async fn should_reject_booking_for_unknown_room() {
    let app = app().await;

    let resp = book(&app, "ghost", 1, 2).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "room does not exist");
}

#[tokio::test]
async fn should_reject_inverted_window() {
    let app = app().await;
    register(&app, "room1").await;

    let resp = book(&app, "room1", 3, 2).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "end time must be after start time"
    );
}

#[tokio::test]
async fn should_restore_availability_after_cancellation() {
    let app = app().await;
    register(&app, "room1").await;
    register(&app, "room2").await;

    let created = book(&app, "room1", 1, 2).await;
    let id = body_json(created).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(available_ids(&app, 1, 2).await, vec!["room2"]);

    let uri = format!("/api/bookings/{id}");
    let cancelled = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(cancelled.status(), StatusCode::NO_CONTENT);
    assert_eq!(available_ids(&app, 1, 2).await, vec!["room1", "room2"]);

    let again = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_booking_id() {
    let resp = app()
        .await
        .oneshot(empty_request("DELETE", "/api/bookings/not-a-booking"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Notification stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stream_booking_confirmation() {
    let app = app().await;
    register(&app, "room1").await;

    let stream = app
        .clone()
        .oneshot(empty_request("GET", "/api/notifications/stream"))
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);
    assert_eq!(
        stream.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let created = book(&app, "room1", 1, 2).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let mut body = stream.into_body();
    let frame = tokio::time::timeout(StdDuration::from_secs(5), body.frame())
        .await
        .expect("notification should arrive")
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.contains("event: booking_confirmed"));
    assert!(text.contains("\"room_id\":\"room1\""));
}
