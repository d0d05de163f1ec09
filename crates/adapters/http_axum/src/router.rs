//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<C, R, N>(state: AppState<C, R, N>) -> Router
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration as StdDuration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone, Utc};
    use http_body_util::BodyExt;
    use roombook_app::notification_bus::InProcessNotificationBus;
    use roombook_app::room_locks::RoomLocks;
    use roombook_app::services::booking_system::BookingSystem;
    use roombook_app::services::room_service::RoomService;
    use roombook_domain::booking::Booking;
    use roombook_domain::error::RoombookError;
    use roombook_domain::id::{BookingId, RoomId};
    use roombook_domain::room::Room;
    use roombook_domain::time::Timestamp;
    use serde_json::Value;
    use tower::ServiceExt;

    struct FixedClock(Timestamp);

    impl TimeProvider for FixedClock {
        fn current_time(&self) -> Timestamp {
            self.0
        }
    }

    #[derive(Default)]
    struct InMemoryRoomRepo {
        rooms: Mutex<Vec<Room>>,
    }

    impl RoomRepository for InMemoryRoomRepo {
        async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RoombookError> {
            let rooms = self.rooms.lock().unwrap();
            Ok(rooms.iter().find(|room| room.id() == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Room>, RoombookError> {
            Ok(self.rooms.lock().unwrap().clone())
        }

        async fn save(&self, room: &Room) -> Result<(), RoombookError> {
            let mut rooms = self.rooms.lock().unwrap();
            match rooms.iter_mut().find(|stored| stored.id() == room.id()) {
                Some(stored) => *stored = room.clone(),
                None => rooms.push(room.clone()),
            }
            Ok(())
        }
    }

    type TestState = AppState<FixedClock, Arc<InMemoryRoomRepo>, Arc<InProcessNotificationBus>>;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap()
    }

    fn ts(hours_from_now: i64) -> String {
        (now() + Duration::hours(hours_from_now)).to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    fn test_state(repo: Arc<InMemoryRoomRepo>) -> TestState {
        let locks = RoomLocks::new();
        let bus = Arc::new(InProcessNotificationBus::new(16));
        AppState::new(
            BookingSystem::with_locks(
                FixedClock(now()),
                Arc::clone(&repo),
                Arc::clone(&bus),
                locks.clone(),
            ),
            RoomService::new(repo, locks),
        )
    }

    fn app_with_rooms(ids: &[&str]) -> (Router, Arc<InMemoryRoomRepo>) {
        let repo = Arc::new(InMemoryRoomRepo::default());
        {
            let mut rooms = repo.rooms.lock().unwrap();
            for id in ids {
                rooms.push(Room::new(RoomId::new(*id).unwrap()));
            }
        }
        (build(test_state(Arc::clone(&repo))), repo)
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

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn booking_body(room: &str, start: i64, end: i64) -> Value {
        serde_json::json!({
            "room_id": room,
            "start_time": ts(start),
            "end_time": ts(end),
        })
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (app, _) = app_with_rooms(&[]);

        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_register_room_and_reject_duplicate() {
        let (app, _) = app_with_rooms(&[]);
        let body = serde_json::json!({ "id": "room1" });

        let created = app
            .clone()
            .oneshot(json_request("POST", "/api/rooms", &body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let json = body_json(created).await;
        assert_eq!(json["id"], "room1");
        assert_eq!(json["bookings"], serde_json::json!([]));

        let duplicate = app
            .oneshot(json_request("POST", "/api/rooms", &body))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(duplicate).await["error"], "room already exists");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_room() {
        let (app, _) = app_with_rooms(&["room1"]);

        let response = app
            .oneshot(empty_request("GET", "/api/rooms/ghost"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_book_room_then_refuse_overlap() {
        let (app, repo) = app_with_rooms(&["room1"]);

        let first = app
            .clone()
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", 1, 3)))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let json = body_json(first).await;
        assert_eq!(json["room_id"], "room1");
        assert!(json["id"].is_string());

        let second = app
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", 2, 4)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);

        let stored = repo.find_by_id(&RoomId::new("room1").unwrap()).await.unwrap();
        assert_eq!(stored.unwrap().booking_count(), 1);
    }

    #[tokio::test]
    async fn should_reject_invalid_booking_requests() {
        let (app, _) = app_with_rooms(&["room1"]);

        let past = app
            .clone()
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", -2, -1)))
            .await
            .unwrap();
        assert_eq!(past.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(past).await["error"],
            "cannot book a time in the past"
        );

        let missing = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                &serde_json::json!({ "room_id": "room1", "start_time": ts(1) }),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let unknown = app
            .oneshot(json_request("POST", "/api/bookings", &booking_body("ghost", 1, 2)))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(unknown).await["error"], "room does not exist");
    }

    #[tokio::test]
    async fn should_list_only_available_rooms_for_window() {
        let (app, _) = app_with_rooms(&["room1", "room2"]);
        app.clone()
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", 1, 3)))
            .await
            .unwrap();

        let uri = format!(
            "/api/rooms/available?start_time={}&end_time={}",
            ts(2),
            ts(4)
        );
        let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|room| room["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["room2"]);
    }

    #[tokio::test]
    async fn should_reject_availability_query_without_window() {
        let (app, _) = app_with_rooms(&["room1"]);

        let uri = format!("/api/rooms/available?start_time={}", ts(1));
        let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_cancel_booking_once() {
        let (app, _) = app_with_rooms(&["room1"]);
        let created = app
            .clone()
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", 1, 2)))
            .await
            .unwrap();
        let id = body_json(created).await["id"].as_str().unwrap().to_string();
        let uri = format!("/api/bookings/{id}");

        let first = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_refuse_to_cancel_started_booking() {
        let (app, repo) = app_with_rooms(&[]);
        let room_id = RoomId::new("room1").unwrap();
        let booking = Booking::restore(
            BookingId::new(),
            room_id.clone(),
            now() - Duration::minutes(30),
            now() + Duration::minutes(30),
        )
        .unwrap();
        let mut room = Room::new(room_id);
        room.add_booking(booking.clone());
        repo.save(&room).await.unwrap();

        let uri = format!("/api/bookings/{}", booking.id());
        let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let stored = repo.find_by_id(room.id()).await.unwrap().unwrap();
        assert!(stored.has_booking(booking.id()));
    }

    #[tokio::test]
    async fn should_stream_confirmation_published_by_booking_system() {
        let (app, _) = app_with_rooms(&["room1"]);

        let stream = app
            .clone()
            .oneshot(empty_request("GET", "/api/notifications/stream"))
            .await
            .unwrap();
        assert_eq!(stream.status(), StatusCode::OK);

        let created = app
            .oneshot(json_request("POST", "/api/bookings", &booking_body("room1", 1, 2)))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = body_json(created).await["id"].as_str().unwrap().to_string();

        let mut body = stream.into_body();
        let frame = tokio::time::timeout(StdDuration::from_secs(5), body.frame())
            .await
            .expect("confirmation should reach the stream")
            .unwrap()
            .unwrap();
        let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
        assert!(text.contains("event: booking_confirmed"));
        assert!(text.contains(&id));
    }
}
