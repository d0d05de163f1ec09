//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
pub mod sse;

use axum::Router;
use axum::routing::{delete, get, post};

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<C, R, N>() -> Router<AppState<C, R, N>>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    Router::new()
        // Rooms
        .route(
            "/rooms",
            get(rooms::list::<C, R, N>).post(rooms::create::<C, R, N>),
        )
        .route("/rooms/available", get(rooms::available::<C, R, N>))
        .route("/rooms/{id}", get(rooms::get::<C, R, N>))
        // Bookings
        .route("/bookings", post(bookings::create::<C, R, N>))
        .route("/bookings/{id}", delete(bookings::cancel::<C, R, N>))
        // Notifications
        .route("/notifications/stream", get(sse::stream::<C, R, N>))
}
