//! JSON REST handlers for bookings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};
use roombook_app::services::booking_system::BookingOutcome;
use roombook_domain::booking::Booking;
use roombook_domain::request::BookingRequest;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Booking>),
    Conflict,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Conflict => (
                StatusCode::CONFLICT,
                Json(ErrorBody {
                    error: "room is not available for the requested window".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the cancel endpoint.
pub enum CancelResponse {
    NoContent,
    NotFound,
}

impl IntoResponse for CancelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "booking not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// `POST /api/bookings`
pub async fn create<C, R, N>(
    State(state): State<AppState<C, R, N>>,
    Json(req): Json<BookingRequest>,
) -> Result<CreateResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    match state.booking_system.book_room(&req).await? {
        BookingOutcome::Confirmed(booking) => Ok(CreateResponse::Created(Json(booking))),
        BookingOutcome::Unavailable => Ok(CreateResponse::Conflict),
    }
}

/// `DELETE /api/bookings/:id`
pub async fn cancel<C, R, N>(
    State(state): State<AppState<C, R, N>>,
    Path(id): Path<String>,
) -> Result<CancelResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    if state.booking_system.cancel_booking(&id).await? {
        Ok(CancelResponse::NoContent)
    } else {
        Ok(CancelResponse::NotFound)
    }
}
