//! JSON REST handlers for rooms and availability.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};
use roombook_domain::request::AvailabilityQuery;
use roombook_domain::room::Room;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a room.
#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub id: String,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Room>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Room>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Room>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<C, R, N>(
    State(state): State<AppState<C, R, N>>,
) -> Result<ListResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    let rooms = state.room_service.list_rooms().await?;
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/:id`
pub async fn get<C, R, N>(
    State(state): State<AppState<C, R, N>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    let room = state.room_service.get_room(&id).await?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `POST /api/rooms`
pub async fn create<C, R, N>(
    State(state): State<AppState<C, R, N>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<CreateResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    let room = state.room_service.register_room(&req.id).await?;
    Ok(CreateResponse::Created(Json(room)))
}

/// `GET /api/rooms/available?start_time=…&end_time=…`
pub async fn available<C, R, N>(
    State(state): State<AppState<C, R, N>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<ListResponse, ApiError>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    let rooms = state.booking_system.get_available_rooms(&query).await?;
    Ok(ListResponse::Ok(Json(rooms)))
}
