//! `SQLite` implementation of [`RoomRepository`].
//!
//! Rooms and bookings live in two tables. [`RoomRepository::save`] replaces
//! a room's booking rows inside one transaction, so a room is always stored
//! with a consistent booking set.

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use roombook_app::ports::RoomRepository;
use roombook_domain::booking::Booking;
use roombook_domain::error::RoombookError;
use roombook_domain::id::{BookingId, RoomId};
use roombook_domain::room::Room;
use roombook_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting booking rows into domain [`Booking`].
struct BookingRow(Booking);

impl<'r> FromRow<'r, SqliteRow> for BookingRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let room_id: String = row.try_get("room_id")?;
        let start_time: String = row.try_get("start_time")?;
        let end_time: String = row.try_get("end_time")?;

        let room_id = RoomId::new(room_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let booking = Booking::restore(
            BookingId::from_uuid(id),
            room_id,
            parse_timestamp(&start_time)?,
            parse_timestamp(&end_time)?,
        )
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(booking))
    }
}

/// Wrapper for converting room rows into a domain [`RoomId`].
struct RoomRow(RoomId);

impl<'r> FromRow<'r, SqliteRow> for RoomRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = RoomId::new(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Self(id))
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

const SELECT_ROOM_BY_ID: &str = "SELECT id FROM rooms WHERE id = ?";
const SELECT_ALL_ROOMS: &str = "SELECT id FROM rooms ORDER BY rowid";
const SELECT_BOOKINGS_BY_ROOM: &str = "SELECT * FROM bookings WHERE room_id = ?";
const SELECT_ALL_BOOKINGS: &str = "SELECT * FROM bookings";
const UPSERT_ROOM: &str = "INSERT INTO rooms (id) VALUES (?) ON CONFLICT (id) DO NOTHING";
const DELETE_BOOKINGS_BY_ROOM: &str = "DELETE FROM bookings WHERE room_id = ?";
const INSERT_BOOKING: &str =
    "INSERT INTO bookings (id, room_id, start_time, end_time) VALUES (?, ?, ?, ?)";

/// `SQLite`-backed room repository.
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoomRepository for SqliteRoomRepository {
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RoombookError> {
        let row: Option<RoomRow> = sqlx::query_as(SELECT_ROOM_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::query("load room"))?;

        let Some(RoomRow(room_id)) = row else {
            return Ok(None);
        };

        let bookings: Vec<BookingRow> = sqlx::query_as(SELECT_BOOKINGS_BY_ROOM)
            .bind(room_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::query("load room bookings"))?;

        let mut room = Room::new(room_id);
        for BookingRow(booking) in bookings {
            room.add_booking(booking);
        }
        Ok(Some(room))
    }

    async fn find_all(&self) -> Result<Vec<Room>, RoombookError> {
        let rooms: Vec<RoomRow> = sqlx::query_as(SELECT_ALL_ROOMS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::query("list rooms"))?;
        let bookings: Vec<BookingRow> = sqlx::query_as(SELECT_ALL_BOOKINGS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::query("list bookings"))?;

        let mut by_room: HashMap<RoomId, Vec<Booking>> = HashMap::new();
        for BookingRow(booking) in bookings {
            by_room
                .entry(booking.room_id().clone())
                .or_default()
                .push(booking);
        }

        Ok(rooms
            .into_iter()
            .map(|RoomRow(id)| {
                let held = by_room.remove(&id).unwrap_or_default();
                let mut room = Room::new(id);
                for booking in held {
                    room.add_booking(booking);
                }
                room
            })
            .collect())
    }

    async fn save(&self, room: &Room) -> Result<(), RoombookError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::query("begin save"))?;

        sqlx::query(UPSERT_ROOM)
            .bind(room.id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::query("save room"))?;

        sqlx::query(DELETE_BOOKINGS_BY_ROOM)
            .bind(room.id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::query("clear room bookings"))?;

        for booking in room.bookings() {
            sqlx::query(INSERT_BOOKING)
                .bind(booking.id().as_uuid())
                .bind(booking.room_id().as_str())
                .bind(booking.start_time().to_rfc3339())
                .bind(booking.end_time().to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::query("save booking"))?;
        }

        tx.commit().await.map_err(StorageError::query("commit save"))?;
        Ok(())
    }
}
