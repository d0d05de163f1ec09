//! Room service — use-cases for managing the room inventory.

use roombook_domain::error::{InvalidArgument, NotFoundError, RoombookError};
use roombook_domain::id::RoomId;
use roombook_domain::room::Room;

use crate::ports::RoomRepository;
use crate::room_locks::RoomLocks;

/// Application service for registering and looking up rooms.
pub struct RoomService<R> {
    repo: R,
    locks: RoomLocks,
}

impl<R: RoomRepository> RoomService<R> {
    /// Create a new service backed by the given repository.
    ///
    /// Pass the same `locks` as the booking system so registration cannot
    /// race a booking on the same room.
    pub fn new(repo: R, locks: RoomLocks) -> Self {
        Self { repo, locks }
    }

    /// Register a new, empty room.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::InvalidArgument`] when `id` is blank or the
    /// room already exists, or a storage error from the repository.
    pub async fn register_room(&self, id: &str) -> Result<Room, RoombookError> {
        let id = RoomId::new(id)?;
        let _guard = self.locks.lock(&id).await;
        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(InvalidArgument::RoomAlreadyExists.into());
        }
        let room = Room::new(id);
        self.repo.save(&room).await?;
        tracing::info!(room_id = %room.id(), "room registered");
        Ok(room)
    }

    /// Register `id` unless it already exists; returns whether it was created.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::InvalidArgument`] when `id` is blank, or a
    /// storage error from the repository.
    pub async fn ensure_room(&self, id: &str) -> Result<bool, RoombookError> {
        match self.register_room(id).await {
            Ok(_) => Ok(true),
            Err(RoombookError::InvalidArgument(InvalidArgument::RoomAlreadyExists)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Look up a room by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::NotFound`] when no room with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_room(&self, id: &str) -> Result<Room, RoombookError> {
        let not_found = || NotFoundError {
            entity: "Room",
            id: id.to_string(),
        };
        let Ok(room_id) = RoomId::new(id) else {
            return Err(not_found().into());
        };
        self.repo
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| not_found().into())
    }

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, RoombookError> {
        self.repo.find_all().await
    }
}
