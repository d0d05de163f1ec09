//! Storage port — repository trait for room persistence.

use std::future::Future;

use roombook_domain::error::RoombookError;
use roombook_domain::id::RoomId;
use roombook_domain::room::Room;

/// Repository for loading and persisting [`Room`]s together with their bookings.
pub trait RoomRepository {
    /// Get a room by its identifier.
    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, RoombookError>> + Send;

    /// Get all rooms, in the repository's iteration order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Room>, RoombookError>> + Send;

    /// Upsert the room's current state, including its full booking set.
    ///
    /// This is the durability commit point of every booking change.
    fn save(&self, room: &Room) -> impl Future<Output = Result<(), RoombookError>> + Send;
}

impl<T: RoomRepository + Send + Sync> RoomRepository for std::sync::Arc<T> {
    fn find_by_id(
        &self,
        id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, RoombookError>> + Send {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Room>, RoombookError>> + Send {
        (**self).find_all()
    }

    fn save(&self, room: &Room) -> impl Future<Output = Result<(), RoombookError>> + Send {
        (**self).save(room)
    }
}
