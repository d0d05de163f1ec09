//! Booking — an immutable reserved interval on one room.

use serde::Serialize;

use crate::error::InvalidArgument;
use crate::id::{BookingId, RoomId};
use crate::time::{Timestamp, windows_overlap};

/// A reserved `[start_time, end_time)` window on a single room.
///
/// Fields are private: a booking never changes after it is created, and its
/// id is always generated here rather than supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    id: BookingId,
    room_id: RoomId,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl Booking {
    /// Create a booking with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EndNotAfterStart`] unless
    /// `end_time > start_time`.
    pub fn new(
        room_id: RoomId,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, InvalidArgument> {
        Self::restore(BookingId::new(), room_id, start_time, end_time)
    }

    /// Rebuild a previously persisted booking, keeping its id.
    ///
    /// Intended for storage adapters only.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EndNotAfterStart`] unless
    /// `end_time > start_time`.
    pub fn restore(
        id: BookingId,
        room_id: RoomId,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, InvalidArgument> {
        if end_time <= start_time {
            return Err(InvalidArgument::EndNotAfterStart);
        }
        Ok(Self {
            id,
            room_id,
            start_time,
            end_time,
        })
    }

    #[must_use]
    pub fn id(&self) -> BookingId {
        self.id
    }

    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[must_use]
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// Whether this booking intersects the half-open window `[start, end)`.
    #[must_use]
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        windows_overlap(start, end, self.start_time, self.end_time)
    }

    /// A booking may be cancelled only while it lies strictly in the future.
    #[must_use]
    pub fn is_cancellable_at(&self, now: Timestamp) -> bool {
        self.start_time > now
    }
}
