//! Room — a physical space and the bookings it holds.

use std::collections::HashMap;

use serde::Serialize;

use crate::booking::Booking;
use crate::id::{BookingId, RoomId};
use crate::time::Timestamp;

/// A bookable room together with its current bookings.
///
/// The room is the authority on overlap: no two of its bookings may share
/// an instant. [`Room::add_booking`] trusts the caller to have checked
/// [`Room::is_available`] under the room's lock first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    id: RoomId,
    #[serde(serialize_with = "serialize_bookings")]
    bookings: HashMap<BookingId, Booking>,
}

impl Room {
    /// Create a room with no bookings.
    #[must_use]
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            bookings: HashMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// True iff no existing booking intersects `[start, end)`.
    #[must_use]
    pub fn is_available(&self, start: Timestamp, end: Timestamp) -> bool {
        !self.bookings.values().any(|b| b.overlaps(start, end))
    }

    /// Insert a booking without re-checking overlap.
    pub fn add_booking(&mut self, booking: Booking) {
        self.bookings.insert(booking.id(), booking);
    }

    /// Remove a booking, returning it if it was present.
    pub fn remove_booking(&mut self, id: BookingId) -> Option<Booking> {
        self.bookings.remove(&id)
    }

    #[must_use]
    pub fn has_booking(&self, id: BookingId) -> bool {
        self.bookings.contains_key(&id)
    }

    #[must_use]
    pub fn get_booking(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.get(&id)
    }

    /// Iterate over the current bookings in no particular order.
    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

fn serialize_bookings<S>(bookings: &HashMap<BookingId, Booking>, ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut sorted: Vec<&Booking> = bookings.values().collect();
    sorted.sort_by_key(|b| b.start_time());
    ser.collect_seq(sorted)
}
