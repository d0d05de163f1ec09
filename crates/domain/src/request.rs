//! Request shapes accepted by the booking use-cases.
//!
//! Fields are optional because transports may omit them; the use-cases
//! report a missing field as an [`InvalidArgument`] rather than relying on
//! the type system to rule it out.

use serde::Deserialize;

use crate::error::InvalidArgument;
use crate::id::RoomId;
use crate::time::Timestamp;

/// A request to reserve one room for `[start_time, end_time)`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub room_id: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl BookingRequest {
    /// Shorthand for a fully populated request.
    #[must_use]
    pub fn new(room_id: impl Into<String>, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            room_id: Some(room_id.into()),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Extract all three fields, treating a blank room id as missing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MissingBookingFields`] if any field is absent.
    pub fn required_fields(&self) -> Result<(RoomId, Timestamp, Timestamp), InvalidArgument> {
        match (&self.room_id, self.start_time, self.end_time) {
            (Some(room_id), Some(start), Some(end)) => {
                let room_id =
                    RoomId::new(room_id.as_str()).map_err(|_| InvalidArgument::MissingBookingFields)?;
                Ok((room_id, start, end))
            }
            _ => Err(InvalidArgument::MissingBookingFields),
        }
    }
}

/// A window to check room availability for.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl AvailabilityQuery {
    #[must_use]
    pub fn new(start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Validate the window: both bounds present and `end > start`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MissingTimeWindow`] when a bound is absent,
    /// or [`InvalidArgument::EndNotAfterStart`] when the window is empty or
    /// inverted.
    pub fn window(&self) -> Result<(Timestamp, Timestamp), InvalidArgument> {
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return Err(InvalidArgument::MissingTimeWindow);
        };
        if end <= start {
            return Err(InvalidArgument::EndNotAfterStart);
        }
        Ok((start, end))
    }
}
