//! Notification — a record of a confirmation or cancellation notice.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::id::NotificationId;
use crate::time::Timestamp;

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingConfirmed,
    BookingCancelled,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookingConfirmed => f.write_str("booking_confirmed"),
            Self::BookingCancelled => f.write_str("booking_cancelled"),
        }
    }
}

/// A notice about one booking, stamped when it was issued.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub booking: Booking,
    pub issued_at: Timestamp,
}

impl Notification {
    #[must_use]
    pub fn new(kind: NotificationKind, booking: Booking, issued_at: Timestamp) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            booking,
            issued_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RoomId;
    use crate::time::now;
    use chrono::Duration;

    #[test]
    fn should_serialize_kind_in_snake_case() {
        let start = now() + Duration::hours(1);
        let booking =
            Booking::new(RoomId::new("room1").unwrap(), start, start + Duration::hours(1)).unwrap();
        let notification = Notification::new(NotificationKind::BookingCancelled, booking, now());

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["kind"], "booking_cancelled");
        assert_eq!(json["booking"]["room_id"], "room1");
    }

    #[test]
    fn should_display_kind_like_its_wire_name() {
        assert_eq!(
            NotificationKind::BookingConfirmed.to_string(),
            "booking_confirmed"
        );
    }
}
