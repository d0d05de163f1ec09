//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for booking windows and notification times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
///
/// Only clock implementations should call this; use-cases read "now"
/// through an injected time provider.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whether the half-open windows `[a_start, a_end)` and `[b_start, b_end)`
/// share at least one instant.
#[must_use]
pub fn windows_overlap(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && b_start < a_end
}
