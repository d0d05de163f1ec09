//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RoombookError`] via `From`. Validation-class errors
//! ([`InvalidArgument`], [`IllegalState`]) are raised before any mutation;
//! [`NotificationError`] is raised after a booking change has been committed.

/// Top-level error returned by every use-case and port.
#[derive(Debug, thiserror::Error)]
pub enum RoombookError {
    /// Malformed or missing input, an invalid time window, or an unknown room.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// A structurally valid request that violates a temporal business rule.
    #[error(transparent)]
    IllegalState(#[from] IllegalState),

    /// A lookup by id found nothing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The notification channel failed to deliver a notice.
    #[error("notification delivery failed")]
    Notification(#[from] NotificationError),

    /// A persistence adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a request is rejected before touching any collaborator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("booking requires valid start and end times and a room id")]
    MissingBookingFields,

    #[error("cannot book a time in the past")]
    StartInPast,

    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error("room does not exist")]
    UnknownRoom,

    #[error("both start and end time are required")]
    MissingTimeWindow,

    #[error("booking id cannot be null")]
    MissingBookingId,

    #[error("room id cannot be empty")]
    EmptyRoomId,

    #[error("room already exists")]
    RoomAlreadyExists,
}

/// Temporal business-rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalState {
    #[error("cannot cancel a booking that has already started or ended")]
    BookingAlreadyStarted,
}

/// Lookup failure for a named kind of record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Failure reported by a notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    /// The channel is closed and cannot accept notices any more.
    #[error("notification channel closed")]
    ChannelClosed,
}
