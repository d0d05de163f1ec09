//! Booking system — the single orchestration point for reservations.
//!
//! Every business rule lives here: validation order, conflict resolution
//! under the per-room lock, persistence, then notification once the lock
//! is released.

use roombook_domain::booking::Booking;
use roombook_domain::error::{IllegalState, InvalidArgument, RoombookError};
use roombook_domain::id::{BookingId, RoomId};
use roombook_domain::request::{AvailabilityQuery, BookingRequest};
use roombook_domain::room::Room;

use crate::ports::{NotificationService, RoomRepository, TimeProvider};
use crate::room_locks::RoomLocks;

/// Result of a booking attempt that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The booking was persisted.
    Confirmed(Booking),
    /// The room already holds an overlapping booking; nothing was changed.
    Unavailable,
}

impl BookingOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    #[must_use]
    pub fn booking(&self) -> Option<&Booking> {
        match self {
            Self::Confirmed(booking) => Some(booking),
            Self::Unavailable => None,
        }
    }
}

/// Application service for booking, availability and cancellation.
///
/// Collaborators are injected through generic parameters so the service can
/// run against real adapters or deterministic fakes.
pub struct BookingSystem<C, R, N> {
    clock: C,
    rooms: R,
    notifier: N,
    locks: RoomLocks,
}

impl<C, R, N> BookingSystem<C, R, N>
where
    C: TimeProvider,
    R: RoomRepository,
    N: NotificationService,
{
    /// Create a new service with its own lock table.
    pub fn new(clock: C, rooms: R, notifier: N) -> Self {
        Self::with_locks(clock, rooms, notifier, RoomLocks::new())
    }

    /// Create a new service sharing `locks` with other room-mutating services.
    pub fn with_locks(clock: C, rooms: R, notifier: N, locks: RoomLocks) -> Self {
        Self {
            clock,
            rooms,
            notifier,
            locks,
        }
    }

    /// The notifier confirmations and cancellations are published through.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reserve a room for the requested window.
    ///
    /// Returns [`BookingOutcome::Unavailable`] when the window overlaps an
    /// existing booking. A failed confirmation notice is logged and does not
    /// undo the booking.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::InvalidArgument`] when a field is missing,
    /// the start lies in the past, the window is empty or inverted, or the
    /// room does not exist (checked in that order), or a storage error from
    /// the repository.
    pub async fn book_room(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingOutcome, RoombookError> {
        let (room_id, start, end) = request.required_fields()?;
        if start < self.clock.current_time() {
            return Err(InvalidArgument::StartInPast.into());
        }
        if end <= start {
            return Err(InvalidArgument::EndNotAfterStart.into());
        }

        let booking = {
            let _guard = self.locks.lock(&room_id).await;
            let mut room = self
                .rooms
                .find_by_id(&room_id)
                .await?
                .ok_or(InvalidArgument::UnknownRoom)?;

            if !room.is_available(start, end) {
                tracing::debug!(%room_id, %start, %end, "room unavailable for requested window");
                return Ok(BookingOutcome::Unavailable);
            }

            let booking = Booking::new(room_id, start, end)?;
            room.add_booking(booking.clone());
            self.rooms.save(&room).await?;
            booking
        };

        tracing::info!(
            booking_id = %booking.id(),
            room_id = %booking.room_id(),
            start_time = %booking.start_time(),
            end_time = %booking.end_time(),
            "booking confirmed"
        );
        if let Err(err) = self.notifier.send_booking_confirmation(&booking).await {
            tracing::warn!(%err, booking_id = %booking.id(), "failed to send booking confirmation");
        }

        Ok(BookingOutcome::Confirmed(booking))
    }

    /// List the rooms free for the whole window, in repository order.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::InvalidArgument`] when a bound is missing or
    /// the window is empty or inverted (the repository is not consulted),
    /// or a storage error from the repository.
    pub async fn get_available_rooms(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, RoombookError> {
        let (start, end) = query.window()?;
        let rooms = self.rooms.find_all().await?;
        Ok(rooms
            .into_iter()
            .filter(|room| room.is_available(start, end))
            .collect())
    }

    /// Cancel a booking that has not started yet.
    ///
    /// Returns `false` when no room holds `booking_id`, including when it
    /// was already cancelled. A failed cancellation notice is logged and
    /// does not undo the cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`RoombookError::InvalidArgument`] for a blank id,
    /// [`RoombookError::IllegalState`] when the booking has already started
    /// or ended, or a storage error from the repository.
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<bool, RoombookError> {
        let booking_id = booking_id.trim();
        if booking_id.is_empty() {
            return Err(InvalidArgument::MissingBookingId.into());
        }
        let Ok(booking_id) = booking_id.parse::<BookingId>() else {
            tracing::debug!(booking_id, "malformed booking id, nothing to cancel");
            return Ok(false);
        };

        let Some(room_id) = self.find_room_holding(booking_id).await? else {
            tracing::debug!(%booking_id, "no room holds booking");
            return Ok(false);
        };

        let removed = {
            let _guard = self.locks.lock(&room_id).await;
            // Reload under the lock: a concurrent cancel may have won the race.
            let Some(mut room) = self.rooms.find_by_id(&room_id).await? else {
                return Ok(false);
            };
            match room.get_booking(booking_id) {
                None => return Ok(false),
                Some(booking) if !booking.is_cancellable_at(self.clock.current_time()) => {
                    return Err(IllegalState::BookingAlreadyStarted.into());
                }
                Some(_) => {}
            }
            let Some(removed) = room.remove_booking(booking_id) else {
                return Ok(false);
            };
            self.rooms.save(&room).await?;
            removed
        };

        tracing::info!(booking_id = %removed.id(), room_id = %removed.room_id(), "booking cancelled");
        if let Err(err) = self.notifier.send_cancellation_confirmation(&removed).await {
            tracing::warn!(%err, booking_id = %removed.id(), "failed to send cancellation confirmation");
        }

        Ok(true)
    }

    async fn find_room_holding(&self, booking_id: BookingId) -> Result<Option<RoomId>, RoombookError> {
        let rooms = self.rooms.find_all().await?;
        Ok(rooms
            .into_iter()
            .find(|room| room.has_booking(booking_id))
            .map(|room| room.id().clone()))
    }
}
