//! In-process notification bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use roombook_domain::booking::Booking;
use roombook_domain::error::NotificationError;
use roombook_domain::notification::{Notification, NotificationKind};

use crate::ports::{NotificationFeed, NotificationService, SystemClock, TimeProvider};

/// [`NotificationService`] that fans notices out to in-process subscribers.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notice is simply dropped).
pub struct InProcessNotificationBus<C = SystemClock> {
    sender: broadcast::Sender<Notification>,
    clock: C,
}

impl InProcessNotificationBus {
    /// Create a new bus with the given channel capacity, stamping notices
    /// with the system clock.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<C: TimeProvider> InProcessNotificationBus<C> {
    /// Create a new bus stamping notices with `clock`.
    #[must_use]
    pub fn with_clock(capacity: usize, clock: C) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, clock }
    }

    fn publish(&self, kind: NotificationKind, booking: &Booking) {
        let notification = Notification::new(kind, booking.clone(), self.clock.current_time());
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(notification);
    }
}

impl<C: TimeProvider + Send + Sync> NotificationService for InProcessNotificationBus<C> {
    fn send_booking_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        self.publish(NotificationKind::BookingConfirmed, booking);
        async { Ok(()) }
    }

    fn send_cancellation_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        self.publish(NotificationKind::BookingCancelled, booking);
        async { Ok(()) }
    }
}

impl<C> NotificationFeed for InProcessNotificationBus<C> {
    fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}
