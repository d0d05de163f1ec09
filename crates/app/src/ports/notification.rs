//! Notification port — confirmation and cancellation notices.

use std::future::Future;

use tokio::sync::broadcast;

use roombook_domain::booking::Booking;
use roombook_domain::error::NotificationError;
use roombook_domain::notification::Notification;

/// Delivers notices about committed booking changes.
///
/// Both calls happen after the change is persisted; a failure here never
/// undoes the booking change.
pub trait NotificationService {
    /// Announce that `booking` was created.
    fn send_booking_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;

    /// Announce that `booking` was cancelled.
    fn send_cancellation_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

impl<T: NotificationService + Send + Sync> NotificationService for std::sync::Arc<T> {
    fn send_booking_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        (**self).send_booking_confirmation(booking)
    }

    fn send_cancellation_confirmation(
        &self,
        booking: &Booking,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        (**self).send_cancellation_confirmation(booking)
    }
}

/// Live stream of the notices a [`NotificationService`] publishes.
///
/// Implemented by notifiers that can be watched, so readers subscribe to the
/// same instance the use-cases publish through.
pub trait NotificationFeed {
    /// Receive every notice published after this call.
    fn subscribe(&self) -> broadcast::Receiver<Notification>;
}

impl<T: NotificationFeed + ?Sized> NotificationFeed for std::sync::Arc<T> {
    fn subscribe(&self) -> broadcast::Receiver<Notification> {
        (**self).subscribe()
    }
}
