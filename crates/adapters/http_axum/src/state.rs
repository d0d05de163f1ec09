//! Shared application state for axum handlers.

use std::sync::Arc;

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};
use roombook_app::services::booking_system::BookingSystem;
use roombook_app::services::room_service::RoomService;

/// Application state shared across all axum handlers.
///
/// Generic over the clock, room repository and notifier to avoid dynamic
/// dispatch. The notifier doubles as the source of the notification stream,
/// so the stream always carries what the booking system publishes.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<C, R, N> {
    /// Booking, availability and cancellation use-cases.
    pub booking_system: Arc<BookingSystem<C, R, N>>,
    /// Room inventory use-cases.
    pub room_service: Arc<RoomService<R>>,
}

impl<C, R, N> Clone for AppState<C, R, N> {
    fn clone(&self) -> Self {
        Self {
            booking_system: Arc::clone(&self.booking_system),
            room_service: Arc::clone(&self.room_service),
        }
    }
}

impl<C, R, N> AppState<C, R, N>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(booking_system: BookingSystem<C, R, N>, room_service: RoomService<R>) -> Self {
        Self {
            booking_system: Arc::new(booking_system),
            room_service: Arc::new(room_service),
        }
    }
}
