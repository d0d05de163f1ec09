//! Clock port — the single source of "now" for temporal business rules.

use roombook_domain::time::{self, Timestamp};

/// Supplies the current instant.
///
/// Use-cases must read the time through this trait, never from the system
/// clock directly, so that tests can pin "now".
pub trait TimeProvider {
    /// The current instant.
    fn current_time(&self) -> Timestamp;
}

impl<T: TimeProvider + ?Sized> TimeProvider for std::sync::Arc<T> {
    fn current_time(&self) -> Timestamp {
        (**self).current_time()
    }
}

/// [`TimeProvider`] backed by the host's UTC clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn current_time(&self) -> Timestamp {
        time::now()
    }
}
