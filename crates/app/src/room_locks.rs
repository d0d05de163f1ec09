//! Per-room mutual exclusion for check-then-act booking sequences.
//!
//! Each room id maps to its own async mutex, so bookings on different rooms
//! proceed in parallel while two requests for the same room are serialized.
//! A slot lives in the table while anyone holds or waits for it, including
//! waiters whose `lock` future is dropped before it resolves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use roombook_domain::id::RoomId;

#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    /// Holders plus waiters.
    users: usize,
}

type Slots = HashMap<RoomId, Slot>;

/// Keyed lock table shared by every use-case that mutates rooms.
///
/// Cloning is cheap and yields a handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct RoomLocks {
    slots: Arc<Mutex<Slots>>,
}

impl RoomLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room_id`.
    ///
    /// The returned guard releases the room when dropped.
    pub async fn lock(&self, room_id: &RoomId) -> RoomGuard {
        let (lease, mutex) = self.enter(room_id);
        let guard = mutex.lock_owned().await;
        RoomGuard {
            _guard: guard,
            _lease: lease,
        }
    }

    fn enter(&self, room_id: &RoomId) -> (SlotLease, Arc<AsyncMutex<()>>) {
        let mut slots = lock_slots(&self.slots);
        let slot = slots.entry(room_id.clone()).or_default();
        slot.users += 1;
        let mutex = Arc::clone(&slot.mutex);
        let lease = SlotLease {
            room_id: room_id.clone(),
            slots: Arc::clone(&self.slots),
        };
        (lease, mutex)
    }

    /// Number of rooms currently locked or awaited.
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        lock_slots(&self.slots).len()
    }
}

/// Exclusive access to one room, released on drop.
#[derive(Debug)]
pub struct RoomGuard {
    // Field order matters: the mutex is released before the lease is returned.
    _guard: OwnedMutexGuard<()>,
    _lease: SlotLease,
}

/// One registered user of a slot; the last one out removes it.
#[derive(Debug)]
struct SlotLease {
    room_id: RoomId,
    slots: Arc<Mutex<Slots>>,
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        let mut slots = lock_slots(&self.slots);
        if let Some(slot) = slots.get_mut(&self.room_id) {
            slot.users -= 1;
            if slot.users == 0 {
                slots.remove(&self.room_id);
            }
        }
    }
}

fn lock_slots(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}
