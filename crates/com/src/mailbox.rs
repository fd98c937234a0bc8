use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

struct Shared<T> {
    slot: Mutex<Option<T>>,
    filled: Condvar,
}

/// Single-slot handoff that always holds the freshest item.
///
/// `put` never blocks: it overwrites whatever is still waiting in the slot.
/// `get` blocks until an item is present and takes it out, so each item is
/// received by exactly one caller. There is no close signal; a consumer
/// waiting on a dead producer waits forever, so producers must be watched
/// through their `HealthMonitor`.
///
/// Cloning yields another handle to the same slot.
pub struct Mailbox<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(None),
                filled: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.shared
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `item`, discarding any unread one. Returns true if an item was discarded.
    pub fn put(&self, item: T) -> bool {
        let replaced = self.lock().replace(item).is_some();
        self.shared.filled.notify_one();
        replaced
    }

    /// Wait for an item and take it.
    pub fn get(&self) -> T {
        let mut slot = self.lock();
        loop {
            if let Some(item) = slot.take() {
                return item;
            }
            slot = self
                .shared
                .filled
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Take the pending item, if any, without waiting.
    pub fn try_get(&self) -> Option<T> {
        self.lock().take()
    }

    /// Like `get`, but gives up after `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.lock();
        loop {
            if let Some(item) = slot.take() {
                return Some(item);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            slot = self
                .shared
                .filled
                .wait_timeout(slot, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }
}
