//! Scoped global pointer listener.
//!
//! Outside-click detection needs a document-wide pointer-down listener. It is
//! only registered while a menu is open: [`PointerSubscription`] holds the
//! registration and releases it when dropped, so closing a menu or tearing
//! down the list can never leak a listener.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

/// Handle of one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host capability that registers the global pointer-down listener.
///
/// The host forwards pointer-downs of registered listeners to
/// [`ListView::pointer_down`](crate::list_view::ListView::pointer_down).
pub trait PointerEvents {
    fn subscribe(&self) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// An acquired listener registration, released on drop.
pub struct PointerSubscription {
    source: Arc<dyn PointerEvents>,
    id: ListenerId,
}

impl PointerSubscription {
    /// Register a listener with `source`.
    pub fn acquire(source: Arc<dyn PointerEvents>) -> Self {
        let id = source.subscribe();
        debug!("Pointer listener {:?} acquired", id);
        Self { source, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        debug!("Pointer listener {:?} released", self.id);
        self.source.unsubscribe(self.id);
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("id", &self.id)
            .finish()
    }
}

/// A simple listener table for hosts that poll instead of using callbacks.
///
/// Tracks the active registrations so the host knows whether pointer-downs
/// must be forwarded at all.
#[derive(Debug, Default)]
pub struct PointerListeners {
    next: AtomicU64,
    active: Mutex<HashSet<ListenerId>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    pub fn active_count(&self) -> usize {
        self.active().len()
    }

    fn active(&self) -> MutexGuard<'_, HashSet<ListenerId>> {
        self.active.lock().unwrap_or_else(|poisoned| {
            warn!("Pointer listener table was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Whether pointer-downs should be forwarded.
    pub fn is_listening(&self) -> bool {
        self.active_count() > 0
    }
}

impl PointerEvents for PointerListeners {
    fn subscribe(&self) -> ListenerId {
        let id = ListenerId(self.next.fetch_add(1, Ordering::SeqCst));
        self.active().insert(id);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        if !self.active().remove(&id) {
            warn!("Pointer listener {:?} was not registered", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisoned_table_keeps_tracking() {
        let listeners = Arc::new(PointerListeners::new());
        let first = listeners.subscribe();

        let poisoner = Arc::clone(&listeners);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.active.lock().unwrap();
            panic!("poison the table");
        })
        .join();
        assert!(result.is_err());
        assert!(listeners.active.is_poisoned());

        let second = listeners.subscribe();
        assert_eq!(listeners.active_count(), 2);

        listeners.unsubscribe(first);
        listeners.unsubscribe(second);
        assert!(!listeners.is_listening());
    }
}
