use std::sync::{Arc, Mutex, PoisonError};

use crate::{ChangeEvent, SectionId};

/// Name of the page-wide broadcast fired when the active section changes.
pub const CHANGE_EVENT: &str = "scroll-trigger:change";

/// Identifies one bus subscription.
pub type ListenerId = u64;

type Listener<E> = Arc<dyn Fn(&ChangeEvent<E>) + Send + Sync>;

struct BusInner<E> {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, String, Listener<E>)>,
}

/// A page-wide broadcast registry (the `document` event analog).
///
/// Consumers that do not own the [`crate::ScrollTrigger`] subscribe here and
/// receive the same [`ChangeEvent`] payload as the `on_change` callback.
/// Subscriptions outlive the engine: `destroy` does not detach listeners.
///
/// This is a clone-able handle; all clones share one listener table.
/// Listeners are invoked outside the lock, so a listener may subscribe or
/// unsubscribe reentrantly.
pub struct EventBus<E = SectionId> {
    inner: Arc<Mutex<BusInner<E>>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers `f` for `event` and returns a handle for `unsubscribe`.
    pub fn subscribe(
        &self,
        event: &str,
        f: impl Fn(&ChangeEvent<E>) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, event.to_owned(), Arc::new(f)));
        id
    }

    /// Removes a subscription. Returns `false` when the id is unknown.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _, _)| *lid != id);
        inner.listeners.len() != before
    }

    /// Invokes every listener registered for `event`, in subscription order.
    pub fn emit(&self, event: &str, payload: &ChangeEvent<E>) {
        let matched: Vec<Listener<E>> = {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner
                .listeners
                .iter()
                .filter(|(_, name, _)| name == event)
                .map(|(_, _, f)| Arc::clone(f))
                .collect()
        };
        for f in matched {
            f(payload);
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .listeners
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let len = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len();
        f.debug_struct("EventBus").field("listeners", &len).finish()
    }
}
