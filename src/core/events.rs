//! # UI Events
//!
//! Explicit subscriptions in place of ambient listeners.
//!
//! ```text
//! bus.on(kind, handler) ──► Subscription
//!                              │ drop / dispose()
//!                              ▼
//!                       handler removed
//! ```
//!
//! Handlers run synchronously inside `emit`, in subscription order, with the
//! registry unlocked. A handler may dispose its own subscription, subscribe
//! or emit. A nested emit skips the handler that is already running.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError, Weak};
use std::time::Duration;

use log::debug;
use tokio::task::AbortHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    FilterChanged,
    /// 1-based page number from the page-index control.
    PageSelected(usize),
    Scroll { y: f32 },
    Key(String),
    /// Click on a modal's backdrop.
    OverlayClick { id: String },
    /// Element scrolled into view.
    Visible { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FilterChanged,
    PageSelected,
    Scroll,
    Key,
    OverlayClick,
    Visible,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::FilterChanged => EventKind::FilterChanged,
            UiEvent::PageSelected(_) => EventKind::PageSelected,
            UiEvent::Scroll { .. } => EventKind::Scroll,
            UiEvent::Key(_) => EventKind::Key,
            UiEvent::OverlayClick { .. } => EventKind::OverlayClick,
            UiEvent::Visible { .. } => EventKind::Visible,
        }
    }
}

type Handler = Arc<Mutex<dyn FnMut(&UiEvent) + Send>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, EventKind, Handler)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(h, _, _)| *h == id)
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking handler leaves the data itself intact
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind`. It stays registered until the
    /// returned handle is dropped or disposed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn on<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&UiEvent) + Send + 'static,
    {
        let mut registry = lock(&self.registry);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.handlers.push((id, kind, Arc::new(Mutex::new(handler))));
        debug!("Subscribed #{id} to {kind:?}");
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every matching handler. Returns how many ran.
    pub fn emit(&self, event: &UiEvent) -> usize {
        let kind = event.kind();
        let matching: Vec<(u64, Handler)> = lock(&self.registry)
            .handlers
            .iter()
            .filter(|(_, handler_kind, _)| *handler_kind == kind)
            .map(|(id, _, handler)| (*id, Arc::clone(handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in matching {
            // Disposed by an earlier handler in this round
            if !lock(&self.registry).contains(id) {
                continue;
            }
            let mut handler = match handler.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {
                    debug!("Skipping #{id}: already handling an event");
                    continue;
                }
            };
            (&mut *handler)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn handler_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }
}

/// Handle to a registered handler.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unsubscribes now. Same as dropping the handle.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).handlers.retain(|(id, _, _)| *id != self.id);
            debug!("Unsubscribed #{}", self.id);
        }
    }
}

/// Trailing-edge debounce: only the last call within `delay` runs.
///
/// Must be used from inside a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Option<AbortHandle>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `f` after the delay, cancelling any call still waiting.
    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        self.pending = Some(task.abort_handle());
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut(&UiEvent) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move |_: &UiEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let bus = EventBus::new();
        let (scrolls, on_scroll) = counter();
        let _sub = bus.on(EventKind::Scroll, on_scroll);

        assert_eq!(bus.emit(&UiEvent::Scroll { y: 10.0 }), 1);
        assert_eq!(bus.emit(&UiEvent::FilterChanged), 0);
        assert_eq!(scrolls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispose_unsubscribes() {
        let bus = EventBus::new();
        let (count, handler) = counter();
        let sub = bus.on(EventKind::Key, handler);
        bus.emit(&UiEvent::Key("Escape".into()));
        sub.dispose();
        bus.emit(&UiEvent::Key("Escape".into()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let (_, handler) = counter();
            let _sub = bus.on(EventKind::Visible, handler);
            assert_eq!(bus.handler_count(), 1);
        }
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = EventBus::new();
        let (_, handler) = counter();
        let sub = bus.on(EventKind::Scroll, handler);
        drop(bus);
        sub.dispose();
    }

    #[test]
    fn test_handler_can_dispose_itself() {
        let bus = EventBus::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::default();
        let (count, mut inner) = counter();
        let own = Arc::clone(&slot);
        let sub = bus.on(EventKind::Visible, move |event| {
            inner(event);
            drop(own.lock().unwrap().take());
        });
        *slot.lock().unwrap() = Some(sub);

        assert_eq!(bus.emit(&UiEvent::Visible { id: "card-1".into() }), 1);
        assert_eq!(bus.handler_count(), 0);
        assert_eq!(bus.emit(&UiEvent::Visible { id: "card-1".into() }), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_disposing_a_later_one_stops_it() {
        let bus = EventBus::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::default();
        let (later_count, later) = counter();
        let victim = Arc::clone(&slot);
        let _first = bus.on(EventKind::Key, move |_| {
            drop(victim.lock().unwrap().take());
        });
        *slot.lock().unwrap() = Some(bus.on(EventKind::Key, later));

        assert_eq!(bus.emit(&UiEvent::Key("Escape".into())), 1);
        assert_eq!(later_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_can_emit_and_subscribe() {
        let bus = EventBus::new();
        let (filters, on_filter) = counter();
        let _filter_sub = bus.on(EventKind::FilterChanged, on_filter);
        let late: Arc<Mutex<Vec<Subscription>>> = Arc::default();

        let inner_bus = bus.clone();
        let keep = Arc::clone(&late);
        let _key_sub = bus.on(EventKind::Key, move |event| {
            inner_bus.emit(&UiEvent::FilterChanged);
            // Nested emit of the same kind skips this running handler
            assert_eq!(inner_bus.emit(event), 0);
            keep.lock().unwrap().push(inner_bus.on(EventKind::Scroll, |_| {}));
        });

        assert_eq!(bus.emit(&UiEvent::Key("/".into())), 1);
        assert_eq!(filters.load(Ordering::SeqCst), 1);
        assert_eq!(bus.handler_count(), 3);
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(UiEvent::PageSelected(2).kind(), EventKind::PageSelected);
        assert_eq!(UiEvent::OverlayClick { id: "m".into() }.kind(), EventKind::OverlayClick);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_runs_last_call_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::default();

        for i in 1..=3 {
            let count = Arc::clone(&count);
            let last = Arc::clone(&last);
            debouncer.call(move || {
                count.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_cancel() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        let c = Arc::clone(&count);
        debouncer.call(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
