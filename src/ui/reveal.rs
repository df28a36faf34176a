//! Scroll-in reveal for cards.
//!
//! Cards start hidden. The first [`UiEvent::Visible`] for a card's id marks it
//! revealed and drops that card's subscription, so each card animates once.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::core::events::{EventBus, EventKind, Subscription, UiEvent};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default, Clone)]
pub struct Reveal {
    revealed: Arc<Mutex<BTreeSet<String>>>,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watches `bus` for the card `id` coming into view.
    pub fn observe(&self, bus: &EventBus, id: impl Into<String>) {
        let target = id.into();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::default();
        let own = Arc::clone(&slot);
        let revealed = Arc::clone(&self.revealed);

        let subscription = bus.on(EventKind::Visible, move |event| {
            if let UiEvent::Visible { id } = event
                && *id == target
            {
                lock(&revealed).insert(target.clone());
                debug!("Revealed {target}");
                // Unobserve
                drop(lock(&own).take());
            }
        });
        *lock(&slot) = Some(subscription);
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        lock(&self.revealed).contains(id)
    }

    pub fn revealed_count(&self) -> usize {
        lock(&self.revealed).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_revealed_once_then_unobserved() {
        let bus = EventBus::new();
        let reveal = Reveal::new();
        for id in ["machine-1", "machine-2", "machine-3"] {
            reveal.observe(&bus, id);
        }
        assert_eq!(bus.handler_count(), 3);

        bus.emit(&UiEvent::Visible { id: "machine-2".into() });
        assert!(reveal.is_revealed("machine-2"));
        assert!(!reveal.is_revealed("machine-1"));
        assert_eq!(bus.handler_count(), 2);

        bus.emit(&UiEvent::Visible { id: "machine-2".into() });
        assert_eq!(bus.handler_count(), 2);
        assert_eq!(reveal.revealed_count(), 1);
    }

    #[test]
    fn test_unknown_id_reveals_nothing() {
        let bus = EventBus::new();
        let reveal = Reveal::new();
        reveal.observe(&bus, "farm-1");
        bus.emit(&UiEvent::Visible { id: "farm-9".into() });
        assert_eq!(reveal.revealed_count(), 0);
        assert_eq!(bus.handler_count(), 1);
    }
}
