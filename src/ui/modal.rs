//! Modal overlays tracked by id.

use std::collections::BTreeSet;

use crate::core::events::UiEvent;

/// Which of the known overlays are open. Unknown ids are ignored.
#[derive(Debug, Default)]
pub struct Modals {
    known: BTreeSet<String>,
    open: BTreeSet<String>,
}

impl Modals {
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: ids.into_iter().map(Into::into).collect(),
            open: BTreeSet::new(),
        }
    }

    /// Returns false when `id` is not a known overlay.
    pub fn open(&mut self, id: &str) -> bool {
        if !self.known.contains(id) {
            return false;
        }
        self.open.insert(id.to_string());
        true
    }

    pub fn close(&mut self, id: &str) {
        self.open.remove(id);
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    /// A click on any overlay backdrop closes every modal.
    pub fn handle_event(&mut self, event: &UiEvent) {
        if let UiEvent::OverlayClick { .. } = event {
            self.close_all();
        }
    }
}
