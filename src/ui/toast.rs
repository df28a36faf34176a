//! Transient notifications.
//!
//! `Toasts` is a queue the UI drains on each frame: `show` pushes, `prune`
//! drops whatever has outlived its duration.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Default,
}

impl ToastKind {
    /// Material symbol name.
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "check_circle",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Default => "info",
        }
    }

    /// Terminal stand-in for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Warning => "⚠",
            ToastKind::Default => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.glyph(), self.message)
    }
}

#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a toast; `duration` defaults to [`DEFAULT_DURATION`]. Returns its id.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, duration: Option<Duration>) -> u64 {
        self.next_id += 1;
        let message = message.into();
        log::debug!("Toast ({:?}): {}", kind, message);
        self.items.push(Toast {
            id: self.next_id,
            message,
            kind,
            expires_at: Instant::now() + duration.unwrap_or(DEFAULT_DURATION),
        });
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Success, None)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Error, None)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Warning, None)
    }

    /// Visible toasts, oldest first.
    pub fn active(&self) -> &[Toast] {
        &self.items
    }

    /// Drops expired toasts and returns how many went.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        before - self.items.len()
    }

    /// Removes and returns everything queued, expired or not.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_prune_after_duration() {
        let mut toasts = Toasts::new();
        toasts.success("Saved");
        toasts.show("Short", ToastKind::Default, Some(Duration::from_millis(500)));
        assert_eq!(toasts.active().len(), 2);

        tokio::time::advance(Duration::from_millis(600)).await;
        assert_eq!(toasts.prune(Instant::now()), 1);
        assert_eq!(toasts.active()[0].message, "Saved");

        tokio::time::advance(DEFAULT_DURATION).await;
        assert_eq!(toasts.prune(Instant::now()), 1);
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn test_ids_increase() {
        let mut toasts = Toasts::new();
        let a = toasts.error("a");
        let b = toasts.warning("b");
        assert!(b > a);
    }

    #[test]
    fn test_display_uses_glyph() {
        let mut toasts = Toasts::new();
        toasts.warning("Please login to book a machine.");
        assert_eq!(toasts.active()[0].to_string(), "⚠ Please login to book a machine.");
        assert_eq!(toasts.active()[0].kind.icon(), "warning");
        assert_eq!(toasts.drain().len(), 1);
        assert!(toasts.active().is_empty());
    }
}
