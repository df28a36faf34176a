//! # UI Helpers
//!
//! Presentation-side state and formatting that sits between the data layer
//! and whatever draws the screen. Nothing here performs I/O.
//!
//! Every stateful piece (`PageSlicer`, `MapView`, `Toasts`, `Modals`,
//! `NavState`, `Reveal`) is a context object owned by the caller rather than a
//! process-wide singleton.

pub mod cards;
pub mod format;
pub mod map;
pub mod modal;
pub mod nav;
pub mod paginator;
pub mod reveal;
pub mod toast;
pub mod validate;

pub use map::MapView;
pub use modal::Modals;
pub use nav::NavState;
pub use paginator::{PageButton, PageSlicer};
pub use reveal::Reveal;
pub use toast::{ToastKind, Toasts};
