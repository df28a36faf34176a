//! # Core Application Logic
//!
//! Session state, local persistence, configuration and the event plumbing
//! that connects user input to the data layer. It knows nothing about how
//! the screen is drawn.
//!
//! ```text
//!            ┌──────────────┐   UiEvent    ┌──────────────┐
//!   input ──►│   EventBus   │─────────────►│   handlers   │
//!            └──────────────┘              └──────┬───────┘
//!                                                 │ query
//!                                                 ▼
//!   ┌──────────────┐  load/save  ┌──────────────┐ ┌──────────────┐
//!   │    Store     │◄───────────►│   AppState   │ │ MarketplaceApi│
//!   └──────────────┘             └──────────────┘ └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: layered settings (defaults → file → env → CLI)
//! - [`events`]: `UiEvent`, `EventBus` subscriptions and `Debouncer`
//! - [`state`]: `AppState`, the signed-in user and token
//! - [`store`]: namespaced JSON key-value store on disk

pub mod config;
pub mod events;
pub mod state;
pub mod store;

pub use events::{Debouncer, EventBus, EventKind, Subscription, UiEvent};
pub use state::AppState;
pub use store::Store;
