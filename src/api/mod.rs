//! # Data Access
//!
//! Query and mutation operations over the marketplace collections.
//!
//! ```text
//!  filter change ──► MarketplaceApi::get_machines(filter)
//!                        │  (simulated latency)
//!                        ▼
//!                  Result<Vec<Machine>, ApiError> ──► PageSlicer::set_data
//! ```
//!
//! - [`provider`]: the `MarketplaceApi` trait and `ApiError`
//! - [`mock`]: fixture-backed implementation with artificial delay
//! - [`filter`]: closed per-collection filter structs
//! - [`client`]: passthrough HTTP helper for a future real backend

pub mod client;
pub mod envelope;
pub mod filter;
pub mod fixtures;
pub mod mock;
pub mod provider;
pub mod types;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use filter::{FarmFilter, MachineFilter, MapFilter};
pub use mock::{Latency, MockApi, RecordKind};
pub use provider::{ApiError, MarketplaceApi};
pub use types::{
    Category, Collection, Crop, Farm, FarmStatus, Machine, MachineLocation, Payload, QueryResult,
    Record, Session, Stats, User, Weather,
};
