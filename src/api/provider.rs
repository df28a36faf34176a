use std::fmt;

use async_trait::async_trait;

use super::filter::{FarmFilter, MachineFilter};
use super::types::{Crop, Farm, Machine, Payload, Session, Stats, Weather};

/// Errors returned by marketplace operations.
/// Nothing is retried internally; the caller decides.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Lookup by identifier found no record.
    NotFound(String),
    /// Login attempted with an empty email or password.
    InvalidCredentials,
    /// Filter object had an unknown key or a value of the wrong type.
    InvalidFilter(String),
    /// Backend answered with a non-2xx status.
    Transport { status: u16, message: String },
    /// Connection-level failure (DNS, refused, timeout).
    Network(String),
    /// Response body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(what) => write!(f, "{what} not found"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::InvalidFilter(msg) => write!(f, "invalid filter: {msg}"),
            ApiError::Transport { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The data surface the rendering layer talks to.
///
/// Every operation is async and returns either the data or an [`ApiError`];
/// [`Envelope`](super::Envelope) turns that into the `{success, ...}` shape.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    async fn get_machines(&self, filter: &MachineFilter) -> Result<Vec<Machine>, ApiError>;

    /// Fails with [`ApiError::NotFound`] when no machine has this id.
    async fn get_machine_by_id(&self, id: u64) -> Result<Machine, ApiError>;

    async fn get_farms(&self, filter: &FarmFilter) -> Result<Vec<Farm>, ApiError>;

    async fn get_crops(&self) -> Result<Vec<Crop>, ApiError>;

    async fn get_weather(&self, location: &str) -> Result<Weather, ApiError>;

    async fn get_stats(&self) -> Result<Stats, ApiError>;

    async fn create_rental(&self, payload: Payload) -> Result<Payload, ApiError>;

    /// Fails with [`ApiError::InvalidCredentials`] when either field is empty.
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError>;

    async fn register(&self, data: Payload) -> Result<Payload, ApiError>;
}
