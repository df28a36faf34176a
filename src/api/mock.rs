//! # Mock Backend
//!
//! Serves the static fixtures with an artificial delay so callers see the
//! same async shape a remote API would give them.
//!
//! Every query filters the full fixture into a freshly allocated result.
//! There is no cancellation: if two overlapping queries resolve out of order,
//! whichever the caller applies last wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::{Value, json};

use super::filter::{self, FarmFilter, MachineFilter, NoFilter, WeatherFilter};
use super::fixtures;
use super::provider::{ApiError, MarketplaceApi};
use super::types::{Collection, Crop, Farm, Machine, Payload, QueryResult, Session, Stats, User, Weather};

pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_millis(400);
pub const DEFAULT_RENTAL_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(600);
pub const DEFAULT_REGISTER_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_WEATHER_LOCATION: &str = "Colombo";

const MOCK_TOKEN: &str = "mock_token_xyz";

/// Simulated latency per call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    pub query: Duration,
    pub rental: Duration,
    pub login: Duration,
    pub register: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY_DELAY,
            rental: DEFAULT_RENTAL_DELAY,
            login: DEFAULT_LOGIN_DELAY,
            register: DEFAULT_REGISTER_DELAY,
        }
    }
}

impl Latency {
    /// Same delay everywhere.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            query: delay,
            rental: delay,
            login: delay,
            register: delay,
        }
    }

    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }
}

/// Kinds of record the mock can create, each with its default field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Rental,
    Registration,
}

impl RecordKind {
    /// Field forced onto every created record, after the payload is merged.
    pub fn default_field(self) -> (&'static str, &'static str) {
        match self {
            RecordKind::Rental => ("status", "pending"),
            RecordKind::Registration => ("role", "farmer"),
        }
    }

    fn delay(self, latency: &Latency) -> Duration {
        match self {
            RecordKind::Rental => latency.rental,
            RecordKind::Registration => latency.register,
        }
    }
}

/// Time-based ids that never repeat, even within one millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the epoch, bumped past the previous id if needed.
    pub fn next(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

/// In-memory implementation of [`MarketplaceApi`].
#[derive(Debug)]
pub struct MockApi {
    latency: Latency,
    ids: IdGenerator,
    default_location: String,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

impl MockApi {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            ids: IdGenerator::new(),
            default_location: DEFAULT_WEATHER_LOCATION.to_string(),
        }
    }

    /// Location used by a weather query that names none.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    /// Generic entry point: parse `filters` for `collection`, then run the typed query.
    ///
    /// A bad filter fails immediately, before any simulated latency.
    pub async fn query(&self, collection: Collection, filters: Value) -> Result<QueryResult, ApiError> {
        debug!("query {collection} with {filters}");
        match collection {
            Collection::Machines => {
                let f: MachineFilter = filter::parse(collection, filters)?;
                self.get_machines(&f).await.map(QueryResult::Machines)
            }
            Collection::Farms => {
                let f: FarmFilter = filter::parse(collection, filters)?;
                self.get_farms(&f).await.map(QueryResult::Farms)
            }
            Collection::Crops => {
                filter::parse::<NoFilter>(collection, filters)?;
                self.get_crops().await.map(QueryResult::Crops)
            }
            Collection::Weather => {
                let f: WeatherFilter = filter::parse(collection, filters)?;
                let location = f.location.as_deref().unwrap_or(self.default_location.as_str());
                self.get_weather(location).await.map(QueryResult::Weather)
            }
            Collection::Stats => {
                filter::parse::<NoFilter>(collection, filters)?;
                self.get_stats().await.map(QueryResult::Stats)
            }
        }
    }

    /// Synthesises an id, merges the payload over it and applies the kind's default field.
    /// The payload shape is not checked.
    pub async fn create_record(&self, kind: RecordKind, payload: Payload) -> Result<Payload, ApiError> {
        let mut record = Payload::new();
        record.insert("id".to_string(), json!(self.ids.next()));
        record.extend(payload);
        let (field, value) = kind.default_field();
        record.insert(field.to_string(), json!(value));
        respond(record, kind.delay(&self.latency)).await
    }
}

/// Resolves with `data` after `delay`.
async fn respond<T>(data: T, delay: Duration) -> Result<T, ApiError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    Ok(data)
}

#[async_trait]
impl MarketplaceApi for MockApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_machines(&self, filter: &MachineFilter) -> Result<Vec<Machine>, ApiError> {
        let results = filter::apply(fixtures::machines(), filter);
        debug!("get_machines matched {} of {}", results.len(), fixtures::machines().len());
        respond(results, self.latency.query).await
    }

    async fn get_machine_by_id(&self, id: u64) -> Result<Machine, ApiError> {
        match fixtures::machines().iter().find(|m| m.id == id) {
            Some(machine) => respond(machine.clone(), self.latency.query).await,
            None => {
                warn!("Machine {id} not found");
                Err(ApiError::NotFound("Machine".to_string()))
            }
        }
    }

    async fn get_farms(&self, filter: &FarmFilter) -> Result<Vec<Farm>, ApiError> {
        respond(filter::apply(fixtures::farms(), filter), self.latency.query).await
    }

    async fn get_crops(&self) -> Result<Vec<Crop>, ApiError> {
        respond(fixtures::crops().to_vec(), self.latency.query).await
    }

    async fn get_weather(&self, location: &str) -> Result<Weather, ApiError> {
        let weather = Weather {
            location: location.to_string(),
            ..fixtures::weather().clone()
        };
        respond(weather, self.latency.query).await
    }

    async fn get_stats(&self) -> Result<Stats, ApiError> {
        respond(fixtures::stats().clone(), self.latency.query).await
    }

    async fn create_rental(&self, payload: Payload) -> Result<Payload, ApiError> {
        info!("Creating rental: {}", Value::Object(payload.clone()));
        self.create_record(RecordKind::Rental, payload).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        if email.is_empty() || password.is_empty() {
            warn!("Login rejected: empty credentials");
            return Err(ApiError::InvalidCredentials);
        }
        let session = Session {
            token: MOCK_TOKEN.to_string(),
            user: User {
                name: "Nimal Perera".to_string(),
                email: email.to_string(),
                role: "farmer".to_string(),
            },
        };
        respond(session, self.latency.login).await
    }

    async fn register(&self, data: Payload) -> Result<Payload, ApiError> {
        self.create_record(RecordKind::Registration, data).await
    }
}
