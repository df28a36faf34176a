use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Free-form record body used by create operations. Shape is the caller's business.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Anything addressable by a numeric id.
pub trait Record {
    fn id(&self) -> u64;
}

/// Queryable collections.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Machines,
    Farms,
    Crops,
    Weather,
    Stats,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Machines => "machines",
            Collection::Farms => "farms",
            Collection::Crops => "crops",
            Collection::Weather => "weather",
            Collection::Stats => "stats",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Machines
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    Tractor,
    Harvester,
    #[serde(alias = "Agricultural Drone")]
    Drone,
    Plough,
    Sprayer,
    Loader,
    #[serde(rename = "Mini Tractor")]
    MiniTractor,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Tractor,
        Category::Harvester,
        Category::Drone,
        Category::Plough,
        Category::Sprayer,
        Category::Loader,
        Category::MiniTractor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Tractor => "Tractor",
            Category::Harvester => "Harvester",
            Category::Drone => "Drone",
            Category::Plough => "Plough",
            Category::Sprayer => "Sprayer",
            Category::Loader => "Loader",
            Category::MiniTractor => "Mini Tractor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the listed price is charged per.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Day,
    Acre,
}

impl PriceUnit {
    pub fn label(self) -> &'static str {
        match self {
            PriceUnit::Day => "day",
            PriceUnit::Acre => "acre",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Machine {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub district: String,
    /// Price in LKR per `unit`.
    pub price: u64,
    pub unit: PriceUnit,
    pub owner: String,
    pub rating: f32,
    pub reviews: u32,
    pub available: bool,
    pub image: String,
    /// Whether an operator comes with the machine.
    pub operator: bool,
}

impl Record for Machine {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A machine pinned on the map.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MachineLocation {
    pub id: u64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
    pub price: u64,
    pub available: bool,
    pub district: String,
}

impl Record for MachineLocation {
    fn id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// Farms & crops
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FarmStatus {
    Active,
    Idle,
}

impl fmt::Display for FarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FarmStatus::Active => f.write_str("active"),
            FarmStatus::Idle => f.write_str("idle"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Farm {
    pub id: u64,
    pub name: String,
    pub location: String,
    /// Hectares.
    pub size: f64,
    pub crop: String,
    pub status: FarmStatus,
    pub owner: String,
}

impl Record for Farm {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Crop {
    pub id: u64,
    pub name: String,
    pub season: String,
    pub duration: String,
    pub water: String,
    /// Categories of machinery typically needed, free text.
    pub machinery: Vec<String>,
    pub tips: String,
    pub icon: String,
}

impl Record for Crop {
    fn id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// Weather & stats
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Celsius.
    pub temp: i32,
    pub feels_like: i32,
    /// Percent.
    pub humidity: u8,
    /// km/h.
    pub wind: u32,
    pub condition: String,
    pub icon: String,
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: String,
    pub icon: String,
    /// Chance of rain, percent.
    pub rain: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Weather {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    /// The location that was asked for.
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_machines: u64,
    pub total_operators: u64,
    pub total_farms: u64,
    pub active_rentals: u64,
    pub monthly_revenue: u64,
    pub avg_rating: f32,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    /// First word of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Results of the generic [`query`](super::MockApi::query) entry point.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum QueryResult {
    Machines(Vec<Machine>),
    Farms(Vec<Farm>),
    Crops(Vec<Crop>),
    Weather(Weather),
    Stats(Stats),
}

impl QueryResult {
    /// Number of records, singleton documents count as one.
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Machines(v) => v.len(),
            QueryResult::Farms(v) => v.len(),
            QueryResult::Crops(v) => v.len(),
            QueryResult::Weather(_) | QueryResult::Stats(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_legacy_drone_label() {
        let cat: Category = serde_json::from_str("\"Agricultural Drone\"").unwrap();
        assert_eq!(cat, Category::Drone);
        let cat: Category = serde_json::from_str("\"Mini Tractor\"").unwrap();
        assert_eq!(cat, Category::MiniTractor);
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let stats = Stats {
            total_machines: 1,
            total_operators: 2,
            total_farms: 3,
            active_rentals: 4,
            monthly_revenue: 5,
            avg_rating: 4.5,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalMachines"], 1);
        assert_eq!(json["monthlyRevenue"], 5);
    }

    #[test]
    fn test_first_name() {
        let user = User {
            name: "Nimal Perera".into(),
            email: "n@example.com".into(),
            role: "farmer".into(),
        };
        assert_eq!(user.first_name(), "Nimal");
    }

    #[test]
    fn test_query_result_len() {
        assert_eq!(QueryResult::Machines(vec![]).len(), 0);
        assert!(QueryResult::Farms(vec![]).is_empty());
    }
}
