//! # Query Filters
//!
//! One closed struct per collection. Each field is an optional predicate:
//! `None` places no constraint, `Some` must hold. Predicates combine with AND.
//!
//! Filters arrive at the boundary as JSON objects. Unknown keys and values of
//! the wrong type are rejected there ([`parse`]) instead of being ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::provider::ApiError;
use super::types::{Category, Collection, Farm, FarmStatus, Machine, MachineLocation};

/// A pure test over a single record.
pub trait Predicate<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Filters `source` in place order. Always starts from the full source slice.
pub fn apply<R: Clone, P: Predicate<R>>(source: &[R], predicate: &P) -> Vec<R> {
    source
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parses a boundary filter object for `collection`. `null` means no filter.
pub fn parse<F: DeserializeOwned + Default>(collection: Collection, filters: Value) -> Result<F, ApiError> {
    if filters.is_null() {
        return Ok(F::default());
    }
    serde_json::from_value(filters)
        .map_err(|e| ApiError::InvalidFilter(format!("{collection}: {e}")))
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MachineFilter {
    /// Exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Case-insensitive substring of the district.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Case-insensitive substring of the machine name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl MachineFilter {
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

impl Predicate<Machine> for MachineFilter {
    fn matches(&self, machine: &Machine) -> bool {
        self.category.is_none_or(|c| machine.category == c)
            && self
                .district
                .as_deref()
                .is_none_or(|d| contains_ignore_case(&machine.district, d))
            && self.available.is_none_or(|a| machine.available == a)
            && self
                .query
                .as_deref()
                .is_none_or(|q| contains_ignore_case(&machine.name, q))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FarmFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FarmStatus>,
}

impl Predicate<Farm> for FarmFilter {
    fn matches(&self, farm: &Farm) -> bool {
        self.status.is_none_or(|s| farm.status == s)
    }
}

/// Marker filter for the map view.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MapFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Predicate<MachineLocation> for MapFilter {
    fn matches(&self, location: &MachineLocation) -> bool {
        self.category.is_none_or(|c| location.category == c)
            && self.available.is_none_or(|a| location.available == a)
    }
}

/// Weather takes a location rather than a predicate.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeatherFilter {
    pub location: Option<String>,
}

/// Collections with no filterable fields. Any key is rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NoFilter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use crate::api::types::Record;
    use serde_json::json;

    fn ids<R: Record>(records: &[R]) -> Vec<u64> {
        records.iter().map(Record::id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let result = apply(fixtures::machines(), &MachineFilter::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_category_exact_match() {
        let result = apply(fixtures::machines(), &MachineFilter::default().category(Category::Tractor));
        assert_eq!(ids(&result), vec![1, 4, 6]);
    }

    #[test]
    fn test_district_is_case_insensitive_substring() {
        let result = apply(fixtures::machines(), &MachineFilter::default().district("POLONN"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_query_matches_name() {
        let result = apply(fixtures::machines(), &MachineFilter::default().query("harvester"));
        assert_eq!(ids(&result), vec![2, 5]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let filter = MachineFilter::default()
            .category(Category::Tractor)
            .available(true)
            .query("a");
        let result = apply(fixtures::machines(), &filter);
        for m in &result {
            assert_eq!(m.category, Category::Tractor);
            assert!(m.available);
            assert!(m.name.to_lowercase().contains('a'));
        }
        // JOHN DEERE 5075E has no "a" in its name
        assert_eq!(ids(&result), vec![1, 6]);

        let none = apply(fixtures::machines(), &MachineFilter::default().category(Category::Drone).available(true));
        assert!(none.is_empty());
    }

    #[test]
    fn test_farm_status_filter() {
        let idle = apply(fixtures::farms(), &FarmFilter { status: Some(FarmStatus::Idle) });
        assert_eq!(ids(&idle), vec![3]);
    }

    #[test]
    fn test_map_filter() {
        let filter = MapFilter { category: Some(Category::Drone), available: Some(true) };
        let result = apply(fixtures::machine_locations(), &filter);
        assert_eq!(ids(&result), vec![9]);
    }

    #[test]
    fn test_parse_accepts_known_keys() {
        let filter: MachineFilter = parse(
            Collection::Machines,
            json!({ "category": "Tractor", "available": true }),
        )
        .unwrap();
        assert_eq!(filter.category, Some(Category::Tractor));
        assert_eq!(filter.available, Some(true));
    }

    #[test]
    fn test_parse_null_is_empty_filter() {
        let filter: FarmFilter = parse(Collection::Farms, Value::Null).unwrap();
        assert_eq!(filter, FarmFilter::default());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse::<MachineFilter>(Collection::Machines, json!({ "colour": "red" })).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(ref msg) if msg.starts_with("machines:")));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let err = parse::<MachineFilter>(Collection::Machines, json!({ "available": "yes" })).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(_)));
    }

    #[test]
    fn test_no_filter_rejects_any_key() {
        assert!(parse::<NoFilter>(Collection::Crops, json!({})).is_ok());
        assert!(parse::<NoFilter>(Collection::Stats, json!({ "x": 1 })).is_err());
    }
}
