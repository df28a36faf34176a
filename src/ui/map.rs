//! # Machine Map
//!
//! Marker state for the machine map. Tile rendering belongs to whatever draws
//! the map; this module decides which machines are pinned, how each pin looks
//! and where the viewport points.
//!
//! `MapView` is a context object: create one per map, drop it with the view.

use log::debug;
use serde::Serialize;

use crate::api::filter::{self, MapFilter};
use crate::api::fixtures;
use crate::api::{Category, MachineLocation};

/// Centre of Sri Lanka.
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 7.8731, lng: 80.7718 };
pub const DEFAULT_ZOOM: u8 = 7;
pub const FLY_TO_ZOOM: u8 = 10;
pub const MAX_ZOOM: u8 = 18;

const AVAILABLE_COLOR: &str = "#2d6c50";
const UNAVAILABLE_COLOR: &str = "#94a3b8";

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub emoji: &'static str,
    pub color: &'static str,
}

/// Pin glyph by category, coloured by availability.
pub fn marker_icon(category: Category, available: bool) -> MarkerIcon {
    let emoji = match category {
        Category::Tractor => "🚜",
        Category::Harvester => "🌾",
        Category::Drone => "🛸",
        _ => "⚙️",
    };
    let color = if available { AVAILABLE_COLOR } else { UNAVAILABLE_COLOR };
    MarkerIcon { emoji, color }
}

/// Popup body shown when a pin is opened.
pub fn popup_text(machine: &MachineLocation) -> String {
    let status = if machine.available {
        "✓ Available"
    } else {
        "✗ Unavailable"
    };
    format!(
        "{} [{}]\n📍 {} | {}\nLKR {} / day",
        machine.name,
        status,
        machine.district,
        machine.category,
        super::format::thousands(machine.price)
    )
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub machine: MachineLocation,
    pub icon: MarkerIcon,
    pub popup: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapStats {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    /// Distinct categories in first-seen order.
    pub categories: Vec<Category>,
}

#[derive(Debug)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
    markers: Vec<Marker>,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    /// Centred on Sri Lanka with every machine pinned.
    pub fn new() -> Self {
        let mut view = Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            markers: Vec::new(),
        };
        view.filter_markers(&MapFilter::default());
        view
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Clears and re-adds markers for the machines matching `filter`.
    pub fn filter_markers(&mut self, filter: &MapFilter) {
        self.markers = filter::apply(fixtures::machine_locations(), filter)
            .into_iter()
            .map(|machine| Marker {
                icon: marker_icon(machine.category, machine.available),
                popup: popup_text(&machine),
                machine,
            })
            .collect();
        debug!("Map showing {} markers", self.markers.len());
    }

    /// Moves the viewport. `zoom` defaults to [`FLY_TO_ZOOM`] and is capped at [`MAX_ZOOM`].
    pub fn fly_to(&mut self, lat: f64, lng: f64, zoom: Option<u8>) {
        self.center = LatLng { lat, lng };
        self.zoom = zoom.unwrap_or(FLY_TO_ZOOM).min(MAX_ZOOM);
    }

    /// Counts over every known machine, regardless of the current filter.
    pub fn stats(&self) -> MapStats {
        let all = fixtures::machine_locations();
        let available = all.iter().filter(|m| m.available).count();
        let mut categories = Vec::new();
        for machine in all {
            if !categories.contains(&machine.category) {
                categories.push(machine.category);
            }
        }
        MapStats {
            total: all.len(),
            available,
            unavailable: all.len() - available,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pins_everything() {
        let view = MapView::new();
        assert_eq!(view.markers().len(), 10);
        assert_eq!(view.center(), DEFAULT_CENTER);
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_filter_markers_replaces_previous_set() {
        let mut view = MapView::new();
        view.filter_markers(&MapFilter { category: Some(Category::Harvester), available: None });
        let ids: Vec<u64> = view.markers().iter().map(|m| m.machine.id).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        view.filter_markers(&MapFilter { category: None, available: Some(false) });
        let ids: Vec<u64> = view.markers().iter().map(|m| m.machine.id).collect();
        assert_eq!(ids, vec![3, 10]);
    }

    #[test]
    fn test_marker_icons() {
        assert_eq!(marker_icon(Category::Tractor, true), MarkerIcon { emoji: "🚜", color: "#2d6c50" });
        assert_eq!(marker_icon(Category::Drone, false).color, "#94a3b8");
        assert_eq!(marker_icon(Category::Loader, true).emoji, "⚙️");
    }

    #[test]
    fn test_fly_to() {
        let mut view = MapView::new();
        view.fly_to(9.66, 80.02, None);
        assert_eq!(view.zoom(), FLY_TO_ZOOM);
        view.fly_to(9.66, 80.02, Some(30));
        assert_eq!(view.zoom(), MAX_ZOOM);
        assert_eq!(view.center(), LatLng { lat: 9.66, lng: 80.02 });
    }

    #[test]
    fn test_stats() {
        let mut view = MapView::new();
        view.filter_markers(&MapFilter { category: Some(Category::Drone), available: None });
        let stats = view.stats();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.available, 8);
        assert_eq!(stats.unavailable, 2);
        assert_eq!(stats.categories, vec![Category::Tractor, Category::Harvester, Category::Drone]);
    }

    #[test]
    fn test_popup_text() {
        let popup = popup_text(&fixtures::machine_locations()[2]);
        assert!(popup.contains("✗ Unavailable"));
        assert!(popup.contains("LKR 8,500 / day"));
    }
}
