//! Static mock collections served by [`MockApi`](super::MockApi) and the map.
//!
//! Built once on first access and never mutated afterwards.

use std::sync::LazyLock;

use super::types::{
    Category, Crop, CurrentConditions, Farm, FarmStatus, ForecastDay, Machine, MachineLocation,
    PriceUnit, Stats, Weather,
};

#[allow(clippy::too_many_arguments)]
fn machine(
    id: u64,
    name: &str,
    category: Category,
    district: &str,
    price: u64,
    unit: PriceUnit,
    owner: &str,
    rating: f32,
    reviews: u32,
    available: bool,
    image: &str,
    operator: bool,
) -> Machine {
    Machine {
        id,
        name: name.to_string(),
        category,
        district: district.to_string(),
        price,
        unit,
        owner: owner.to_string(),
        rating,
        reviews,
        available,
        image: format!("https://images.unsplash.com/{image}?w=400"),
        operator,
    }
}

static MACHINES: LazyLock<Vec<Machine>> = LazyLock::new(|| {
    use Category::*;
    use PriceUnit::*;
    vec![
        machine(1, "KUBOTA M7040 Tractor", Tractor, "Kurunegala", 12000, Day, "Nimal Perera", 4.8, 24, true, "photo-1530267981375-f0de937f5f13", true),
        machine(2, "YANMAR RG8 Harvester", Harvester, "Polonnaruwa", 28000, Day, "Sunil Bandara", 4.6, 18, true, "photo-1589923158776-cb4dc7589b3b", true),
        machine(3, "DJI AGRAS T40 Drone", Drone, "Colombo", 8500, Acre, "TechFarm LK", 4.9, 41, false, "photo-1508614589041-895b88991e3e", false),
        machine(4, "JOHN DEERE 5075E", Tractor, "Anuradhapura", 15000, Day, "Kamal Silva", 4.7, 30, true, "photo-1563514227147-6d2af8c74b09", true),
        machine(5, "CLAAS DOMINATOR Harvester", Harvester, "Ampara", 32000, Day, "Harvesting Pro LK", 4.5, 12, true, "photo-1598738131638-a5e1f3a5b4e0", true),
        machine(6, "MAHINDRA 575 DI Tractor", Tractor, "Galle", 9000, Day, "Priya Fernando", 4.3, 9, true, "photo-1574943320219-553eb213f72d", false),
    ]
});

fn farm(id: u64, name: &str, location: &str, size: f64, crop: &str, status: FarmStatus, owner: &str) -> Farm {
    Farm {
        id,
        name: name.to_string(),
        location: location.to_string(),
        size,
        crop: crop.to_string(),
        status,
        owner: owner.to_string(),
    }
}

static FARMS: LazyLock<Vec<Farm>> = LazyLock::new(|| {
    use FarmStatus::*;
    vec![
        farm(1, "Perera Family Farm", "Kurunegala", 12.5, "Rice", Active, "Nimal Perera"),
        farm(2, "Green Valley Estate", "Kandy", 45.0, "Tea", Active, "Saman Jayasuriya"),
        farm(3, "Bandara Paddy Fields", "Polonnaruwa", 8.2, "Rice", Idle, "Sunil Bandara"),
        farm(4, "Coastal Coconut Grove", "Negombo", 22.0, "Coconut", Active, "Mary Silva"),
    ]
});

fn crop(id: u64, name: &str, season: &str, duration: &str, water: &str, machinery: &[&str], tips: &str, icon: &str) -> Crop {
    Crop {
        id,
        name: name.to_string(),
        season: season.to_string(),
        duration: duration.to_string(),
        water: water.to_string(),
        machinery: machinery.iter().map(|m| m.to_string()).collect(),
        tips: tips.to_string(),
        icon: icon.to_string(),
    }
}

static CROPS: LazyLock<Vec<Crop>> = LazyLock::new(|| {
    vec![
        crop(1, "Rice (Paddy)", "Maha & Yala", "3-4 months", "High", &["Tractor", "Harvester"],
            "Best planted at the onset of monsoon. Use puddled transplanting for wet season.", "grass"),
        crop(2, "Maize", "Year-round", "3 months", "Medium", &["Tractor", "Plough"],
            "Requires well-drained soil. Apply nitrogen fertilizer in split doses.", "eco"),
        crop(3, "Tea", "Year-round", "Perennial", "Medium-High", &["Tea Harvester", "Sprayer"],
            "Maintain 18-24°C. Regular pruning every 3-4 years improves yield significantly.", "local_florist"),
        crop(4, "Coconut", "Year-round", "Perennial", "Medium", &["Sprayer", "Loader"],
            "Plant at 7.5m spacing. Intercropping with pineapple maximizes land use.", "park"),
        crop(5, "Vegetable Mix", "Dry Season", "1-3 months", "Low-Medium", &["Mini Tractor", "Sprayer"],
            "Start with soil testing. Drip irrigation reduces water usage by up to 50%.", "spa"),
        crop(6, "Sugarcane", "Year-round", "12-18 months", "High", &["Tractor", "Harvester"],
            "Ratoon cropping reduces replanting costs. Trash mulching conserves soil moisture.", "energy_program_saving"),
    ]
});

fn day(day: &str, high: i32, low: i32, condition: &str, icon: &str, rain: u8) -> ForecastDay {
    ForecastDay {
        day: day.to_string(),
        high,
        low,
        condition: condition.to_string(),
        icon: icon.to_string(),
        rain,
    }
}

static WEATHER: LazyLock<Weather> = LazyLock::new(|| Weather {
    current: CurrentConditions {
        temp: 31,
        feels_like: 35,
        humidity: 78,
        wind: 12,
        condition: "Partly Cloudy".to_string(),
        icon: "partly_cloudy_day".to_string(),
        location: "Colombo, Western".to_string(),
    },
    forecast: vec![
        day("Today", 33, 25, "Partly Cloudy", "partly_cloudy_day", 20),
        day("Tomorrow", 30, 24, "Light Rain", "rainy", 75),
        day("Wed", 28, 23, "Heavy Rain", "thunderstorm", 90),
        day("Thu", 32, 25, "Sunny", "sunny", 5),
        day("Fri", 34, 26, "Sunny", "sunny", 5),
        day("Sat", 31, 24, "Cloudy", "cloud", 35),
        day("Sun", 29, 23, "Rainy", "rainy", 65),
    ],
    location: "Colombo".to_string(),
});

static STATS: Stats = Stats {
    total_machines: 1247,
    total_operators: 532,
    total_farms: 3891,
    active_rentals: 89,
    monthly_revenue: 4_850_000,
    avg_rating: 4.7,
};

#[allow(clippy::too_many_arguments)]
fn location(id: u64, name: &str, lat: f64, lng: f64, category: Category, price: u64, available: bool, district: &str) -> MachineLocation {
    MachineLocation {
        id,
        name: name.to_string(),
        lat,
        lng,
        category,
        price,
        available,
        district: district.to_string(),
    }
}

static MACHINE_LOCATIONS: LazyLock<Vec<MachineLocation>> = LazyLock::new(|| {
    use Category::*;
    vec![
        location(1, "KUBOTA M7040 Tractor", 7.8731, 80.7718, Tractor, 12000, true, "Kurunegala"),
        location(2, "YANMAR RG8 Harvester", 7.9397, 81.0034, Harvester, 28000, true, "Polonnaruwa"),
        location(3, "DJI AGRAS T40 Drone", 6.9271, 79.8612, Drone, 8500, false, "Colombo"),
        location(4, "JOHN DEERE 5075E", 8.3114, 80.4037, Tractor, 15000, true, "Anuradhapura"),
        location(5, "CLAAS DOMINATOR Harvester", 7.2833, 81.6667, Harvester, 32000, true, "Ampara"),
        location(6, "MAHINDRA 575 DI Tractor", 6.0535, 80.2210, Tractor, 9000, true, "Galle"),
        location(7, "AGCO GLEANER Harvester", 9.6615, 80.0255, Harvester, 25000, true, "Jaffna"),
        location(8, "ISEKI TH5365 Mini Tractor", 7.2906, 80.6337, Tractor, 7500, true, "Kandy"),
        location(9, "DJI AGRAS MG-1P Drone", 8.5874, 81.2152, Drone, 6000, true, "Trincomalee"),
        location(10, "SONALIKA 750", 6.8846, 79.9585, Tractor, 11000, false, "Gampaha"),
    ]
});

pub fn machines() -> &'static [Machine] {
    &MACHINES
}

pub fn farms() -> &'static [Farm] {
    &FARMS
}

pub fn crops() -> &'static [Crop] {
    &CROPS
}

pub fn weather() -> &'static Weather {
    &WEATHER
}

pub fn stats() -> &'static Stats {
    &STATS
}

pub fn machine_locations() -> &'static [MachineLocation] {
    &MACHINE_LOCATIONS
}
