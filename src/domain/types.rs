use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::constant::{
    COST_PER_KM_LARGE, COST_PER_KM_SMALL, DAILY_GROWTH_STD, DEFAULT_WEIGHT_STD, LARGE_TRUCK_TONS,
    LAST_VISIT_SENTINEL, PRICE_PER_KG, SLAUGHTERHOUSE_CAPACITY, SLAUGHTERHOUSE_LAT,
    SLAUGHTERHOUSE_LON, SMALL_TRUCK_TONS,
};
use crate::domain::scenario::{FarmSpec, TruckSpec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckClass {
    Small,
    Large,
}

impl TruckClass {
    pub fn cost_per_km(&self) -> f64 {
        match self {
            TruckClass::Small => COST_PER_KM_SMALL,
            TruckClass::Large => COST_PER_KM_LARGE,
        }
    }

    pub fn capacity_tons(&self) -> f64 {
        match self {
            TruckClass::Small => SMALL_TRUCK_TONS,
            TruckClass::Large => LARGE_TRUCK_TONS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckClass::Small => "small",
            TruckClass::Large => "large",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Farm {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub inventory: u32,
    pub avg_weight_kg: f64,
    pub weight_std: f64,
    pub last_visit_day: i64,
}

impl Farm {
    pub fn from_spec(spec: &FarmSpec) -> Self {
        Self {
            id: spec.id.clone(),
            lat: spec.lat,
            lon: spec.lon,
            inventory: spec.inventory,
            avg_weight_kg: spec.avg_weight,
            weight_std: DEFAULT_WEIGHT_STD,
            last_visit_day: LAST_VISIT_SENTINEL,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lon)
    }

    /// Daily weight gain, sampled from N(mean_gain, DAILY_GROWTH_STD).
    pub fn grow(&mut self, rng: &mut ChaCha8Rng, mean_gain: f64) -> f64 {
        let dist = Normal::new(mean_gain, DAILY_GROWTH_STD)
            .expect("growth std must be non-negative and finite");
        let gain = dist.sample(rng);
        self.avg_weight_kg += gain;
        gain
    }
}

#[derive(Debug, Clone)]
pub struct Truck {
    pub id: String,
    pub class: TruckClass,
    pub capacity_kg: f64,
    pub cost_per_km: f64,
    pub current_load_kg: f64,
    pub pigs_loaded: u32,
    /// Farm indices of the trip under construction, in visit order.
    pub route: Vec<usize>,
    pub daily_hours_used: f64,
}

impl Truck {
    pub fn new(id: String, class: TruckClass) -> Self {
        Self {
            id,
            class,
            capacity_kg: class.capacity_tons() * 1000.0,
            cost_per_km: class.cost_per_km(),
            current_load_kg: 0.0,
            pigs_loaded: 0,
            route: vec![],
            daily_hours_used: 0.0,
        }
    }

    /// The persisted record wins over the class constant when it carries
    /// an explicit cost per km.
    pub fn from_spec(spec: &TruckSpec) -> Self {
        let mut truck = Self::new(spec.id.clone(), spec.class);
        truck.capacity_kg = spec.capacity_tons * 1000.0;
        if let Some(cost) = spec.cost_per_km {
            truck.cost_per_km = cost;
        }
        truck
    }

    pub fn reset_daily_stats(&mut self) {
        self.current_load_kg = 0.0;
        self.pigs_loaded = 0;
        self.route.clear();
        self.daily_hours_used = 0.0;
    }

    pub fn reset_route(&mut self) {
        self.current_load_kg = 0.0;
        self.pigs_loaded = 0;
        self.route.clear();
    }

    pub fn load_factor(&self) -> f64 {
        if self.capacity_kg > 0.0 {
            self.current_load_kg / self.capacity_kg
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Slaughterhouse {
    pub lat: f64,
    pub lon: f64,
    pub daily_capacity: u32,
    pub price_per_kg: f64,
}

impl Default for Slaughterhouse {
    fn default() -> Self {
        Self {
            lat: SLAUGHTERHOUSE_LAT,
            lon: SLAUGHTERHOUSE_LON,
            daily_capacity: SLAUGHTERHOUSE_CAPACITY,
            price_per_kg: PRICE_PER_KG,
        }
    }
}

impl Slaughterhouse {
    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

/// Immutable record of one committed round trip.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub truck_id: String,
    pub truck_class: TruckClass,
    pub stops: Vec<String>,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub pigs_delivered: u32,
    pub load_pct: f64,
    pub trip_cost: f64,
    pub revenue: f64,
    pub penalty: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyLog {
    pub day: usize,
    pub trips: Vec<Trip>,
    pub total_processed: u32,
    pub daily_profit: f64,
}

impl DailyLog {
    pub fn new(day: usize) -> Self {
        Self {
            day,
            trips: vec![],
            total_processed: 0,
            daily_profit: 0.0,
        }
    }

    pub fn daily_revenue(&self) -> f64 {
        self.trips.iter().map(|t| t.revenue).sum()
    }

    pub fn daily_cost(&self) -> f64 {
        self.trips.iter().map(|t| t.trip_cost).sum()
    }
}

/// One row of the per-day KPI history surface.
#[derive(Debug, Clone, Serialize)]
pub struct DayKpis {
    pub label: String,
    pub profit: f64,
    pub revenue: f64,
    pub cost: f64,
    pub pigs_delivered: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmSummary {
    pub id: String,
    pub remaining: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub total_profit_net: f64,
    pub total_transport_cost: f64,
    pub total_penalties: f64,
    pub daily_logs: Vec<DailyLog>,
    pub final_farm_status: Vec<FarmSummary>,
}
