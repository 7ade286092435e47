#![allow(dead_code)]

use porcfleet::config::constant::LAST_VISIT_SENTINEL;
use porcfleet::distance::DistanceOracle;
use porcfleet::domain::types::{Farm, Slaughterhouse};
use porcfleet::planner::PlanOptions;

/// Oracle pointed at an unroutable address: API-backed calls fail fast
/// into the fallback, fast-mode calls never touch the network.
pub fn offline_oracle() -> DistanceOracle {
    DistanceOracle::new("http://127.0.0.1:1/route/v1/driving")
}

pub fn hub() -> Slaughterhouse {
    Slaughterhouse::default()
}

/// Test farm with zero weight spread, so batch economics are exact.
pub fn farm_at(id: &str, lat: f64, lon: f64, inventory: u32, weight: f64) -> Farm {
    Farm {
        id: id.to_string(),
        lat,
        lon,
        inventory,
        avg_weight_kg: weight,
        weight_std: 0.0,
        last_visit_day: LAST_VISIT_SENTINEL,
    }
}

/// Coordinates roughly `km` kilometres due north of the hub.
pub fn km_north_of_hub(km: f64) -> (f64, f64) {
    let hub = Slaughterhouse::default();
    (hub.lat + km / 111.195, hub.lon)
}

/// Silent, fallback-only planning with the growth mean pinned to zero,
/// keeping weights close to their scenario values.
pub fn quiet_opts() -> PlanOptions {
    PlanOptions {
        silent: true,
        use_api: false,
        growth_mean: 0.0,
    }
}
