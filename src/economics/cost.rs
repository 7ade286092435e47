use crate::config::constant::{AVG_SPEED_KMH, SERVICE_TIME_PER_STOP, UNLOADING_TIME_SLAUGHTERHOUSE};

/// Transport cost of one trip: distance, per-km rate, scaled by how
/// full the truck actually was.
pub fn trip_cost(distance_km: f64, cost_per_km: f64, load_kg: f64, capacity_kg: f64) -> f64 {
    let load_factor = if capacity_kg > 0.0 {
        load_kg / capacity_kg
    } else {
        0.0
    };
    distance_km * cost_per_km * load_factor
}

/// Driving time plus loading at every farm stop and one unloading slot
/// at the slaughterhouse.
pub fn trip_duration(distance_km: f64, num_stops: usize) -> f64 {
    let drive_time = distance_km / AVG_SPEED_KMH;
    let service_time = num_stops as f64 * SERVICE_TIME_PER_STOP + UNLOADING_TIME_SLAUGHTERHOUSE;
    drive_time + service_time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_load_costs_nothing() {
        assert_eq!(trip_cost(120.0, 1.15, 0.0, 10_000.0), 0.0);
    }

    #[test]
    fn cost_is_monotone_in_each_factor() {
        let base = trip_cost(100.0, 1.15, 5_000.0, 10_000.0);
        assert!(trip_cost(150.0, 1.15, 5_000.0, 10_000.0) > base);
        assert!(trip_cost(100.0, 1.25, 5_000.0, 10_000.0) > base);
        assert!(trip_cost(100.0, 1.15, 7_500.0, 10_000.0) > base);
    }

    #[test]
    fn duration_covers_drive_service_and_unload() {
        // 13 km at 50 km/h, one stop, one unload.
        let hours = trip_duration(13.0, 1);
        assert!((hours - (13.0 / 50.0 + 0.5 + 0.5)).abs() < 1e-9);
    }
}
