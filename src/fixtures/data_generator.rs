use std::error::Error;
use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::domain::scenario::{FarmSpec, Scenario, TruckSpec};
use crate::domain::types::TruckClass;

struct Cluster {
    name: &'static str,
    lat: f64,
    lon: f64,
    count: usize,
    dist_factor: f64,
    weight_bonus: f64,
}

/// Demand clusters: a dense centre around the hub, a far northern zone
/// with heavier herds, and a mid-distance western plateau. Urgency in
/// the periphery forces the planner to split the fleet.
const CLUSTERS: [Cluster; 3] = [
    Cluster {
        name: "Vic_Centre",
        lat: 41.9300,
        lon: 2.2540,
        count: 25,
        dist_factor: 0.01,
        weight_bonus: 0.0,
    },
    Cluster {
        name: "Ripoll_Muntanya",
        lat: 42.2000,
        lon: 2.1900,
        count: 15,
        dist_factor: 0.02,
        weight_bonus: 8.0,
    },
    Cluster {
        name: "Moia_Altipla",
        lat: 41.8100,
        lon: 2.0900,
        count: 10,
        dist_factor: 0.015,
        weight_bonus: 5.0,
    },
];

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Deterministic clustered scenario: farm positions and weights are
/// jittered around each cluster node, batch sizes sized so a small
/// truck fills in one stop, with a few high-volume farms in the centre
/// that justify a large one.
pub fn generate_scenario(seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let trucks = vec![
        TruckSpec {
            id: "1".to_string(),
            capacity_tons: 10.0,
            class: TruckClass::Small,
            cost_per_km: None,
        },
        TruckSpec {
            id: "2".to_string(),
            capacity_tons: 10.0,
            class: TruckClass::Small,
            cost_per_km: None,
        },
        TruckSpec {
            id: "3".to_string(),
            capacity_tons: 20.0,
            class: TruckClass::Large,
            cost_per_km: None,
        },
    ];

    let mut farms = vec![];
    for cluster in &CLUSTERS {
        let position_lat = Normal::new(cluster.lat, cluster.dist_factor)
            .expect("cluster jitter must be non-negative");
        let position_lon = Normal::new(cluster.lon, cluster.dist_factor)
            .expect("cluster jitter must be non-negative");
        let weight =
            Normal::new(110.0 + cluster.weight_bonus, 2.0).expect("weight jitter must be valid");

        for _ in 0..cluster.count {
            let lat = position_lat.sample(&mut rng);
            let lon = position_lon.sample(&mut rng);

            let mut w = weight.sample(&mut rng);
            let mut inventory = rng.gen_range(85..=100);

            // A few high-volume centre farms at normal weight.
            if cluster.name == "Vic_Centre" && rng.gen::<f64>() < 0.3 {
                inventory = rng.gen_range(300..=500);
                w = rng.gen_range(105.0..115.0);
            }

            farms.push(FarmSpec {
                id: format!("Farm_{}_{}", farms.len() + 1, cluster.name),
                lat: round_to(lat, 6),
                lon: round_to(lon, 6),
                inventory,
                avg_weight: round_to(w, 2),
            });
        }
    }

    info!(
        "Generated scenario: {} farms across {} clusters, {} trucks",
        farms.len(),
        CLUSTERS.len(),
        trucks.len()
    );

    Scenario { trucks, farms }
}

pub fn write_scenario(scenario: &Scenario, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    fs::write(path.as_ref(), serde_json::to_string_pretty(scenario)?)?;
    Ok(())
}
