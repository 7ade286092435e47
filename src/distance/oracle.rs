use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

use futures::future::join_all;
use itertools::Itertools;
use reqwest::Client;
use tracing::debug;

use crate::config::constant::{CIRCUITY_FACTOR_FALLBACK, EARTH_RADIUS_KM, OSRM_API_URL};
use crate::distance::providers::route_distance_km;
use crate::domain::types::Point;

/// Great-circle distance between two points, in km.
pub fn haversine_km(from: Point, to: Point) -> f64 {
    let dlat = (to.lat - from.lat).to_radians();
    let dlon = (to.lon - from.lon).to_radians();
    let a = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (dlon / 2.0).sin() * (dlon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Great-circle estimate inflated by the road straightness factor.
pub fn fallback_km(from: Point, to: Point) -> f64 {
    haversine_km(from, to) * CIRCUITY_FACTOR_FALLBACK
}

/// Both endpoints rounded to 4 decimals. Keys are directional; callers
/// treat road distances as symmetric by convention.
type CacheKey = (i64, i64, i64, i64);

fn cache_key(from: Point, to: Point) -> CacheKey {
    let r = |v: f64| (v * 10_000.0).round() as i64;
    (r(from.lat), r(from.lon), r(to.lat), r(to.lon))
}

/// Driving-distance oracle. The only place in the engine allowed to do
/// network I/O; it never errors, it degrades to the fallback estimate.
pub struct DistanceOracle {
    cache: Mutex<HashMap<CacheKey, f64>>,
    client: Client,
    base_url: String,
}

impl DistanceOracle {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads OSRM_BASE_URL when set, defaults to the public router.
    pub fn from_env() -> Self {
        let base_url = env::var("OSRM_BASE_URL").unwrap_or_else(|_| OSRM_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().expect("distance cache poisoned").len()
    }

    /// Driving distance in km. Cache first; with `use_api` false the
    /// fallback estimate is returned without touching the network, and
    /// without claiming the cache slot an API-backed call could fill.
    pub async fn distance(&self, from: Point, to: Point, use_api: bool) -> f64 {
        let key = cache_key(from, to);
        if let Some(&km) = self.cache.lock().expect("distance cache poisoned").get(&key) {
            return km;
        }

        if !use_api {
            return fallback_km(from, to);
        }

        if let Some(km) = route_distance_km(&self.client, &self.base_url, from, to).await {
            self.cache
                .lock()
                .expect("distance cache poisoned")
                .insert(key, km);
            return km;
        }

        // Cache the fallback too, so a flaky service is not retried
        // for every plan touching the same pair.
        let km = fallback_km(from, to);
        debug!("road distance unavailable, cached fallback {:.2} km", km);
        self.cache
            .lock()
            .expect("distance cache poisoned")
            .insert(key, km);
        km
    }

    /// Round-trip distance hub -> stops... -> hub, legs resolved
    /// concurrently.
    pub async fn route_round_trip_km(&self, hub: Point, stops: &[Point], use_api: bool) -> f64 {
        if stops.is_empty() {
            return 0.0;
        }

        let mut path = Vec::with_capacity(stops.len() + 2);
        path.push(hub);
        path.extend_from_slice(stops);
        path.push(hub);

        let legs = join_all(
            path.iter()
                .tuple_windows()
                .map(|(a, b)| self.distance(*a, *b, use_api)),
        )
        .await;
        legs.into_iter().sum()
    }
}
