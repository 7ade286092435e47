use std::collections::HashMap;

use rayon::prelude::*;

use crate::config::constant::{
    OPTIMAL_MIN_WEIGHT, PANIC_THRESHOLD_WEIGHT, REVISIT_LOCKOUT_DAYS, URGENCY_COST_PER_KM_PROXY,
};
use crate::distance::fallback_km;
use crate::domain::types::{Farm, Point};

/// A farm is pickable when it still holds animals and its seven-day
/// visit lockout has elapsed.
pub fn candidate_indices(farms: &[Farm], day_index: usize) -> Vec<usize> {
    farms
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            f.inventory > 0 && day_index as i64 - f.last_visit_day >= REVISIT_LOCKOUT_DAYS
        })
        .map(|(i, _)| i)
        .collect()
}

/// Pickup urgency of a single farm. Panic-weight herds jump the queue,
/// underweight herds are pushed below zero so the day loop defers them,
/// everything in between ranks by estimated single-trip margin against
/// the fallback distance (fast path, no network).
pub fn urgency_score(farm: &Farm, hub: Point, price_per_kg: f64) -> f64 {
    if farm.avg_weight_kg >= PANIC_THRESHOLD_WEIGHT {
        1000.0 + farm.avg_weight_kg
    } else if farm.avg_weight_kg < OPTIMAL_MIN_WEIGHT {
        -1000.0 + farm.avg_weight_kg
    } else {
        let dist_est = fallback_km(hub, farm.point());
        let est_revenue = farm.avg_weight_kg * price_per_kg;
        let est_transport_cost = dist_est * 2.0 * URGENCY_COST_PER_KM_PROXY;
        est_revenue - est_transport_cost
    }
}

/// Urgency scores for one planning invocation, keyed by farm index.
/// Transient by design: built per call, never written back to the farm.
pub fn score_candidates(
    farms: &[Farm],
    candidates: &[usize],
    hub: Point,
    price_per_kg: f64,
) -> HashMap<usize, f64> {
    candidates
        .par_iter()
        .map(|&i| (i, urgency_score(&farms[i], hub, price_per_kg)))
        .collect()
}
