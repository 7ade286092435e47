use std::cmp::Ordering;
use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::constant::{
    DAILY_GROWTH_MEAN, DETOUR_COST_WEIGHT, EXPANSION_TIME_SLACK_HOURS, LOAD_FILL_TARGET,
    MAX_DAILY_HOURS, MAX_DETOUR_KM, MAX_LEG_KM, MAX_STOPS, OPTIMAL_MIN_WEIGHT,
    PANIC_THRESHOLD_WEIGHT, WORK_DAYS,
};
use crate::distance::{fallback_km, DistanceOracle};
use crate::domain::types::{DailyLog, Farm, Point, Slaughterhouse, Trip, Truck};
use crate::economics::{batch_revenue, trip_cost, trip_duration};
use crate::planner::candidates::{candidate_indices, score_candidates};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub silent: bool,
    pub use_api: bool,
    pub growth_mean: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            silent: false,
            use_api: true,
            growth_mean: DAILY_GROWTH_MEAN,
        }
    }
}

impl PlanOptions {
    /// Silent, fallback-only configuration for tournament replays.
    pub fn fast() -> Self {
        Self {
            silent: true,
            use_api: false,
            ..Self::default()
        }
    }
}

/// Plan one simulated day: grow the herds, and on working days build
/// and commit round trips until trucks, candidates or slaughter
/// capacity run out. Total over any valid state; weekends yield None.
pub async fn plan_day(
    day_index: usize,
    farms: &mut [Farm],
    trucks: &mut [Truck],
    slaughterhouse: &Slaughterhouse,
    oracle: &DistanceOracle,
    rng: &mut ChaCha8Rng,
    opts: &PlanOptions,
) -> Option<DailyLog> {
    let weekday = day_index % 7;

    // The herds grow every day, delivery or not.
    for farm in farms.iter_mut() {
        farm.grow(rng, opts.growth_mean);
    }

    if !WORK_DAYS.contains(&weekday) {
        return None;
    }

    if !opts.silent {
        info!("=== Planning day {} (weekday {}) ===", day_index + 1, weekday);
    }

    let mut daily_log = DailyLog::new(day_index + 1);
    let hub = slaughterhouse.point();
    let price = slaughterhouse.price_per_kg;

    let eligible = candidate_indices(farms, day_index);
    let scores = score_candidates(farms, &eligible, hub, price);

    let mut ordered = eligible;
    ordered.sort_by(|a, b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    let mut candidates: VecDeque<usize> = ordered.into();

    for truck in trucks.iter_mut() {
        truck.reset_daily_stats();
    }
    let mut pool: VecDeque<usize> = (0..trucks.len()).collect();
    let mut slaughtered_today: u32 = 0;

    while !candidates.is_empty()
        && !pool.is_empty()
        && slaughtered_today < slaughterhouse.daily_capacity
    {
        let Some(&head) = candidates.front() else { break };
        if scores.get(&head).copied().unwrap_or(f64::MIN) < 0.0 {
            // Everything left is underweight; let it grow.
            break;
        }

        let Some(ti) = pool.pop_front() else { break };
        let truck = &mut trucks[ti];
        truck.reset_route();
        if truck.daily_hours_used >= MAX_DAILY_HOURS {
            continue;
        }

        if !opts.silent {
            info!(
                "Truck {} ({}, {:.2} EUR/km)",
                truck.id,
                truck.class.as_str(),
                truck.cost_per_km
            );
        }

        // Seed with the most urgent candidate.
        let Some(seed) = candidates.pop_front() else { break };
        let seed_farm = &farms[seed];
        let pigs_cap = (truck.capacity_kg / seed_farm.avg_weight_kg) as u32;
        let rem_slaughter = slaughterhouse.daily_capacity - slaughtered_today;
        let pigs_take = pigs_cap.min(seed_farm.inventory).min(rem_slaughter);

        truck.route.push(seed);
        truck.pigs_loaded = pigs_take;
        truck.current_load_kg = pigs_take as f64 * seed_farm.avg_weight_kg;

        if !opts.silent {
            info!(
                "  seed stop {} ({:.1} kg avg)",
                seed_farm.id, seed_farm.avg_weight_kg
            );
        }

        let mut current_point = seed_farm.point();
        let mut dist_hub_direct = fallback_km(current_point, hub);
        let mut dist_accum_base = fallback_km(hub, current_point);

        // Nearest-better-neighbour expansion, up to MAX_STOPS and while
        // the truck is under its fill target.
        while truck.route.len() < MAX_STOPS
            && truck.current_load_kg < truck.capacity_kg * LOAD_FILL_TARGET
        {
            // (position in deque, combined score, leg, return, detour)
            let mut best: Option<(usize, f64, f64, f64, f64)> = None;
            for (pos, &ci) in candidates.iter().enumerate() {
                let cand = &farms[ci];
                if cand.avg_weight_kg < OPTIMAL_MIN_WEIGHT {
                    continue;
                }

                let leg = fallback_km(current_point, cand.point());
                let ret = fallback_km(cand.point(), hub);
                let detour = leg + ret - dist_hub_direct;
                if leg > MAX_LEG_KM && detour > MAX_DETOUR_KM {
                    continue;
                }

                let projected =
                    trip_duration(dist_accum_base + leg + ret, truck.route.len() + 1);
                if truck.daily_hours_used + projected
                    > MAX_DAILY_HOURS + EXPANSION_TIME_SLACK_HOURS
                {
                    continue;
                }

                let mut qual = 100.0 - (cand.avg_weight_kg - 110.0).abs();
                if cand.avg_weight_kg > PANIC_THRESHOLD_WEIGHT {
                    qual += 500.0;
                }
                let comb = qual - detour * DETOUR_COST_WEIGHT;

                // Strict improvement keeps first-seen on ties.
                if best.map_or(true, |(_, best_comb, ..)| comb > best_comb) {
                    best = Some((pos, comb, leg, ret, detour));
                }
            }

            let Some((pos, _, leg, ret, detour)) = best else { break };

            let ci = candidates[pos];
            let cand = &farms[ci];
            let rem_kg = truck.capacity_kg - truck.current_load_kg;
            let p_cap = (rem_kg / cand.avg_weight_kg) as u32;
            let rem_global = slaughterhouse
                .daily_capacity
                .saturating_sub(slaughtered_today + truck.pigs_loaded);
            let p_take = p_cap.min(cand.inventory).min(rem_global);
            if p_take == 0 {
                // Slaughter capacity is spent; further stops are refused.
                break;
            }

            let _ = candidates.remove(pos);
            truck.route.push(ci);
            truck.pigs_loaded += p_take;
            truck.current_load_kg += p_take as f64 * cand.avg_weight_kg;
            current_point = cand.point();
            dist_accum_base += leg;
            dist_hub_direct = ret;

            if !opts.silent {
                info!("  added stop {} (detour +{:.1} km)", cand.id, detour);
            }
        }

        // Exact round trip, then time-feasibility backtracking: shed
        // stops from the tail until the trip fits the daily budget.
        let mut trip_dist_km = 0.0;
        let mut est_time = 0.0;
        let mut accepted = false;
        while !truck.route.is_empty() {
            let stop_points: Vec<Point> =
                truck.route.iter().map(|&fi| farms[fi].point()).collect();
            trip_dist_km = oracle
                .route_round_trip_km(hub, &stop_points, opts.use_api)
                .await;
            est_time = trip_duration(trip_dist_km, truck.route.len());

            if truck.daily_hours_used + est_time <= MAX_DAILY_HOURS {
                accepted = true;
                break;
            }
            if let Some(removed) = truck.route.pop() {
                // Back to the head of the queue: it keeps its priority.
                candidates.push_front(removed);
                if !opts.silent {
                    debug!(
                        "  time budget exceeded ({:.2} h), dropping stop {}",
                        truck.daily_hours_used + est_time,
                        farms[removed].id
                    );
                }
            }
        }

        if !accepted || truck.route.is_empty() {
            // No feasible trip; the truck retires for the day.
            continue;
        }

        // Commit: recompute exact loads in stop order against live
        // inventory and the remaining slaughter headcount.
        let planned = std::mem::take(&mut truck.route);
        let mut remaining_cap_kg = truck.capacity_kg;
        let mut pigs_this_trip: u32 = 0;
        let mut committed: Vec<usize> = Vec::with_capacity(planned.len());
        truck.current_load_kg = 0.0;
        for &fi in &planned {
            let farm = &mut farms[fi];
            let p_cap = (remaining_cap_kg / farm.avg_weight_kg) as u32;
            let rem_global = slaughterhouse
                .daily_capacity
                .saturating_sub(slaughtered_today + pigs_this_trip);
            let p_take = p_cap.min(farm.inventory).min(rem_global);
            if p_take == 0 {
                continue;
            }

            farm.inventory -= p_take;
            farm.last_visit_day = day_index as i64;
            pigs_this_trip += p_take;
            remaining_cap_kg -= p_take as f64 * farm.avg_weight_kg;
            truck.current_load_kg += p_take as f64 * farm.avg_weight_kg;
            committed.push(fi);
        }
        truck.route = committed;
        truck.pigs_loaded = pigs_this_trip;

        if pigs_this_trip == 0 {
            continue;
        }

        slaughtered_today += pigs_this_trip;
        truck.daily_hours_used += est_time;

        let route_len = truck.route.len() as f64;
        let avg_weight =
            truck.route.iter().map(|&fi| farms[fi].avg_weight_kg).sum::<f64>() / route_len;
        let std_weight =
            truck.route.iter().map(|&fi| farms[fi].weight_std).sum::<f64>() / route_len;
        let cost = trip_cost(
            trip_dist_km,
            truck.cost_per_km,
            truck.current_load_kg,
            truck.capacity_kg,
        );
        let (revenue, penalty) = batch_revenue(pigs_this_trip, avg_weight, std_weight, price, rng);
        let profit = revenue - cost;

        if !opts.silent {
            info!(
                "  committed: {} stops, {} pigs, {:.1} km, {:.2} h, profit {:.2} EUR",
                truck.route.len(),
                pigs_this_trip,
                trip_dist_km,
                est_time,
                profit
            );
            if penalty > 0.0 {
                info!("  weight penalty on batch: -{:.2} EUR", penalty);
            }
        }

        daily_log.trips.push(Trip {
            truck_id: truck.id.clone(),
            truck_class: truck.class,
            stops: truck.route.iter().map(|&fi| farms[fi].id.clone()).collect(),
            distance_km: trip_dist_km,
            duration_hours: est_time,
            pigs_delivered: pigs_this_trip,
            load_pct: truck.load_factor() * 100.0,
            trip_cost: cost,
            revenue,
            penalty,
            profit,
        });
        daily_log.total_processed += pigs_this_trip;
        daily_log.daily_profit += profit;

        // The truck goes to the back of the pool for a possible second trip.
        pool.push_back(ti);
    }

    Some(daily_log)
}
