//! Wire-level surface of the engine: one "next day" invocation maps to
//! one planner call, plus reset and the KPI history. The HTTP layer
//! itself lives outside this crate; these are the types it speaks.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::types::Farm;
use crate::economics::penalty_ratio;
use crate::planner::PlanOptions;
use crate::simulation::Simulation;

/// Growth override default at this boundary; the engine's own default
/// stays at the scenario growth mean.
pub const DEFAULT_DAY_STEP_GROWTH: f64 = 0.9;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextDayRequest {
    pub growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub truck_type: String,
    /// Hub-to-hub polyline as [lat, lon] pairs.
    pub path: Vec<[f64; 2]>,
    pub stops: Vec<String>,
    pub pigs_transported: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub daily_revenue: f64,
    pub daily_cost: f64,
    pub total_pigs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmStatus {
    Growing,
    Visited,
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmUpdate {
    pub id: String,
    pub new_weight: f64,
    pub pigs_remaining: u32,
    pub status: FarmStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: LogLevel,
    pub msg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextDayResponse {
    pub day_index: usize,
    pub routes: Vec<RoutePlan>,
    pub kpis: Kpis,
    pub farm_updates: Vec<FarmUpdate>,
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub labels: Vec<String>,
    pub profit: Vec<f64>,
    pub revenue: Vec<f64>,
    pub cost: Vec<f64>,
    pub pigs_delivered: Vec<u32>,
}

/// Precondition failures a caller can fix; everything below this layer
/// is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDayError {
    NoTrucks,
    NoFarms,
    NoInventory,
}

impl fmt::Display for NextDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextDayError::NoTrucks => write!(f, "no trucks registered"),
            NextDayError::NoFarms => write!(f, "no farms registered"),
            NextDayError::NoInventory => write!(f, "no farm has animals available"),
        }
    }
}

impl Error for NextDayError {}

/// Advance the simulation one day and shape the outcome for the caller.
pub async fn next_day(
    sim: &mut Simulation,
    req: &NextDayRequest,
    use_api: bool,
) -> Result<NextDayResponse, NextDayError> {
    if sim.trucks.is_empty() {
        return Err(NextDayError::NoTrucks);
    }
    if sim.farms.is_empty() {
        return Err(NextDayError::NoFarms);
    }
    if sim.farms.iter().all(|f| f.inventory == 0) {
        return Err(NextDayError::NoInventory);
    }

    let opts = PlanOptions {
        silent: false,
        use_api,
        growth_mean: req.growth_rate.unwrap_or(DEFAULT_DAY_STEP_GROWTH),
    };

    let planned_day = sim.day_index;
    let log = sim.step(&opts).await;

    let hub = sim.slaughterhouse.point();
    let farms_by_id: HashMap<&str, &Farm> =
        sim.farms.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut routes = vec![];
    let mut logs = vec![];
    if let Some(log) = &log {
        for (idx, trip) in log.trips.iter().enumerate() {
            let mut path = vec![[hub.lat, hub.lon]];
            for stop in &trip.stops {
                if let Some(farm) = farms_by_id.get(stop.as_str()) {
                    path.push([farm.lat, farm.lon]);
                }
            }
            path.push([hub.lat, hub.lon]);

            routes.push(RoutePlan {
                truck_type: trip.truck_class.as_str().to_string(),
                path,
                stops: trip.stops.clone(),
                pigs_transported: trip.pigs_delivered,
                cost: trip.trip_cost,
            });
            logs.push(LogEntry {
                kind: LogLevel::Info,
                msg: format!("Route {} completed ({})", idx + 1, trip.stops.join(", ")),
            });
        }
    } else {
        logs.push(LogEntry {
            kind: LogLevel::Info,
            msg: format!("Day {} is a non-working day; no routes planned", planned_day + 1),
        });
    }

    let kpis = match &log {
        Some(l) => Kpis {
            daily_revenue: l.daily_revenue(),
            daily_cost: l.daily_cost(),
            total_pigs: l.total_processed,
        },
        None => Kpis {
            daily_revenue: 0.0,
            daily_cost: 0.0,
            total_pigs: 0,
        },
    };

    let mut farm_updates = vec![];
    for farm in &sim.farms {
        let status = if farm.inventory == 0 {
            FarmStatus::Empty
        } else if farm.last_visit_day == planned_day as i64 {
            FarmStatus::Visited
        } else {
            FarmStatus::Growing
        };
        farm_updates.push(FarmUpdate {
            id: farm.id.clone(),
            new_weight: farm.avg_weight_kg,
            pigs_remaining: farm.inventory,
            status,
        });

        let ratio = penalty_ratio(farm.avg_weight_kg);
        if ratio > 0.0 {
            logs.push(LogEntry {
                kind: LogLevel::Warning,
                msg: format!(
                    "Penalty of {}% at farm {} (avg weight {:.1} kg)",
                    (ratio * 100.0).round() as u32,
                    farm.id,
                    farm.avg_weight_kg
                ),
            });
        }
    }

    Ok(NextDayResponse {
        day_index: sim.day_index,
        routes,
        kpis,
        farm_updates,
        logs,
    })
}

/// Restore the initial snapshot and rewind the day counter.
pub fn reset(sim: &mut Simulation) -> ResetResponse {
    sim.reset();
    ResetResponse { ok: true }
}

/// Per-day KPI series as parallel arrays, indexed by day.
pub fn history(sim: &Simulation) -> HistoryResponse {
    let mut response = HistoryResponse {
        labels: Vec::with_capacity(sim.history.len()),
        profit: Vec::with_capacity(sim.history.len()),
        revenue: Vec::with_capacity(sim.history.len()),
        cost: Vec::with_capacity(sim.history.len()),
        pigs_delivered: Vec::with_capacity(sim.history.len()),
    };
    for day in &sim.history {
        response.labels.push(day.label.clone());
        response.profit.push(day.profit);
        response.revenue.push(day.revenue);
        response.cost.push(day.cost);
        response.pigs_delivered.push(day.pigs_delivered);
    }
    response
}
