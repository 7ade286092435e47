use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::constant::{FIXED_COST_TRUCK_WEEKLY, SIMULATION_DAYS};
use crate::distance::DistanceOracle;
use crate::domain::{
    DailyLog, DayKpis, Farm, FarmSummary, Scenario, SimulationResult, Slaughterhouse, Truck,
    TruckClass,
};
use crate::planner::{plan_day, PlanOptions};

/// Owns the whole mutable engine state: herd and fleet, running
/// totals, per-day logs and the seeded RNG. One instance per scenario;
/// callers serialise step/reset invocations.
pub struct Simulation {
    scenario: Scenario,
    pub farms: Vec<Farm>,
    pub trucks: Vec<Truck>,
    pub slaughterhouse: Slaughterhouse,
    pub oracle: DistanceOracle,
    pub day_index: usize,
    pub total_profit: f64,
    pub total_penalties: f64,
    pub total_transport_cost: f64,
    pub daily_logs: Vec<DailyLog>,
    pub history: Vec<DayKpis>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    pub fn new(
        scenario: Scenario,
        slaughterhouse: Slaughterhouse,
        oracle: DistanceOracle,
        seed: u64,
    ) -> Self {
        let farms = scenario.farms.iter().map(Farm::from_spec).collect();
        let trucks = scenario.trucks.iter().map(Truck::from_spec).collect();
        Self {
            scenario,
            farms,
            trucks,
            slaughterhouse,
            oracle,
            day_index: 0,
            total_profit: 0.0,
            total_penalties: 0.0,
            total_transport_cost: 0.0,
            daily_logs: vec![],
            history: vec![],
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restore the engine to the loaded scenario snapshot: inventories
    /// and weights reloaded, counters and logs zeroed, RNG reseeded.
    /// Idempotent. The distance cache survives on purpose.
    pub fn reset(&mut self) {
        self.farms = self.scenario.farms.iter().map(Farm::from_spec).collect();
        self.trucks = self.scenario.trucks.iter().map(Truck::from_spec).collect();
        self.day_index = 0;
        self.total_profit = 0.0;
        self.total_penalties = 0.0;
        self.total_transport_cost = 0.0;
        self.daily_logs.clear();
        self.history.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Replace the fleet with a composed one, ids counted from 1.
    pub fn install_fleet(&mut self, num_small: u32, num_large: u32) {
        let mut trucks = Vec::with_capacity((num_small + num_large) as usize);
        let mut t_id = 1;
        for _ in 0..num_small {
            trucks.push(Truck::new(t_id.to_string(), TruckClass::Small));
            t_id += 1;
        }
        for _ in 0..num_large {
            trucks.push(Truck::new(t_id.to_string(), TruckClass::Large));
            t_id += 1;
        }
        self.trucks = trucks;
    }

    /// Advance the engine one day (post-increment) and fold the outcome
    /// into totals and the KPI history.
    pub async fn step(&mut self, opts: &PlanOptions) -> Option<DailyLog> {
        let day = self.day_index;
        self.day_index += 1;

        let log = plan_day(
            day,
            &mut self.farms,
            &mut self.trucks,
            &self.slaughterhouse,
            &self.oracle,
            &mut self.rng,
            opts,
        )
        .await;

        let (profit, revenue, cost, penalty, pigs) = match &log {
            Some(l) => (
                l.daily_profit,
                l.daily_revenue(),
                l.daily_cost(),
                l.trips.iter().map(|t| t.penalty).sum(),
                l.total_processed,
            ),
            None => (0.0, 0.0, 0.0, 0.0, 0),
        };

        self.total_profit += profit;
        self.total_penalties += penalty;
        self.total_transport_cost += cost;
        self.history.push(DayKpis {
            label: format!("Day {}", day + 1),
            profit,
            revenue,
            cost,
            pigs_delivered: pigs,
        });
        if let Some(l) = &log {
            self.daily_logs.push(l.clone());
        }

        log
    }

    /// Run the full two-week horizon, then charge the weekly fixed
    /// fleet cost: two seven-day blocks per truck, unconditionally.
    pub async fn run_horizon(&mut self, opts: &PlanOptions) -> SimulationResult {
        for _ in 0..SIMULATION_DAYS {
            self.step(opts).await;
        }

        let fixed_costs = 2.0 * self.trucks.len() as f64 * FIXED_COST_TRUCK_WEEKLY;
        self.total_profit -= fixed_costs;
        self.total_transport_cost += fixed_costs;

        SimulationResult {
            total_profit_net: self.total_profit,
            total_transport_cost: self.total_transport_cost,
            total_penalties: self.total_penalties,
            daily_logs: self.daily_logs.clone(),
            final_farm_status: self
                .farms
                .iter()
                .map(|f| FarmSummary {
                    id: f.id.clone(),
                    remaining: f.inventory,
                    weight: f.avg_weight_kg,
                })
                .collect(),
        }
    }
}
