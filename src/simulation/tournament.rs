use std::error::Error;

use csv::Writer;
use tracing::info;

use crate::config::constant::FIXED_COST_TRUCK_WEEKLY;
use crate::planner::PlanOptions;
use crate::simulation::driver::Simulation;

/// Fleet compositions considered by the tournament, as
/// (small trucks, large trucks).
pub const FLEET_CANDIDATES: [(u32, u32); 10] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (1, 1),
    (2, 1),
    (3, 1),
    (0, 1),
    (0, 2),
    (1, 2),
];

#[derive(Debug, Clone)]
pub struct TournamentEntry {
    pub num_small: u32,
    pub num_large: u32,
    pub fixed_cost: f64,
    pub net_profit: f64,
    pub penalties: f64,
}

#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub entries: Vec<TournamentEntry>,
    pub winner: (u32, u32),
    pub best_net_profit: f64,
}

/// Replay the full horizon once per candidate fleet, fast mode only
/// (fallback distances and the shared cache; the road API would
/// dominate the inner loop). Ties keep the earliest composition.
pub async fn run_tournament(sim: &mut Simulation) -> TournamentReport {
    let opts = PlanOptions::fast();

    let mut entries = Vec::with_capacity(FLEET_CANDIDATES.len());
    let mut winner = FLEET_CANDIDATES[0];
    let mut max_profit = f64::NEG_INFINITY;

    for &(num_small, num_large) in FLEET_CANDIDATES.iter() {
        sim.reset();
        sim.install_fleet(num_small, num_large);
        let result = sim.run_horizon(&opts).await;

        let fixed_cost = 2.0 * (num_small + num_large) as f64 * FIXED_COST_TRUCK_WEEKLY;
        info!(
            "fleet {}S/{}L: net {:.0} EUR, penalties {:.0} EUR",
            num_small, num_large, result.total_profit_net, result.total_penalties
        );

        if result.total_profit_net > max_profit {
            max_profit = result.total_profit_net;
            winner = (num_small, num_large);
        }

        entries.push(TournamentEntry {
            num_small,
            num_large,
            fixed_cost,
            net_profit: result.total_profit_net,
            penalties: result.total_penalties,
        });
    }

    info!("winning fleet: {} small + {} large", winner.0, winner.1);

    TournamentReport {
        entries,
        winner,
        best_net_profit: max_profit,
    }
}

pub fn save_report_csv(report: &TournamentReport, filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["num_small", "num_large", "fixed_cost", "net_profit", "penalties"])?;
    for entry in &report.entries {
        wtr.write_record([
            entry.num_small.to_string(),
            entry.num_large.to_string(),
            format!("{:.2}", entry.fixed_cost),
            format!("{:.2}", entry.net_profit),
            format!("{:.2}", entry.penalties),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
