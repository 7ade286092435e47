use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use colored::*;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use porcfleet::config::constant::{DAILY_GROWTH_MEAN, ENGINE_SEED, SCENARIO_PATH};
use porcfleet::database::{db_connection, seed};
use porcfleet::distance::DistanceOracle;
use porcfleet::domain::{Scenario, Slaughterhouse};
use porcfleet::fixtures::{generate_scenario, write_scenario};
use porcfleet::planner::PlanOptions;
use porcfleet::simulation::tournament::save_report_csv;
use porcfleet::simulation::{run_tournament, Simulation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env()) // Reads RUST_LOG
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
    dotenv().ok();

    let scenario_path = env::var("SCENARIO_PATH").unwrap_or_else(|_| SCENARIO_PATH.to_string());

    if env::args().nth(1).as_deref() == Some("generate") {
        let scenario = generate_scenario(ENGINE_SEED);
        write_scenario(&scenario, &scenario_path)?;
        info!("Scenario written to {scenario_path}");
        return Ok(());
    }

    let pool = db_connection().await?;
    seed::seed_if_empty(&pool).await?;

    let (scenario, slaughterhouse) = if Path::new(&scenario_path).exists() {
        (Scenario::load(&scenario_path)?, Slaughterhouse::default())
    } else {
        warn!("No scenario file at {scenario_path}, falling back to stored records");
        seed::scenario_from_db(&pool).await?
    };
    if scenario.farms.is_empty() {
        return Err("scenario has no farms; run `porcfleet generate` or seed the store".into());
    }
    if scenario.trucks.is_empty() {
        return Err("scenario has no trucks; run `porcfleet generate` or seed the store".into());
    }

    let oracle = DistanceOracle::from_env();
    let mut sim = Simulation::new(scenario, slaughterhouse, oracle, ENGINE_SEED);

    // First pass: find the profit-maximising fleet, fast mode only.
    let report = run_tournament(&mut sim).await;

    println!(
        "{:<4} {:<4} {:<10} {:<12} {:<10}",
        "SM", "LG", "FIXED", "NET PROFIT", "PENALTIES"
    );
    println!("{}", "-".repeat(48));
    for entry in &report.entries {
        let line = format!(
            "{:<4} {:<4} {:<10.0} {:<12.0} {:<10.0}",
            entry.num_small, entry.num_large, entry.fixed_cost, entry.net_profit, entry.penalties
        );
        if (entry.num_small, entry.num_large) == report.winner {
            println!("{} {}", line, "<- best".green());
        } else {
            println!("{}", line);
        }
    }
    save_report_csv(&report, "fleet_tournament.csv")?;
    info!(
        "Tournament winner: {} small + {} large (net {:.0} EUR)",
        report.winner.0, report.winner.1, report.best_net_profit
    );

    // Second pass: the detailed horizon with the winning fleet.
    let use_api = env::var("USE_ROADS_API")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);
    sim.reset();
    sim.install_fleet(report.winner.0, report.winner.1);
    let opts = PlanOptions {
        silent: false,
        use_api,
        growth_mean: DAILY_GROWTH_MEAN,
    };
    let result = sim.run_horizon(&opts).await;

    fs::write(
        "simulation_results.json",
        serde_json::to_string_pretty(&result)?,
    )?;

    println!("\n=== FINAL REPORT ===");
    let profit_line = format!("Net profit: {:.2} EUR", result.total_profit_net);
    if result.total_profit_net >= 0.0 {
        println!("{}", profit_line.green());
    } else {
        println!("{}", profit_line.red());
    }
    println!("Transport cost: {:.2} EUR", result.total_transport_cost);
    println!("Penalties: {:.2} EUR", result.total_penalties);
    println!("Results written to simulation_results.json");

    Ok(())
}
