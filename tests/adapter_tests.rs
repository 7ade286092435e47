mod support;

use porcfleet::adapter::{
    self, FarmStatus, LogLevel, NextDayError, NextDayRequest,
};
use porcfleet::domain::scenario::{FarmSpec, Scenario, TruckSpec};
use porcfleet::domain::types::TruckClass;
use porcfleet::simulation::Simulation;
use support::{hub, km_north_of_hub, offline_oracle};

fn scenario_with(farms: Vec<FarmSpec>, trucks: Vec<TruckSpec>) -> Scenario {
    Scenario { trucks, farms }
}

fn small_truck(id: &str) -> TruckSpec {
    TruckSpec {
        id: id.to_string(),
        capacity_tons: 10.0,
        class: TruckClass::Small,
        cost_per_km: None,
    }
}

fn farm_spec(id: &str, km_north: f64, inventory: u32, weight: f64) -> FarmSpec {
    let (lat, lon) = km_north_of_hub(km_north);
    FarmSpec {
        id: id.to_string(),
        lat,
        lon,
        inventory,
        avg_weight: weight,
    }
}

#[tokio::test]
async fn next_day_requires_trucks_farms_and_inventory() {
    let req = NextDayRequest::default();

    let mut no_trucks = Simulation::new(
        scenario_with(vec![farm_spec("F1", 5.0, 100, 110.0)], vec![]),
        hub(),
        offline_oracle(),
        5,
    );
    let err = adapter::next_day(&mut no_trucks, &req, false).await.unwrap_err();
    assert_eq!(err, NextDayError::NoTrucks);

    let mut no_farms = Simulation::new(
        scenario_with(vec![], vec![small_truck("1")]),
        hub(),
        offline_oracle(),
        5,
    );
    let err = adapter::next_day(&mut no_farms, &req, false).await.unwrap_err();
    assert_eq!(err, NextDayError::NoFarms);

    let mut no_pigs = Simulation::new(
        scenario_with(vec![farm_spec("F1", 5.0, 0, 110.0)], vec![small_truck("1")]),
        hub(),
        offline_oracle(),
        5,
    );
    let err = adapter::next_day(&mut no_pigs, &req, false).await.unwrap_err();
    assert_eq!(err, NextDayError::NoInventory);
}

#[tokio::test]
async fn next_day_reports_routes_statuses_and_warnings() {
    let scenario = scenario_with(
        vec![
            farm_spec("F1", 5.0, 200, 110.0),
            // Underweight herd: deferred by the planner, flagged by the
            // mild penalty band after growth.
            farm_spec("F2", 8.0, 100, 100.0),
        ],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);

    let response = adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .expect("preconditions hold");

    assert_eq!(response.day_index, 1);
    assert_eq!(response.routes.len(), 1);

    let route = &response.routes[0];
    assert_eq!(route.truck_type, "small");
    assert_eq!(route.stops, vec!["F1".to_string()]);
    assert!(route.cost > 0.0);
    // Path is hub -> farm -> hub.
    assert_eq!(route.path.len(), 3);
    assert_eq!(route.path.first(), route.path.last());

    let f1 = response
        .farm_updates
        .iter()
        .find(|u| u.id == "F1")
        .expect("update for F1");
    assert_eq!(f1.status, FarmStatus::Visited);
    assert!(f1.new_weight > 110.0); // default growth override 0.9

    // The trip fills the 10 t truck at the post-growth weight.
    let expected_pigs = (10_000.0 / f1.new_weight) as u32;
    assert_eq!(route.pigs_transported, expected_pigs);
    assert_eq!(f1.pigs_remaining, 200 - expected_pigs);
    assert_eq!(response.kpis.total_pigs, expected_pigs);
    assert!(response.kpis.daily_revenue > 0.0);
    assert!(response.kpis.daily_cost > 0.0);

    let f2 = response
        .farm_updates
        .iter()
        .find(|u| u.id == "F2")
        .expect("update for F2");
    assert_eq!(f2.status, FarmStatus::Growing);
    assert_eq!(f2.pigs_remaining, 100);

    assert!(response
        .logs
        .iter()
        .any(|l| l.kind == LogLevel::Info && l.msg.contains("Route 1 completed")));
    assert!(response
        .logs
        .iter()
        .any(|l| l.kind == LogLevel::Warning && l.msg.contains("F2")));
}

#[tokio::test]
async fn next_day_empties_a_small_farm() {
    let scenario = scenario_with(
        vec![farm_spec("F1", 5.0, 50, 110.0)],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);

    let response = adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .expect("preconditions hold");

    let f1 = &response.farm_updates[0];
    assert_eq!(f1.status, FarmStatus::Empty);
    assert_eq!(f1.pigs_remaining, 0);
}

#[tokio::test]
async fn next_day_on_a_weekend_plans_nothing() {
    let scenario = scenario_with(
        vec![farm_spec("F1", 5.0, 100, 110.0)],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);
    sim.day_index = 5; // Saturday

    let response = adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .expect("preconditions hold");

    assert_eq!(response.day_index, 6);
    assert!(response.routes.is_empty());
    assert_eq!(response.kpis.total_pigs, 0);
    assert!(response
        .logs
        .iter()
        .any(|l| l.kind == LogLevel::Info && l.msg.contains("non-working")));
    // The herd still grew.
    assert!(response.farm_updates[0].new_weight > 110.0);
}

#[tokio::test]
async fn growth_rate_override_reaches_the_growth_tick() {
    let scenario = scenario_with(
        vec![farm_spec("F1", 5.0, 100, 110.0)],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);

    let req = NextDayRequest {
        growth_rate: Some(5.0),
    };
    let response = adapter::next_day(&mut sim, &req, false).await.unwrap();

    // Mean gain of 5 kg with std 0.1: far outside the default band.
    assert!(response.farm_updates[0].new_weight > 114.0);
}

#[tokio::test]
async fn reset_restores_day_zero() {
    let scenario = scenario_with(
        vec![farm_spec("F1", 5.0, 100, 110.0)],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);

    adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .unwrap();
    assert_eq!(sim.day_index, 1);

    let response = adapter::reset(&mut sim);
    assert!(response.ok);
    assert_eq!(sim.day_index, 0);
    assert_eq!(sim.farms[0].inventory, 100);
}

#[tokio::test]
async fn history_returns_parallel_arrays() {
    let scenario = scenario_with(
        vec![farm_spec("F1", 5.0, 2_000, 110.0)],
        vec![small_truck("1")],
    );
    let mut sim = Simulation::new(scenario, hub(), offline_oracle(), 5);

    adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .unwrap();
    adapter::next_day(&mut sim, &NextDayRequest::default(), false)
        .await
        .unwrap();

    let history = adapter::history(&sim);
    assert_eq!(history.labels, vec!["Day 1".to_string(), "Day 2".to_string()]);
    assert_eq!(history.profit.len(), 2);
    assert_eq!(history.revenue.len(), 2);
    assert_eq!(history.cost.len(), 2);
    assert_eq!(history.pigs_delivered.len(), 2);
    assert!(history.pigs_delivered[0] > 0);
}
