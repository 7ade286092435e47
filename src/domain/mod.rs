pub mod scenario;
pub mod types;

pub use scenario::{FarmSpec, Scenario, TruckSpec};
pub use types::{
    DailyLog, DayKpis, Farm, FarmSummary, Point, SimulationResult, Slaughterhouse, Trip, Truck,
    TruckClass,
};
