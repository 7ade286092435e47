pub mod driver;
pub mod tournament;

pub use driver::Simulation;
pub use tournament::{run_tournament, TournamentReport, FLEET_CANDIDATES};
