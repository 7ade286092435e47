pub mod cost;
pub mod penalty;
pub mod revenue;

pub use cost::{trip_cost, trip_duration};
pub use penalty::penalty_ratio;
pub use revenue::batch_revenue;
