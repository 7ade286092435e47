pub mod oracle;
pub mod providers;

pub use oracle::{fallback_km, haversine_km, DistanceOracle};
