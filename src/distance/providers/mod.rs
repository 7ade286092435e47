pub mod osrm;

pub use osrm::route_distance_km;
