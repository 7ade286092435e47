pub mod constant {
    // Horizon
    pub const SIMULATION_DAYS: usize = 14;
    pub const WORK_DAYS: [usize; 5] = [0, 1, 2, 3, 4]; // Mon..Fri, day_index % 7
    pub const MAX_STOPS: usize = 3;

    // Time constraints
    pub const MAX_DAILY_HOURS: f64 = 8.0;
    pub const AVG_SPEED_KMH: f64 = 50.0;
    pub const SERVICE_TIME_PER_STOP: f64 = 0.5;
    pub const UNLOADING_TIME_SLAUGHTERHOUSE: f64 = 0.5;

    // Road distance service
    pub const OSRM_API_URL: &str = "http://router.project-osrm.org/route/v1/driving";
    pub const OSRM_TIMEOUT_SECS: u64 = 1;
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    pub const CIRCUITY_FACTOR_FALLBACK: f64 = 1.3;

    // Prices and costs (EUR)
    pub const PRICE_PER_KG: f64 = 1.56;
    pub const FIXED_COST_TRUCK_WEEKLY: f64 = 2000.0;
    pub const COST_PER_KM_SMALL: f64 = 1.15; // 10T truck
    pub const COST_PER_KM_LARGE: f64 = 1.25; // 20T truck
    pub const SMALL_TRUCK_TONS: f64 = 10.0;
    pub const LARGE_TRUCK_TONS: f64 = 20.0;

    // Weight bands (kg)
    pub const IDEAL_MIN_KG: f64 = 105.0;
    pub const IDEAL_MAX_KG: f64 = 115.0;
    pub const PENALTY_RANGE_MIN_KG: f64 = 100.0;
    pub const PENALTY_RANGE_MAX_KG: f64 = 120.0;
    pub const PENALTY_FACTOR_MILD: f64 = 0.15;
    pub const PENALTY_FACTOR_HARSH: f64 = 0.20;

    // Growth parameters
    pub const DAILY_GROWTH_MEAN: f64 = 0.8;
    pub const DAILY_GROWTH_STD: f64 = 0.1;
    pub const DEFAULT_WEIGHT_STD: f64 = 5.0;

    // Urgency thresholds
    pub const REVISIT_LOCKOUT_DAYS: i64 = 7;
    pub const PANIC_THRESHOLD_WEIGHT: f64 = 118.0;
    pub const OPTIMAL_MIN_WEIGHT: f64 = 108.0;
    pub const URGENCY_COST_PER_KM_PROXY: f64 = 1.20;

    // Multi-stop expansion limits
    pub const LOAD_FILL_TARGET: f64 = 0.90;
    pub const MAX_LEG_KM: f64 = 50.0;
    pub const MAX_DETOUR_KM: f64 = 25.0;
    pub const DETOUR_COST_WEIGHT: f64 = 2.0;
    pub const EXPANSION_TIME_SLACK_HOURS: f64 = 0.5;

    // Base location (slaughterhouse, Vic area)
    pub const SLAUGHTERHOUSE_LAT: f64 = 41.9308;
    pub const SLAUGHTERHOUSE_LON: f64 = 2.2545;
    pub const SLAUGHTERHOUSE_CAPACITY: u32 = 2000;

    pub const ENGINE_SEED: u64 = 64;
    pub const SCENARIO_PATH: &str = "scenario_data.json";
    pub const LAST_VISIT_SENTINEL: i64 = -999;
}
