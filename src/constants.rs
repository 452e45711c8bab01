/// Default number of Monte Carlo draws per simulation
pub const DEFAULT_SAMPLE_COUNT: usize = 20_000;

/// Highest win total reported under the fixed domain (12-game season plus a
/// conference championship)
pub const DEFAULT_MAX_WINS: u32 = 13;

/// Largest top bucket accepted for a fixed domain
pub const MAX_DOMAIN_WINS: u32 = 64;

/// Win probability assumed for a remaining game with no estimate
pub const DEFAULT_UNKNOWN_PROBABILITY: f64 = 0.5;

/// Regular-season wins needed for bowl eligibility
pub const BOWL_ELIGIBLE_WINS: u32 = 6;

/// Standard deviation of the final margin around the point spread
pub const SPREAD_STDDEV: f64 = 14.0;
