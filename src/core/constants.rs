//! Physical constants and system parameters

/// P-wave propagation speed (distance units per second)
pub const WAVE_VELOCITY: f64 = 6.0;

/// Station count at or below which the base-case estimator is used
pub const BASE_CASE_SIZE: usize = 8;

/// Recursion depth at which the base case is forced regardless of station count
pub const MAX_RECURSION_DEPTH: u32 = 15;

/// Largest depth cap a configuration may request. Each level halves the
/// region, so deeper caps only grow the call stack.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Residual reported by the "no data" sentinel result
pub const NO_DATA_ERROR: f64 = 1e9;

/// Approximate kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;
