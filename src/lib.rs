//! Earthquake Epicenter Locator
//!
//! Estimates a point source from station arrival times by recursively
//! splitting the search region into quadrants, solving small quadrants
//! directly, and merging regional estimates by confidence.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod simulation;
pub mod benchmark;
pub mod api;

// Re-export commonly used types
pub use crate::core::{
    EstimateResult, GeoBounds, Point, QuadrantPosition, Station,
    BASE_CASE_SIZE, MAX_DEPTH_LIMIT, MAX_RECURSION_DEPTH, NO_DATA_ERROR, WAVE_VELOCITY,
};
pub use algorithms::{
    partition_stations, simple_triangulation, weighted_combination,
    EpicenterLocator, LocateStats, Quadrant,
};
pub use validation::{DataValidator, InputError, LocatorError, LocatorResult};
pub use utils::{init_logging, AppConfig, BenchmarkConfig, ConfigError, LocatorConfig, LogConfig};
pub use simulation::{StationGenerator, TimingNoise};
pub use benchmark::{ComplexityAnalysis, SizeSummary};
pub use api::{CsvFormatter, CsvSink, FormattedEstimate, JsonFormatter, TextFormatter};
