//! Benchmark harness: complexity sweep and accuracy statistics

pub mod accuracy;
pub mod complexity;

pub use accuracy::{AccuracyStatistics, AccuracyTracker, LocationError};
pub use complexity::{measure_execution_time, n_log_n, ComplexityAnalysis, SizeSummary};
