//! Utility modules for configuration and logging

pub mod config;
pub mod logging;

pub use config::{AppConfig, BenchmarkConfig, ConfigError, LocatorConfig};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
