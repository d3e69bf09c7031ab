use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::{
    GeoBounds, Point, BASE_CASE_SIZE, MAX_DEPTH_LIMIT, MAX_RECURSION_DEPTH, WAVE_VELOCITY,
};
use crate::simulation::TimingNoise;
use crate::utils::logging::LogConfig;

/// Parameters of the recursive locator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Station count at or below which the base case is used
    pub base_case_size: usize,
    /// Recursion depth at which the base case is forced
    pub max_depth: u32,
    /// Wave propagation speed (distance units per second)
    pub wave_velocity: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            base_case_size: BASE_CASE_SIZE,
            max_depth: MAX_RECURSION_DEPTH,
            wave_velocity: WAVE_VELOCITY,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_case_size == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "base_case_size".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_depth".to_string(),
                value: self.max_depth.to_string(),
                reason: format!("must not exceed {}", MAX_DEPTH_LIMIT),
            });
        }
        if !self.wave_velocity.is_finite() || self.wave_velocity <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "wave_velocity".to_string(),
                value: self.wave_velocity.to_string(),
                reason: "must be finite and positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters of the complexity sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Station counts to sweep
    pub sizes: Vec<usize>,
    /// Generated data sets per size
    pub trials: usize,
    pub true_epicenter: Point,
    pub region: GeoBounds,
    pub noise: TimingNoise,
    /// Fixed seed for reproducible runs, entropy when absent
    pub seed: Option<u64>,
    /// CSV output path
    pub output: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: vec![25, 50, 100, 200, 500, 1000, 1500, 2000],
            trials: 5,
            true_epicenter: Point::new(35.0, -120.0),
            region: GeoBounds::new(32.0, 42.0, -125.0, -114.0),
            noise: TimingNoise::default(),
            seed: None,
            output: PathBuf::from("earthquake_results.csv"),
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::MissingParameter { parameter: "sizes".to_string() });
        }
        if self.trials == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "trials".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let region = &self.region;
        let finite = [region.min_lat, region.max_lat, region.min_lon, region.max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite || region.min_lat > region.max_lat || region.min_lon > region.max_lon {
            return Err(ConfigError::InvalidParameter {
                parameter: "region".to_string(),
                value: format!("{:?}", region),
                reason: "bounds must be finite with min <= max".to_string(),
            });
        }
        let noise_ok = match self.noise {
            TimingNoise::None => true,
            TimingNoise::Uniform { half_width } => half_width.is_finite() && half_width >= 0.0,
            TimingNoise::Gaussian { std_dev } => std_dev.is_finite() && std_dev >= 0.0,
        };
        if !noise_ok {
            return Err(ConfigError::InvalidParameter {
                parameter: "noise".to_string(),
                value: format!("{:?}", self.noise),
                reason: "noise width must be finite and non-negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Application configuration, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locator: LocatorConfig,
    pub benchmark: BenchmarkConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Serialization { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialization { message: e.to_string() })?;
        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locator.validate()?;
        self.benchmark.validate()
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = {value}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },

    #[error("missing parameter '{parameter}'")]
    MissingParameter { parameter: String },

    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_locator_config() {
        let config = LocatorConfig::default();
        assert_eq!(config.base_case_size, 8);
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.wave_velocity, 6.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_locator_config() {
        let zero_threshold = LocatorConfig { base_case_size: 0, ..LocatorConfig::default() };
        assert!(matches!(
            zero_threshold.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "base_case_size"
        ));

        for velocity in [0.0, -6.0, f64::NAN, f64::INFINITY] {
            let config = LocatorConfig { wave_velocity: velocity, ..LocatorConfig::default() };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_depth_cap_upper_limit() {
        let at_limit = LocatorConfig { max_depth: MAX_DEPTH_LIMIT, ..LocatorConfig::default() };
        assert!(at_limit.validate().is_ok());

        for max_depth in [MAX_DEPTH_LIMIT + 1, 1_000_000, u32::MAX] {
            let config = LocatorConfig { max_depth, ..LocatorConfig::default() };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "max_depth"
            ));
        }
    }

    #[test]
    fn test_default_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.sizes, vec![25, 50, 100, 200, 500, 1000, 1500, 2000]);
        assert_eq!(config.trials, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_benchmark_config() {
        let no_sizes = BenchmarkConfig { sizes: vec![], ..BenchmarkConfig::default() };
        assert!(matches!(no_sizes.validate(), Err(ConfigError::MissingParameter { .. })));

        let inverted = BenchmarkConfig {
            region: GeoBounds::new(42.0, 32.0, -125.0, -114.0),
            ..BenchmarkConfig::default()
        };
        assert!(inverted.validate().is_err());

        let bad_noise = BenchmarkConfig {
            noise: TimingNoise::Uniform { half_width: -1.0 },
            ..BenchmarkConfig::default()
        };
        assert!(bad_noise.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "locator": { "base_case_size": 4 } }"#).unwrap();
        assert_eq!(config.locator.base_case_size, 4);
        assert_eq!(config.locator.max_depth, 15);
        assert_eq!(config.benchmark, BenchmarkConfig::default());
    }

    #[test]
    fn test_config_file_round_trip() {
        let mut config = AppConfig::default();
        config.locator.max_depth = 10;
        config.benchmark.seed = Some(99);
        config.benchmark.noise = TimingNoise::Gaussian { std_dev: 0.1 };

        let path = env::temp_dir().join(format!("epicenter_config_{}.json", std::process::id()));
        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::from_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file("/nonexistent/epicenter/config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let path = env::temp_dir().join(format!("epicenter_bad_{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = AppConfig::from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Serialization { .. })));
    }
}
