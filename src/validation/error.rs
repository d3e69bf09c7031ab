use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::config::ConfigError;

/// Coordinate axis of a bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Caller contract violations detected at the locator boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("bounds inverted on {axis} axis: min {min} > max {max}")]
    InvertedBounds { axis: Axis, min: f64, max: f64 },

    #[error("bounds contain a non-finite value")]
    NonFiniteBounds,

    #[error("station {id} has a non-finite coordinate or arrival time")]
    NonFiniteStation { id: u32 },

    #[error("station {id} at ({lat}, {lon}) lies outside the supplied bounds")]
    StationOutOfBounds { id: u32, lat: f64, lon: f64 },
}

/// Top-level error type for the epicenter locator
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type LocatorResult<T> = Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InputError::InvertedBounds { axis: Axis::Latitude, min: 5.0, max: 1.0 };
        assert_eq!(err.to_string(), "bounds inverted on latitude axis: min 5 > max 1");

        let wrapped: LocatorError = InputError::NonFiniteStation { id: 3 }.into();
        assert_eq!(
            wrapped.to_string(),
            "invalid input: station 3 has a non-finite coordinate or arrival time"
        );
    }
}
