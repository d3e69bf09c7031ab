use std::collections::HashSet;

use crate::core::{GeoBounds, Station};
use super::error::{Axis, InputError};

/// Configuration for input validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject stations that fall outside the supplied bounds. When disabled,
    /// such stations are kept and silently dropped by the partitioner.
    pub reject_out_of_bounds: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { reject_out_of_bounds: true }
    }
}

/// Non-fatal findings from a successful validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub station_count: usize,
    /// Ids seen more than once (ids only need to be unique within a run)
    pub duplicate_ids: Vec<u32>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.duplicate_ids.is_empty()
    }
}

/// Boundary validator for station sets and search regions
#[derive(Debug, Clone, Default)]
pub struct DataValidator {
    config: ValidationConfig,
}

impl DataValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check bounds are finite and min <= max on both axes
    pub fn validate_bounds(&self, bounds: &GeoBounds) -> Result<(), InputError> {
        let values = [bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(InputError::NonFiniteBounds);
        }
        if bounds.min_lat > bounds.max_lat {
            return Err(InputError::InvertedBounds {
                axis: Axis::Latitude,
                min: bounds.min_lat,
                max: bounds.max_lat,
            });
        }
        if bounds.min_lon > bounds.max_lon {
            return Err(InputError::InvertedBounds {
                axis: Axis::Longitude,
                min: bounds.min_lon,
                max: bounds.max_lon,
            });
        }
        Ok(())
    }

    /// Check a single station against already-validated bounds
    pub fn validate_station(&self, station: &Station, bounds: &GeoBounds) -> Result<(), InputError> {
        if !station.position.is_finite() || !station.arrival_time.is_finite() {
            return Err(InputError::NonFiniteStation { id: station.id });
        }
        if self.config.reject_out_of_bounds && !bounds.contains(&station.position) {
            return Err(InputError::StationOutOfBounds {
                id: station.id,
                lat: station.position.lat,
                lon: station.position.lon,
            });
        }
        Ok(())
    }

    /// Validate a full locate request, failing on the first violation
    pub fn validate(&self, stations: &[Station], bounds: &GeoBounds) -> Result<ValidationReport, InputError> {
        self.validate_bounds(bounds)?;

        let mut seen = HashSet::with_capacity(stations.len());
        let mut duplicate_ids = Vec::new();
        for station in stations {
            self.validate_station(station, bounds)?;
            if !seen.insert(station.id) && !duplicate_ids.contains(&station.id) {
                duplicate_ids.push(station.id);
            }
        }

        Ok(ValidationReport {
            station_count: stations.len(),
            duplicate_ids,
        })
    }
}
