//! Timing and accuracy sweep over increasing station counts

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

use crate::algorithms::EpicenterLocator;
use crate::core::{EstimateResult, GeoBounds, Point, Station};
use crate::simulation::StationGenerator;
use crate::utils::config::BenchmarkConfig;
use crate::validation::LocatorResult;

use super::accuracy::{AccuracyStatistics, AccuracyTracker, LocationError};

/// Averaged results for one station count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeSummary {
    pub stations: usize,
    pub trials: usize,
    pub avg_time_ms: f64,
    /// Mean residual error reported by the locator
    pub avg_error: f64,
    pub avg_confidence: f64,
    /// Mean of the estimated locations across trials
    pub avg_location: Point,
    /// Distance of `avg_location` from the true source, degrees
    pub location_error_deg: f64,
    /// Distance of `avg_location` from the true source, km
    pub location_error_km: f64,
    /// n * log2(n), for comparing growth against the expected complexity
    pub n_log_n: f64,
    /// Per-trial accuracy spread
    pub accuracy: AccuracyStatistics,
}

/// Time a single locate call
pub fn measure_execution_time(
    locator: &EpicenterLocator,
    stations: &[Station],
    bounds: &GeoBounds,
) -> LocatorResult<(EstimateResult, Duration)> {
    let start = Instant::now();
    let result = locator.locate(stations, bounds)?;
    Ok((result, start.elapsed()))
}

/// Complexity sweep driver
pub struct ComplexityAnalysis {
    locator: EpicenterLocator,
    config: BenchmarkConfig,
}

impl ComplexityAnalysis {
    pub fn new(locator: EpicenterLocator, config: BenchmarkConfig) -> Self {
        Self { locator, config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn run(&self) -> LocatorResult<Vec<SizeSummary>> {
        self.run_with(|_| {})
    }

    /// Run the sweep, invoking `on_size` as each station count completes
    pub fn run_with<F>(&self, mut on_size: F) -> LocatorResult<Vec<SizeSummary>>
    where
        F: FnMut(&SizeSummary),
    {
        self.config.validate()?;

        let mut generator = match self.config.seed {
            Some(seed) => StationGenerator::seeded(seed),
            None => StationGenerator::from_entropy(),
        }
        .with_wave_velocity(self.locator.config().wave_velocity)
        .with_noise(self.config.noise);

        let truth = self.config.true_epicenter;
        let region = self.config.region;
        let mut summaries = Vec::with_capacity(self.config.sizes.len());

        for &n in &self.config.sizes {
            let trials = self.config.trials;
            let mut tracker = AccuracyTracker::with_capacity(trials);
            let mut total_time = Duration::ZERO;
            let mut total_error = 0.0;
            let mut total_confidence = 0.0;
            let mut location_sum = Point::default();

            for _ in 0..trials {
                let stations = generator.generate(n, truth, &region);
                let (result, elapsed) = measure_execution_time(&self.locator, &stations, &region)?;

                total_time += elapsed;
                total_error += result.error;
                total_confidence += result.confidence;
                location_sum.lat += result.location.lat;
                location_sum.lon += result.location.lon;
                tracker.record(LocationError::new(truth, &result, n));
            }

            let t = trials as f64;
            let avg_location = Point::new(location_sum.lat / t, location_sum.lon / t);
            let summary = SizeSummary {
                stations: n,
                trials,
                avg_time_ms: total_time.as_secs_f64() * 1000.0 / t,
                avg_error: total_error / t,
                avg_confidence: total_confidence / t,
                avg_location,
                location_error_deg: truth.distance(&avg_location),
                location_error_km: truth.distance_km(&avg_location),
                n_log_n: n_log_n(n),
                accuracy: tracker.statistics(),
            };

            info!(
                stations = n,
                avg_time_ms = summary.avg_time_ms,
                avg_error = summary.avg_error,
                location_error_km = summary.location_error_km,
                "size complete"
            );

            on_size(&summary);
            summaries.push(summary);
        }

        Ok(summaries)
    }
}

/// n * log2(n), zero for n < 2
pub fn n_log_n(n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        let n = n as f64;
        n * n.log2()
    }
}
