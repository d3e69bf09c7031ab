use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::{EstimateResult, Point};

/// Location error of one estimate against a known source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationError {
    pub true_location: Point,
    pub estimated_location: Point,
    /// Euclidean error in degrees
    pub error_deg: f64,
    /// Approximate ground error in kilometres
    pub error_km: f64,
    pub confidence: f64,
    pub station_count: usize,
}

impl LocationError {
    pub fn new(true_location: Point, estimate: &EstimateResult, station_count: usize) -> Self {
        Self {
            true_location,
            estimated_location: estimate.location,
            error_deg: true_location.distance(&estimate.location),
            error_km: true_location.distance_km(&estimate.location),
            confidence: estimate.confidence,
            station_count,
        }
    }
}

/// Accuracy statistics over multiple estimates (kilometres)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyStatistics {
    pub mean_error_km: f64,
    pub std_dev_error_km: f64,
    pub rmse_km: f64,
    pub error_95_percentile_km: f64,
    pub max_error_km: f64,
    pub min_error_km: f64,
    pub mean_confidence: f64,
    pub sample_count: usize,
}

/// Rolling history of location errors
pub struct AccuracyTracker {
    history: VecDeque<LocationError>,
    max_history_size: usize,
}

impl Default for AccuracyTracker {
    fn default() -> Self {
        Self {
            history: VecDeque::new(),
            max_history_size: 1000,
        }
    }
}

impl AccuracyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_history_size: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_history_size),
            max_history_size: max_history_size.max(1),
        }
    }

    pub fn record(&mut self, error: LocationError) {
        self.history.push_back(error);
        while self.history.len() > self.max_history_size {
            self.history.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn statistics(&self) -> AccuracyStatistics {
        if self.history.is_empty() {
            return AccuracyStatistics::default();
        }

        let n = self.history.len();
        let errors: Vec<f64> = self.history.iter().map(|e| e.error_km).collect();

        let mean = errors.iter().sum::<f64>() / n as f64;
        let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n as f64).sqrt();
        let variance = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n as f64;
        let max = errors.iter().copied().fold(0.0, f64::max);
        let min = errors.iter().copied().fold(f64::INFINITY, f64::min);

        let mut sorted = errors.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let index_95 = ((n as f64 * 0.95).ceil() as usize).saturating_sub(1).min(n - 1);

        let mean_confidence = self.history.iter().map(|e| e.confidence).sum::<f64>() / n as f64;

        AccuracyStatistics {
            mean_error_km: mean,
            std_dev_error_km: variance.sqrt(),
            rmse_km: rmse,
            error_95_percentile_km: sorted[index_95],
            max_error_km: max,
            min_error_km: min,
            mean_confidence,
            sample_count: n,
        }
    }
}
