//! Base-case estimator for small station sets.
//!
//! Uses inverse-time weighting: stations whose arrivals are close to the
//! earliest one are treated as closer to the source. This is a proximity
//! heuristic, not a travel-time inversion.

use nalgebra::Vector2;
use tracing::trace;

use crate::core::{EstimateResult, Point, Station};

/// Estimate a location directly from a small set of stations.
///
/// Never fails: an empty set yields the "no data" sentinel and a single
/// station is taken as the location with full confidence.
pub fn simple_triangulation(stations: &[&Station], wave_velocity: f64) -> EstimateResult {
    match stations {
        [] => EstimateResult::no_data(),
        [only] => EstimateResult::new(only.position, 1.0, 0.0),
        _ => weighted_time_estimate(stations, wave_velocity),
    }
}

fn weighted_time_estimate(stations: &[&Station], wave_velocity: f64) -> EstimateResult {
    let min_time = stations
        .iter()
        .map(|s| s.arrival_time)
        .fold(f64::INFINITY, f64::min);

    let mut weighted_sum = Vector2::zeros();
    let mut total_weight = 0.0;
    for station in stations {
        let time_diff = station.arrival_time - min_time;
        let weight = 1.0 / (1.0 + time_diff * time_diff);
        weighted_sum += station.position.to_vector2() * weight;
        total_weight += weight;
    }

    // Every weight lies in (0, 1], so the total is strictly positive.
    let estimate = Point::from_vector2(&(weighted_sum / total_weight));

    let error: f64 = stations
        .iter()
        .map(|station| {
            let theoretical_time = estimate.distance(&station.position) / wave_velocity;
            let actual_time = station.arrival_time - min_time;
            (theoretical_time - actual_time).powi(2)
        })
        .sum();

    let confidence = 1.0 / (1.0 + error / stations.len() as f64);

    trace!(
        stations = stations.len(),
        lat = estimate.lat,
        lon = estimate.lon,
        error,
        confidence,
        "base case estimate"
    );

    EstimateResult::new(estimate, confidence, error)
}
