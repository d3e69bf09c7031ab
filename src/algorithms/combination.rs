//! Confidence-weighted merge of regional estimates

use nalgebra::Vector2;

use crate::core::{EstimateResult, Point};

/// Merge child estimates into one parent estimate.
///
/// Location and error are confidence-weighted means; confidence is the plain
/// average of child confidences (not clamped). A single child is passed through
/// untouched. An empty list or a zero total weight yields the sentinel.
pub fn weighted_combination(results: &[EstimateResult]) -> EstimateResult {
    match results {
        [] => return EstimateResult::no_data(),
        [only] => return *only,
        _ => {}
    }

    let mut total_weight = 0.0;
    let mut weighted_location = Vector2::zeros();
    let mut weighted_error = 0.0;

    for result in results {
        let weight = result.confidence;
        weighted_location += result.location.to_vector2() * weight;
        weighted_error += result.error * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 || !total_weight.is_finite() {
        return EstimateResult::no_data();
    }

    EstimateResult::new(
        Point::from_vector2(&(weighted_location / total_weight)),
        total_weight / results.len() as f64,
        weighted_error / total_weight,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn estimate(lat: f64, lon: f64, confidence: f64, error: f64) -> EstimateResult {
        EstimateResult::new(Point::new(lat, lon), confidence, error)
    }

    #[test]
    fn test_empty_returns_sentinel() {
        assert_eq!(weighted_combination(&[]), EstimateResult::no_data());
    }

    #[test]
    fn test_single_child_identity() {
        let child = estimate(35.123456789, -119.987654321, 0.3141592653, 0.271828);
        assert_eq!(weighted_combination(&[child]), child);

        let sentinel = EstimateResult::no_data();
        assert_eq!(weighted_combination(&[sentinel]), sentinel);
    }

    #[test]
    fn test_confidence_weighted_mean() {
        let children = [estimate(34.0, -120.0, 1.0, 0.2), estimate(36.0, -118.0, 0.5, 0.8)];
        let combined = weighted_combination(&children);

        assert_abs_diff_eq!(combined.location.lat, (34.0 + 18.0) / 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(combined.location.lon, (-120.0 - 59.0) / 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(combined.confidence, 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(combined.error, (0.2 + 0.4) / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sentinel_children_carry_no_weight() {
        let informative = estimate(35.0, -119.0, 0.8, 0.1);
        let combined = weighted_combination(&[informative, EstimateResult::no_data()]);
        assert_abs_diff_eq!(combined.location.lat, 35.0, epsilon = 1e-12);
        assert_abs_diff_eq!(combined.location.lon, -119.0, epsilon = 1e-12);
        assert_abs_diff_eq!(combined.error, 0.1, epsilon = 1e-12);
        // Averaged over both children, so the sentinel halves the confidence
        assert_abs_diff_eq!(combined.confidence, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_total_weight_returns_sentinel() {
        let children = [EstimateResult::no_data(), EstimateResult::no_data(), estimate(1.0, 2.0, 0.0, 3.0)];
        let combined = weighted_combination(&children);
        assert!(combined.is_no_data());
        assert!(combined.location.lat.is_finite() && combined.location.lon.is_finite());
    }

    #[test]
    fn test_order_invariance() {
        let children = vec![
            estimate(34.2, -120.7, 0.91, 0.05),
            estimate(35.9, -118.4, 0.42, 0.7),
            estimate(36.6, -119.9, 0.77, 0.2),
            estimate(34.8, -118.1, 0.63, 0.33),
        ];
        let reference = weighted_combination(&children);

        let mut reversed = children.clone();
        reversed.reverse();
        let mut rotated = children.clone();
        rotated.rotate_left(1);

        for permuted in [reversed, rotated] {
            let combined = weighted_combination(&permuted);
            assert_abs_diff_eq!(combined.location.lat, reference.location.lat, epsilon = 1e-12);
            assert_abs_diff_eq!(combined.location.lon, reference.location.lon, epsilon = 1e-12);
            assert_abs_diff_eq!(combined.confidence, reference.confidence, epsilon = 1e-12);
            assert_abs_diff_eq!(combined.error, reference.error, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_raw_average_confidence_stays_in_unit_range() {
        // Not clamped: the average of children in [0, 1] stays in [0, 1]
        let children = [estimate(35.0, -119.0, 1.0, 0.0), estimate(36.0, -118.0, 1.0, 0.0)];
        let combined = weighted_combination(&children);
        assert_eq!(combined.confidence, 1.0);

        // Out-of-range children pass through unclamped
        let children = [estimate(35.0, -119.0, 1.5, 0.0), estimate(36.0, -118.0, 1.5, 0.0)];
        assert_abs_diff_eq!(weighted_combination(&children).confidence, 1.5, epsilon = 1e-12);
    }
}
