//! Recursive divide-and-conquer epicenter locator.
//!
//! The region is bisected into SW, SE, NW, NE quadrants until a quadrant holds
//! few enough stations for the base-case estimator, or the depth cap is hit.
//! Child estimates are merged with a confidence-weighted average on the way up.

use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algorithms::combination::weighted_combination;
use crate::algorithms::partition::{partition_stations, Quadrant};
use crate::algorithms::triangulation::simple_triangulation;
use crate::core::{EstimateResult, GeoBounds, Station};
use crate::utils::config::LocatorConfig;
use crate::validation::{DataValidator, LocatorResult};

/// Summary of one locate call tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateStats {
    /// Deepest recursion level that produced a base-case estimate
    pub max_depth_reached: u32,
    /// Number of base-case estimates computed
    pub base_cases: usize,
    /// Quadrants skipped because no station fell inside them
    pub empty_quadrants_skipped: usize,
    /// Stations that matched no quadrant of their parent region
    pub dropped_stations: usize,
    /// Whether any branch hit the depth cap while still above the threshold
    pub depth_capped: bool,
}

impl LocateStats {
    fn base_case(depth: u32, capped: bool) -> Self {
        Self {
            max_depth_reached: depth,
            base_cases: 1,
            depth_capped: capped,
            ..Self::default()
        }
    }

    fn merge(&mut self, other: &LocateStats) {
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.base_cases += other.base_cases;
        self.empty_quadrants_skipped += other.empty_quadrants_skipped;
        self.dropped_stations += other.dropped_stations;
        self.depth_capped |= other.depth_capped;
    }
}

/// Divide-and-conquer epicenter locator
#[derive(Debug, Clone, Default)]
pub struct EpicenterLocator {
    config: LocatorConfig,
    validator: DataValidator,
}

impl EpicenterLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self {
            config,
            validator: DataValidator::new(),
        }
    }

    pub fn with_validator(config: LocatorConfig, validator: DataValidator) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate the epicenter of `stations` inside caller-supplied `bounds`.
    ///
    /// Validates the configuration and the input first; the recursion itself
    /// never fails.
    pub fn locate(&self, stations: &[Station], bounds: &GeoBounds) -> LocatorResult<EstimateResult> {
        self.locate_with_stats(stations, bounds).map(|(result, _)| result)
    }

    /// Same as [`locate`](Self::locate), also returning recursion statistics
    pub fn locate_with_stats(
        &self,
        stations: &[Station],
        bounds: &GeoBounds,
    ) -> LocatorResult<(EstimateResult, LocateStats)> {
        self.config.validate()?;
        let report = self.validator.validate(stations, bounds)?;
        if report.has_warnings() {
            warn!(duplicates = ?report.duplicate_ids, "duplicate station ids in input");
        }

        let views: Vec<&Station> = stations.iter().collect();
        let (result, stats) = self.locate_recursive(&views, bounds, 0);

        debug!(
            stations = stations.len(),
            lat = result.location.lat,
            lon = result.location.lon,
            confidence = result.confidence,
            error = result.error,
            max_depth = stats.max_depth_reached,
            base_cases = stats.base_cases,
            "epicenter located"
        );

        Ok((result, stats))
    }

    /// Unchecked recursive core, starting at the given depth
    pub fn locate_epicenter(&self, stations: &[&Station], bounds: &GeoBounds, depth: u32) -> EstimateResult {
        self.locate_recursive(stations, bounds, depth).0
    }

    fn locate_recursive(
        &self,
        stations: &[&Station],
        bounds: &GeoBounds,
        depth: u32,
    ) -> (EstimateResult, LocateStats) {
        let over_threshold = stations.len() > self.config.base_case_size;
        if !over_threshold || depth >= self.config.max_depth {
            if over_threshold {
                debug!(
                    depth,
                    stations = stations.len(),
                    "depth cap reached, forcing base case"
                );
            }
            let result = simple_triangulation(stations, self.config.wave_velocity);
            return (result, LocateStats::base_case(depth, over_threshold));
        }

        let quadrants = partition_stations(stations, bounds);

        let mut stats = LocateStats::default();
        let assigned: usize = quadrants.iter().map(|q| q.stations.len()).sum();
        stats.dropped_stations = stations.len() - assigned;

        let mut occupied: Vec<Quadrant<'_>> = Vec::with_capacity(4);
        for quad in quadrants {
            if quad.is_empty() {
                stats.empty_quadrants_skipped += 1;
            } else {
                occupied.push(quad);
            }
        }

        trace!(
            depth,
            occupied = occupied.len(),
            skipped = stats.empty_quadrants_skipped,
            "partitioned region"
        );

        let children = self.solve_quadrants(&occupied, depth);

        let mut results = Vec::with_capacity(children.len());
        for (quad, (result, child_stats)) in occupied.iter_mut().zip(children) {
            trace!(
                depth,
                quadrant = quad.position.label(),
                stations = quad.stations.len(),
                confidence = result.confidence,
                "quadrant solved"
            );
            quad.estimate = Some(result);
            stats.merge(&child_stats);
            results.push(result);
        }

        (weighted_combination(&results), stats)
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_quadrants(&self, occupied: &[Quadrant<'_>], depth: u32) -> Vec<(EstimateResult, LocateStats)> {
        occupied
            .iter()
            .map(|quad| self.locate_recursive(&quad.stations, &quad.bounds, depth + 1))
            .collect()
    }

    // Results are collected in quadrant order, so the merge input matches the
    // sequential path exactly.
    #[cfg(feature = "parallel")]
    fn solve_quadrants(&self, occupied: &[Quadrant<'_>], depth: u32) -> Vec<(EstimateResult, LocateStats)> {
        occupied
            .par_iter()
            .map(|quad| self.locate_recursive(&quad.stations, &quad.bounds, depth + 1))
            .collect()
    }
}
