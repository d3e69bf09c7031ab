//! Quadrant splitting and station distribution

use crate::core::{EstimateResult, GeoBounds, QuadrantPosition, Station};

/// One quadrant of a region during a single level of recursion
#[derive(Debug, Clone)]
pub struct Quadrant<'a> {
    pub position: QuadrantPosition,
    pub bounds: GeoBounds,
    /// Borrowed views of the stations that fell inside this quadrant
    pub stations: Vec<&'a Station>,
    pub estimate: Option<EstimateResult>,
}

impl<'a> Quadrant<'a> {
    pub fn new(position: QuadrantPosition, bounds: GeoBounds) -> Self {
        Self {
            position,
            bounds,
            stations: Vec::new(),
            estimate: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Split `bounds` at its center and distribute `stations` into SW, SE, NW, NE.
///
/// Each station goes to the first quadrant in that order that contains it, so
/// a station on a split line belongs to exactly one quadrant. Stations outside
/// `bounds` match no quadrant and are dropped.
pub fn partition_stations<'a>(stations: &[&'a Station], bounds: &GeoBounds) -> [Quadrant<'a>; 4] {
    let mut quadrants = bounds
        .quadrants()
        .map(|(position, quad_bounds)| Quadrant::new(position, quad_bounds));

    for &station in stations {
        if let Some(quad) = quadrants
            .iter_mut()
            .find(|q| q.bounds.contains(&station.position))
        {
            quad.stations.push(station);
        }
    }

    quadrants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::StationGenerator;
    use crate::core::Point;

    fn region() -> GeoBounds {
        GeoBounds::new(34.0, 37.0, -121.0, -118.0)
    }

    #[test]
    fn test_center_station_goes_to_southwest() {
        let station = Station::new(0, 35.5, -119.5, 0.0);
        let quads = partition_stations(&[&station], &region());
        assert_eq!(quads[0].position, QuadrantPosition::SouthWest);
        assert_eq!(quads[0].stations.len(), 1);
        assert!(quads[1..].iter().all(|q| q.is_empty()));
    }

    #[test]
    fn test_split_line_tie_breaks() {
        let region = region();
        // On the latitude split, east half -> SE before NE
        let lat_line = Station::new(1, 35.5, -118.5, 0.0);
        // On the longitude split, north half -> NW before NE
        let lon_line = Station::new(2, 36.5, -119.5, 0.0);
        let quads = partition_stations(&[&lat_line, &lon_line], &region);

        assert_eq!(quads[1].stations.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(quads[2].stations.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2]);
        assert!(quads[0].is_empty() && quads[3].is_empty());
    }

    #[test]
    fn test_each_quadrant_receives_its_station() {
        let stations = [
            Station::new(0, 34.5, -120.5, 0.0),
            Station::new(1, 34.5, -118.5, 0.0),
            Station::new(2, 36.5, -120.5, 0.0),
            Station::new(3, 36.5, -118.5, 0.0),
        ];
        let refs: Vec<&Station> = stations.iter().collect();
        let quads = partition_stations(&refs, &region());
        for (i, quad) in quads.iter().enumerate() {
            assert_eq!(quad.position, QuadrantPosition::ALL[i]);
            assert_eq!(quad.stations.len(), 1);
            assert_eq!(quad.stations[0].id, i as u32);
            assert!(quad.estimate.is_none());
        }
    }

    #[test]
    fn test_partition_is_exhaustive_and_deterministic() {
        let region = region();
        let stations = StationGenerator::seeded(7).generate(500, Point::new(35.5, -119.5), &region);
        let refs: Vec<&Station> = stations.iter().collect();

        let first = partition_stations(&refs, &region);
        let second = partition_stations(&refs, &region);

        let total: usize = first.iter().map(|q| q.stations.len()).sum();
        assert_eq!(total, stations.len());

        let mut seen: Vec<u32> = first
            .iter()
            .flat_map(|q| q.stations.iter().map(|s| s.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..500).collect::<Vec<u32>>());

        for (a, b) in first.iter().zip(second.iter()) {
            let ids_a: Vec<u32> = a.stations.iter().map(|s| s.id).collect();
            let ids_b: Vec<u32> = b.stations.iter().map(|s| s.id).collect();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn test_outside_station_dropped() {
        let outside = Station::new(0, 40.0, -119.0, 0.0);
        let quads = partition_stations(&[&outside], &region());
        assert!(quads.iter().all(|q| q.is_empty()));
    }
}
