//! Core data types for the epicenter locator

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::constants::{KM_PER_DEGREE, NO_DATA_ERROR};

/// 2D position in degrees (latitude, longitude)
///
/// Arithmetic is plain Euclidean on the degree values, no geodesic correction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Euclidean distance in degrees
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }

    /// Approximate ground distance in kilometres, using this point as the
    /// reference latitude for longitude scaling. Reporting only.
    pub fn distance_km(&self, other: &Point) -> f64 {
        let north_km = (other.lat - self.lat) * KM_PER_DEGREE;
        let east_km = (other.lon - self.lon) * KM_PER_DEGREE * self.lat.to_radians().cos();
        (north_km.powi(2) + east_km.powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.lat, self.lon)
    }

    pub fn from_vector2(v: &Vector2<f64>) -> Self {
        Self { lat: v.x, lon: v.y }
    }
}

/// One of the four sub-rectangles produced by bisecting a region on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadrantPosition {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl QuadrantPosition {
    /// Fixed first-match order used when distributing stations
    pub const ALL: [QuadrantPosition; 4] = [
        QuadrantPosition::SouthWest,
        QuadrantPosition::SouthEast,
        QuadrantPosition::NorthWest,
        QuadrantPosition::NorthEast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuadrantPosition::SouthWest => "SW",
            QuadrantPosition::SouthEast => "SE",
            QuadrantPosition::NorthWest => "NW",
            QuadrantPosition::NorthEast => "NE",
        }
    }
}

/// Axis-aligned geographic rectangle, inclusive on all four edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Sub-rectangle for one quadrant, split at the center on both axes
    pub fn quadrant(&self, position: QuadrantPosition) -> GeoBounds {
        let mid = self.center();
        match position {
            QuadrantPosition::SouthWest => {
                GeoBounds::new(self.min_lat, mid.lat, self.min_lon, mid.lon)
            }
            QuadrantPosition::SouthEast => {
                GeoBounds::new(self.min_lat, mid.lat, mid.lon, self.max_lon)
            }
            QuadrantPosition::NorthWest => {
                GeoBounds::new(mid.lat, self.max_lat, self.min_lon, mid.lon)
            }
            QuadrantPosition::NorthEast => {
                GeoBounds::new(mid.lat, self.max_lat, mid.lon, self.max_lon)
            }
        }
    }

    /// All four quadrants in SW, SE, NW, NE order
    pub fn quadrants(&self) -> [(QuadrantPosition, GeoBounds); 4] {
        QuadrantPosition::ALL.map(|position| (position, self.quadrant(position)))
    }
}

/// Seismic monitoring station with its observed arrival time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: u32,
    pub position: Point,
    /// Arrival time in seconds, arbitrary epoch
    pub arrival_time: f64,
}

impl Station {
    pub fn new(id: u32, lat: f64, lon: f64, arrival_time: f64) -> Self {
        Self {
            id,
            position: Point::new(lat, lon),
            arrival_time,
        }
    }
}

/// Location estimate with confidence and residual error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub location: Point,
    /// Heuristic trust score, 0 for "no data"
    pub confidence: f64,
    /// Sum of squared arrival-time residuals, lower is better
    pub error: f64,
}

impl EstimateResult {
    pub fn new(location: Point, confidence: f64, error: f64) -> Self {
        Self { location, confidence, error }
    }

    /// Sentinel returned when there is nothing to estimate from
    pub fn no_data() -> Self {
        Self {
            location: Point::new(0.0, 0.0),
            confidence: 0.0,
            error: NO_DATA_ERROR,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.confidence == 0.0 && self.error >= NO_DATA_ERROR
    }
}
