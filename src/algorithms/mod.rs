//! Core locating algorithms

pub mod triangulation;
pub mod partition;
pub mod combination;
pub mod locator;

pub use triangulation::simple_triangulation;
pub use partition::{partition_stations, Quadrant};
pub use combination::weighted_combination;
pub use locator::{EpicenterLocator, LocateStats};
