//! Synthetic station data for demos and benchmarks

pub mod generator;

pub use generator::{StationGenerator, TimingNoise};
