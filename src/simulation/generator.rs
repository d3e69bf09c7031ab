use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::core::{GeoBounds, Point, Station, WAVE_VELOCITY};

/// Timing noise added to theoretical arrival times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingNoise {
    /// Exact arrival times
    None,
    /// Uniform noise in [-half_width, half_width] seconds
    Uniform { half_width: f64 },
    /// Zero-mean Gaussian noise (seconds)
    Gaussian { std_dev: f64 },
}

impl Default for TimingNoise {
    fn default() -> Self {
        TimingNoise::Uniform { half_width: 0.5 }
    }
}

impl TimingNoise {
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            TimingNoise::None => 0.0,
            TimingNoise::Uniform { half_width } if half_width > 0.0 => {
                Uniform::new_inclusive(-half_width, half_width).sample(rng)
            }
            TimingNoise::Gaussian { std_dev } if std_dev > 0.0 => {
                // std_dev is finite and positive here, so construction cannot fail
                Normal::new(0.0, std_dev).map(|n| n.sample(rng)).unwrap_or(0.0)
            }
            _ => 0.0,
        }
    }
}

/// Synthetic station generator around a known source
///
/// Generic over the random source so tests can pin a seed.
pub struct StationGenerator<R: Rng = StdRng> {
    rng: R,
    wave_velocity: f64,
    noise: TimingNoise,
}

impl StationGenerator<StdRng> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> StationGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            wave_velocity: WAVE_VELOCITY,
            noise: TimingNoise::default(),
        }
    }

    pub fn with_wave_velocity(mut self, wave_velocity: f64) -> Self {
        self.wave_velocity = wave_velocity;
        self
    }

    pub fn with_noise(mut self, noise: TimingNoise) -> Self {
        self.noise = noise;
        self
    }

    /// Generate `count` stations uniformly inside `region`, with arrival times
    /// equal to travel time from `true_epicenter` plus noise. Ids are `0..count`.
    pub fn generate(&mut self, count: usize, true_epicenter: Point, region: &GeoBounds) -> Vec<Station> {
        let mut stations = Vec::with_capacity(count);
        for id in 0..count {
            let lat = self.sample_axis(region.min_lat, region.max_lat);
            let lon = self.sample_axis(region.min_lon, region.max_lon);
            let position = Point::new(lat, lon);

            let travel_time = true_epicenter.distance(&position) / self.wave_velocity;
            let arrival_time = travel_time + self.noise.sample(&mut self.rng);

            stations.push(Station {
                id: id as u32,
                position,
                arrival_time,
            });
        }
        stations
    }

    fn sample_axis(&mut self, min: f64, max: f64) -> f64 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }
}
