//! Inter-arrival time distributions for the vehicle arrival generator.
//!
//! These control how the fleet's departures are spread over time: either a
//! deterministic stagger or a Poisson process with exponential gaps.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::clock::ONE_MIN_MS;

/// Trait for sampling the gap before the next departure (in milliseconds).
pub trait InterArrivalDistribution: Send + Sync + std::fmt::Debug {
    /// Sample the next inter-arrival gap in milliseconds.
    /// `spawn_count` is the number of vehicles dispatched so far, so seeded
    /// draws stay reproducible regardless of call order.
    fn sample_ms(&self, spawn_count: u64) -> f64;
}

/// Deterministic staggering: a fixed gap between departures.
#[derive(Debug, Clone)]
pub struct StaggeredInterArrival {
    pub gap_ms: f64,
}

impl StaggeredInterArrival {
    pub fn new(gap_ms: f64) -> Self {
        Self {
            gap_ms: gap_ms.max(0.0),
        }
    }

    pub fn from_minutes(minutes: f64) -> Self {
        Self::new(minutes * ONE_MIN_MS as f64)
    }
}

impl InterArrivalDistribution for StaggeredInterArrival {
    fn sample_ms(&self, _spawn_count: u64) -> f64 {
        self.gap_ms
    }
}

/// Exponential gaps: Poisson-process departures with a configured mean gap.
#[derive(Debug, Clone)]
pub struct ExponentialInterArrival {
    /// Mean gap between departures, in minutes.
    pub mean_minutes: f64,
    /// Seed for RNG (for reproducibility).
    pub seed: u64,
}

impl ExponentialInterArrival {
    pub fn new(mean_minutes: f64, seed: u64) -> Self {
        Self {
            mean_minutes: mean_minutes.max(0.0),
            seed,
        }
    }
}

impl InterArrivalDistribution for ExponentialInterArrival {
    fn sample_ms(&self, spawn_count: u64) -> f64 {
        if self.mean_minutes <= 0.0 {
            return 0.0;
        }
        // Seeded per draw so that sample k is independent of earlier calls.
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(spawn_count));
        // Sample from exponential: -ln(U) * mean, where U is uniform [0,1)
        let u: f64 = rng.gen();
        let u = u.max(1e-10); // Avoid log(0)
        -u.ln() * self.mean_minutes * ONE_MIN_MS as f64
    }
}
