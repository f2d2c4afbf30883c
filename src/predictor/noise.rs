//! Injectable randomness for the score jitter.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

/// Source of the bounded draws the score estimator consumes.
pub trait NoiseSource {
    fn int_in(&mut self, range: RangeInclusive<i32>) -> i32;
    fn float_in(&mut self, range: RangeInclusive<f64>) -> f64;
}

impl NoiseSource for StdRng {
    fn int_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }

    fn float_in(&mut self, range: RangeInclusive<f64>) -> f64 {
        self.gen_range(range)
    }
}

impl NoiseSource for ThreadRng {
    fn int_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }

    fn float_in(&mut self, range: RangeInclusive<f64>) -> f64 {
        self.gen_range(range)
    }
}

/// Hands request handlers a noise source.
///
/// `ThreadLocal` needs no coordination between concurrent requests. `Seeded`
/// shares one generator behind a mutex so a given seed reproduces the same
/// sequence of predictions.
#[derive(Clone)]
pub enum NoiseProvider {
    ThreadLocal,
    Seeded(Arc<Mutex<StdRng>>),
}

impl NoiseProvider {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => NoiseProvider::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
            None => NoiseProvider::ThreadLocal,
        }
    }

    /// Run `f` with a noise source borrowed for the duration of the call.
    pub fn with<T>(&self, f: impl FnOnce(&mut dyn NoiseSource) -> T) -> T {
        match self {
            NoiseProvider::ThreadLocal => f(&mut rand::thread_rng()),
            NoiseProvider::Seeded(rng) => {
                // Poisoning leaves the generator usable.
                let mut guard = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                f(&mut *guard)
            }
        }
    }
}

/// Always returns the configured values, clamped into the requested range.
#[cfg(test)]
pub(crate) struct FixedNoise {
    pub jitter: i32,
    pub confidence: f64,
}

#[cfg(test)]
impl NoiseSource for FixedNoise {
    fn int_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.jitter.clamp(*range.start(), *range.end())
    }

    fn float_in(&mut self, range: RangeInclusive<f64>) -> f64 {
        self.confidence.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let i = rng.int_in(-15..=15);
            assert!((-15..=15).contains(&i));
            let f = rng.float_in(0.75..=0.95);
            assert!((0.75..=0.95).contains(&f));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = NoiseProvider::from_seed(Some(42));
        let b = NoiseProvider::from_seed(Some(42));
        let xs: Vec<i32> = (0..10).map(|_| a.with(|n| n.int_in(-15..=15))).collect();
        let ys: Vec<i32> = (0..10).map(|_| b.with(|n| n.int_in(-15..=15))).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn fixed_noise_clamps_into_range() {
        let mut noise = FixedNoise { jitter: 99, confidence: 0.1 };
        assert_eq!(noise.int_in(-15..=15), 15);
        assert_eq!(noise.float_in(0.75..=0.95), 0.75);
    }
}
