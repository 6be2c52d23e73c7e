//! Core data types: the size parameter, the randomness source and the trial
//! configuration.

use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};

/// Size parameter for controlling test data generation.
///
/// Generators treat the size as an upper-bound hint for lengths and
/// magnitudes, never as an exact value. The trial driver grows it from
/// trial to trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Scale size by a factor.
    pub fn scale(&self, factor: f64) -> Self {
        Size((self.0 as f64 * factor) as usize)
    }

    /// Clamp size to a maximum value.
    pub fn clamp(&self, max: usize) -> Self {
        Size(self.0.min(max))
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// The randomness source threaded through every generator.
///
/// A single SplitMix64 stream that each sampling call advances in place.
/// Cloning copies the current state, so a clone replays exactly the draws
/// the original would make next. Implements [`RngCore`], which makes the
/// whole `rand::Rng` toolbox available to generator authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: u64,
    gamma: u64,
}

impl Random {
    /// Create a reproducible stream from a single seed value.
    pub fn from_seed(seed: u64) -> Self {
        let state = splitmix64_mix(seed);
        let gamma = mix_gamma(state);
        Random { state, gamma }
    }

    /// Create a stream seeded from the thread-local entropy source.
    pub fn entropy() -> Self {
        use rand::Rng;
        Random::from_seed(rand::thread_rng().gen())
    }

    /// Derive an independent child stream, advancing this one.
    pub fn split(&mut self) -> Random {
        self.state = self.state.wrapping_add(self.gamma);
        let output = splitmix64_mix(self.state);
        Random {
            state: output,
            gamma: mix_gamma(output),
        }
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(self.gamma);
        splitmix64_mix(self.state)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Display for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random({:#018x}, {:#018x})", self.state, self.gamma)
    }
}

/// Configuration for running a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of trials to run.
    pub test_limit: usize,

    /// Maximum number of accepted shrink steps.
    pub shrink_limit: usize,

    /// Size used for the first trial.
    pub initial_size: usize,

    /// Size reached by the last trial.
    pub size_limit: usize,

    /// Fixed seed for reproducing a run; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            initial_size: 0,
            size_limit: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Create a new config starting from the given size.
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Create a new config that replays the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations no trial run can honour.
    pub fn validate(&self) -> Result<()> {
        if self.test_limit == 0 {
            return Err(Error::InvalidConfig {
                message: "test_limit must be at least 1".to_string(),
            });
        }
        if self.initial_size > self.size_limit {
            return Err(Error::InvalidConfig {
                message: format!(
                    "initial_size ({}) exceeds size_limit ({})",
                    self.initial_size, self.size_limit
                ),
            });
        }
        Ok(())
    }

    /// Size for the given zero-based trial, growing linearly toward the limit.
    pub fn size_for(&self, trial: usize) -> Size {
        let span = self.size_limit.saturating_sub(self.initial_size);
        Size::new(self.initial_size + (trial * span) / self.test_limit.max(1))
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(z: u64) -> u64 {
    let z = splitmix64_mix(z);
    // Odd gamma gives the full period.
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
