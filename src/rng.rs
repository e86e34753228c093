//! Random sources shared by the battle engine and the loot resolver.
//!
//! Every random decision goes through [`RandomSource`], so a test can pin
//! accuracy rolls, damage variance and loot draws with a [`ScriptedRng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    ///
    /// `reason` names the draw. It only shows up in trace output and in the
    /// panic message of an exhausted [`ScriptedRng`].
    fn next_unit(&mut self, reason: &str) -> f64;

    /// Uniform value in `[0, 100)`.
    fn percent_roll(&mut self, reason: &str) -> f64 {
        self.next_unit(reason) * 100.0
    }

    /// Uniform value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64, reason: &str) -> f64 {
        low + self.next_unit(reason) * (high - low)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize, reason: &str) -> usize {
        let picked = (self.next_unit(reason) * len as f64) as usize;
        picked.min(len.saturating_sub(1))
    }

    /// Uniform integer in `min..=max`.
    fn int_inclusive(&mut self, min: u32, max: u32, reason: &str) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as f64 + 1.0;
        let offset = (self.next_unit(reason) * span) as u32;
        min + offset.min(max - min)
    }
}

/// A [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct EntropySource<R = StdRng> {
    rng: R,
}

impl EntropySource<StdRng> {
    /// Seeds from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible stream; the same seed replays the same battle.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl<R: Rng> EntropySource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for EntropySource<R> {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value = self.rng.random::<f64>();
        tracing::trace!(reason, value, "rng draw");
        value
    }
}

/// Replays a fixed list of unit values. Intended for tests and replays.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl ScriptedRng {
    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(outcomes: Vec<f64>) -> Self {
        let outcomes = outcomes
            .into_iter()
            .map(|value| value.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { outcomes, index: 0 }
    }

    /// Number of values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for ScriptedRng {
    /// # Panics
    ///
    /// Panics once every scripted value has been consumed.
    fn next_unit(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];
        tracing::trace!(reason, outcome, "scripted rng draw");
        self.index += 1;
        outcome
    }
}
