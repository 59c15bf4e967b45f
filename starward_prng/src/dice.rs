// Tabletop dice over a `SeededSource`.
//
// Every roll is `floor(u * sides) + 1` for a single fresh draw `u`, so each
// die consumes exactly one state advance. `roll_2d6` rolls the first die and
// then the second; the generator stages depend on that order.

use crate::SeededSource;
use serde::{Deserialize, Serialize};

/// Dice roller owning one seeded stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoller {
    source: SeededSource,
}

impl DiceRoller {
    pub fn new(source: SeededSource) -> Self {
        Self { source }
    }

    /// Roller seeded from a string seed (e.g. a hex id).
    pub fn from_seed(seed: &str) -> Self {
        Self::new(SeededSource::from_seed(seed))
    }

    /// Roller with a non-reproducible starting state.
    pub fn unseeded() -> Self {
        Self::new(SeededSource::unseeded())
    }

    /// Discard the current stream and restart from `seed`. Not cumulative
    /// with earlier draws: the result is identical to `from_seed(seed)`.
    pub fn reseed(&mut self, seed: &str) {
        self.source = SeededSource::from_seed(seed);
    }

    pub fn source(&self) -> &SeededSource {
        &self.source
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.source.next_f64()
    }

    /// Roll one die with `sides` faces, returning 1..=sides.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_f64() * f64::from(sides)).floor() as u32 + 1
    }

    /// Sum of two six-sided dice, 2..=12.
    pub fn roll_2d6(&mut self) -> u32 {
        let first = self.roll_die(6);
        let second = self.roll_die(6);
        first + second
    }

    /// Percentile roll, 1..=100.
    pub fn roll_percentile(&mut self) -> u32 {
        (self.next_f64() * 100.0).floor() as u32 + 1
    }

    /// Shorthand for `roll_die(6)`.
    pub fn d6(&mut self) -> u32 {
        self.roll_die(6)
    }
}
