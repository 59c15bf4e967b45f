// The system generator: entry points `generate` and `generate_for_hex`.
//
// `SystemGenerator` owns one `DiceRoller` stream, the validated
// `GenerationConfig`, and a `Clock` for the `generated` timestamp. Each
// instance is one generation session; concurrent callers need their own
// instances, since sharing one interleaves draws and breaks reproducibility.
//
// `generate_for_hex` re-seeds the stream from the hex id before running, so
// the result depends only on (hex id, stellar type, existing data, config)
// and never on what the instance generated before. Persist the hex id, not
// the stream state, to reproduce a system later.
//
// The timestamp is the only part of the record not determined by the seed.
// Tests and tools that need byte-identical records install a `FixedClock`.
//
// See also: `pipeline.rs` for the stage order, `config.rs` for options.

use crate::config::{ExistingHexData, GenerationConfig, GenerationOptions};
use crate::pipeline;
use crate::prng::DiceRoller;
use crate::types::StarSystem;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Source of the `generated` timestamp, in Unix epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

pub struct SystemGenerator {
    dice: DiceRoller,
    config: GenerationConfig,
    clock: Box<dyn Clock + Send>,
}

impl SystemGenerator {
    /// Unseeded generator with the default config.
    pub fn new() -> Self {
        Self::with_dice(DiceRoller::unseeded(), GenerationConfig::default())
    }

    /// Generator whose stream starts from `seed`, with the default config.
    pub fn with_seed(seed: &str) -> Self {
        Self::with_dice(DiceRoller::from_seed(seed), GenerationConfig::default())
    }

    /// Generator over an existing stream and config. The config is expected
    /// to have passed `GenerationConfig::validate`.
    pub fn with_dice(dice: DiceRoller, config: GenerationConfig) -> Self {
        Self {
            dice,
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn dice(&self) -> &DiceRoller {
        &self.dice
    }

    /// Discard the current stream and restart it from `seed`.
    pub fn reseed(&mut self, seed: &str) {
        self.dice.reseed(seed);
    }

    /// Generate a system for `stellar_type`, continuing the current stream.
    pub fn generate(&mut self, stellar_type: &str, options: &GenerationOptions) -> StarSystem {
        let generated = self.clock.now_millis();
        let system = pipeline::run(stellar_type, &self.config, options, &mut self.dice, generated);
        info!(
            stellar_type,
            companions = system.companions.len(),
            planets = system.planets.len(),
            belts = system.belts.len(),
            trojans = system.trojans().len(),
            "system generated"
        );
        system
    }

    /// Re-seed from `hex_id` and generate. A known mainworld forces the
    /// habitable zone to be kept free; explicit zone bounds are forwarded.
    pub fn generate_for_hex(
        &mut self,
        hex_id: &str,
        stellar_type: &str,
        existing: Option<&ExistingHexData>,
    ) -> StarSystem {
        self.reseed(hex_id);
        debug!(hex_id, "reseeded from hex");
        let options = hex_options(hex_id, existing);
        self.generate(stellar_type, &options)
    }
}

impl Default for SystemGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemGenerator")
            .field("dice", &self.dice)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Options `generate_for_hex` derives from what storage knows about a hex.
pub fn hex_options(hex_id: &str, existing: Option<&ExistingHexData>) -> GenerationOptions {
    let existing = existing.cloned().unwrap_or_default();
    GenerationOptions {
        habitable_zone_inner_au: existing.habitable_zone_inner_au,
        habitable_zone_outer_au: existing.habitable_zone_outer_au,
        skip_habitable_zone: existing.main_world.is_some(),
        system_name: Some(hex_id.to_string()),
    }
}
