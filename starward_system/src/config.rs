// Data-driven generation configuration.
//
// `GenerationConfig` holds the percentile thresholds every stage rolls
// against and the default habitable-zone bounds. It is loaded from JSON (or
// taken as `Default`), validated once, and never mutated during generation.
// The defaults are the canonical values; reproducing a published system
// requires the same config as well as the same seed.
//
// Geometric constants (orbit start range, spacing factor, belt placement
// factors, physical scale formulas) are not configurable. They live as named
// constants in the stage modules and are part of the output contract.
//
// `GenerationOptions` are the per-call knobs of `generate`, and
// `ExistingHexData` is what the storage layer already knows about a hex
// (most importantly whether a mainworld occupies the habitable zone).
//
// See also: `generator.rs` which owns the config, `planet_gen.rs` for how
// the habitable-zone options are applied.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Percentile thresholds and defaults read by the generator stages. A roll
/// succeeds when `roll_percentile() <= threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chance of a first stellar companion.
    pub companion_chance: u32,
    /// Chance of a second stellar companion, rolled only for binaries.
    pub trinary_chance: u32,
    /// Chance that a planet at position three or later is a gas giant.
    pub gas_giant_chance: u32,
    /// Chance of an inner debris field.
    pub debris_field_chance: u32,
    /// Chance of an outer Kuiper belt.
    pub kuiper_belt_chance: u32,
    /// Chance, per gas giant, of an L4/L5 Trojan pair.
    pub trojan_chance: u32,
    /// Chance of a brown-dwarf companion.
    pub brown_dwarf_chance: u32,
    /// Habitable-zone inner edge used when a call does not supply one.
    pub habitable_zone_inner_au: f64,
    /// Habitable-zone outer edge used when a call does not supply one.
    pub habitable_zone_outer_au: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            companion_chance: 50,
            trinary_chance: 10,
            gas_giant_chance: 40,
            debris_field_chance: 25,
            kuiper_belt_chance: 17,
            trojan_chance: 40,
            brown_dwarf_chance: 1,
            habitable_zone_inner_au: 0.8,
            habitable_zone_outer_au: 1.5,
        }
    }
}

impl GenerationConfig {
    /// Parse and validate a config from a JSON string. Missing fields take
    /// their default values.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let thresholds = [
            ("companion_chance", self.companion_chance),
            ("trinary_chance", self.trinary_chance),
            ("gas_giant_chance", self.gas_giant_chance),
            ("debris_field_chance", self.debris_field_chance),
            ("kuiper_belt_chance", self.kuiper_belt_chance),
            ("trojan_chance", self.trojan_chance),
            ("brown_dwarf_chance", self.brown_dwarf_chance),
        ];
        for (name, value) in thresholds {
            if value > 100 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        self.habitable_zone().validate()
    }

    /// The configured default habitable zone.
    pub fn habitable_zone(&self) -> HabitableZone {
        HabitableZone {
            inner_au: self.habitable_zone_inner_au,
            outer_au: self.habitable_zone_outer_au,
        }
    }
}

/// Per-call options for `SystemGenerator::generate`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Overrides the config's inner habitable-zone edge.
    #[serde(rename = "habitableZoneInnerAU")]
    pub habitable_zone_inner_au: Option<f64>,
    /// Overrides the config's outer habitable-zone edge.
    #[serde(rename = "habitableZoneOuterAU")]
    pub habitable_zone_outer_au: Option<f64>,
    /// Push any planet landing in the habitable zone outward, because a
    /// mainworld already occupies it.
    pub skip_habitable_zone: bool,
    /// Prefix for planet names. Defaults to "Planet".
    pub system_name: Option<String>,
}

/// Habitable-zone bounds after options have been resolved against config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HabitableZone {
    pub inner_au: f64,
    pub outer_au: f64,
}

impl HabitableZone {
    pub fn contains(&self, orbit_au: f64) -> bool {
        orbit_au >= self.inner_au && orbit_au <= self.outer_au
    }

    /// A zone must start above zero and end past its start.
    pub fn validate(&self) -> ConfigResult<()> {
        let (inner, outer) = (self.inner_au, self.outer_au);
        // Written as a negated conjunction so NaN bounds are rejected too.
        if !(inner > 0.0 && inner < outer) {
            return Err(ConfigError::InvalidHabitableZone { inner, outer });
        }
        Ok(())
    }
}

impl GenerationOptions {
    /// Overrides resolved against the config, before any checking.
    pub fn requested_habitable_zone(&self, config: &GenerationConfig) -> HabitableZone {
        HabitableZone {
            inner_au: self
                .habitable_zone_inner_au
                .unwrap_or(config.habitable_zone_inner_au),
            outer_au: self
                .habitable_zone_outer_au
                .unwrap_or(config.habitable_zone_outer_au),
        }
    }

    /// Reject overrides that resolve to an empty or inverted zone. Callers
    /// taking bounds from users or storage should check here first.
    pub fn validate(&self, config: &GenerationConfig) -> ConfigResult<()> {
        self.requested_habitable_zone(config).validate()
    }

    /// The zone placement uses. Overrides that fail `validate` are dropped
    /// in favor of the config's zone, so `skip_habitable_zone` still holds.
    pub fn habitable_zone(&self, config: &GenerationConfig) -> HabitableZone {
        let requested = self.requested_habitable_zone(config);
        match requested.validate() {
            Ok(()) => requested,
            Err(err) => {
                warn!(%err, "ignoring habitable-zone override");
                config.habitable_zone()
            }
        }
    }
}

/// What the storage layer already knows about a hex before generation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExistingHexData {
    /// Opaque mainworld record. Its presence is all the generator reads.
    pub main_world: Option<serde_json::Value>,
    #[serde(rename = "habitableZoneInnerAU")]
    pub habitable_zone_inner_au: Option<f64>,
    #[serde(rename = "habitableZoneOuterAU")]
    pub habitable_zone_outer_au: Option<f64>,
}

impl ExistingHexData {
    /// Check the stored zone bounds, resolved against `config`.
    pub fn validate(&self, config: &GenerationConfig) -> ConfigResult<()> {
        let options = GenerationOptions {
            habitable_zone_inner_au: self.habitable_zone_inner_au,
            habitable_zone_outer_au: self.habitable_zone_outer_au,
            ..Default::default()
        };
        options.validate(config)
    }
}
