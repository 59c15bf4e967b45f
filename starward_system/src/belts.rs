// Debris fields and Kuiper belts.
//
// Two independent rolls against the finished planet list. A debris field
// sits inside the innermost gas giant's orbit (at 0.6 of it), or at
// 2.5-4.0 AU when the system has no gas giant. A Kuiper belt sits 1.5-3.0
// times beyond the outermost planet and is 30% as wide as its own radius.
// A system can have both, either or neither, never two of one kind.
//
// An empty planet list should not happen, but is handled: the outermost
// orbit is then taken to be 5 AU.
//
// Draw order: debris percentile, then (if it hit) the fallback orbit draw
// when there is no gas giant and the width draw; Kuiper percentile, then
// (if it hit) the distance-factor draw.

use crate::config::GenerationConfig;
use crate::prng::DiceRoller;
use crate::types::{Belt, BeltDensity, BeltKind, Planet};
use tracing::debug;

const DEBRIS_GAS_GIANT_FRACTION: f64 = 0.6;
const DEBRIS_FALLBACK_MIN_AU: f64 = 2.5;
const DEBRIS_FALLBACK_SPREAD_AU: f64 = 1.5;
const DEBRIS_WIDTH_MIN_AU: f64 = 0.5;
const DEBRIS_WIDTH_SPREAD_AU: f64 = 0.5;

const KUIPER_FACTOR_MIN: f64 = 1.5;
const KUIPER_FACTOR_SPREAD: f64 = 1.5;
const KUIPER_WIDTH_FRACTION: f64 = 0.3;

/// Outermost orbit assumed for a system with no planets.
pub const EMPTY_SYSTEM_OUTER_ORBIT_AU: f64 = 5.0;

pub const DEBRIS_FIELD_NAME: &str = "Inner Debris Field";
pub const KUIPER_BELT_NAME: &str = "Kuiper Belt";

/// Roll belts for a system whose planets are already placed.
pub fn generate_belts(
    planets: &[Planet],
    config: &GenerationConfig,
    dice: &mut DiceRoller,
) -> Vec<Belt> {
    let mut gas_giant_orbits: Vec<f64> = planets
        .iter()
        .filter(|p| p.is_gas_giant())
        .map(|p| p.orbit_au)
        .collect();
    gas_giant_orbits.sort_by(f64::total_cmp);
    let outermost_orbit = planets
        .iter()
        .map(|p| p.orbit_au)
        .max_by(f64::total_cmp)
        .unwrap_or(EMPTY_SYSTEM_OUTER_ORBIT_AU);

    let mut belts = Vec::new();

    if dice.roll_percentile() <= config.debris_field_chance {
        let orbit_au = match gas_giant_orbits.first() {
            Some(&innermost) => innermost * DEBRIS_GAS_GIANT_FRACTION,
            None => DEBRIS_FALLBACK_MIN_AU + dice.next_f64() * DEBRIS_FALLBACK_SPREAD_AU,
        };
        belts.push(Belt {
            kind: BeltKind::DebrisField,
            name: DEBRIS_FIELD_NAME.to_string(),
            orbit_au,
            width_au: DEBRIS_WIDTH_MIN_AU + dice.next_f64() * DEBRIS_WIDTH_SPREAD_AU,
            density: BeltDensity::Moderate,
        });
    }

    if dice.roll_percentile() <= config.kuiper_belt_chance {
        let orbit_au =
            outermost_orbit * (KUIPER_FACTOR_MIN + dice.next_f64() * KUIPER_FACTOR_SPREAD);
        belts.push(Belt {
            kind: BeltKind::KuiperBelt,
            name: KUIPER_BELT_NAME.to_string(),
            orbit_au,
            width_au: orbit_au * KUIPER_WIDTH_FRACTION,
            density: BeltDensity::Sparse,
        });
    }

    debug!(
        kinds = ?belts.iter().map(|b| b.kind).collect::<Vec<_>>(),
        "belts rolled"
    );
    belts
}
