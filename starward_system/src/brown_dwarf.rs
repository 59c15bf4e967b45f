// Rare brown-dwarf companions.
//
// Independent of stellar multiplicity: one percentile roll against
// `brown_dwarf_chance` (1% by default) after everything else is assembled.
// Mass is 13 + d6 x 10 + u x 10 Jupiter masses. The spectral class follows
// from mass (over 60 is L, over 30 is T, otherwise Y) with a d9 subtype
// digit, and each class has a fixed effective temperature.
//
// Draw order: percentile, then on a hit: d6, mass jitter, d9, separation.

use crate::classification::StellarClass;
use crate::config::GenerationConfig;
use crate::prng::DiceRoller;
use crate::types::BrownDwarfCompanion;
use tracing::debug;

const BASE_MASS_JUPITER: f64 = 13.0;
const MASS_PER_PIP_JUPITER: f64 = 10.0;
const MASS_JITTER_JUPITER: f64 = 10.0;

const L_CLASS_MIN_MASS: f64 = 60.0;
const T_CLASS_MIN_MASS: f64 = 30.0;

const MIN_SEPARATION_AU: f64 = 10.0;
const SEPARATION_SPREAD_AU: f64 = 500.0;

/// Spectral class of a brown dwarf of the given mass.
pub fn class_for_mass(mass_jupiter: f64) -> StellarClass {
    if mass_jupiter > L_CLASS_MIN_MASS {
        StellarClass::L
    } else if mass_jupiter > T_CLASS_MIN_MASS {
        StellarClass::T
    } else {
        StellarClass::Y
    }
}

/// Effective temperature in kelvin for a brown-dwarf class.
pub fn temperature_for_class(class: StellarClass) -> u32 {
    match class {
        StellarClass::L => 1500,
        StellarClass::T => 800,
        _ => 350,
    }
}

/// Roll for a brown-dwarf companion.
pub fn roll_brown_dwarf(
    config: &GenerationConfig,
    dice: &mut DiceRoller,
) -> Option<BrownDwarfCompanion> {
    if dice.roll_percentile() > config.brown_dwarf_chance {
        return None;
    }

    let mass_jupiter = BASE_MASS_JUPITER
        + f64::from(dice.d6()) * MASS_PER_PIP_JUPITER
        + dice.next_f64() * MASS_JITTER_JUPITER;
    let class = class_for_mass(mass_jupiter);
    let digit = dice.roll_die(9);
    let separation_au = MIN_SEPARATION_AU + dice.next_f64() * SEPARATION_SPREAD_AU;

    let companion = BrownDwarfCompanion {
        stellar_type: format!("{class}{digit}"),
        mass_jupiter,
        separation_au,
        temperature: temperature_for_class(class),
    };
    debug!(stellar_type = %companion.stellar_type, mass_jupiter, "brown dwarf companion");
    Some(companion)
}
