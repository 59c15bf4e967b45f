// Stellar multiplicity: binary and trinary companions.
//
// One percentile roll decides whether the primary has a first companion;
// only a binary rolls again for a trinary. A companion's class is found by
// walking the main-sequence list O B A F G K M forward from the primary by
// 0-2 steps (companions are the same class or cooler, never hotter), clamped
// at M. A primary outside that list (L, T, Y or unrecognized) always gets an
// "M" companion. The subtype digit is a d9.
//
// Separations are log-uniform over 0.1-1000 AU. The trinary's separation is
// a fresh draw doubled, modeling a wider outer orbit.
//
// Draw order per companion: step offset, subtype digit, separation.
//
// See also: `brown_dwarf.rs` for the unrelated sub-stellar companion roll,
// `pipeline.rs` which feeds `is_binary` into planet-count resolution.

use crate::classification::StellarClass;
use crate::config::GenerationConfig;
use crate::prng::DiceRoller;
use crate::types::{Companion, StellarCompanion};
use tracing::debug;

/// Main-sequence classes companions are drawn from, hottest first.
pub const COMPANION_SEQUENCE: [StellarClass; 7] = [
    StellarClass::O,
    StellarClass::B,
    StellarClass::A,
    StellarClass::F,
    StellarClass::G,
    StellarClass::K,
    StellarClass::M,
];

/// Class used when the primary is not on the main-sequence list.
pub const FALLBACK_COMPANION_CLASS: StellarClass = StellarClass::M;

/// Number of possible cooler steps: 0, 1 or 2.
const COOLER_STEP_CHOICES: u32 = 3;

pub const MIN_SEPARATION_AU: f64 = 0.1;
pub const MAX_SEPARATION_AU: f64 = 1000.0;

/// Outer-orbit multiplier applied to a trinary's separation draw.
const TRINARY_SEPARATION_FACTOR: f64 = 2.0;

/// Companions rolled for one primary, in the order they were generated.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanionRoll {
    pub companions: Vec<StellarCompanion>,
}

impl CompanionRoll {
    /// A system with at least one stellar companion.
    pub fn is_binary(&self) -> bool {
        !self.companions.is_empty()
    }

    pub fn into_companions(self) -> Vec<Companion> {
        self.companions.into_iter().map(Companion::Stellar).collect()
    }
}

/// Roll stellar multiplicity for a primary of class `primary`.
pub fn roll_companions(
    primary: Option<StellarClass>,
    config: &GenerationConfig,
    dice: &mut DiceRoller,
) -> CompanionRoll {
    let mut companions = Vec::new();

    if dice.roll_percentile() <= config.companion_chance {
        companions.push(StellarCompanion {
            stellar_type: companion_subtype(primary, dice),
            separation_au: log_uniform_separation(dice),
        });

        if dice.roll_percentile() <= config.trinary_chance {
            companions.push(StellarCompanion {
                stellar_type: companion_subtype(primary, dice),
                separation_au: log_uniform_separation(dice) * TRINARY_SEPARATION_FACTOR,
            });
        }
    }

    debug!(
        count = companions.len(),
        types = ?companions.iter().map(|c| c.stellar_type.as_str()).collect::<Vec<_>>(),
        "companions rolled"
    );
    CompanionRoll { companions }
}

/// Pick a same-or-cooler class plus a 1-9 subtype digit, e.g. "K4".
///
/// Always consumes two draws (offset, digit), even for a primary off the
/// main-sequence list, so the stream position does not depend on the class.
pub fn companion_subtype(primary: Option<StellarClass>, dice: &mut DiceRoller) -> String {
    let offset = (dice.next_f64() * f64::from(COOLER_STEP_CHOICES)).floor() as usize;
    let class = primary
        .and_then(|p| COMPANION_SEQUENCE.iter().position(|&c| c == p))
        .map(|idx| COMPANION_SEQUENCE[(idx + offset).min(COMPANION_SEQUENCE.len() - 1)])
        .unwrap_or(FALLBACK_COMPANION_CLASS);
    let digit = dice.roll_die(9);
    format!("{class}{digit}")
}

/// `exp(ln(min) + u * (ln(max) - ln(min)))` for one fresh draw `u`.
pub fn log_uniform_separation(dice: &mut DiceRoller) -> f64 {
    let u = dice.next_f64();
    let ln_min = MIN_SEPARATION_AU.ln();
    let ln_max = MAX_SEPARATION_AU.ln();
    (ln_min + u * (ln_max - ln_min)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_index(stellar_type: &str) -> usize {
        let letter = stellar_type.chars().next().unwrap();
        COMPANION_SEQUENCE
            .iter()
            .position(|c| c.letter() == letter)
            .unwrap()
    }

    #[test]
    fn companions_never_hotter_than_primary() {
        let mut dice = DiceRoller::from_seed("hotter");
        for primary in COMPANION_SEQUENCE {
            let primary_idx = class_index(&primary.to_string());
            for _ in 0..200 {
                let subtype = companion_subtype(Some(primary), &mut dice);
                let idx = class_index(&subtype);
                assert!(idx >= primary_idx, "{subtype} hotter than {primary}");
                assert!(idx <= primary_idx + 2, "{subtype} too cool for {primary}");
            }
        }
    }

    #[test]
    fn subtype_digit_is_one_to_nine() {
        let mut dice = DiceRoller::from_seed("digits");
        for _ in 0..1_000 {
            let subtype = companion_subtype(Some(StellarClass::G), &mut dice);
            let digit: u32 = subtype[1..].parse().unwrap();
            assert!((1..=9).contains(&digit), "bad digit in {subtype}");
        }
    }

    #[test]
    fn m_primary_clamps_to_m() {
        let mut dice = DiceRoller::from_seed("clamp");
        for _ in 0..200 {
            assert!(companion_subtype(Some(StellarClass::M), &mut dice).starts_with('M'));
        }
    }

    #[test]
    fn off_sequence_primary_defaults_to_m() {
        let mut dice = DiceRoller::from_seed("fallback");
        for primary in [Some(StellarClass::L), Some(StellarClass::Y), None] {
            for _ in 0..50 {
                assert!(companion_subtype(primary, &mut dice).starts_with('M'));
            }
        }
    }

    #[test]
    fn subtype_consumes_two_draws_for_any_primary() {
        let mut known = DiceRoller::from_seed("draws");
        let mut unknown = DiceRoller::from_seed("draws");
        companion_subtype(Some(StellarClass::G), &mut known);
        companion_subtype(None, &mut unknown);
        assert_eq!(known, unknown);
    }

    #[test]
    fn separation_within_log_range() {
        let mut dice = DiceRoller::from_seed("separation");
        let mut below_ten = 0;
        for _ in 0..5_000 {
            let s = log_uniform_separation(&mut dice);
            assert!((MIN_SEPARATION_AU..=MAX_SEPARATION_AU).contains(&s), "{s}");
            if s < 10.0 {
                below_ten += 1;
            }
        }
        // 0.1..10 AU is half of the log range.
        let pct = below_ten as f64 / 5_000.0;
        assert!((0.45..0.55).contains(&pct), "log-uniform split {pct}");
    }

    #[test]
    fn zero_chance_never_rolls_companions() {
        let config = GenerationConfig {
            companion_chance: 0,
            ..Default::default()
        };
        let mut dice = DiceRoller::from_seed("solo");
        for _ in 0..200 {
            let roll = roll_companions(Some(StellarClass::G), &config, &mut dice);
            assert!(!roll.is_binary());
        }
    }

    #[test]
    fn certain_chances_always_roll_trinary() {
        let config = GenerationConfig {
            companion_chance: 100,
            trinary_chance: 100,
            ..Default::default()
        };
        let mut dice = DiceRoller::from_seed("trinary");
        for _ in 0..100 {
            let roll = roll_companions(Some(StellarClass::K), &config, &mut dice);
            assert_eq!(roll.companions.len(), 2);
            assert!(roll.is_binary());
            let outer = roll.companions[1].separation_au;
            assert!((2.0 * MIN_SEPARATION_AU..=2.0 * MAX_SEPARATION_AU).contains(&outer));
        }
    }

    #[test]
    fn never_more_than_two_companions() {
        let config = GenerationConfig::default();
        for i in 0..500 {
            let mut dice = DiceRoller::from_seed(&format!("multiplicity-{i}"));
            let roll = roll_companions(Some(StellarClass::F), &config, &mut dice);
            assert!(roll.companions.len() <= 2);
        }
    }

    #[test]
    fn into_companions_tags_stellar() {
        let roll = CompanionRoll {
            companions: vec![StellarCompanion {
                stellar_type: "G5".into(),
                separation_au: 3.0,
            }],
        };
        let companions = roll.into_companions();
        assert!(companions.iter().all(Companion::is_stellar));
    }
}
