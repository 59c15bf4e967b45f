// Planet count resolution and orbital placement.
//
// Count: roll 2d6, add the primary's planet modifier, subtract one for a
// binary, clamp to 2..=12 and look the sum up in the planet table. Cool K/M
// primaries average more planets, hot O/B/A primaries fewer, and a stellar
// companion costs roughly one planet's worth of stable orbits.
//
// Placement walks outward from a first orbit of 0.3-0.5 AU. After each
// planet the orbit cursor is multiplied by 1.4-2.2, which is the only thing
// keeping orbits strictly increasing and plausibly spaced. These constants
// are loosely Titius-Bode-like but empirical; keep them exactly as they are
// or every previously generated system changes.
//
// Per planet, in draw order:
//   1. position >= 3 only: percentile vs `gas_giant_chance`
//   2. d6 for radius
//   3. mass: d6 (gas giant) or a uniform draw (rocky)
//   4. only if the orbit lands in the habitable zone and it is being kept
//      free for a mainworld: a uniform draw relocating the planet just past
//      the zone's outer edge. The relocated orbit becomes the cursor.
//   5. a uniform draw for the spacing factor
//
// See also: `classification.rs` for the modifier and count tables,
// `pipeline.rs` which requires the companion stage before this one.

use crate::classification::{
    PLANET_ROLL_MAX, PLANET_ROLL_MIN, PrimaryStar, planet_count_for_roll,
};
use crate::companion::CompanionRoll;
use crate::config::{GenerationConfig, HabitableZone};
use crate::prng::DiceRoller;
use crate::types::{Planet, PlanetType};
use tracing::{debug, trace};

const INITIAL_ORBIT_MIN_AU: f64 = 0.3;
const INITIAL_ORBIT_SPREAD_AU: f64 = 0.2;

const SPACING_FACTOR_MIN: f64 = 1.4;
const SPACING_FACTOR_SPREAD: f64 = 0.8;

/// Zero-based position of the first slot that may hold a gas giant.
pub const FIRST_GAS_GIANT_POSITION: usize = 2;

const GAS_GIANT_BASE_RADIUS_KM: u32 = 20_000;
const GAS_GIANT_RADIUS_PER_PIP_KM: u32 = 10_000;
const GAS_GIANT_BASE_MASS: f64 = 50.0;
const GAS_GIANT_MASS_PER_PIP: f64 = 50.0;

const ROCKY_BASE_RADIUS_KM: u32 = 2_000;
const ROCKY_RADIUS_PER_PIP_KM: u32 = 2_000;
const ROCKY_BASE_MASS: f64 = 0.1;
const ROCKY_MASS_SPREAD: f64 = 2.0;

/// Gap and spread past the habitable zone's outer edge for a relocated planet.
const HZ_RELOCATION_GAP_AU: f64 = 0.5;
const HZ_RELOCATION_SPREAD_AU: f64 = 0.5;

/// Name prefix used when the caller supplies no system name.
pub const DEFAULT_PLANET_PREFIX: &str = "Planet";

/// A resolved planet count. Only obtainable from a completed companion roll,
/// so placement cannot run ahead of multiplicity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanetCount(u32);

impl PlanetCount {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Roll the planet count for `primary`, given its companions.
pub fn resolve_planet_count(
    primary: &PrimaryStar,
    companions: &CompanionRoll,
    dice: &mut DiceRoller,
) -> PlanetCount {
    let roll = dice.roll_2d6();
    let count = planet_count_from_roll(roll, primary.planet_mod(), companions.is_binary());
    debug!(
        roll,
        planet_mod = primary.planet_mod(),
        binary = companions.is_binary(),
        count,
        "planet count resolved"
    );
    PlanetCount(count)
}

/// Pure part of count resolution: modifiers, clamp, table lookup.
pub fn planet_count_from_roll(roll: u32, planet_mod: i32, is_binary: bool) -> u32 {
    let mut sum = roll as i32 + planet_mod;
    if is_binary {
        sum -= 1;
    }
    planet_count_for_roll(sum.clamp(PLANET_ROLL_MIN, PLANET_ROLL_MAX))
}

/// Placement inputs that do not come from earlier stages.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams<'a> {
    pub habitable_zone: HabitableZone,
    pub skip_habitable_zone: bool,
    pub name_prefix: &'a str,
}

/// Place `count` planets outward from the primary.
pub fn place_planets(
    count: PlanetCount,
    params: &PlacementParams<'_>,
    config: &GenerationConfig,
    dice: &mut DiceRoller,
) -> Vec<Planet> {
    let mut planets = Vec::with_capacity(count.get() as usize);
    let mut orbit_au = INITIAL_ORBIT_MIN_AU + dice.next_f64() * INITIAL_ORBIT_SPREAD_AU;

    for position in 0..count.get() as usize {
        let gas_giant = position >= FIRST_GAS_GIANT_POSITION
            && dice.roll_percentile() <= config.gas_giant_chance;

        let (kind, radius_km, mass) = if gas_giant {
            let radius = GAS_GIANT_BASE_RADIUS_KM + dice.d6() * GAS_GIANT_RADIUS_PER_PIP_KM;
            let mass = GAS_GIANT_BASE_MASS + f64::from(dice.d6()) * GAS_GIANT_MASS_PER_PIP;
            (PlanetType::GasGiant, radius, mass)
        } else {
            let radius = ROCKY_BASE_RADIUS_KM + dice.d6() * ROCKY_RADIUS_PER_PIP_KM;
            let mass = ROCKY_BASE_MASS + dice.next_f64() * ROCKY_MASS_SPREAD;
            (PlanetType::Rocky, radius, mass)
        };

        if params.skip_habitable_zone && params.habitable_zone.contains(orbit_au) {
            let relocated = params.habitable_zone.outer_au
                + HZ_RELOCATION_GAP_AU
                + dice.next_f64() * HZ_RELOCATION_SPREAD_AU;
            trace!(from = orbit_au, to = relocated, "planet moved out of habitable zone");
            orbit_au = relocated;
        }

        let index = position as u32 + 1;
        planets.push(Planet {
            kind,
            orbit_au,
            index,
            name: format!("{} {}", params.name_prefix, roman_numeral(index)),
            radius_km,
            mass,
        });

        orbit_au *= SPACING_FACTOR_MIN + dice.next_f64() * SPACING_FACTOR_SPREAD;
    }

    debug!(
        planets = planets.len(),
        gas_giants = planets.iter().filter(|p| p.is_gas_giant()).count(),
        "planets placed"
    );
    planets
}

/// Upper-case Roman numeral for a positive integer.
pub fn roman_numeral(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::StellarClass;

    const TABLE_VALUES: [u32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 10];

    fn params(skip: bool) -> PlacementParams<'static> {
        PlacementParams {
            habitable_zone: HabitableZone {
                inner_au: 0.8,
                outer_au: 1.5,
            },
            skip_habitable_zone: skip,
            name_prefix: DEFAULT_PLANET_PREFIX,
        }
    }

    #[test]
    fn count_always_in_table_values() {
        let mods: Vec<i32> = StellarClass::ALL
            .iter()
            .map(|c| c.planet_mod())
            .chain([0])
            .collect();
        for roll in 2..=12 {
            for &planet_mod in &mods {
                for binary in [false, true] {
                    let count = planet_count_from_roll(roll, planet_mod, binary);
                    assert!(
                        TABLE_VALUES.contains(&count),
                        "roll {roll} mod {planet_mod} binary {binary} -> {count}"
                    );
                }
            }
        }
    }

    #[test]
    fn binary_costs_one_step() {
        assert_eq!(planet_count_from_roll(8, 0, false), 5);
        assert_eq!(planet_count_from_roll(8, 0, true), 4);
        // Clamped at the bottom of the table.
        assert_eq!(planet_count_from_roll(2, -3, true), 1);
        // Clamped at the top.
        assert_eq!(planet_count_from_roll(12, 1, false), 10);
    }

    #[test]
    fn cool_primaries_average_more_planets() {
        let average = |class: StellarClass| {
            let mut dice = DiceRoller::from_seed(&format!("average-{class}"));
            let star = PrimaryStar::parse(&class.to_string());
            let solo = CompanionRoll { companions: vec![] };
            let total: u32 = (0..2_000)
                .map(|_| resolve_planet_count(&star, &solo, &mut dice).get())
                .sum();
            total as f64 / 2_000.0
        };
        assert!(average(StellarClass::M) > average(StellarClass::G));
        assert!(average(StellarClass::G) > average(StellarClass::O));
    }

    #[test]
    fn orbits_strictly_increase_and_index_matches_position() {
        let config = GenerationConfig::default();
        for i in 0..300 {
            let mut dice = DiceRoller::from_seed(&format!("orbits-{i}"));
            let planets = place_planets(PlanetCount(10), &params(false), &config, &mut dice);
            assert_eq!(planets.len(), 10);
            assert!((0.3..0.5).contains(&planets[0].orbit_au));
            for (pos, planet) in planets.iter().enumerate() {
                assert_eq!(planet.index as usize, pos + 1);
            }
            for pair in planets.windows(2) {
                let ratio = pair[1].orbit_au / pair[0].orbit_au;
                assert!((1.4..2.2).contains(&ratio), "spacing ratio {ratio}");
            }
        }
    }

    #[test]
    fn no_gas_giants_in_first_two_slots() {
        let config = GenerationConfig {
            gas_giant_chance: 100,
            ..Default::default()
        };
        let mut dice = DiceRoller::from_seed("giants");
        let planets = place_planets(PlanetCount(6), &params(false), &config, &mut dice);
        assert_eq!(planets[0].kind, PlanetType::Rocky);
        assert_eq!(planets[1].kind, PlanetType::Rocky);
        assert!(planets[2..].iter().all(Planet::is_gas_giant));
    }

    #[test]
    fn physical_scale_matches_type() {
        let config = GenerationConfig::default();
        for i in 0..200 {
            let mut dice = DiceRoller::from_seed(&format!("scale-{i}"));
            for planet in place_planets(PlanetCount(8), &params(false), &config, &mut dice) {
                if planet.is_gas_giant() {
                    assert!((30_000..=80_000).contains(&planet.radius_km));
                    assert_eq!(planet.radius_km % 10_000, 0);
                    assert!((100.0..=350.0).contains(&planet.mass));
                } else {
                    assert!((4_000..=14_000).contains(&planet.radius_km));
                    assert_eq!(planet.radius_km % 2_000, 0);
                    assert!((0.1..2.1).contains(&planet.mass));
                }
            }
        }
    }

    #[test]
    fn skipping_habitable_zone_keeps_it_empty_and_ordered() {
        let config = GenerationConfig::default();
        let mut relocated_any = false;
        for i in 0..300 {
            let seed = format!("hz-{i}");
            let mut dice = DiceRoller::from_seed(&seed);
            let planets = place_planets(PlanetCount(8), &params(true), &config, &mut dice);
            for planet in &planets {
                assert!(
                    !(0.8..=1.5).contains(&planet.orbit_au),
                    "{seed}: planet at {} in habitable zone",
                    planet.orbit_au
                );
            }
            for pair in planets.windows(2) {
                assert!(pair[0].orbit_au < pair[1].orbit_au, "{seed}: orbits out of order");
            }
            relocated_any |= planets.iter().any(|p| (2.0..2.5).contains(&p.orbit_au));
        }
        assert!(relocated_any, "no planet was ever relocated past the zone");
    }

    #[test]
    fn planets_named_with_roman_numerals() {
        let config = GenerationConfig::default();
        let mut dice = DiceRoller::from_seed("names");
        let named = PlacementParams {
            name_prefix: "0101",
            ..params(false)
        };
        let planets = place_planets(PlanetCount(4), &named, &config, &mut dice);
        let names: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["0101 I", "0101 II", "0101 III", "0101 IV"]);
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(roman_numeral(1), "I");
        assert_eq!(roman_numeral(4), "IV");
        assert_eq!(roman_numeral(9), "IX");
        assert_eq!(roman_numeral(10), "X");
        assert_eq!(roman_numeral(14), "XIV");
        assert_eq!(roman_numeral(1994), "MCMXCIV");
    }
}
