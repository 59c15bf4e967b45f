// Typed stage pipeline for system generation.
//
// The stages have data dependencies: planet count needs the companion roll,
// belts and Trojans need the placed planets. `Pipeline<S>` makes the order
// a compile-time fact: each stage method consumes the pipeline in state `S`
// and returns it in the next state, so a stage cannot be skipped, repeated
// or run early. The draw order on the shared `DiceRoller` therefore cannot
// drift, which is what keeps seeded output stable.
//
//   Start -> Companions -> Planets -> Trojans -> Belts -> Finished -> StarSystem
//
// The Trojan stage only touches the dice when there is at least one gas giant;
// otherwise `trojans` stays `None` and is omitted from the output record.

use crate::belts::generate_belts;
use crate::brown_dwarf::roll_brown_dwarf;
use crate::classification::PrimaryStar;
use crate::companion::{CompanionRoll, roll_companions};
use crate::config::{GenerationConfig, GenerationOptions};
use crate::planet_gen::{DEFAULT_PLANET_PREFIX, PlacementParams, place_planets, resolve_planet_count};
use crate::prng::DiceRoller;
use crate::trojans::{GasGiants, generate_trojans};
use crate::types::{Belt, BrownDwarfCompanion, Companion, Planet, StarSystem, SystemFeatures, Trojan};

/// Inputs shared by every stage.
struct Context<'a> {
    config: &'a GenerationConfig,
    options: &'a GenerationOptions,
    primary: PrimaryStar,
}

/// A generation run in stage `S`.
pub struct Pipeline<'a, S> {
    ctx: Context<'a>,
    stage: S,
}

/// Nothing rolled yet.
pub struct Start;

/// Stellar multiplicity decided.
pub struct Companions {
    companions: CompanionRoll,
}

/// Planets placed.
pub struct Planets {
    companions: CompanionRoll,
    planets: Vec<Planet>,
}

/// Trojan pairs rolled (or skipped for a system without gas giants).
pub struct Trojans {
    companions: CompanionRoll,
    planets: Vec<Planet>,
    trojans: Option<Vec<Trojan>>,
}

/// Belts rolled.
pub struct Belts {
    companions: CompanionRoll,
    planets: Vec<Planet>,
    trojans: Option<Vec<Trojan>>,
    belts: Vec<Belt>,
}

/// Every stage done, ready to assemble.
pub struct Finished {
    companions: CompanionRoll,
    planets: Vec<Planet>,
    trojans: Option<Vec<Trojan>>,
    belts: Vec<Belt>,
    brown_dwarf: Option<BrownDwarfCompanion>,
}

impl<'a> Pipeline<'a, Start> {
    pub fn new(
        stellar_type: &str,
        config: &'a GenerationConfig,
        options: &'a GenerationOptions,
    ) -> Self {
        Self {
            ctx: Context {
                config,
                options,
                primary: PrimaryStar::parse(stellar_type),
            },
            stage: Start,
        }
    }

    pub fn primary(&self) -> &PrimaryStar {
        &self.ctx.primary
    }

    pub fn roll_companions(self, dice: &mut DiceRoller) -> Pipeline<'a, Companions> {
        let companions = roll_companions(self.ctx.primary.class, self.ctx.config, dice);
        Pipeline {
            ctx: self.ctx,
            stage: Companions { companions },
        }
    }
}

impl<'a> Pipeline<'a, Companions> {
    pub fn is_binary(&self) -> bool {
        self.stage.companions.is_binary()
    }

    pub fn place_planets(self, dice: &mut DiceRoller) -> Pipeline<'a, Planets> {
        let Context {
            config,
            options,
            ref primary,
        } = self.ctx;
        let count = resolve_planet_count(primary, &self.stage.companions, dice);
        let params = PlacementParams {
            habitable_zone: options.habitable_zone(config),
            skip_habitable_zone: options.skip_habitable_zone,
            name_prefix: options
                .system_name
                .as_deref()
                .unwrap_or(DEFAULT_PLANET_PREFIX),
        };
        let planets = place_planets(count, &params, config, dice);
        Pipeline {
            ctx: self.ctx,
            stage: Planets {
                companions: self.stage.companions,
                planets,
            },
        }
    }
}

impl<'a> Pipeline<'a, Planets> {
    pub fn planets(&self) -> &[Planet] {
        &self.stage.planets
    }

    pub fn roll_trojans(self, dice: &mut DiceRoller) -> Pipeline<'a, Trojans> {
        let gas_giants = GasGiants::from_planets(&self.stage.planets);
        let trojans = if gas_giants.is_empty() {
            None
        } else {
            Some(generate_trojans(&gas_giants, self.ctx.config, dice))
        };
        let Planets {
            companions,
            planets,
        } = self.stage;
        Pipeline {
            ctx: self.ctx,
            stage: Trojans {
                companions,
                planets,
                trojans,
            },
        }
    }
}

impl<'a> Pipeline<'a, Trojans> {
    pub fn roll_belts(self, dice: &mut DiceRoller) -> Pipeline<'a, Belts> {
        let belts = generate_belts(&self.stage.planets, self.ctx.config, dice);
        let Trojans {
            companions,
            planets,
            trojans,
        } = self.stage;
        Pipeline {
            ctx: self.ctx,
            stage: Belts {
                companions,
                planets,
                trojans,
                belts,
            },
        }
    }
}

impl<'a> Pipeline<'a, Belts> {
    pub fn roll_brown_dwarf(self, dice: &mut DiceRoller) -> Pipeline<'a, Finished> {
        let brown_dwarf = roll_brown_dwarf(self.ctx.config, dice);
        let Belts {
            companions,
            planets,
            trojans,
            belts,
        } = self.stage;
        Pipeline {
            ctx: self.ctx,
            stage: Finished {
                companions,
                planets,
                trojans,
                belts,
                brown_dwarf,
            },
        }
    }
}

impl Pipeline<'_, Finished> {
    /// Compose the output record, stamped with `generated` (epoch millis).
    pub fn assemble(self, generated: u64) -> StarSystem {
        let Finished {
            companions,
            planets,
            trojans,
            belts,
            brown_dwarf,
        } = self.stage;
        let mut companions = companions.into_companions();
        companions.extend(brown_dwarf.map(Companion::BrownDwarf));
        StarSystem {
            stellar_type: self.ctx.primary.designation,
            primary_type: self.ctx.primary.primary_type,
            companions,
            planets,
            belts,
            trojans,
            features: SystemFeatures::default(),
            generated,
        }
    }
}

/// Run every stage in order.
pub fn run(
    stellar_type: &str,
    config: &GenerationConfig,
    options: &GenerationOptions,
    dice: &mut DiceRoller,
    generated: u64,
) -> StarSystem {
    Pipeline::new(stellar_type, config, options)
        .roll_companions(dice)
        .place_planets(dice)
        .roll_trojans(dice)
        .roll_belts(dice)
        .roll_brown_dwarf(dice)
        .assemble(generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_can_be_inspected_between_steps() {
        let config = GenerationConfig::default();
        let options = GenerationOptions::default();
        let mut dice = DiceRoller::from_seed("stages");

        let start = Pipeline::new("k7", &config, &options);
        assert_eq!(start.primary().primary_type, "K");
        let with_companions = start.roll_companions(&mut dice);
        let binary = with_companions.is_binary();
        let with_planets = with_companions.place_planets(&mut dice);
        assert!(!with_planets.planets().is_empty());
        let system = with_planets
            .roll_trojans(&mut dice)
            .roll_belts(&mut dice)
            .roll_brown_dwarf(&mut dice)
            .assemble(0);
        assert_eq!(system.stellar_companions().next().is_some(), binary);
        assert_eq!(system.stellar_type, "k7");
    }

    #[test]
    fn run_matches_manual_staging() {
        let config = GenerationConfig::default();
        let options = GenerationOptions::default();
        let mut a = DiceRoller::from_seed("same");
        let mut b = DiceRoller::from_seed("same");
        let via_run = run("G2", &config, &options, &mut a, 7);
        let manual = Pipeline::new("G2", &config, &options)
            .roll_companions(&mut b)
            .place_planets(&mut b)
            .roll_trojans(&mut b)
            .roll_belts(&mut b)
            .roll_brown_dwarf(&mut b)
            .assemble(7);
        assert_eq!(via_run, manual);
        assert_eq!(a, b);
    }

    #[test]
    fn rocky_only_system_has_no_trojan_record() {
        let config = GenerationConfig {
            gas_giant_chance: 0,
            ..Default::default()
        };
        let options = GenerationOptions::default();
        for i in 0..100 {
            let mut dice = DiceRoller::from_seed(&format!("rocky-{i}"));
            let system = run("M3", &config, &options, &mut dice, 0);
            assert_eq!(system.gas_giants().count(), 0);
            assert!(system.trojans.is_none());
        }
    }

    #[test]
    fn brown_dwarf_appended_after_stellar_companions() {
        let config = GenerationConfig {
            companion_chance: 100,
            brown_dwarf_chance: 100,
            ..Default::default()
        };
        let options = GenerationOptions::default();
        let mut dice = DiceRoller::from_seed("dwarf-order");
        let system = run("F5", &config, &options, &mut dice, 0);
        let last = system.companions.last().unwrap();
        assert!(matches!(last, Companion::BrownDwarf(_)));
        assert!(system.companions[0].is_stellar());
    }
}
