// Trojan clusters at the L4/L5 points of gas giants.
//
// Each gas giant independently rolls against `trojan_chance`. A hit yields
// exactly two clusters sharing the giant's name and orbit, one at L4 and one
// at L5, each with its own population of d6 x 1000. A miss yields nothing;
// there is no single-point outcome.
//
// Input is a `GasGiants` view, which can only be built by filtering a planet
// list, so rocky planets never reach the roll.

use crate::config::GenerationConfig;
use crate::prng::DiceRoller;
use crate::types::{LagrangePoint, Planet, Trojan, TrojanKind};
use tracing::debug;

const POPULATION_PER_PIP: u32 = 1_000;

/// The gas giants of a planet list, in orbital order.
#[derive(Clone, Debug, PartialEq)]
pub struct GasGiants<'a>(Vec<&'a Planet>);

impl<'a> GasGiants<'a> {
    pub fn from_planets(planets: &'a [Planet]) -> Self {
        Self(planets.iter().filter(|p| p.is_gas_giant()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Planet> + '_ {
        self.0.iter().copied()
    }
}

/// Roll Trojan pairs for every gas giant.
pub fn generate_trojans(
    gas_giants: &GasGiants<'_>,
    config: &GenerationConfig,
    dice: &mut DiceRoller,
) -> Vec<Trojan> {
    let mut trojans = Vec::new();
    for giant in gas_giants.iter() {
        if dice.roll_percentile() > config.trojan_chance {
            continue;
        }
        for lagrange_point in [LagrangePoint::L4, LagrangePoint::L5] {
            trojans.push(Trojan {
                kind: TrojanKind::TrojanCluster,
                parent_planet: giant.name.clone(),
                orbit_au: giant.orbit_au,
                lagrange_point,
                population: dice.d6() * POPULATION_PER_PIP,
            });
        }
    }
    debug!(
        gas_giants = gas_giants.len(),
        pairs = trojans.len() / 2,
        "trojans rolled"
    );
    trojans
}
