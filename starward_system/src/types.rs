// Output records of system generation.
//
// `StarSystem` is the root record handed to the persistence, rendering and
// request layers. Every record derives `Serialize`/`Deserialize` and maps to
// the JSON shape those layers already consume: camelCase keys, AU-suffixed
// distance keys (`orbitAU`, `separationAU`, `widthAU`), a `type` tag on each
// object, and `trojans` omitted entirely when the Trojan stage never ran.
//
// Records are created once by the generator and never mutated by it. Later
// edits (colonization, damage, ...) belong to the caller's storage layer.

use crate::classification::{PrimaryStar, StellarClass};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Companions
// ---------------------------------------------------------------------------

/// A companion object orbiting the primary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Companion {
    #[serde(rename = "stellar")]
    Stellar(StellarCompanion),
    #[serde(rename = "brown_dwarf")]
    BrownDwarf(BrownDwarfCompanion),
}

impl Companion {
    pub fn stellar_type(&self) -> &str {
        match self {
            Companion::Stellar(c) => &c.stellar_type,
            Companion::BrownDwarf(c) => &c.stellar_type,
        }
    }

    pub fn separation_au(&self) -> f64 {
        match self {
            Companion::Stellar(c) => c.separation_au,
            Companion::BrownDwarf(c) => c.separation_au,
        }
    }

    pub fn is_stellar(&self) -> bool {
        matches!(self, Companion::Stellar(_))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StellarCompanion {
    /// Class letter plus subtype digit, e.g. "K4".
    pub stellar_type: String,
    #[serde(rename = "separationAU")]
    pub separation_au: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrownDwarfCompanion {
    /// "L", "T" or "Y" plus subtype digit.
    pub stellar_type: String,
    pub mass_jupiter: f64,
    #[serde(rename = "separationAU")]
    pub separation_au: f64,
    /// Effective temperature in kelvin.
    pub temperature: u32,
}

// ---------------------------------------------------------------------------
// Planets
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[serde(rename = "Planet")]
    Rocky,
    #[serde(rename = "Gas Giant")]
    GasGiant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    #[serde(rename = "type")]
    pub kind: PlanetType,
    #[serde(rename = "orbitAU")]
    pub orbit_au: f64,
    /// 1-based position counted outward from the primary.
    pub index: u32,
    pub name: String,
    pub radius_km: u32,
    /// Jupiter-relative for gas giants, Earth-relative for rocky planets.
    pub mass: f64,
}

impl Planet {
    pub fn is_gas_giant(&self) -> bool {
        self.kind == PlanetType::GasGiant
    }
}

// ---------------------------------------------------------------------------
// Belts
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltKind {
    #[serde(rename = "Debris Field")]
    DebrisField,
    #[serde(rename = "Kuiper Belt")]
    KuiperBelt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeltDensity {
    Moderate,
    Sparse,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Belt {
    #[serde(rename = "type")]
    pub kind: BeltKind,
    pub name: String,
    #[serde(rename = "orbitAU")]
    pub orbit_au: f64,
    #[serde(rename = "widthAU")]
    pub width_au: f64,
    pub density: BeltDensity,
}

// ---------------------------------------------------------------------------
// Trojans
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrojanKind {
    #[serde(rename = "Trojan Cluster")]
    TrojanCluster,
}

/// Co-orbital point 60 degrees ahead of (L4) or behind (L5) the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LagrangePoint {
    L4,
    L5,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trojan {
    #[serde(rename = "type")]
    pub kind: TrojanKind,
    /// Name of the parent gas giant.
    pub parent_planet: String,
    #[serde(rename = "orbitAU")]
    pub orbit_au: f64,
    pub lagrange_point: LagrangePoint,
    pub population: u32,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Diffuse outer-system features. Every generated system carries all three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemFeatures {
    pub oort_cloud: bool,
    pub cometary_population: bool,
    pub zodiacal_dust: bool,
}

impl Default for SystemFeatures {
    fn default() -> Self {
        Self {
            oort_cloud: true,
            cometary_population: true,
            zodiacal_dust: true,
        }
    }
}

/// A complete generated star system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    /// The designation the caller asked for, verbatim.
    pub stellar_type: String,
    /// First character of `stellar_type`, upper-cased.
    pub primary_type: String,
    pub companions: Vec<Companion>,
    /// Ordered by strictly increasing orbit.
    pub planets: Vec<Planet>,
    pub belts: Vec<Belt>,
    /// `None` when the system has no gas giants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trojans: Option<Vec<Trojan>>,
    pub features: SystemFeatures,
    /// Generation time, Unix epoch milliseconds.
    pub generated: u64,
}

impl StarSystem {
    /// Classification of the primary, `None` for an unrecognized letter.
    pub fn primary_class(&self) -> Option<StellarClass> {
        PrimaryStar::parse(&self.primary_type).class
    }

    pub fn gas_giants(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(|p| p.is_gas_giant())
    }

    pub fn stellar_companions(&self) -> impl Iterator<Item = &StellarCompanion> {
        self.companions.iter().filter_map(|c| match c {
            Companion::Stellar(s) => Some(s),
            Companion::BrownDwarf(_) => None,
        })
    }

    pub fn brown_dwarf(&self) -> Option<&BrownDwarfCompanion> {
        self.companions.iter().find_map(|c| match c {
            Companion::BrownDwarf(b) => Some(b),
            Companion::Stellar(_) => None,
        })
    }

    pub fn trojans(&self) -> &[Trojan] {
        self.trojans.as_deref().unwrap_or(&[])
    }

    pub fn belts_of(&self, kind: BeltKind) -> impl Iterator<Item = &Belt> {
        self.belts.iter().filter(move |b| b.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
