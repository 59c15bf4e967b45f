// Stellar classification tables.
//
// `StellarClass` is the ten-letter spectral sequence O B A F G K M L T Y,
// each carrying a temperature band, a display color for renderers, and the
// planet-count modifier applied to the 2d6 planet roll. The second table maps
// a clamped 2d6 sum (2..=12) to a planet count.
//
// Lookups are total. A designation whose leading letter is not in the
// sequence resolves to `None`, and every consumer treats `None` as the
// neutral case (modifier 0, companion subtype "M"). Nothing here can fail.
//
// See also: `companion.rs` for the hotter-to-cooler ordering used when
// picking companion subtypes, `planet_gen.rs` for planet-count resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spectral class letter of a star or sub-stellar object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StellarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    L,
    T,
    Y,
}

/// Static per-class data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassProperties {
    /// Human-readable effective temperature band.
    pub temperature: &'static str,
    /// Display color as a CSS hex string.
    pub color: &'static str,
    /// Added to the 2d6 planet-count roll.
    pub planet_mod: i32,
}

impl StellarClass {
    /// The full sequence, hottest first.
    pub const ALL: [StellarClass; 10] = [
        StellarClass::O,
        StellarClass::B,
        StellarClass::A,
        StellarClass::F,
        StellarClass::G,
        StellarClass::K,
        StellarClass::M,
        StellarClass::L,
        StellarClass::T,
        StellarClass::Y,
    ];

    /// Match an (already upper-cased) letter against the sequence.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'O' => Some(Self::O),
            'B' => Some(Self::B),
            'A' => Some(Self::A),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'K' => Some(Self::K),
            'M' => Some(Self::M),
            'L' => Some(Self::L),
            'T' => Some(Self::T),
            'Y' => Some(Self::Y),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::O => 'O',
            Self::B => 'B',
            Self::A => 'A',
            Self::F => 'F',
            Self::G => 'G',
            Self::K => 'K',
            Self::M => 'M',
            Self::L => 'L',
            Self::T => 'T',
            Self::Y => 'Y',
        }
    }

    pub fn properties(self) -> ClassProperties {
        let (temperature, color, planet_mod) = match self {
            Self::O => (">30,000K", "#9bb0ff", -3),
            Self::B => ("10,000-30,000K", "#aabfff", -2),
            Self::A => ("7,500-10,000K", "#cad7ff", -1),
            Self::F => ("6,000-7,500K", "#f8f7ff", 0),
            Self::G => ("5,200-6,000K", "#fff4ea", 0),
            Self::K => ("3,700-5,200K", "#ffd2a1", 1),
            Self::M => ("2,400-3,700K", "#ffcc6f", 1),
            Self::L => ("1,300-2,400K", "#ff8c42", -1),
            Self::T => ("550-1,300K", "#d9534f", -2),
            Self::Y => ("<550K", "#8b4513", -3),
        };
        ClassProperties {
            temperature,
            color,
            planet_mod,
        }
    }

    pub fn planet_mod(self) -> i32 {
        self.properties().planet_mod
    }
}

impl fmt::Display for StellarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Planet-count modifier for a possibly-unknown class. Unknown is neutral.
pub fn planet_modifier(class: Option<StellarClass>) -> i32 {
    class.map_or(0, StellarClass::planet_mod)
}

/// Planet count used if a sum ever falls outside the table.
pub const DEFAULT_PLANET_COUNT: u32 = 4;

/// Lowest and highest 2d6 sums the planet table covers.
pub const PLANET_ROLL_MIN: i32 = 2;
pub const PLANET_ROLL_MAX: i32 = 12;

/// Planet count for a clamped 2d6 sum.
pub fn planet_count_for_roll(sum: i32) -> u32 {
    match sum {
        2 | 3 => 1,
        4 => 2,
        5 => 3,
        6 | 7 => 4,
        8 => 5,
        9 => 6,
        10 => 7,
        11 => 8,
        12 => 10,
        _ => DEFAULT_PLANET_COUNT,
    }
}

// ---------------------------------------------------------------------------
// Primary star designation
// ---------------------------------------------------------------------------

/// The caller's free-form stellar type string plus what it resolves to.
///
/// `primary_type` is the first character upper-cased (empty for an empty
/// designation); `class` is `None` when that letter is not in the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimaryStar {
    pub designation: String,
    pub primary_type: String,
    pub class: Option<StellarClass>,
}

impl PrimaryStar {
    pub fn parse(designation: &str) -> Self {
        let primary_type: String = designation
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        let mut letters = primary_type.chars();
        let class = match (letters.next(), letters.next()) {
            (Some(letter), None) => StellarClass::from_letter(letter),
            _ => None,
        };
        Self {
            designation: designation.to_string(),
            primary_type,
            class,
        }
    }

    pub fn planet_mod(&self) -> i32 {
        planet_modifier(self.class)
    }
}
