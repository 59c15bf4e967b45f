// starward_system: seeded procedural star-system generation.
//
// Turns a stellar classification (and optionally a stable seed such as a
// sector hex id) into a complete, internally consistent star system:
// stellar companions, planets, debris and Kuiper belts, Trojan clusters and
// the occasional brown dwarf. The crate performs no I/O during generation
// and has no dependency on storage, networking or rendering; those layers
// consume the serializable `StarSystem` record.
//
// Module overview:
// - `classification.rs`: StellarClass (O..Y) tables, planet-count table, PrimaryStar parsing.
// - `companion.rs`:      Binary/trinary stellar companions.
// - `planet_gen.rs`:     Planet-count resolution and outward orbital placement.
// - `belts.rs`:          Debris field and Kuiper belt placement.
// - `trojans.rs`:        L4/L5 Trojan pairs for gas giants.
// - `brown_dwarf.rs`:    Rare sub-stellar companion.
// - `pipeline.rs`:       Typed stage pipeline fixing the stage (and draw) order.
// - `generator.rs`:      SystemGenerator with `generate` / `generate_for_hex`, Clock.
// - `config.rs`:         GenerationConfig, GenerationOptions, ExistingHexData.
// - `types.rs`:          Output records (StarSystem, Planet, Belt, ...).
// - `error.rs`:          ConfigError for config loading.
// - `prng`:              Re-exported from `starward_prng`: string-seeded mulberry32 and dice.
//
// **Critical constraint: determinism.** Same seed, same stellar type, same
// config: same system, forever and in every implementation. All randomness
// comes from the generator's own `DiceRoller`; no shared or global RNG, and
// no `HashMap` iteration anywhere in the output path.

pub mod belts;
pub mod brown_dwarf;
pub mod classification;
pub mod companion;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod planet_gen;
pub use starward_prng as prng;
pub mod trojans;
pub mod types;

pub use config::{ExistingHexData, GenerationConfig, GenerationOptions};
pub use error::ConfigError;
pub use generator::{Clock, FixedClock, SystemClock, SystemGenerator};
pub use types::StarSystem;
