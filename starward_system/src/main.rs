// Starward system generator: CLI entry point.
//
// Generates one star system and prints it to stdout as JSON. With `--hex`
// the stream is seeded from the hex id (the same call always prints the same
// system); with `--seed` from an arbitrary string; with neither the output
// is not reproducible.
//
// Usage:
//   generate [OPTIONS]
//     --hex <ID>            Seed from a sector hex id, names planets after it
//     --seed <SEED>         Seed string for a plain (non-hex) generation
//     --type <CLASS>        Stellar type of the primary (default: G2)
//     --main-world          A mainworld occupies the habitable zone
//     --hz-inner <AU>       Habitable-zone inner edge
//     --hz-outer <AU>       Habitable-zone outer edge
//     --config <PATH>       JSON GenerationConfig to use instead of defaults
//     --timestamp <MILLIS>  Fixed `generated` timestamp
//     --compact             Single-line JSON
//
// Logs go to stderr, filtered by RUST_LOG (default: warn).

use std::path::PathBuf;

use serde_json::json;
use starward_system::{
    ConfigError, ExistingHexData, FixedClock, GenerationConfig, GenerationOptions, StarSystem,
    SystemGenerator,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_STELLAR_TYPE: &str = "G2";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    hex: Option<String>,
    seed: Option<String>,
    stellar_type: Option<String>,
    main_world: bool,
    hz_inner: Option<f64>,
    hz_outer: Option<f64>,
    config: Option<PathBuf>,
    timestamp: Option<u64>,
    compact: bool,
    help: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };
    if cli.help {
        print_usage();
        return;
    }

    let config = match &cli.config {
        Some(path) => match GenerationConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => GenerationConfig::default(),
    };

    let system = match run(&cli, config) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let output = if cli.compact {
        system.to_json()
    } else {
        system.to_json_pretty()
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize system: {e}");
            std::process::exit(1);
        }
    }
}

/// Generate per the parsed flags. Zone bounds given on the command line are
/// checked against the config before any generation happens.
fn run(cli: &CliArgs, config: GenerationConfig) -> Result<StarSystem, ConfigError> {
    let dice = match &cli.seed {
        Some(seed) => starward_system::prng::DiceRoller::from_seed(seed),
        None => starward_system::prng::DiceRoller::unseeded(),
    };
    let mut generator = SystemGenerator::with_dice(dice, config);
    if let Some(ts) = cli.timestamp {
        generator = generator.with_clock(FixedClock(ts));
    }
    let stellar_type = cli.stellar_type.as_deref().unwrap_or(DEFAULT_STELLAR_TYPE);

    match &cli.hex {
        Some(hex) => {
            let existing = ExistingHexData {
                main_world: cli.main_world.then(|| json!({})),
                habitable_zone_inner_au: cli.hz_inner,
                habitable_zone_outer_au: cli.hz_outer,
            };
            existing.validate(generator.config())?;
            Ok(generator.generate_for_hex(hex, stellar_type, Some(&existing)))
        }
        None => {
            let options = GenerationOptions {
                habitable_zone_inner_au: cli.hz_inner,
                habitable_zone_outer_au: cli.hz_outer,
                skip_habitable_zone: cli.main_world,
                system_name: None,
            };
            options.validate(generator.config())?;
            Ok(generator.generate(stellar_type, &options))
        }
    }
}

/// Parse command-line arguments (program name excluded). Uses simple
/// matching over `std::env::args()`, no clap dependency.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--hex" => cli.hex = Some(value(&mut iter, arg)?.to_string()),
            "--seed" => cli.seed = Some(value(&mut iter, arg)?.to_string()),
            "--type" => cli.stellar_type = Some(value(&mut iter, arg)?.to_string()),
            "--main-world" => cli.main_world = true,
            "--hz-inner" => cli.hz_inner = Some(parsed(&mut iter, arg)?),
            "--hz-outer" => cli.hz_outer = Some(parsed(&mut iter, arg)?),
            "--config" => cli.config = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--timestamp" => cli.timestamp = Some(parsed(&mut iter, arg)?),
            "--compact" => cli.compact = true,
            "--help" | "-h" => cli.help = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(cli)
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parsed<T: std::str::FromStr>(
    iter: &mut std::slice::Iter<'_, String>,
    flag: &str,
) -> Result<T, String> {
    let raw = value(iter, flag)?;
    raw.parse()
        .map_err(|_| format!("{flag} got an invalid value: {raw}"))
}

fn print_usage() {
    println!("Usage: generate [OPTIONS]");
    println!("  --hex <ID>            Seed from a sector hex id");
    println!("  --seed <SEED>         Seed string for a plain generation");
    println!("  --type <CLASS>        Stellar type of the primary (default: {DEFAULT_STELLAR_TYPE})");
    println!("  --main-world          A mainworld occupies the habitable zone");
    println!("  --hz-inner <AU>       Habitable-zone inner edge");
    println!("  --hz-outer <AU>       Habitable-zone outer edge");
    println!("  --config <PATH>       JSON generation config");
    println!("  --timestamp <MILLIS>  Fixed generation timestamp");
    println!("  --compact             Single-line JSON");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_hex_invocation() {
        let cli = parse_args(&args(&[
            "--hex", "0101", "--type", "K4", "--main-world", "--hz-outer", "1.8",
        ]))
        .unwrap();
        assert_eq!(cli.hex.as_deref(), Some("0101"));
        assert_eq!(cli.stellar_type.as_deref(), Some("K4"));
        assert!(cli.main_world);
        assert_eq!(cli.hz_outer, Some(1.8));
        assert_eq!(cli.hz_inner, None);
    }

    #[test]
    fn empty_args_are_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn missing_value_is_error() {
        let err = parse_args(&args(&["--hex"])).unwrap_err();
        assert!(err.contains("--hex requires a value"));
    }

    #[test]
    fn bad_number_is_error() {
        let err = parse_args(&args(&["--hz-inner", "warm"])).unwrap_err();
        assert!(err.contains("invalid value"));
    }

    #[test]
    fn unknown_flag_is_error() {
        assert!(parse_args(&args(&["--orbit"])).is_err());
    }

    #[test]
    fn hex_run_is_reproducible() {
        let cli = parse_args(&args(&["--hex", "0101", "--timestamp", "5"])).unwrap();
        let a = run(&cli, GenerationConfig::default()).unwrap();
        let b = run(&cli, GenerationConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.generated, 5);
    }

    #[test]
    fn inverted_habitable_zone_is_rejected() {
        for flags in [
            &["--hex", "0101", "--main-world", "--hz-inner", "1.5", "--hz-outer", "0.8"][..],
            &["--seed", "x", "--hz-inner", "2.0"][..],
        ] {
            let cli = parse_args(&args(flags)).unwrap();
            let err = run(&cli, GenerationConfig::default()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidHabitableZone { .. }), "{flags:?}");
        }
    }
}
