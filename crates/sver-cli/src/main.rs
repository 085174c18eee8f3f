mod commands;
mod config;

use config::SverConfig;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::cmp::Ordering;
use std::process::ExitCode;

use commands::{Outcome, VersionReader};
use sver_semver::{ErrorKind, SemverError};

/// Exit code for errors that are not about a version or range
const EXIT_OTHER_ERROR: u8 = 3;
/// Version and range errors exit with this plus the error kind's index
const EXIT_SEMVER_ERROR_BASE: u8 = 10;

#[derive(Parser, Debug)]
#[command(name = "sver")]
#[command(about = "Semantic version parsing, comparison, bumping and range matching")]
#[command(disable_version_flag = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Log what is going on (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ignore sver.toml
    #[arg(long, global = true)]
    no_config: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the sver version
    Version,

    /// Exit 0 if VERSION is a valid semantic version
    Validate { version: String },

    /// Print -1, 0 or 1 as A is lower than, equal to or greater than B
    Compare { a: String, b: String },

    /// Exit 0 if A and B have the same precedence
    Equals { a: String, b: String },

    /// Exit 0 if A is greater than B
    GreaterThan { a: String, b: String },

    /// Exit 0 if A is less than B
    LessThan { a: String, b: String },

    /// Print one field: major, minor, patch, prerelease or build
    Get { field: String, version: String },

    /// Print the version with FIELD (major, minor, patch or prerelease) incremented
    Bump {
        field: String,
        version: String,

        /// Prerelease label for the result, e.g. "rc"
        #[arg(long, value_name = "LABEL")]
        pre_id: Option<String>,
    },

    /// Print the version as a JSON object
    Json { version: String },

    /// Exit 0 if VERSION is inside RANGE
    #[command(alias = "constraint")]
    Satisfies { version: String, range: String },

    /// Print the versions inside RANGE (reads stdin when no versions are given)
    Filter { range: String, versions: Vec<String> },

    /// Print versions in ascending order (reads stdin when no versions are given)
    Sort {
        /// Sort in descending order
        #[arg(short, long)]
        reverse: bool,

        versions: Vec<String>,
    },

    /// Print the highest version (reads stdin when no versions are given)
    Max {
        /// Only consider versions inside this range
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        versions: Vec<String>,
    },

    /// Print the lowest version (reads stdin when no versions are given)
    Min {
        /// Only consider versions inside this range
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        versions: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn read_versions(versions: Vec<String>) -> Result<Vec<String>> {
    commands::collect_inputs(versions, std::io::stdin().lock())
}

fn execute(command: Commands, reader: &mut VersionReader) -> Result<Outcome> {
    match command {
        Commands::Version => Ok(commands::version()),
        Commands::Validate { version } => commands::validate(reader, &version),
        Commands::Compare { a, b } => commands::compare(reader, &a, &b),
        Commands::Equals { a, b } => commands::check_order(reader, &a, &b, Ordering::Equal),
        Commands::GreaterThan { a, b } => commands::check_order(reader, &a, &b, Ordering::Greater),
        Commands::LessThan { a, b } => commands::check_order(reader, &a, &b, Ordering::Less),
        Commands::Get { field, version } => commands::get(reader, &field, &version),
        Commands::Bump {
            field,
            version,
            pre_id,
        } => commands::bump(reader, &field, &version, pre_id.as_deref()),
        Commands::Json { version } => commands::json(reader, &version),
        Commands::Satisfies { version, range } => commands::satisfies(reader, &version, &range),
        Commands::Filter { range, versions } => {
            commands::filter(reader, &range, &read_versions(versions)?)
        }
        Commands::Sort { reverse, versions } => {
            commands::sort(reader, &read_versions(versions)?, reverse)
        }
        Commands::Max { range, versions } => {
            commands::extreme(reader, &read_versions(versions)?, range.as_deref(), true)
        }
        Commands::Min { range, versions } => {
            commands::extreme(reader, &read_versions(versions)?, range.as_deref(), false)
        }
    }
}

fn run(args: Args) -> Result<i32> {
    let config = if args.no_config {
        SverConfig::default()
    } else {
        SverConfig::load_from_cwd()?.unwrap_or_default()
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let mut reader = VersionReader::new(config.input.strip_v_prefix);
    let outcome = execute(args.command, &mut reader)?;
    for line in &outcome.lines {
        println!("{}", line);
    }
    Ok(outcome.code)
}

fn exit_code(error: &anyhow::Error) -> u8 {
    let Some(error) = error.downcast_ref::<SemverError>() else {
        return EXIT_OTHER_ERROR;
    };
    let index = match error.kind() {
        ErrorKind::MalformedCore => 0,
        ErrorKind::MalformedIdentifier => 1,
        ErrorKind::NumericOverflow => 2,
        ErrorKind::TrailingInput => 3,
        ErrorKind::MalformedRangeClause => 4,
        ErrorKind::UnknownOperator => 5,
        ErrorKind::InvalidField => 6,
    };
    EXIT_SEMVER_ERROR_BASE + index
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
