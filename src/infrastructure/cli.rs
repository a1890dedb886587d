// Infrastructure: command line parsing, logging setup and the run entry point

use crate::application::CoverService;
use crate::domain::{
    models::SolverConfig,
    value_objects::{SolverBackend, Strategy},
};
use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use log::LevelFilter;
use std::path::PathBuf;

/// Printed when no input file is given
pub const USAGE: &str = "This program requires an input file. \
    Please select one from the data directory. (i.e. setcover ./data/sc_5_3)";

pub fn cli() -> Command {
    Command::new("setcover")
        .about("Selects a minimum-cost collection of sets covering every item")
        .arg(
            arg!([INPUT] "Path to the instance file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--strategy <STRATEGY> "Solving strategy: greedy, exact or trivial")
                .value_parser(clap::value_parser!(String))
                .default_value("greedy"),
        )
        .arg(arg!(--exact "Solve to optimality (same as --strategy exact)"))
        .arg(
            arg!(--backend <BACKEND> "ILP backend for the exact strategy: auto, cbc, highs or bnb")
                .value_parser(clap::value_parser!(String))
                .default_value("auto"),
        )
        .arg(
            arg!(--"time-limit" <SECONDS> "Time limit passed to the ILP backend")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--gap <RATIO> "Relative optimality gap passed to the ILP backend")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(arg!(
            -v --verbose ... "Increase log verbosity (-v info, -vv debug, -vvv backend output)"
        ))
}

/// Everything one invocation needs
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub input: Option<PathBuf>,
    pub solver: SolverConfig,
    pub log_level: LevelFilter,
}

impl CliConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let strategy = if matches.get_flag("exact") {
            Strategy::Exact
        } else {
            matches
                .get_one::<String>("strategy")
                .map(|s| s.parse::<Strategy>())
                .transpose()
                .map_err(|e| anyhow!(e))?
                .unwrap_or_default()
        };
        let backend = matches
            .get_one::<String>("backend")
            .map(|s| s.parse::<SolverBackend>())
            .transpose()
            .map_err(|e| anyhow!(e))?
            .unwrap_or_default();

        let verbosity = matches.get_count("verbose");
        let log_level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };

        let solver = SolverConfig::default()
            .with_strategy(strategy)
            .with_backend(backend)
            .with_time_limit(matches.get_one::<f64>("time-limit").copied())
            .with_gap_tolerance(matches.get_one::<f64>("gap").copied())
            .with_verbose(verbosity >= 3);

        Ok(Self {
            input: matches.get_one::<PathBuf>("INPUT").cloned(),
            solver,
            log_level,
        })
    }
}

/// Install the stderr logger at the requested level
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Solve the configured instance and print the result to stdout
pub fn run(config: CliConfig) -> Result<()> {
    let Some(path) = config.input else {
        println!("{}", USAGE);
        return Ok(());
    };

    let service = CoverService::new(config.solver);
    let output = service
        .solve_file(&path)
        .with_context(|| format!("failed to solve {}", path.display()))?;
    println!("{}", output);

    Ok(())
}
