//! Command line entry point for running one rating cycle
//!
//! Loads participants and results from a JSON file, runs them through the
//! configured rating update, and writes every outcome plus the final ratings
//! as JSON lines.

use anyhow::Result;
use clap::Parser;
use rating_cycle::config::{AppConfig, RatingAlgorithm};
use rating_cycle::input::CycleInput;
use rating_cycle::rating::calculator_from_settings;
use rating_cycle::store::{JsonLinesOutcomeStore, OutcomeStore};
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};

/// Rating Cycle - apply a rating update to an ordered list of results
#[derive(Parser)]
#[command(
    name = "rating-cycle",
    version,
    about = "Compute updated ratings after a sequence of head-to-head results",
    long_about = "Rating Cycle reads participants and an ordered result list from a JSON file, \
                 applies an Elo or Weng-Lin update to every result in order, and writes one JSON \
                 line per outcome followed by the final ratings."
)]
struct Args {
    /// Cycle input file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to cycle input (JSON with participants and results)"
    )]
    input: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Output file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Write outcomes to this file instead of stdout"
    )]
    output: Option<PathBuf>,

    /// Rating algorithm override
    #[arg(long, value_name = "ALGORITHM", help = "Override rating algorithm (elo, weng-lin)")]
    algorithm: Option<RatingAlgorithm>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override Elo K-factor")]
    k_factor: Option<f64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and input, then exit)
    #[arg(long, help = "Validate configuration and input and exit without rating")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(algorithm) = args.algorithm {
        config.rating.algorithm = algorithm;
    }

    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }

    rating_cycle::config::validate_config(&config)?;
    Ok(config)
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let input = CycleInput::from_path(&args.input)?;
    info!(
        "Loaded cycle {} day {}: {} participants, {} results",
        input.cycle_id,
        input.day,
        input.participants.len(),
        input.results.len()
    );

    let calculator = calculator_from_settings(&config.rating)?;
    info!("Rating with {} ({})", calculator.name(), calculator.config());

    if args.dry_run {
        input.rating_map()?;
        info!("Dry run completed - exiting without rating");
        return Ok(());
    }

    let store = JsonLinesOutcomeStore::new(open_output(args.output.as_ref())?);
    // Hooks have no error channel; the first store failure is reported after the run
    let store_error: RefCell<Option<anyhow::Error>> = RefCell::new(None);
    let record_failure = |result: Result<()>| {
        if let Err(e) = result {
            error!("Failed to store cycle data: {}", e);
            store_error.borrow_mut().get_or_insert(e);
        }
    };

    let mut cycle = input.into_cycle()?;
    cycle
        .boxed_calculation(calculator)
        .after_result(|outcome, _| record_failure(store.store_outcome(outcome)))
        .after_cycle(|state| record_failure(store.store_ratings(&state.ratings)));

    cycle.run()?;
    drop(cycle);

    if let Some(e) = store_error.into_inner() {
        return Err(e);
    }

    info!(
        "Stored {} outcomes",
        store.outcome_count().unwrap_or_default()
    );
    store.into_inner()?.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("{} v{}", config.service.name, rating_cycle::VERSION);

    if let Err(e) = run(&args, &config) {
        error!("Rating cycle failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
