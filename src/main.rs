//! CLI entry point for the Niagara Falls Transit GTFS tools.
//!
//! `generate` normalises an extracted GTFS directory into CSV output; the
//! other subcommands run a single cleanup for checking the agency tables.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use nft_agency_tools::{
    agency::{AgencyTools, NiagaraFallsTransit},
    config::AgencyConfig,
    feed::GtfsFeed,
    filter::{ServiceFilter, parse_gtfs_date, useful_service_ids},
    model::GStop,
    output::{OnInvalid, normalize_feed, print_json, write_feed},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "nft_agency_tools")]
#[command(about = "Niagara Falls Transit GTFS normalisation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalise an extracted GTFS directory into CSV files
    Generate {
        /// Directory holding routes.txt, stops.txt, trips.txt
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory to write the output files to
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Prefix for every output file name
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,

        /// Optional: JSON file overriding the route filter settings
        #[arg(short, long)]
        config: Option<String>,

        /// Skip records the agency tables cannot resolve instead of failing
        #[arg(long, default_value_t = false)]
        skip_invalid: bool,

        /// Reference date (YYYYMMDD) for keeping service ids, defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the integer id synthesised for a stop code
    StopId {
        #[arg(value_name = "CODE")]
        code: String,

        /// Stop id used when the code is empty or "0"
        #[arg(long, default_value = "")]
        stop_id: String,
    },
    /// Print a cleaned trip headsign
    CleanHeadsign {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Print a cleaned stop name
    CleanName {
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/nft_agency_tools.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("nft_agency_tools.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            prefix,
            config,
            skip_invalid,
            today,
        } => {
            let config = match config {
                Some(path) => AgencyConfig::load(&path)?,
                None => AgencyConfig::default(),
            };
            let today = match today {
                Some(value) => parse_gtfs_date(&value)
                    .with_context(|| format!("invalid --today date '{value}', expected YYYYMMDD"))?,
                None => Local::now().date_naive(),
            };
            let on_invalid = if skip_invalid {
                OnInvalid::Skip
            } else {
                OnInvalid::Abort
            };
            generate(&input, &output_dir, &prefix, config, today, on_invalid)?;
        }
        Commands::StopId { code, stop_id } => {
            let stop = GStop {
                stop_id,
                stop_code: code,
                ..Default::default()
            };
            let agency = NiagaraFallsTransit::default();
            println!("{}", agency.stop_id(&stop)?);
        }
        Commands::CleanHeadsign { text } => {
            println!("{}", NiagaraFallsTransit::default().clean_trip_headsign(&text));
        }
        Commands::CleanName { text } => {
            println!("{}", NiagaraFallsTransit::default().clean_stop_name(&text));
        }
    }

    Ok(())
}

/// Loads the feed, normalises it and writes the output files.
#[tracing::instrument(skip_all, fields(input = %input.display(), output_dir = %output_dir.display(), prefix = %prefix, today = %today))]
fn generate(
    input: &Path,
    output_dir: &Path,
    prefix: &str,
    config: AgencyConfig,
    today: NaiveDate,
    on_invalid: OnInvalid,
) -> Result<()> {
    info!("Generating Niagara Falls Transit bus data...");
    let start = Instant::now();

    let feed = GtfsFeed::load(input)?;
    let services = ServiceFilter::new(useful_service_ids(
        &feed.calendars,
        &feed.calendar_dates,
        today,
    ));
    let agency = NiagaraFallsTransit::new(config).with_service_filter(services);

    let mut normalized = normalize_feed(&agency, &feed, on_invalid)?;
    normalized.stats = normalized
        .stats
        .with_run_info(&input.display().to_string(), prefix);

    write_feed(output_dir, prefix, &normalized)?;
    print_json(&normalized.stats)?;

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generating Niagara Falls Transit bus data... DONE"
    );
    Ok(())
}
