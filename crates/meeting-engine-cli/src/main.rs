//! `meetslot` CLI — compute common meeting availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Best intervals per day (stdin → stdout)
//! cat request.json | meetslot compute
//!
//! # Every best start moment, 15-minute grid, from file to file
//! meetslot compute -i request.json -o result.json --mode moments --granularity 15
//!
//! # Working hours from a TOML config, overridden on the command line
//! meetslot compute -i request.json --config meetslot.toml --work-end 17:00
//!
//! # Show each participant's free schedule
//! meetslot schedule -i request.json --pretty
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use meeting_engine::config::parse_time_of_day;
use meeting_engine::{AvailabilityRequest, AvailabilityResult, EngineConfig, OutputMode};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "meetslot",
    version,
    about = "Find the meeting times that suit the most participants"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-day best meeting times
    Compute {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Shape of each day's result
        #[arg(long, value_enum, default_value_t = Mode::Intervals)]
        mode: Mode,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print each participant's free schedule
    Schedule {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// TOML file with working hours, granularity and timezone
    #[arg(long)]
    config: Option<String>,
    /// Start of working hours (HH:MM)
    #[arg(long)]
    work_start: Option<String>,
    /// End of working hours (HH:MM)
    #[arg(long)]
    work_end: Option<String>,
    /// Minutes between candidate start times
    #[arg(long)]
    granularity: Option<u32>,
    /// IANA timezone for datetimes that carry an offset
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Counts,
    Moments,
    Intervals,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Counts => OutputMode::Counts,
            Mode::Moments => OutputMode::Moments,
            Mode::Intervals => OutputMode::Intervals,
        }
    }
}

/// `compute` output: the per-day result plus the cross-day summary.
#[derive(Serialize)]
struct ComputeOutput<'a> {
    #[serde(flatten)]
    result: &'a AvailabilityResult,
    global_max_count: usize,
    global_best: Vec<NaiveDateTime>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compute {
            input,
            output,
            mode,
            pretty,
            engine,
        } => {
            let config = build_config(&engine)?;
            let request = read_request(input.as_deref())?;
            let result = request
                .prepare(&config)
                .and_then(|prepared| prepared.compute(&config, mode.into()))
                .context("Failed to compute availability")?;
            tracing::info!(
                days = result.days.len(),
                global_max = result.global_max_count(),
                "availability computed"
            );

            let out = ComputeOutput {
                result: &result,
                global_max_count: result.global_max_count(),
                global_best: result.global_best_moments(),
            };
            write_output(output.as_deref(), &to_json(&out, pretty)?)?;
        }
        Commands::Schedule {
            input,
            output,
            pretty,
            engine,
        } => {
            let config = build_config(&engine)?;
            let request = read_request(input.as_deref())?;
            let schedules = request
                .prepare(&config)
                .and_then(|prepared| prepared.schedules(&config))
                .context("Failed to build schedules")?;
            write_output(output.as_deref(), &to_json(&schedules, pretty)?)?;
        }
    }

    Ok(())
}

/// Stderr-only logging so stdout stays parseable JSON.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the config file (if any), then apply command-line overrides.
fn build_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };

    if let Some(start) = &args.work_start {
        config.working_hours.start = parse_time_of_day(start).context("Invalid --work-start")?;
    }
    if let Some(end) = &args.work_end {
        config.working_hours.end = parse_time_of_day(end).context("Invalid --work-end")?;
    }
    if let Some(granularity) = args.granularity {
        config.granularity_minutes = granularity;
    }
    if let Some(tz) = &args.timezone {
        config.timezone = Some(tz.clone());
    }

    config.validate().context("Invalid engine configuration")?;
    tracing::debug!(?config, "engine configuration");
    Ok(config)
}

fn read_request(path: Option<&str>) -> Result<AvailabilityRequest> {
    let json = read_input(path)?;
    AvailabilityRequest::from_json(&json).context("Failed to parse request JSON")
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
