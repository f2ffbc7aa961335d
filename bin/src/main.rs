//! Inflexion CLI binary.
//!
//! Provides command-line interface for change-point detection on price series.

mod cmd;
mod config;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use inflexion::detect::{LAG_RANGE, THRESHOLD_RANGE, WINDOW_RANGE};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inflexion")]
#[command(about = "Change-point detection for intraday price series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for detection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List available signals
    Signals {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the available and default analysis range of a price file
    Range {
        /// CSV file with Date, Time and Close columns
        file: PathBuf,
    },

    /// Flag change points with the momentum/reversion rule
    Detect {
        /// CSV file with Date, Time and Close columns
        file: PathBuf,

        /// Range start (YYYY-MM-DD HH:MM:SS)
        #[arg(long)]
        start: Option<String>,

        /// Range end (YYYY-MM-DD HH:MM:SS)
        #[arg(long)]
        end: Option<String>,

        /// Momentum lag in samples (1-30)
        #[arg(short, long, value_parser = parse_lag)]
        lag: Option<usize>,

        /// Moving average window in samples (1-30)
        #[arg(short, long, value_parser = parse_window)]
        window: Option<usize>,

        /// Reversion threshold (0-1000)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the external Bayesian estimator on a range
    Estimate {
        /// CSV file with Date, Time and Close columns
        file: PathBuf,

        /// Range start (YYYY-MM-DD HH:MM:SS)
        #[arg(long)]
        start: Option<String>,

        /// Range end (YYYY-MM-DD HH:MM:SS)
        #[arg(long)]
        end: Option<String>,

        /// Estimator preset
        #[arg(short, long, default_value = "trend")]
        preset: String,

        /// Estimator program (overrides the config file)
        #[arg(long)]
        program: Option<String>,

        /// Kill the estimator after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List estimator presets
    Presets {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn parse_lag(s: &str) -> Result<usize, String> {
    let lag: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !LAG_RANGE.contains(&lag) {
        return Err(format!(
            "lag must be between {} and {}",
            LAG_RANGE.start(),
            LAG_RANGE.end()
        ));
    }
    Ok(lag)
}

fn parse_window(s: &str) -> Result<usize, String> {
    let window: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !WINDOW_RANGE.contains(&window) {
        return Err(format!(
            "window must be between {} and {}",
            WINDOW_RANGE.start(),
            WINDOW_RANGE.end()
        ));
    }
    Ok(window)
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !THRESHOLD_RANGE.contains(&threshold) {
        return Err(format!(
            "threshold must be between {} and {}",
            THRESHOLD_RANGE.start(),
            THRESHOLD_RANGE.end()
        ));
    }
    Ok(threshold)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inflexion=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signals { verbose } => {
            cmd::signals::list_signals(verbose)?;
        }
        Commands::Range { file } => {
            cmd::range::show_range(&file)?;
        }
        Commands::Detect {
            file,
            start,
            end,
            lag,
            window,
            threshold,
            config,
            format,
        } => {
            let overrides = cmd::detect::Overrides {
                lag,
                window,
                threshold,
            };
            cmd::detect::run_detect(
                &file,
                start.as_deref(),
                end.as_deref(),
                overrides,
                config.as_deref(),
                format,
            )?;
        }
        Commands::Estimate {
            file,
            start,
            end,
            preset,
            program,
            timeout_secs,
            output,
            config,
        } => {
            let options = cmd::estimate::EstimateOptions {
                preset,
                program,
                timeout_secs,
                output,
            };
            cmd::estimate::run_estimate(
                &file,
                start.as_deref(),
                end.as_deref(),
                options,
                config.as_deref(),
            )
            .await?;
        }
        Commands::Presets { config } => {
            cmd::estimate::list_presets(config.as_deref())?;
        }
    }

    Ok(())
}
