//! Bayesian estimation command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use inflexion::{Analyzer, EstimationResult};
use tracing::info;

use crate::config::Config;
use crate::data::{self, DISPLAY_FORMAT};

/// Estimation settings given on the command line.
#[derive(Debug, Clone)]
pub(crate) struct EstimateOptions {
    pub(crate) preset: String,
    pub(crate) program: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) output: Option<PathBuf>,
}

/// Run the external estimator on a range of a price file.
pub(crate) async fn run_estimate(
    file: &Path,
    start: Option<&str>,
    end: Option<&str>,
    options: EstimateOptions,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    let params = config.presets.get(&options.preset)?;
    if let Some(program) = options.program {
        config.estimator.program = program;
    }
    if let Some(secs) = options.timeout_secs {
        config.estimator.timeout_secs = Some(secs);
    }

    let series = data::load_prices(file)?;
    let Some((start, end)) = data::resolve_range(&series, start, end)? else {
        println!("No data to display.");
        return Ok(());
    };
    let window = series.window(start, end);
    if window.is_empty() {
        println!("No data to display for the selected range.");
        return Ok(());
    }

    info!(
        preset = %options.preset,
        program = %config.estimator.program,
        samples = window.len(),
        start = %start.format(DISPLAY_FORMAT),
        end = %end.format(DISPLAY_FORMAT),
        "running estimator, this may take a while"
    );

    let analyzer = Analyzer::new(config.estimator.backend());
    let result = analyzer.estimate(&params, &window).await?;

    write_result(&result, options.output.as_deref())
}

fn write_result(result: &EstimationResult, output: Option<&Path>) -> Result<()> {
    let document = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => {
            std::fs::write(path, document + "\n")?;
            info!(path = %path.display(), "wrote estimation result");
        }
        None => println!("{}", document),
    }
    Ok(())
}

/// List the estimator presets, including any defined in the config file.
pub(crate) fn list_presets(config_path: Option<&Path>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Estimator Presets                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let config = Config::load(config_path)?;

    println!(
        "  {:<12} {:<14} {:>11} {:>11} {:>9}",
        "Name", "Distribution", "Seasonality", "Iterations", "Burn-in"
    );
    println!("  {}", "─".repeat(61));
    for name in config.presets.names() {
        let params = config.presets.get(name)?;
        println!(
            "  {:<12} {:<14} {:>11} {:>11} {:>9}",
            name,
            params.distribution.as_str(),
            params.seasonality,
            params.iterations,
            params.burnin
        );
    }
    println!();

    let backend = config.estimator.backend();
    println!("Estimator program: {}", config.estimator.program);
    match backend.timeout() {
        Some(timeout) => println!("Timeout:           {}", format_duration(timeout)),
        None => println!("Timeout:           none"),
    }
    println!();

    Ok(())
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
