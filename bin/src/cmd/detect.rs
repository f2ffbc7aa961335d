//! Rule-based detection command implementation.

use std::path::Path;

use anyhow::Result;
use inflexion::{Analysis, Detection, DetectorConfig, TimeSeries, Timestamp};
use serde::Serialize;
use tracing::info;

use crate::OutputFormat;
use crate::config::Config;
use crate::data::{self, DISPLAY_FORMAT};

/// Detector parameters given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Overrides {
    pub(crate) lag: Option<usize>,
    pub(crate) window: Option<usize>,
    pub(crate) threshold: Option<f64>,
}

impl Overrides {
    /// Apply the overrides on top of `base`.
    pub(crate) fn apply(self, base: DetectorConfig) -> DetectorConfig {
        DetectorConfig {
            lag: self.lag.unwrap_or(base.lag),
            window: self.window.unwrap_or(base.window),
            threshold: self.threshold.unwrap_or(base.threshold),
        }
    }
}

/// JSON document emitted by `detect --format json`.
#[derive(Debug, Serialize)]
pub(crate) struct DetectReport<'a> {
    start: Timestamp,
    end: Timestamp,
    config: DetectorConfig,
    samples: usize,
    change_points: usize,
    close: &'a TimeSeries,
    #[serde(flatten)]
    detection: &'a Detection,
}

impl<'a> DetectReport<'a> {
    pub(crate) fn new(
        (start, end): (Timestamp, Timestamp),
        config: DetectorConfig,
        close: &'a TimeSeries,
        detection: &'a Detection,
    ) -> Self {
        Self {
            start,
            end,
            config,
            samples: close.len(),
            change_points: detection.mask.count(),
            close,
            detection,
        }
    }
}

/// Detection over the selected range of a price file.
#[derive(Debug)]
pub(crate) struct RangeDetection {
    range: (Timestamp, Timestamp),
    window: TimeSeries,
    detection: Detection,
}

/// Load `file`, select the range and run the detector on it.
///
/// Returns `None` when the selected range holds no data.
pub(crate) fn detect_range(
    file: &Path,
    start: Option<&str>,
    end: Option<&str>,
    detector: DetectorConfig,
) -> Result<Option<RangeDetection>> {
    let series = data::load_prices(file)?;
    info!(file = %file.display(), samples = series.len(), "loaded price series");

    let Some(range) = data::resolve_range(&series, start, end)? else {
        return Ok(None);
    };
    let window = series.window(range.0, range.1);
    if window.is_empty() {
        return Ok(None);
    }

    let detection = Analysis::Classic(detector).detect(&window)?;
    Ok(Some(RangeDetection {
        range,
        window,
        detection,
    }))
}

/// Detect change points in a price file and display them.
pub(crate) fn run_detect(
    file: &Path,
    start: Option<&str>,
    end: Option<&str>,
    overrides: Overrides,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let detector = overrides.apply(config.detector);

    let Some(run) = detect_range(file, start, end, detector)? else {
        println!("No data to display for the selected range.");
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let report = DetectReport::new(run.range, detector, &run.window, &run.detection);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print_detection(file, run.range, detector, &run.window, &run.detection);
        }
    }

    Ok(())
}

fn print_detection(
    file: &Path,
    (start, end): (Timestamp, Timestamp),
    config: DetectorConfig,
    window: &TimeSeries,
    detection: &Detection,
) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Change Point Detection                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("File:       {}", file.display());
    println!(
        "Range:      {} to {}",
        start.format(DISPLAY_FORMAT),
        end.format(DISPLAY_FORMAT)
    );
    println!("Samples:    {}", window.len());
    println!("Lag:        {}", config.lag);
    println!("Window:     {}", config.window);
    println!("Threshold:  {}", config.threshold);
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("CHANGE POINTS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if detection.mask.count() == 0 {
        println!("  No change points in this range.\n");
    } else {
        println!(
            "  {:<21} {:>12}  {:>10}  {:>10}",
            "Timestamp", "Close", "Momentum", "Reversion"
        );
        println!("  {}", "─".repeat(58));

        let flags = detection
            .mask
            .values()
            .iter()
            .zip(detection.momentum_flags.values())
            .zip(detection.reversion_flags.values());
        for (position, ((flagged, flip), breach)) in flags.enumerate() {
            if !flagged {
                continue;
            }
            let Some((timestamp, close)) = window.get(position) else {
                continue;
            };
            println!(
                "  {:<21} {:>12.4}  {:>10}  {:>10}",
                timestamp.format(DISPLAY_FORMAT).to_string(),
                close,
                if *flip { "flip" } else { "" },
                if *breach { "breach" } else { "" }
            );
        }
        println!();
    }

    println!(
        "Flagged {} of {} samples ({} momentum flips, {} reversion breaches)\n",
        detection.mask.count(),
        window.len(),
        detection.momentum_flags.count(),
        detection.reversion_flags.count()
    );
}
