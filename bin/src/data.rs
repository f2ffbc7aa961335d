//! Data loading and range selection for the Inflexion CLI.

use std::path::Path;

use chrono::{Duration, Months, NaiveDate};
use inflexion::{InflexionError, Observation, TimeSeries, Timestamp};
use polars::prelude::*;
use tracing::debug;

/// Column holding the calendar date of each row.
pub(crate) const DATE_COLUMN: &str = "Date";
/// Column holding the time of day of each row.
pub(crate) const TIME_COLUMN: &str = "Time";
/// Column holding the closing price of each row.
pub(crate) const CLOSE_COLUMN: &str = "Close";

/// Accepted timestamp layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Display layout for timestamps, matching what range bounds accept.
pub(crate) const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp in `YYYY-MM-DD HH:MM:SS` form.
///
/// A bare `YYYY-MM-DD` means midnight of that day.
pub(crate) fn parse_timestamp(text: &str) -> Result<Timestamp, InflexionError> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| Timestamp::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            InflexionError::InvalidRangeFormat(format!(
                "'{}' is not a timestamp (expected YYYY-MM-DD HH:MM:SS)",
                text
            ))
        })
}

/// Load a price series from a CSV file with `Date`, `Time` and `Close` columns.
pub(crate) fn load_prices(path: &Path) -> Result<TimeSeries, InflexionError> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    series_from_frame(&frame)
}

/// Build a price series from a frame with `Date`, `Time` and `Close` columns.
///
/// Rows whose date and time do not combine into a timestamp are dropped.
/// Every remaining row must carry a finite close.
pub(crate) fn series_from_frame(frame: &DataFrame) -> Result<TimeSeries, InflexionError> {
    let columns = frame.get_column_names();
    for required in [DATE_COLUMN, TIME_COLUMN, CLOSE_COLUMN] {
        if !columns.iter().any(|c| c.as_str() == required) {
            return Err(InflexionError::MissingColumn(required.to_string()));
        }
    }

    let dates = frame.column(DATE_COLUMN)?.cast(&DataType::String)?;
    let times = frame.column(TIME_COLUMN)?.cast(&DataType::String)?;
    let closes = frame.column(CLOSE_COLUMN)?.cast(&DataType::Float64)?;

    let dates = dates.as_materialized_series().str()?;
    let times = times.as_materialized_series().str()?;
    let closes = closes.as_materialized_series().f64()?;

    let mut observations = Vec::with_capacity(frame.height());
    let mut dropped = 0usize;

    for (row, ((date, time), close)) in dates
        .into_iter()
        .zip(times.into_iter())
        .zip(closes.into_iter())
        .enumerate()
    {
        let timestamp = date.zip(time).and_then(|(date, time)| {
            // Dates exported with a midnight time part keep only the day
            let day = date.split_whitespace().next().unwrap_or_default();
            parse_timestamp(&format!("{} {}", day, time.trim())).ok()
        });
        let Some(timestamp) = timestamp else {
            dropped += 1;
            continue;
        };

        let value = close.filter(|v| v.is_finite()).ok_or_else(|| {
            InflexionError::DataFormat(format!(
                "row {}: missing or non-numeric {} value",
                row + 1,
                CLOSE_COLUMN
            ))
        })?;
        observations.push(Observation::new(timestamp, value));
    }

    if dropped > 0 {
        debug!(dropped, "dropped rows with unparseable date/time");
    }

    Ok(TimeSeries::from_observations(observations))
}

/// First and last timestamp of the series.
pub(crate) fn available_range(series: &TimeSeries) -> Option<(Timestamp, Timestamp)> {
    Some((series.first_timestamp()?, series.last_timestamp()?))
}

/// The range analysed when none is given: the first month of data.
///
/// Runs from the first timestamp to one month later, minus one day.
pub(crate) fn default_range(series: &TimeSeries) -> Option<(Timestamp, Timestamp)> {
    let first = series.first_timestamp()?;
    let end = first.checked_add_months(Months::new(1))? - Duration::days(1);
    Some((first, end))
}

/// Resolve user-supplied range bounds, falling back to [`default_range`].
///
/// Returns `None` when the series is empty.
pub(crate) fn resolve_range(
    series: &TimeSeries,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<(Timestamp, Timestamp)>, InflexionError> {
    let start = start.map(parse_timestamp).transpose()?;
    let end = end.map(parse_timestamp).transpose()?;

    let Some((default_start, default_end)) = default_range(series) else {
        return Ok(None);
    };

    Ok(Some((
        start.unwrap_or(default_start),
        end.unwrap_or(default_end),
    )))
}
