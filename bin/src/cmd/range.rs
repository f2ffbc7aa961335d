//! Range inspection command implementation.

use std::path::Path;

use anyhow::Result;

use crate::data::{self, DISPLAY_FORMAT};

/// Show the available and default analysis ranges of a price file.
pub(crate) fn show_range(file: &Path) -> Result<()> {
    let series = data::load_prices(file)?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Price Series Range                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("File:       {}", file.display());
    println!("Samples:    {}", series.len());

    let (Some((first, last)), Some((start, end))) =
        (data::available_range(&series), data::default_range(&series))
    else {
        println!("\nNo data to display.\n");
        return Ok(());
    };

    println!(
        "Available:  {} to {}",
        first.format(DISPLAY_FORMAT),
        last.format(DISPLAY_FORMAT)
    );
    println!(
        "Default:    {} to {} ({} samples)",
        start.format(DISPLAY_FORMAT),
        end.format(DISPLAY_FORMAT),
        series.window(start, end).len()
    );
    println!();

    Ok(())
}
