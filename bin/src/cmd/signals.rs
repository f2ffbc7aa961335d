//! Signal listing command implementation.

use anyhow::Result;
use inflexion::detect::{LAG_RANGE, THRESHOLD_RANGE, WINDOW_RANGE};
use inflexion::signals::SignalCategory;
use inflexion::signals::registry::signals_by_category;

/// List available signals and the detector's parameter domains.
pub(crate) fn list_signals(verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Signals                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let categories = [
        (SignalCategory::Momentum, "Momentum"),
        (SignalCategory::Reversion, "Reversion"),
    ];

    for (category, category_name) in categories {
        let signals = signals_by_category(&category);
        if signals.is_empty() {
            continue;
        }

        println!("{}:", category_name);
        println!("{}", "-".repeat(60));

        for info in signals {
            if verbose {
                println!(
                    "  {:12} - {} ({}, default {})",
                    info.name, info.description, info.parameter, info.default_parameter
                );
            } else {
                println!("  {}", info.name);
            }
        }
        if verbose {
            println!("  {}", category.description());
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed signal descriptions.\n");
    }

    println!("Detector parameters:");
    println!("  lag        {}..={}", LAG_RANGE.start(), LAG_RANGE.end());
    println!("  window     {}..={}", WINDOW_RANGE.start(), WINDOW_RANGE.end());
    println!(
        "  threshold  {}..={}",
        THRESHOLD_RANGE.start(),
        THRESHOLD_RANGE.end()
    );
    println!();

    Ok(())
}
