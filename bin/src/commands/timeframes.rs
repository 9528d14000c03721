//! Timeframes command implementation.

use anyhow::Result;
use candela_lib::prelude::*;

/// List supported timeframes with their durations.
pub(crate) fn list_timeframes() -> Result<()> {
    println!("{:<6} {:>10}", "NAME", "SECONDS");
    println!("{}", "-".repeat(17));

    for timeframe in Timeframe::all() {
        let seconds = timeframe
            .seconds()
            .map_or_else(|| "calendar".to_string(), |s| s.to_string());
        println!("{:<6} {:>10}", timeframe.as_str(), seconds);
    }

    Ok(())
}
