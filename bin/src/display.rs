//! Display utilities and output formatting for the candela CLI.

use anyhow::Result;
use candela_lib::prelude::*;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufWriter, Write};

/// Output format for fetched tables.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

/// Writes a table to stdout in the specified format.
pub(crate) fn write_table(table: &OhlcvTable, format: Format, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(std::io::stdout());

    match format {
        Format::Csv => CsvFormatter::new().write_table(table, &mut writer)?,
        Format::Tsv => CsvFormatter::tsv().write_table(table, &mut writer)?,
        Format::Json => JsonFormatter::new()
            .with_pretty(pretty)
            .write_table(table, &mut writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_table(table, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

/// Creates a progress bar on stderr, hidden in quiet mode.
pub(crate) fn progress_bar(len: u64, unit: &str, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} {{msg}}"
            ))?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Formats an optional open time for tables.
pub(crate) fn format_time(timestamp: Option<chrono::DateTime<chrono::Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    )
}
