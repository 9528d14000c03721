//! Symbols command implementation.
//!
//! This module handles listing tradable symbols with optional filtering.

use crate::commands::Connection;
use anyhow::{Context, Result};
use candela_lib::prelude::*;

/// List symbols open for trading, optionally filtered by a search pattern.
pub(crate) async fn list_symbols(
    connection: &Connection,
    provider: &str,
    search: Option<&str>,
) -> Result<()> {
    let (provider, client) = connection.client(provider)?;
    let symbols = fetch_tradable_symbols_with(&client)
        .await
        .with_context(|| format!("Failed to list {provider} symbols"))?;

    let pattern = search.map(str::to_uppercase);
    let matching: Vec<_> = symbols
        .iter()
        .filter(|s| pattern.as_deref().is_none_or(|p| s.to_uppercase().contains(p)))
        .collect();

    if matching.is_empty() {
        println!("No symbols found.");
        return Ok(());
    }

    for symbol in &matching {
        println!("{symbol}");
    }

    eprintln!("\nTotal: {} of {} trading symbols", matching.len(), symbols.len());
    Ok(())
}
