//! JSON output format.

use candela_types::{OHLCV_COLUMNS, OhlcvTable};
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

/// Builds one JSON object per row, keyed by column name.
fn records(table: &OhlcvTable) -> impl Iterator<Item = Value> + '_ {
    table.rows().iter().enumerate().map(move |(i, bar)| {
        let mut record = Map::with_capacity(OHLCV_COLUMNS.len() + table.derived().len());
        record.insert(
            "timestamp".to_string(),
            Value::from(bar.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
        for name in &OHLCV_COLUMNS[1..] {
            record.insert((*name).to_string(), number(bar.field(name)));
        }
        for column in table.derived() {
            record.insert(column.name().to_string(), number(column.values()[i]));
        }
        Value::Object(record)
    })
}

/// Undefined or non-finite values become `null`.
fn number(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &OhlcvTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                let rows: Vec<Value> = records(table).collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &rows)?;
                } else {
                    serde_json::to_writer(&mut writer, &rows)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records(table) {
                    serde_json::to_writer(&mut writer, &record)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
