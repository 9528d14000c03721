//! CSV output format.

use candela_types::OhlcvTable;
use std::io::Write;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &OhlcvTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            let separator = d.to_string();
            writeln!(writer, "{}", table.column_names().join(separator.as_str()))?;
        }

        for (i, bar) in table.rows().iter().enumerate() {
            write!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.timestamp.format(TIMESTAMP_FORMAT),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
            for column in table.derived() {
                // Undefined values are empty cells
                match column.values()[i] {
                    Some(value) => write!(writer, "{d}{value}")?,
                    None => write!(writer, "{d}")?,
                }
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::fixtures::sample_table;
    use std::io::Cursor;

    fn render(formatter: &CsvFormatter, table: &OhlcvTable) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter.write_table(table, &mut output).unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_csv_table() {
        let result = render(&CsvFormatter::new(), &sample_table());
        let lines: Vec<_> = result.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,open,high,low,close,volume,log_return_close");
        assert_eq!(lines[1], "2024-01-15T12:30:00Z,42000.5,42100,41950,42050.25,12.5,");
        assert_eq!(lines[2], "2024-01-15T12:35:00Z,42050.25,42080,42000,42010,3,-0.001");
    }

    #[test]
    fn test_csv_no_header() {
        let result = render(&CsvFormatter::new().with_header(false), &sample_table());
        assert!(!result.contains("timestamp"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let result = render(&formatter, &sample_table());
        assert!(result.starts_with("timestamp\topen\thigh"));
        assert_eq!(formatter.extension(), "tsv");
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let result = render(&CsvFormatter::new(), &OhlcvTable::default());
        assert_eq!(result, "timestamp,open,high,low,close,volume\n");
    }
}
