//! CSV table parser

use serde_json::Value;

use crate::domain::tabular::{TabularFormat, TabularParser, TabularRow};
use crate::domain::DomainError;

/// Parser for comma separated uploads with a header row
#[derive(Debug, Clone, Default)]
pub struct CsvParser;

impl CsvParser {
    /// Create a new CSV parser
    pub fn new() -> Self {
        Self
    }
}

impl TabularParser for CsvParser {
    fn supported_formats(&self) -> &[TabularFormat] {
        &[TabularFormat::Csv]
    }

    fn parse(&self, content: &[u8], format: TabularFormat) -> Result<Vec<TabularRow>, DomainError> {
        if !self.supports(format) {
            return Err(DomainError::unsupported_format(format!("*.{}", format)));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| DomainError::parse(format!("Failed to read CSV header: {}", e)))?
            .clone();

        let mut rows = Vec::new();

        // Lines without any delimiter never reach us as records; rows of empty
        // cells do and keep their number
        for (index, record) in reader.records().enumerate() {
            let number = index + 1;
            let record =
                record.map_err(|e| DomainError::parse(format!("Row {}: {}", number, e)))?;

            if record.iter().all(str::is_empty) {
                continue;
            }

            let fields = headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.to_string(), cell_value(cell)))
                .collect();

            rows.push(TabularRow::new(number, fields));
        }

        Ok(rows)
    }
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        Value::Null
    } else {
        Value::String(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_in_order() {
        let content = b"pl_rade,st_rad,ra\n1.0,1.0,10\n2.5,0.8,20\n";
        let rows = CsvParser::new().parse(content, TabularFormat::Csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["pl_rade"], "1.0");
        assert_eq!(rows[1]["st_rad"], "0.8");
        assert_eq!(rows[1]["ra"], "20");
    }

    #[test]
    fn test_parse_empty_rows_keep_numbering() {
        let content = b"pl_rade,st_rad\n1.0,1.0\n,\n2.0,0.5\n";
        let rows = CsvParser::new().parse(content, TabularFormat::Csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[1].number, 3);
        assert_eq!(rows[1]["pl_rade"], "2.0");
    }

    #[test]
    fn test_parse_empty_cells_become_null() {
        let content = b"pl_rade,st_rad\n1.0,\n";
        let rows = CsvParser::new().parse(content, TabularFormat::Csv).unwrap();

        assert_eq!(rows[0]["st_rad"], Value::Null);
    }

    #[test]
    fn test_parse_trims_headers_and_values() {
        let content = b" pl_rade , st_rad \n 1.0 , 2.0 \n";
        let rows = CsvParser::new().parse(content, TabularFormat::Csv).unwrap();

        assert_eq!(rows[0]["pl_rade"], "1.0");
        assert_eq!(rows[0]["st_rad"], "2.0");
    }

    #[test]
    fn test_parse_header_only_yields_no_rows() {
        let rows = CsvParser::new()
            .parse(b"pl_rade,st_rad\n", TabularFormat::Csv)
            .unwrap();
        assert!(rows.is_empty());

        let rows = CsvParser::new().parse(b"", TabularFormat::Csv).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_ragged_row_is_an_error() {
        let content = b"pl_rade,st_rad\n1.0,2.0,3.0\n";
        let err = CsvParser::new().parse(content, TabularFormat::Csv).unwrap_err();

        assert!(matches!(err, DomainError::Parse { .. }));
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_parse_rejects_spreadsheet_format() {
        let err = CsvParser::new()
            .parse(b"a\n1\n", TabularFormat::Xlsx)
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedFormat { .. }));
    }
}
