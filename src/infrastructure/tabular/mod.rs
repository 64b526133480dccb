//! Tabular upload parsing
//!
//! CSV and Excel parsers plus a factory that picks one by format.

mod csv;
mod excel;

use std::sync::Arc;

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

use crate::domain::tabular::{TabularFormat, TabularParser, TabularRow};
use crate::domain::DomainError;

/// Factory for creating tabular parsers
#[derive(Debug, Default)]
pub struct TabularParserFactory;

impl TabularParserFactory {
    /// Create a parser for the given format
    pub fn create(format: TabularFormat) -> Arc<dyn TabularParser> {
        if format.is_spreadsheet() {
            Arc::new(ExcelParser::new())
        } else {
            Arc::new(CsvParser::new())
        }
    }

    /// Detect the format from `filename` and parse `content` with the matching parser
    pub fn parse_upload(filename: &str, content: &[u8]) -> Result<Vec<TabularRow>, DomainError> {
        let format = TabularFormat::from_filename(filename)?;
        Self::create(format).parse(content, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_matching_parser() {
        assert!(TabularParserFactory::create(TabularFormat::Csv).supports(TabularFormat::Csv));
        assert!(TabularParserFactory::create(TabularFormat::Xlsx).supports(TabularFormat::Xls));
        assert!(!TabularParserFactory::create(TabularFormat::Xls).supports(TabularFormat::Csv));
    }

    #[test]
    fn test_parse_upload_csv() {
        let rows = TabularParserFactory::parse_upload("koi.CSV", b"ra,dec\n1,2\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["dec"], "2");
    }

    #[test]
    fn test_parse_upload_unsupported_extension() {
        let err = TabularParserFactory::parse_upload("koi.parquet", b"").unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedFormat { .. }));
    }
}
