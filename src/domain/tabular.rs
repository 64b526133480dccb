//! Tabular upload formats and the parser trait

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// One parsed data row: column header -> cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularRow {
    /// Position of the row in the file, counted from 1 after the header.
    /// Blank rows keep their number even though they are not returned.
    pub number: usize,
    pub fields: Map<String, Value>,
}

impl TabularRow {
    pub fn new(number: usize, fields: Map<String, Value>) -> Self {
        Self { number, fields }
    }
}

impl std::ops::Index<&str> for TabularRow {
    type Output = Value;

    fn index(&self, column: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(column).unwrap_or(&NULL)
    }
}

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularFormat {
    Csv,
    Xlsx,
    Xls,
}

impl TabularFormat {
    /// Detect the format from a filename extension (case insensitive)
    pub fn from_filename(filename: &str) -> Result<Self, DomainError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            Some("xls") => Ok(Self::Xls),
            _ => Err(DomainError::unsupported_format(filename)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

impl std::fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Turns uploaded bytes into header-keyed rows, preserving row order
pub trait TabularParser: Send + Sync + Debug {
    /// Formats this parser handles
    fn supported_formats(&self) -> &[TabularFormat];

    /// Parse every data row; the first row is the header
    fn parse(&self, content: &[u8], format: TabularFormat) -> Result<Vec<TabularRow>, DomainError>;

    /// Check whether this parser handles a format
    fn supports(&self, format: TabularFormat) -> bool {
        self.supported_formats().contains(&format)
    }
}
