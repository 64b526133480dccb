//! Excel workbook parser (xlsx and legacy xls)

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx};
use serde_json::{Number, Value};

use crate::domain::tabular::{TabularFormat, TabularParser, TabularRow};
use crate::domain::DomainError;

/// Parser for Excel uploads. Only the first worksheet is read.
#[derive(Debug, Clone, Default)]
pub struct ExcelParser;

impl ExcelParser {
    /// Create a new Excel parser
    pub fn new() -> Self {
        Self
    }

    fn read_first_sheet(content: &[u8], format: TabularFormat) -> Result<Range<Data>, DomainError> {
        let cursor = Cursor::new(content);

        match format {
            TabularFormat::Xlsx => {
                let mut workbook = Xlsx::new(cursor)
                    .map_err(|e| DomainError::parse(format!("Failed to open xlsx workbook: {}", e)))?;
                first_sheet(&mut workbook)
            }
            TabularFormat::Xls => {
                let mut workbook = Xls::new(cursor)
                    .map_err(|e| DomainError::parse(format!("Failed to open xls workbook: {}", e)))?;
                first_sheet(&mut workbook)
            }
            TabularFormat::Csv => Err(DomainError::unsupported_format("*.csv")),
        }
    }
}

fn first_sheet<RS, R>(workbook: &mut R) -> Result<Range<Data>, DomainError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DomainError::empty_input("Workbook has no worksheets"))?
        .map_err(|e| DomainError::parse(format!("Failed to read worksheet: {}", e)))
}

impl TabularParser for ExcelParser {
    fn supported_formats(&self) -> &[TabularFormat] {
        &[TabularFormat::Xlsx, TabularFormat::Xls]
    }

    fn parse(&self, content: &[u8], format: TabularFormat) -> Result<Vec<TabularRow>, DomainError> {
        if !self.supports(format) {
            return Err(DomainError::unsupported_format(format!("*.{}", format)));
        }

        let range = Self::read_first_sheet(content, format)?;
        Ok(rows_from_range(&range))
    }
}

fn rows_from_range(range: &Range<Data>) -> Vec<TabularRow> {
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header.iter().map(header_name).collect();

    rows.enumerate()
        .filter(|(_, cells)| !cells.iter().all(|c| matches!(c, Data::Empty)))
        .map(|(index, cells)| {
            let fields = headers
                .iter()
                .zip(cells.iter())
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, cell)| (name.clone(), cell_value(cell)))
                .collect();

            TabularRow::new(index + 1, fields)
        })
        .collect()
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Number::from_f64(dt.as_f64())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        // Formula errors such as #N/A count as missing values
        Data::Error(_) | Data::Empty => Value::Null,
    }
}
