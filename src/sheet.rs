use anyhow::{anyhow, Context as _, Result};
use calamine::{open_workbook_auto, Data, DataType as _, Reader as _};
use chrono::NaiveDateTime;
use std::path::Path;

/// One spreadsheet cell, reduced to the four shapes the extractors care about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

pub type Row = Vec<Cell>;

impl Cell {
    /// Empty cells and whitespace-only text cells both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Renders the cell as a trimmed label, e.g. for voucher numbers that the
    /// spreadsheet stores either as text or as a number. Whole floats render
    /// without the trailing `.0`.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(number) if number.fract() == 0.0 => Some(format!("{}", *number as i64)),
            Cell::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::Error(_) => Cell::Empty,
            other => other.as_datetime().map(Cell::Date).unwrap_or(Cell::Empty),
        }
    }
}

/// Reads the first sheet of the workbook at `path` as physical rows.
///
/// Calamine ranges start at the first used cell, so the range offset is padded
/// back out with empty rows/cells to keep physical 0-indexed row positions.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook {} has no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}' of {}", sheet_name, path.display()))?;

    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Row> = vec![Vec::new(); row_offset as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells: Row = vec![Cell::Empty; col_offset as usize];
        cells.extend(row.iter().map(Cell::from));
        cells
    }));
    Ok(rows)
}
