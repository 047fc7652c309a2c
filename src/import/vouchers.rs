use super::assemble::assemble_records;
use super::utils::{classify_cell, normalize_date, NameClass};
use crate::records::{Detail, Voucher};
use crate::sheet::{Cell, Row};

/// Day-book exports carry a 9-row banner; the column header row sits at this
/// index and data rows follow it.
const HEADER_ROW_INDEX: usize = 9;

/// Column positions resolved from the header row. The voucher-type and
/// voucher-number columns are required to recognize voucher starts; the rest
/// degrade to absent fields when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    vch_type: usize,
    vch_no: usize,
    date: Option<usize>,
    particulars: Option<usize>,
    debit: Option<usize>,
    credit: Option<usize>,
}

/// Reconstructs vouchers from the rows of one day-book sheet.
///
/// Returns an empty list when the sheet is too short to contain the header row
/// or the header row does not resolve; that is the no-data case, not an error.
pub fn extract_vouchers(rows: &[Row]) -> Vec<Voucher> {
    let Some(columns) = rows.get(HEADER_ROW_INDEX).and_then(resolve_columns) else {
        log::warn!("No voucher header row found, nothing to extract");
        return Vec::new();
    };
    assemble_records(
        rows,
        HEADER_ROW_INDEX + 1,
        |row| open_voucher(row, &columns),
        |voucher, row| {
            if let Some(detail) = parse_detail(row, &columns) {
                voucher.details.push(detail);
            }
        },
    )
}

/// Fuzzy header matching: a column label matches if it contains the wanted
/// name, case-insensitively ("Vch No." matches "vch no").
fn resolve_columns(header: &Row) -> Option<Columns> {
    let find = |wanted: &str| {
        header.iter().position(|cell| {
            cell.as_text()
                .map(|text| text.to_lowercase().contains(wanted))
                .unwrap_or(false)
        })
    };
    Some(Columns {
        vch_type: find("vch type")?,
        vch_no: find("vch no")?,
        date: find("date"),
        particulars: find("particulars"),
        debit: find("debit"),
        credit: find("credit"),
    })
}

fn cell_at<'a>(row: &'a Row, index: Option<usize>) -> &'a Cell {
    index.and_then(|i| row.get(i)).unwrap_or(&Cell::Empty)
}

/// A row starts a new voucher iff both the voucher-type and voucher-number
/// cells are non-empty.
fn open_voucher(row: &Row, columns: &Columns) -> Option<Voucher> {
    let vch_type = cell_at(row, Some(columns.vch_type));
    let vch_no = cell_at(row, Some(columns.vch_no));
    if vch_type.is_empty() || vch_no.is_empty() {
        return None;
    }
    let date = normalize_date(cell_at(row, columns.date));
    Some(Voucher {
        voucher_number: vch_no.label().unwrap_or_default(),
        date_iso: date.iso,
        date_serial: date.serial,
        party: cell_at(row, columns.particulars).label().unwrap_or_default(),
        voucher_type: vch_type.label().unwrap_or_default(),
        debit_amount: cell_at(row, columns.debit).as_number(),
        credit_amount: cell_at(row, columns.credit).as_number(),
        details: Vec::new(),
    })
}

fn parse_detail(row: &Row, columns: &Columns) -> Option<Detail> {
    let (amount, entry_type) = match scan_amount(row) {
        Some((value, tag)) => (Some(value), tag),
        None => {
            let fallback = cell_at(row, columns.debit)
                .as_number()
                .or_else(|| cell_at(row, columns.credit).as_number());
            (fallback, None)
        }
    };

    let particulars = cell_at(row, columns.particulars);
    let detail = match particulars.label() {
        Some(name) => match classify_cell(particulars) {
            NameClass::Staff => Detail {
                staff: Some(name),
                entry_type,
                amount,
                ..Detail::default()
            },
            NameClass::Account => Detail {
                account: Some(name),
                amount,
                ..Detail::default()
            },
        },
        // No name but an amount: a rounding adjustment line.
        None => Detail {
            amount,
            ..Detail::default()
        },
    };
    if detail.is_empty() {
        None
    } else {
        Some(detail)
    }
}

/// Scans cells left-to-right for the first non-zero number; a literal "Dr" or
/// "Cr" in the cell immediately before it is the entry type tag.
fn scan_amount(row: &Row) -> Option<(f64, Option<String>)> {
    for (index, cell) in row.iter().enumerate() {
        match cell.as_number() {
            Some(number) if number != 0.0 => {
                let entry_type = index
                    .checked_sub(1)
                    .and_then(|previous| row[previous].as_text())
                    .map(str::trim)
                    .filter(|tag| *tag == "Dr" || *tag == "Cr")
                    .map(str::to_string);
                return Some((number, entry_type));
            }
            _ => continue,
        }
    }
    None
}
