use lazy_static::lazy_static;
use regex::Regex;

use super::assemble::assemble_records;
use super::utils::{classify_cell, normalize_date, NameClass};
use crate::records::{CreditNote, CreditNoteMeta, Detail};
use crate::sheet::{Cell, Row};

/// Credit-note exports have no column header row; the first 10 rows are banner
/// and the column positions are fixed.
const DATA_START_ROW: usize = 10;

mod col {
    pub const DATE: usize = 0;
    pub const PARTICULARS: usize = 1;
    pub const AMOUNT: usize = 2;
    pub const ENTRY_TYPE: usize = 3;
    pub const VCH_TYPE: usize = 4;
    pub const VCH_NO: usize = 5;
    pub const DEBIT: usize = 6;
    pub const CREDIT: usize = 7;
}

const VOUCHER_TYPE: &str = "Credit Note";
const CANCELLED_MARKER: &str = "(cancelled)";
const SOURCE_TAG: &str = "tally-daybook";

lazy_static! {
    static ref GRN_PATTERN: Regex = Regex::new(r"(?i)^GRN\s*No\s*[.:]?\s*(\d+)").unwrap();
    static ref ENTERED_BY_PATTERN: Regex = Regex::new(r"(?i)^Entered\s*By\s*:").unwrap();
}

/// Reconstructs credit notes from the rows of one export sheet.
pub fn extract_credit_notes(rows: &[Row]) -> Vec<CreditNote> {
    assemble_records(rows, DATA_START_ROW, open_credit_note, absorb_row)
}

fn cell_at(row: &Row, index: usize) -> &Cell {
    row.get(index).unwrap_or(&Cell::Empty)
}

/// A row starts a new credit note iff the date cell is numeric, the voucher
/// type cell is literally "Credit Note" and the voucher number is non-empty.
fn open_credit_note(row: &Row) -> Option<CreditNote> {
    let date_cell = cell_at(row, col::DATE);
    date_cell.as_number()?;
    let vch_type = cell_at(row, col::VCH_TYPE).as_text()?.trim();
    if vch_type != VOUCHER_TYPE {
        return None;
    }
    let vch_no = cell_at(row, col::VCH_NO);
    if vch_no.is_empty() {
        return None;
    }

    let particulars = cell_at(row, col::PARTICULARS);
    let is_cancelled = particulars
        .as_text()
        .map(|text| text.trim() == CANCELLED_MARKER)
        .unwrap_or(false);
    let date = normalize_date(date_cell);
    Some(CreditNote {
        credit_note_number: vch_no.label().unwrap_or_default(),
        // Linked to its sales voucher by a later enrichment step.
        original_sales_voucher_number: None,
        date_iso: date.iso,
        date_serial: date.serial,
        party: if is_cancelled {
            None
        } else {
            particulars.label()
        },
        voucher_type: VOUCHER_TYPE.to_string(),
        is_cancelled,
        credit_amount: if is_cancelled {
            0.0
        } else {
            cell_at(row, col::CREDIT).as_number().unwrap_or(0.0)
        },
        details: Vec::new(),
        metadata: CreditNoteMeta {
            entered_by: None,
            grn_number: None,
            source: SOURCE_TAG.to_string(),
        },
    })
}

fn absorb_row(note: &mut CreditNote, row: &Row) {
    let particulars = cell_at(row, col::PARTICULARS);
    let text = particulars.as_text().map(str::trim).unwrap_or("");

    // Metadata rows are captured even for cancelled notes and never become
    // detail lines.
    if let Some(captures) = GRN_PATTERN.captures(text) {
        note.metadata.grn_number = Some(captures[1].to_string());
        return;
    }
    if ENTERED_BY_PATTERN.is_match(text) {
        // The operator name sits in the amount column of the same row.
        note.metadata.entered_by = cell_at(row, col::AMOUNT).label();
        return;
    }
    if note.is_cancelled || particulars.is_empty() {
        return;
    }

    let (amount, entry_type) = match cell_at(row, col::AMOUNT).as_number() {
        Some(amount) => (
            amount,
            cell_at(row, col::ENTRY_TYPE)
                .as_text()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty()),
        ),
        None => match cell_at(row, col::DEBIT).as_number() {
            Some(amount) => (amount, Some("Dr".to_string())),
            None => match cell_at(row, col::CREDIT).as_number() {
                Some(amount) => (amount, Some("Cr".to_string())),
                None => return,
            },
        },
    };

    let detail = match classify_cell(particulars) {
        // Staff allocations are negated when credited.
        NameClass::Staff => Detail {
            staff: particulars.label(),
            amount: Some(if entry_type.as_deref() == Some("Cr") {
                -amount
            } else {
                amount
            }),
            entry_type,
            ..Detail::default()
        },
        // Account lines follow the reversal-of-sales convention: positive by
        // default, negative when debited.
        NameClass::Account => Detail {
            account: particulars.label(),
            amount: Some(if entry_type.as_deref() == Some("Dr") {
                -amount.abs()
            } else {
                amount.abs()
            }),
            ..Detail::default()
        },
    };
    note.details.push(detail);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn num(value: f64) -> Cell {
        Cell::Number(value)
    }

    fn sheet(data_rows: Vec<Row>) -> Vec<Row> {
        let mut rows: Vec<Row> = vec![Vec::new(); DATA_START_ROW];
        rows.extend(data_rows);
        rows
    }

    fn note_row(vch_no: &str, serial: f64, party: &str, credit: f64) -> Row {
        vec![
            num(serial),
            text(party),
            Cell::Empty,
            Cell::Empty,
            text("Credit Note"),
            text(vch_no),
            Cell::Empty,
            num(credit),
        ]
    }

    fn detail_row(particulars: &str, amount: f64, entry_type: &str) -> Row {
        vec![
            Cell::Empty,
            text(particulars),
            num(amount),
            text(entry_type),
        ]
    }

    #[test]
    fn reconstructs_a_credit_note_with_details() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            detail_row("Local Sales A/c", 5000.0, "Cr"),
            detail_row("CGST Output", 450.0, "Cr"),
        ]);
        let notes = extract_credit_notes(&rows);
        assert_eq!(1, notes.len());
        let note = &notes[0];
        assert_eq!("CN-42", note.credit_note_number);
        assert_eq!(None, note.original_sales_voucher_number);
        assert_eq!(Some("2023-03-15".to_string()), note.date_iso);
        assert_eq!(Some(45000), note.date_serial);
        assert_eq!(Some("ABC Traders".to_string()), note.party);
        assert_eq!("Credit Note", note.voucher_type);
        assert!(!note.is_cancelled);
        assert_eq!(5900.0, note.credit_amount);
        assert_eq!(2, note.details.len());
        assert_eq!(SOURCE_TAG, note.metadata.source);
    }

    #[test]
    fn cancelled_note_has_no_party_no_amount_and_no_details() {
        let rows = sheet(vec![
            note_row("CN-1", 45000.0, "(cancelled)", 5900.0),
            detail_row("Local Sales A/c", 5000.0, "Cr"),
            detail_row("Rahul Sharma", 500.0, "Dr"),
        ]);
        let notes = extract_credit_notes(&rows);
        assert_eq!(1, notes.len());
        let note = &notes[0];
        assert!(note.is_cancelled);
        assert_eq!(None, note.party);
        assert_eq!(0.0, note.credit_amount);
        assert!(note.details.is_empty());
    }

    #[test]
    fn grn_and_entered_by_rows_populate_metadata_not_details() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            vec![Cell::Empty, text("GRN No: 7731")],
            vec![Cell::Empty, text("Entered By:"), text("Suresh")],
            detail_row("Local Sales A/c", 5000.0, "Cr"),
        ]);
        let notes = extract_credit_notes(&rows);
        let note = &notes[0];
        assert_eq!(Some("7731".to_string()), note.metadata.grn_number);
        assert_eq!(Some("Suresh".to_string()), note.metadata.entered_by);
        assert_eq!(1, note.details.len());
        assert_eq!(Some("Local Sales A/c".to_string()), note.details[0].account);
    }

    #[test]
    fn grn_label_variants_are_recognized() {
        for label in ["GRN No. 7731", "grn no 7731", "GRN No:7731"] {
            let rows = sheet(vec![
                note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
                vec![Cell::Empty, text(label)],
            ]);
            let notes = extract_credit_notes(&rows);
            assert_eq!(
                Some("7731".to_string()),
                notes[0].metadata.grn_number,
                "label: {label}"
            );
        }
    }

    #[test]
    fn metadata_rows_are_captured_on_cancelled_notes_too() {
        let rows = sheet(vec![
            note_row("CN-1", 45000.0, "(cancelled)", 5900.0),
            vec![Cell::Empty, text("GRN No: 7731")],
        ]);
        let notes = extract_credit_notes(&rows);
        assert!(notes[0].is_cancelled);
        assert_eq!(Some("7731".to_string()), notes[0].metadata.grn_number);
        assert!(notes[0].details.is_empty());
    }

    #[test]
    fn staff_amounts_are_negated_when_credited() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            detail_row("Rahul Sharma", 500.0, "Cr"),
            detail_row("Rahul Sharma", 500.0, "Dr"),
        ]);
        let details = &extract_credit_notes(&rows)[0].details;
        assert_eq!(Some(-500.0), details[0].amount);
        assert_eq!(Some(500.0), details[1].amount);
    }

    #[test]
    fn account_amounts_are_negated_when_debited() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            detail_row("Local Sales A/c", 5000.0, "Dr"),
            detail_row("CGST Output", -450.0, "Cr"),
        ]);
        let details = &extract_credit_notes(&rows)[0].details;
        assert_eq!(Some(-5000.0), details[0].amount);
        // Default sign for accounts is the absolute value.
        assert_eq!(Some(450.0), details[1].amount);
    }

    #[test]
    fn amount_falls_back_to_debit_then_credit_columns() {
        let debit_only = vec![
            Cell::Empty,
            text("Rahul Sharma"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            num(250.0),
        ];
        let credit_only = vec![
            Cell::Empty,
            text("Suresh Kumar (Chd)"),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            num(300.0),
        ];
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            debit_only,
            credit_only,
        ]);
        let details = &extract_credit_notes(&rows)[0].details;
        assert_eq!(
            Detail {
                staff: Some("Rahul Sharma".to_string()),
                entry_type: Some("Dr".to_string()),
                amount: Some(250.0),
                ..Detail::default()
            },
            details[0]
        );
        assert_eq!(
            Detail {
                staff: Some("Suresh Kumar (Chd)".to_string()),
                entry_type: Some("Cr".to_string()),
                amount: Some(-300.0),
                ..Detail::default()
            },
            details[1]
        );
    }

    #[test]
    fn rows_without_any_amount_are_skipped() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            vec![Cell::Empty, text("Local Sales A/c")],
            vec![Cell::Empty, Cell::Empty, num(100.0)],
        ]);
        // First row has no amount, second has no particulars.
        assert!(extract_credit_notes(&rows)[0].details.is_empty());
    }

    #[test]
    fn start_predicate_requires_all_three_conditions() {
        let no_numeric_date = vec![
            text("2023-03-15"),
            text("ABC Traders"),
            Cell::Empty,
            Cell::Empty,
            text("Credit Note"),
            text("CN-1"),
        ];
        let wrong_type = {
            let mut row = note_row("CN-2", 45000.0, "ABC Traders", 100.0);
            row[col::VCH_TYPE] = text("Sales");
            row
        };
        let no_number = {
            let mut row = note_row("", 45000.0, "ABC Traders", 100.0);
            row[col::VCH_NO] = Cell::Empty;
            row
        };
        let rows = sheet(vec![no_numeric_date, wrong_type, no_number]);
        assert!(extract_credit_notes(&rows).is_empty());
    }

    #[test]
    fn banner_rows_are_never_scanned_for_records() {
        let mut rows: Vec<Row> = vec![note_row("CN-0", 45000.0, "In The Banner", 1.0); 10];
        rows.push(note_row("CN-42", 45000.0, "ABC Traders", 5900.0));
        let notes = extract_credit_notes(&rows);
        assert_eq!(1, notes.len());
        assert_eq!("CN-42", notes[0].credit_note_number);
    }

    #[test]
    fn unparsable_credit_amount_defaults_to_zero() {
        let mut start = note_row("CN-42", 45000.0, "ABC Traders", 0.0);
        start[col::CREDIT] = text("n/a");
        let rows = sheet(vec![start]);
        assert_eq!(0.0, extract_credit_notes(&rows)[0].credit_amount);
    }

    #[test]
    fn extraction_is_idempotent() {
        let rows = sheet(vec![
            note_row("CN-42", 45000.0, "ABC Traders", 5900.0),
            detail_row("Local Sales A/c", 5000.0, "Cr"),
        ]);
        assert_eq!(extract_credit_notes(&rows), extract_credit_notes(&rows));
    }
}
