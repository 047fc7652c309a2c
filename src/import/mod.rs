use anyhow::Result;
use std::path::Path;

mod assemble;
pub mod credit_notes;
pub mod utils;
pub mod vouchers;

use crate::records::{CreditNote, Voucher};
use crate::sheet;

/// Reads one voucher export workbook and reconstructs its vouchers.
///
/// Only file-level problems (unreadable workbook, no sheet) are errors;
/// unexpected but readable data degrades to absent fields or an empty list.
pub fn load_vouchers(path: &Path) -> Result<Vec<Voucher>> {
    let rows = sheet::read_rows(path)?;
    let vouchers = vouchers::extract_vouchers(&rows);
    log::info!(
        "Reconstructed {} voucher(s) from {}",
        vouchers.len(),
        path.display()
    );
    Ok(vouchers)
}

/// Reads one credit-note export workbook and reconstructs its credit notes.
pub fn load_credit_notes(path: &Path) -> Result<Vec<CreditNote>> {
    let rows = sheet::read_rows(path)?;
    let credit_notes = credit_notes::extract_credit_notes(&rows);
    log::info!(
        "Reconstructed {} credit note(s) from {}",
        credit_notes.len(),
        path.display()
    );
    Ok(credit_notes)
}
