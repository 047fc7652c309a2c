use crate::sheet::Row;

/// Folds rows into hierarchical records using a single "current open record"
/// slot.
///
/// A row either opens a new record (sealing the previous one), is absorbed
/// into the open record, or is discarded when no record is open yet. The final
/// open record is sealed when the rows run out, so a trailing record without a
/// following header row is never lost.
pub(crate) fn assemble_records<R>(
    rows: &[Row],
    data_start: usize,
    mut open_record: impl FnMut(&Row) -> Option<R>,
    mut absorb_row: impl FnMut(&mut R, &Row),
) -> Vec<R> {
    let mut records = Vec::new();
    let mut current: Option<R> = None;
    for row in rows.iter().skip(data_start) {
        if let Some(record) = open_record(row) {
            if let Some(sealed) = current.take() {
                records.push(sealed);
            }
            current = Some(record);
        } else if let Some(record) = current.as_mut() {
            absorb_row(record, row);
        }
    }
    if let Some(sealed) = current.take() {
        records.push(sealed);
    }
    records
}
