use anyhow::Result;
use serde::Serialize;
use std::io::{stdout, Write};

/// Serializes the record list as one pretty-printed JSON document.
pub fn write_records<T: Serialize>(records: &[T], writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

pub fn print_records<T: Serialize>(records: &[T]) -> Result<()> {
    if records.is_empty() {
        println!("No records to export");
        return Ok(());
    }
    write_records(records, stdout())?;
    println!();
    Ok(())
}
