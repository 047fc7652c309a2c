use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::{Args, RecordKind};
use crate::{export, import};

/// Batch driver: parses every export file under the input path, each inside
/// its own failure boundary, so one corrupt workbook never aborts the rest.
pub fn main(args: Args) -> Result<()> {
    let files = spreadsheet_files(&args.input)?;
    if files.is_empty() {
        println!("No spreadsheet files found at {}", args.input.display());
        return Ok(());
    }

    let mut imported = 0;
    let mut failed = 0;
    for file in &files {
        match import_file(file, args.kind, args.out.as_deref()) {
            Ok(()) => imported += 1,
            Err(error) => {
                failed += 1;
                log::error!("{}: {:#}", file.display(), error);
            }
        }
    }
    println!("Imported {} file(s), {} failed", imported, failed);
    Ok(())
}

fn import_file(file: &Path, kind: RecordKind, out_dir: Option<&Path>) -> Result<()> {
    match kind {
        RecordKind::Vouchers => output(file, &import::load_vouchers(file)?, out_dir),
        RecordKind::CreditNotes => output(file, &import::load_credit_notes(file)?, out_dir),
    }
}

fn output<T: Serialize>(file: &Path, records: &[T], out_dir: Option<&Path>) -> Result<()> {
    let Some(dir) = out_dir else {
        return export::print_records(records);
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let target = dir
        .join(file.file_stem().unwrap_or_default())
        .with_extension("json");
    let writer = fs::File::create(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;
    export::write_records(records, writer)
}

/// A single file is taken as-is; a directory is scanned (non-recursively) for
/// spreadsheet files, in name order. Other files are ignored.
fn spreadsheet_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let entries = fs::read_dir(input)
        .with_context(|| format!("Failed to read directory {}", input.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|extension| extension.to_str()),
                Some("xlsx" | "xls" | "xlsb")
            )
        })
        .collect();
    files.sort();
    Ok(files)
}
