use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Reconstruct vouchers and credit notes from Tally day-book spreadsheet exports
#[derive(Parser, Debug)]
pub struct Args {
    /// Spreadsheet file, or directory containing the export files
    #[clap(short, long)]
    pub input: PathBuf,

    /// Directory to write one JSON document per input file; prints to stdout if omitted
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Which export layout the input files use
    #[clap(short, long, value_enum)]
    pub kind: RecordKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Vouchers,
    CreditNotes,
}

pub fn parse() -> Args {
    Args::parse()
}
