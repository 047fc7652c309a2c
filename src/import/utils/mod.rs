mod date;
mod names;

pub use date::{normalize_date, NormalizedDate};
pub use names::{classify_cell, classify_name, NameClass};
