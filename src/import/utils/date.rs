use chrono::{Duration, NaiveDate};

use crate::sheet::Cell;

/// Result of normalizing a spreadsheet date cell: the UTC calendar date as an
/// ISO `YYYY-MM-DD` string, plus the raw day-count serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    pub iso: Option<String>,
    pub serial: Option<i64>,
}

impl NormalizedDate {
    fn unset() -> Self {
        NormalizedDate {
            iso: None,
            serial: None,
        }
    }
}

/// Day zero of the spreadsheet serial date system. Serial 1 is 1899-12-31.
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap()
}

/// Converts a date cell into an ISO date string and its serial day count.
///
/// Native date values are taken at their UTC calendar date; numeric cells are
/// interpreted as day-count serials, with any time-of-day fraction truncated.
/// Anything else (including zero or non-finite numbers) normalizes to unset.
pub fn normalize_date(cell: &Cell) -> NormalizedDate {
    match cell {
        Cell::Date(datetime) => {
            let date = datetime.date();
            NormalizedDate {
                iso: Some(date.format("%Y-%m-%d").to_string()),
                serial: Some((date - serial_epoch()).num_days()),
            }
        }
        Cell::Number(number) if number.is_finite() && *number != 0.0 => {
            let days = number.floor() as i64;
            NormalizedDate {
                iso: Duration::try_days(days)
                    .and_then(|offset| serial_epoch().checked_add_signed(offset))
                    .map(|date| date.format("%Y-%m-%d").to_string()),
                serial: Some(days),
            }
        }
        _ => NormalizedDate::unset(),
    }
}
