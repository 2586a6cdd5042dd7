//! Column conversions shared by the repository and report queries

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;
use transit_core::Money;

/// Text layout of every persisted timestamp; `strftime('%H', ..)` reads it back
///
/// `%.f` keeps fractional seconds (3, 6 or 9 digits) and writes nothing for a
/// whole second, so text order stays chronological.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Read a timestamp written with [`TIMESTAMP_FORMAT`]
pub fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let text: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read an integer-cents column as `Money`
pub fn money_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Money> {
    let cents: i64 = row.get(idx)?;
    Money::from_cents(cents)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Read an optional non-negative integer column (house numbers, minutes)
pub fn optional_u32_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u32>> {
    let value: Option<i64> = row.get(idx)?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
            })
        })
        .transpose()
}

/// Count columns are never negative
pub fn count_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let count: i64 = row.get(idx)?;
    u64::try_from(count)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at_milli(milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_milli_opt(7, 5, 9, milli)
            .unwrap()
    }

    #[test]
    fn test_timestamp_format_keeps_subseconds() {
        assert_eq!(format_timestamp(&at_milli(250)), "2024-05-01 07:05:09.250");
        assert_eq!(format_timestamp(&at_milli(0)), "2024-05-01 07:05:09");
    }

    #[test]
    fn test_timestamp_text_reads_back_exactly() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        for at in [at_milli(0), at_milli(250)] {
            let read = conn
                .query_row("SELECT ?1", [format_timestamp(&at)], |row| {
                    timestamp_column(row, 0)
                })
                .unwrap();
            assert_eq!(read, at);
        }
    }

    #[test]
    fn test_timestamp_text_orders_chronologically() {
        let whole = format_timestamp(&at_milli(0));
        let later = format_timestamp(&at_milli(250));
        let next_second = format_timestamp(&(at_milli(0) + chrono::Duration::seconds(1)));
        assert!(whole < later);
        assert!(later < next_second);
    }
}
