pub mod articles;
pub mod speeches;
pub mod quotes;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("CSV error: {0}")]
   CsvError(#[from] csv::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("Invalid date: {0}")]
   InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

/// Parse a `YYYY-MM-DD` date. Timestamps (RFC 3339 or `YYYY-MM-DD HH:MM:SS`)
/// are accepted and truncated to their day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

pub use self::articles::{Article, QuoteExtractor};
pub use self::quotes::{QuoteReader, QuoteRow, AttributedRow, read_attributed_quotes};
pub use self::speeches::{read_speeches, load_speeches};
