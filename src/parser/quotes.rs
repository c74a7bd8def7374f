use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::types::{AttributedQuote, QuoteRecord, SpeechId};
use crate::utils::discarded_logger::DISCARDED_ROWS;
use super::{parse_date, ParserError, Result};

/// One row of the extracted quote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub quote_id: String,
    #[serde(default)]
    pub native_id: String,
    #[serde(default)]
    pub doc_time: String,
    #[serde(default)]
    pub media: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub urls: String,
}

impl QuoteRow {
    /// Typed quote, or the reason the row cannot enter the matcher.
    pub fn into_record(self, min_quote_chars: usize) -> std::result::Result<QuoteRecord, String> {
        let date = parse_date(&self.doc_time)
            .ok_or_else(|| format!("unparsable date '{}'", self.doc_time))?;
        let len = self.quote.chars().count();
        if len <= min_quote_chars {
            return Err(format!("quote of {} characters", len));
        }
        Ok(QuoteRecord {
            id: self.quote_id,
            native_id: self.native_id,
            date,
            media: self.media,
            title: self.title,
            text: self.quote,
            urls: self.urls,
        })
    }
}

impl From<&QuoteRecord> for QuoteRow {
    fn from(quote: &QuoteRecord) -> Self {
        Self {
            quote_id: quote.id.clone(),
            native_id: quote.native_id.clone(),
            doc_time: quote.date.format("%Y-%m-%d").to_string(),
            media: quote.media.clone(),
            title: quote.title.clone(),
            quote: quote.text.clone(),
            urls: quote.urls.clone(),
        }
    }
}

/// Lazy reader over a quote table, yielding `(position, quote)`.
///
/// `position` is the data row number. Malformed rows, unparsable dates and
/// quotes too short are dropped here and never reach the matcher; they still
/// consume a position. I/O failures end the iteration with an error.
pub struct QuoteReader<R: Read> {
    records: csv::DeserializeRecordsIntoIter<R, QuoteRow>,
    position: usize,
    min_quote_chars: usize,
    dropped: usize,
}

impl QuoteReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, min_quote_chars: usize) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Reading quotes from {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file), min_quote_chars))
    }
}

impl<R: Read> QuoteReader<R> {
    pub fn new(reader: R, min_quote_chars: usize) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_deserialize();
        Self {
            records,
            position: 0,
            min_quote_chars,
            dropped: 0,
        }
    }

    /// Rows dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn drop_row(&mut self, position: usize, reason: &str, text: &str) {
        debug!("Dropping quote row {}: {}", position, reason);
        DISCARDED_ROWS.log_row("quotes", position, reason, text);
        self.dropped += 1;
    }
}

impl<R: Read> Iterator for QuoteReader<R> {
    type Item = Result<(usize, QuoteRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.records.next()?;
            let position = self.position;
            self.position += 1;

            match result {
                Ok(row) => {
                    let text = row.quote.clone();
                    match row.into_record(self.min_quote_chars) {
                        Ok(quote) => return Some(Ok((position, quote))),
                        Err(reason) => self.drop_row(position, &reason, &text),
                    }
                }
                Err(e) if e.is_io_error() => return Some(Err(ParserError::CsvError(e))),
                Err(e) => {
                    warn!("Error parsing quote row #{}: {}. Skipping.", position, e);
                    self.drop_row(position, "malformed row", &e.to_string());
                }
            }
        }
    }
}

/// One row of the attributed quote table written in streaming mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedRow {
    pub position: usize,
    pub disc_id: SpeechId,
    pub quote_id: String,
    pub native_id: String,
    pub doc_time: String,
    pub media: String,
    pub title: String,
    pub quote: String,
    pub urls: String,
}

impl From<&AttributedQuote> for AttributedRow {
    fn from(attributed: &AttributedQuote) -> Self {
        let row = QuoteRow::from(&attributed.quote);
        Self {
            position: attributed.position,
            disc_id: attributed.discourse,
            quote_id: row.quote_id,
            native_id: row.native_id,
            doc_time: row.doc_time,
            media: row.media,
            title: row.title,
            quote: row.quote,
            urls: row.urls,
        }
    }
}

impl TryFrom<AttributedRow> for AttributedQuote {
    type Error = ParserError;

    fn try_from(row: AttributedRow) -> Result<Self> {
        let date = parse_date(&row.doc_time).ok_or_else(|| {
            ParserError::InvalidDate(format!("attributed quote {}: '{}'", row.position, row.doc_time))
        })?;
        Ok(AttributedQuote {
            position: row.position,
            discourse: row.disc_id,
            quote: QuoteRecord {
                id: row.quote_id,
                native_id: row.native_id,
                date,
                media: row.media,
                title: row.title,
                text: row.quote,
                urls: row.urls,
            },
        })
    }
}

/// Read back an attributed quote table, in file order.
///
/// The table is written by this crate, so any bad row is an error rather
/// than a dropped input.
pub fn read_attributed_quotes<R: Read>(reader: R) -> Result<Vec<AttributedQuote>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    csv_reader
        .deserialize::<AttributedRow>()
        .map(|row| AttributedQuote::try_from(row?))
        .collect()
}
