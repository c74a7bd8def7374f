use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::types::SpeechRecord;
use crate::utils::discarded_logger::DISCARDED_ROWS;
use super::{parse_date, Result};

#[derive(Debug, Deserialize)]
struct SpeechRow {
    #[serde(default)]
    speaker: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    content: String,
}

/// Read a speech table (`speaker,date,content`, extra columns ignored).
///
/// A speech's id is its data row number, so dropped rows keep their number
/// and ids stay stable across reads. Rows whose date does not parse are
/// dropped.
pub fn read_speeches<R: Read>(reader: R) -> Result<Vec<SpeechRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut speeches = Vec::new();
    let mut dropped = 0usize;

    for (row, result) in csv_reader.deserialize::<SpeechRow>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Error parsing speech row #{}: {}. Skipping.", row, e);
                DISCARDED_ROWS.log_row("speeches", row, "malformed row", &e.to_string());
                dropped += 1;
                continue;
            }
        };

        match parse_date(&record.date) {
            Some(date) => speeches.push(SpeechRecord {
                id: row,
                speaker: record.speaker,
                date,
                content: record.content,
            }),
            None => {
                DISCARDED_ROWS.log_row("speeches", row, "unparsable date", &record.date);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!("Dropped {} speech rows with unparsable content or date", dropped);
    }
    Ok(speeches)
}

pub fn load_speeches<P: AsRef<Path>>(path: P) -> Result<Vec<SpeechRecord>> {
    let file = File::open(path.as_ref())?;
    let speeches = read_speeches(BufReader::new(file))?;
    info!("Loaded {} speeches from {}", speeches.len(), path.as_ref().display());
    Ok(speeches)
}
