// src/config/subsystems/extraction.rs

use chrono::NaiveDate;
use regex::Regex;
use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    // Quotes must be strictly longer than this, in characters
    pub min_quote_chars: usize,
    // Articles whose document matches are skipped (speaker homonyms etc.)
    pub exclude_pattern: String,
    // Articles dated on or before this day are skipped, empty for none
    pub min_doc_date_str: String,
    #[serde(skip)]
    pub min_doc_date: Option<NaiveDate>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_quote_chars: 35,
            exclude_pattern: String::new(),
            min_doc_date_str: String::new(),
            min_doc_date: None,
        }
    }
}

impl FromIni for ExtractionConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "extraction" {
            return None;
        }

        match key {
            "min_quote_chars" => {
                match value.parse() {
                    Ok(len) => {
                        self.min_quote_chars = len;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid min_quote_chars: {}", value)
                    ))),
                }
            },
            "exclude_pattern" => {
                self.exclude_pattern = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            "min_doc_date" => {
                let raw = value.trim_matches('"');
                if raw.is_empty() {
                    self.min_doc_date_str.clear();
                    self.min_doc_date = None;
                    return Some(Ok(()));
                }
                match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => {
                        self.min_doc_date_str = raw.to_string();
                        self.min_doc_date = Some(date);
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid min_doc_date (expected YYYY-MM-DD): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl ExtractionConfig {
    /// Compiled exclusion pattern, `None` when unset.
    pub fn exclude_regex(&self) -> Result<Option<Regex>> {
        if self.exclude_pattern.is_empty() {
            return Ok(None);
        }
        Ok(Some(Regex::new(&self.exclude_pattern)?))
    }

    pub fn validate(&self) -> Result<()> {
        self.exclude_regex()?;
        Ok(())
    }
}
