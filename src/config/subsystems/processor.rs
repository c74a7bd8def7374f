// src/config/subsystems/processor.rs

use std::path::PathBuf;

use serde::{Serialize, Deserialize};
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    // Quotes per attribution pass, no effect on results
    pub batch_size: usize,
    // 0 lets rayon pick
    pub parallel_thread_count: usize,
    // Cluster discourse groups on separate workers
    pub parallel_clustering: bool,

    // Logging
    pub log_level: String,
    #[serde(skip)]
    level_filter: Option<LevelFilter>,
    pub debug: bool,
    // Whether to log dropped input rows for review
    pub log_discarded_rows: bool,
    // Unset means `discarded_rows.log` under the log directory
    pub discarded_log_path: Option<PathBuf>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            parallel_thread_count: 0,
            parallel_clustering: true,
            log_level: "info".to_string(),
            level_filter: Some(LevelFilter::Info),
            debug: false,
            log_discarded_rows: false,
            discarded_log_path: None,
        }
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| Error::Config(
        format!("Invalid {} value (must be true/false): {}", key, value)
    ))
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "batch_size" => {
                match value.parse() {
                    Ok(size) if size > 0 => {
                        self.batch_size = size;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid batch_size (must be > 0): {}", value)
                    ))),
                }
            },
            "parallel_thread_count" => {
                match value.parse() {
                    Ok(count) => {
                        self.parallel_thread_count = count;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid parallel_thread_count: {}", value)
                    ))),
                }
            },
            "parallel_clustering" => Some(parse_flag(key, value).map(|flag| self.parallel_clustering = flag)),
            "debug" => Some(parse_flag(key, value).map(|flag| self.debug = flag)),
            "log_discarded_rows" => Some(parse_flag(key, value).map(|flag| self.log_discarded_rows = flag)),
            "discarded_log_path" => {
                let path = value.trim_matches('"');
                self.discarded_log_path = (!path.is_empty()).then(|| PathBuf::from(path));
                Some(Ok(()))
            },
            "log_level" => {
                let level_str = value.trim().to_lowercase();
                Some(match parse_level(&level_str) {
                    Some(level) => {
                        self.log_level = level_str;
                        self.level_filter = Some(level);
                        Ok(())
                    },
                    None => Err(Error::Config(
                        format!("Invalid log level '{}'. Must be one of: none, error, warn, info, debug, trace", value)
                    )),
                })
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        // If we have a cached level, return it
        if let Some(level) = self.level_filter {
            return level;
        }
        parse_level(self.log_level.trim().to_lowercase().as_str()).unwrap_or(LevelFilter::Info)
    }

    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = match level {
            LevelFilter::Off => "none".to_string(),
            other => other.as_str().to_lowercase(),
        };
        self.level_filter = Some(level);
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config(
                "batch_size must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
