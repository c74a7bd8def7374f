// src/config/subsystems/attribution.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// How attributed quotes travel from attribution to clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum PipelineMode {
    /// Attributed quotes stay in memory
    Exact,
    /// Attributed quotes are flushed batch by batch to an intermediate table
    Streaming,
}

impl PipelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineMode::Exact => "exact",
            PipelineMode::Streaming => "streaming",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "streaming" => Some(Self::Streaming),
            _ => None,
        }
    }

    /// Discourse threshold used when none is configured.
    pub fn default_threshold(&self) -> f64 {
        match self {
            PipelineMode::Exact => 55.0,
            PipelineMode::Streaming => 85.0,
        }
    }
}

impl Default for PipelineMode {
    fn default() -> Self {
        Self::Streaming
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionConfig {
    pub mode: PipelineMode,
    // Lookback window in days, inclusive on both ends
    pub trailing_days: u32,
    // Minimum partial-ratio score (strict), mode default when unset
    pub discourse_threshold: Option<f64>,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            trailing_days: 7,
            discourse_threshold: None,
        }
    }
}

impl FromIni for AttributionConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "attribution" {
            return None;
        }

        match key {
            "mode" => {
                match PipelineMode::from_str(value) {
                    Some(mode) => {
                        self.mode = mode;
                        Some(Ok(()))
                    },
                    None => Some(Err(Error::Config(
                        format!("Invalid mode (must be 'exact' or 'streaming'): {}", value)
                    ))),
                }
            },
            "trailing_days" => {
                match value.parse() {
                    Ok(days) => {
                        self.trailing_days = days;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid trailing_days: {}", value)
                    ))),
                }
            },
            "discourse_threshold" => {
                match value.parse::<f64>() {
                    Ok(score) if (0.0..=100.0).contains(&score) => {
                        self.discourse_threshold = Some(score);
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid discourse_threshold (must be between 0 and 100): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl AttributionConfig {
    pub fn threshold(&self) -> f64 {
        self.discourse_threshold.unwrap_or_else(|| self.mode.default_threshold())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.discourse_threshold {
            if !(0.0..=100.0).contains(&score) {
                return Err(Error::Config(
                    format!("discourse_threshold must be between 0 and 100, got {}", score)
                ));
            }
        }
        Ok(())
    }
}
