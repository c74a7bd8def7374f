pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::error::Result;
use log::{info, warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoursConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub extraction: subsystems::ExtractionConfig,
    pub attribution: subsystems::AttributionConfig,
    pub clustering: subsystems::ClusteringConfig,
    pub processor: subsystems::ProcessorConfig,
}

impl DiscoursConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.extraction.validate()?;
        self.attribution.validate()?;
        self.clustering.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    /// Where dropped input rows are logged when `log_discarded_rows` is on.
    pub fn discarded_log_path(&self) -> PathBuf {
        match &self.processor.discarded_log_path {
            Some(path) => path.clone(),
            None => self.files.log_dir.join("discarded_rows.log"),
        }
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;
        Self::from_ini_str(&content)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "files" => config.files.from_ini_section(&current_section, key, value),
                    "extraction" => config.extraction.from_ini_section(&current_section, key, value),
                    "attribution" => config.attribution.from_ini_section(&current_section, key, value),
                    "clustering" => config.clustering.from_ini_section(&current_section, key, value),
                    "processor" => config.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                } {
                    // A bad value is fatal, a misspelt key only warns
                    result?;
                } else {
                    warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section);
                }
            }
        }

        config.validate()?;
        info!("Configuration loaded: mode={}, threshold={}, trailing_days={}, min_common_len={}",
            config.attribution.mode.as_str(),
            config.attribution.threshold(),
            config.attribution.trailing_days,
            config.clustering.cluster_min_common_len);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsystems::PipelineMode;

    #[test]
    fn defaults_match_documented_values() {
        let config = DiscoursConfig::default();
        assert_eq!(config.attribution.mode, PipelineMode::Streaming);
        assert_eq!(config.attribution.trailing_days, 7);
        assert_eq!(config.attribution.threshold(), 85.0);
        assert_eq!(config.clustering.cluster_min_common_len, 35);
        assert_eq!(config.extraction.min_quote_chars, 35);
        assert_eq!(config.processor.batch_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_are_dispatched() {
        let ini = r#"
# test configuration
[files]
data_dir = "corpus"
results_dir = out

[attribution]
mode = exact
trailing_days = 10

[clustering]
cluster_min_common_len = 40

[extraction]
exclude_pattern = hollandais|en Hollande
min_doc_date = 1995-01-01

[processor]
batch_size = 250
log_level = debug
"#;
        let config = DiscoursConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.files.data_dir, std::path::PathBuf::from("corpus"));
        assert_eq!(config.files.results_dir, std::path::PathBuf::from("out"));
        assert_eq!(config.attribution.mode, PipelineMode::Exact);
        assert_eq!(config.attribution.threshold(), 55.0);
        assert_eq!(config.attribution.trailing_days, 10);
        assert_eq!(config.clustering.cluster_min_common_len, 40);
        assert_eq!(config.extraction.exclude_pattern, "hollandais|en Hollande");
        assert!(config.extraction.min_doc_date.is_some());
        assert_eq!(config.processor.batch_size, 250);
        assert_eq!(config.processor.get_log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn explicit_threshold_overrides_mode_default() {
        let ini = "[attribution]\nmode = streaming\ndiscourse_threshold = 70\n";
        let config = DiscoursConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.attribution.threshold(), 70.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(DiscoursConfig::from_ini_str("[attribution]\ndiscourse_threshold = 140\n").is_err());
        assert!(DiscoursConfig::from_ini_str("[processor]\nbatch_size = 0\n").is_err());
        assert!(DiscoursConfig::from_ini_str("[attribution]\nmode = fuzzy\n").is_err());
        assert!(DiscoursConfig::from_ini_str("[extraction]\nexclude_pattern = (unclosed\n").is_err());
    }

    #[test]
    fn discarded_log_follows_log_dir() {
        let config = DiscoursConfig::default();
        assert_eq!(config.discarded_log_path(), PathBuf::from("logs/discarded_rows.log"));

        let config = DiscoursConfig::from_ini_str("[files]\nlog_dir = /var/log/discours\n").unwrap();
        assert_eq!(config.discarded_log_path(), PathBuf::from("/var/log/discours/discarded_rows.log"));

        let ini = "[files]\nlog_dir = /var/log/discours\n[processor]\ndiscarded_log_path = rejets.log\n";
        let config = DiscoursConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.discarded_log_path(), PathBuf::from("rejets.log"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = DiscoursConfig::from_ini_str("[attribution]\nspeaker = EMacron\n[misc]\nfoo = bar\n").unwrap();
        assert_eq!(config.attribution.trailing_days, 7);
    }
}
