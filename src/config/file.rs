// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub quotes_file: PathBuf,
    pub attributed_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            results_dir: PathBuf::from("Results"),
            quotes_file: PathBuf::from("quotes.csv"),
            attributed_file: PathBuf::from("quotes_disc.csv"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let path = PathBuf::from(value.trim_matches('"'));
        match key {
            "data_dir" => self.data_dir = path,
            "results_dir" => self.results_dir = path,
            "quotes_file" => self.quotes_file = path,
            "attributed_file" => self.attributed_file = path,
            "log_dir" => self.log_dir = path,
            _ => return None,
        }
        Some(Ok(()))
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("data_dir", &self.data_dir),
            ("results_dir", &self.results_dir),
            ("quotes_file", &self.quotes_file),
            ("attributed_file", &self.attributed_file),
            ("log_dir", &self.log_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Speech table of `speaker`, e.g. `Data/FHollandeSpeeches.csv`.
    pub fn speeches_path(&self, speaker: &str) -> PathBuf {
        self.data_dir.join(format!("{}Speeches.csv", speaker))
    }

    pub fn graph_path(&self, speaker: &str) -> PathBuf {
        self.results_dir.join(format!("{}_graph.csv", speaker))
    }

    pub fn clusters_path(&self, speaker: &str) -> PathBuf {
        self.results_dir.join(format!("{}_clusters.csv", speaker))
    }

    /// Create the output directories if they don't exist.
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.results_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        for file in [&self.quotes_file, &self.attributed_file] {
            if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_named_paths() {
        let files = FileConfig::default();
        assert_eq!(files.speeches_path("EMacron"), PathBuf::from("Data/EMacronSpeeches.csv"));
        assert_eq!(files.graph_path("EMacron"), PathBuf::from("Results/EMacron_graph.csv"));
        assert_eq!(files.clusters_path("EMacron"), PathBuf::from("Results/EMacron_clusters.csv"));
    }
}
