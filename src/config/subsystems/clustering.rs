// src/config/subsystems/clustering.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    // A quote joins a cluster when it shares strictly more than this many
    // contiguous characters with one of its members
    pub cluster_min_common_len: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            cluster_min_common_len: 35,
        }
    }
}

impl FromIni for ClusteringConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "clustering" {
            return None;
        }

        match key {
            "cluster_min_common_len" => {
                match value.parse() {
                    Ok(len) => {
                        self.cluster_min_common_len = len;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid cluster_min_common_len: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
