//! Node-level consensus configuration, loaded from TOML.

use consensus_core::config::params::{NetworkType, Params};
use consensus_core::constants::perf::DEFAULT_STORE_CACHE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Selects a network and optionally overrides a few of its consensus parameters.
///
/// ```toml
/// network = "devnet"
/// merge_depth = 100
/// store_cache_size = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkType,
    pub merge_depth: Option<u64>,
    pub deflationary_phase_daa_score: Option<u64>,
    pub coinbase_payload_script_public_key_max_len: Option<u8>,
    /// Number of committed values kept by the store cache
    pub store_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkType::default(),
            merge_depth: None,
            deflationary_phase_daa_score: None,
            coinbase_payload_script_public_key_max_len: None,
            store_cache_size: DEFAULT_STORE_CACHE_SIZE,
        }
    }
}

impl Config {
    pub fn for_network(network: NetworkType) -> Self {
        Self { network, ..Default::default() }
    }

    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Network params with the configured overrides applied
    pub fn params(&self) -> Params {
        let mut params = self.network.params();
        if let Some(merge_depth) = self.merge_depth {
            params.merge_depth = merge_depth;
        }
        if let Some(score) = self.deflationary_phase_daa_score {
            params.deflationary_phase_daa_score = score;
        }
        if let Some(max_len) = self.coinbase_payload_script_public_key_max_len {
            params.coinbase_payload_script_public_key_max_len = max_len;
        }
        params
    }
}
