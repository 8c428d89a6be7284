use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::genesis::{GenesisBlock, DEVNET_GENESIS, GENESIS, TESTNET_GENESIS};
use crate::{
    constants::{COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH, GHOSTDAG_K, MAX_BLOCK_LEVEL, MERGE_DEPTH, SECONDS_PER_MONTH, SOMPI_PER_CRYPTIX},
    BlockLevel, Hash, KType,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
}

impl NetworkType {
    pub fn params(self) -> Params {
        match self {
            NetworkType::Mainnet => MAINNET_PARAMS,
            NetworkType::Testnet => TESTNET_PARAMS,
            NetworkType::Devnet => DEVNET_PARAMS,
        }
    }

    pub fn genesis(self) -> GenesisBlock {
        match self {
            NetworkType::Mainnet => GENESIS,
            NetworkType::Testnet => TESTNET_GENESIS,
            NetworkType::Devnet => DEVNET_GENESIS,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
            NetworkType::Devnet => "devnet",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown network type: {0}")]
pub struct NetworkTypeError(pub String);

impl FromStr for NetworkType {
    type Err = NetworkTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(NetworkType::Mainnet),
            "testnet" => Ok(NetworkType::Testnet),
            "devnet" => Ok(NetworkType::Devnet),
            _ => Err(NetworkTypeError(s.to_owned())),
        }
    }
}

/// Consensus parameters. Contains settings and configurations which are consensus-sensitive.
/// Changing one of these on a network node would exclude and prevent it from reaching consensus
/// with the other unmodified nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub net: NetworkType,
    pub genesis_hash: Hash,

    /// Subsidy paid by the genesis block, regardless of its DAA score
    pub genesis_reward: u64,

    /// Subsidy of every block below `deflationary_phase_daa_score`
    pub pre_deflationary_phase_base_subsidy: u64,

    /// DAA score from which the monthly subsidy schedule applies
    pub deflationary_phase_daa_score: u64,

    /// Subsidy of the first deflationary month; halves every year
    pub deflationary_phase_base_subsidy: u64,

    pub coinbase_payload_script_public_key_max_len: u8,

    /// Blue score distance of the merge depth root from a block
    pub merge_depth: u64,

    pub max_block_level: BlockLevel,
    pub ghostdag_k: KType,
}

impl Params {
    pub fn genesis(&self) -> GenesisBlock {
        self.net.genesis()
    }
}

impl Default for Params {
    fn default() -> Self {
        MAINNET_PARAMS
    }
}

impl From<NetworkType> for Params {
    fn from(net: NetworkType) -> Self {
        net.params()
    }
}

pub const MAINNET_PARAMS: Params = Params {
    net: NetworkType::Mainnet,
    genesis_hash: GENESIS.hash,
    genesis_reward: SOMPI_PER_CRYPTIX,
    pre_deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    // Six months minus three days of one-second blocks
    deflationary_phase_daa_score: 6 * SECONDS_PER_MONTH - 259_200,
    deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    coinbase_payload_script_public_key_max_len: COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH,
    merge_depth: MERGE_DEPTH,
    max_block_level: MAX_BLOCK_LEVEL,
    ghostdag_k: GHOSTDAG_K,
};

pub const TESTNET_PARAMS: Params = Params {
    net: NetworkType::Testnet,
    genesis_hash: TESTNET_GENESIS.hash,
    genesis_reward: SOMPI_PER_CRYPTIX,
    pre_deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    deflationary_phase_daa_score: SECONDS_PER_MONTH,
    deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    coinbase_payload_script_public_key_max_len: COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH,
    merge_depth: MERGE_DEPTH,
    max_block_level: MAX_BLOCK_LEVEL,
    ghostdag_k: GHOSTDAG_K,
};

pub const DEVNET_PARAMS: Params = Params {
    net: NetworkType::Devnet,
    genesis_hash: DEVNET_GENESIS.hash,
    genesis_reward: SOMPI_PER_CRYPTIX,
    pre_deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    deflationary_phase_daa_score: 86_400,
    deflationary_phase_base_subsidy: 2 * SOMPI_PER_CRYPTIX,
    coinbase_payload_script_public_key_max_len: COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH,
    merge_depth: 360,
    max_block_level: MAX_BLOCK_LEVEL,
    ghostdag_k: GHOSTDAG_K,
};
