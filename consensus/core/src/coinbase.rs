use serde::{Deserialize, Serialize};

use crate::tx::ScriptPublicKey;

/// Miner-provided part of a coinbase payload: the script to pay and free-form extra data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinbaseData {
    pub script_public_key: ScriptPublicKey,
    pub extra_data: Vec<u8>,
}

impl CoinbaseData {
    pub fn new(script_public_key: ScriptPublicKey, extra_data: Vec<u8>) -> Self {
        Self { script_public_key, extra_data }
    }
}

/// Everything a coinbase payload commits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinbaseFields {
    pub blue_score: u64,
    pub subsidy: u64,
    pub coinbase_data: CoinbaseData,
}
