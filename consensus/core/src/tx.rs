//!
//! # Transaction
//!
//! Consensus [`Transaction`] structure and related types. Only the parts the
//! coinbase and acceptance machinery consume are modelled here.
//!

mod script_public_key;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{
    hashing,
    subnets::{self, SubnetworkId},
    Hash,
};
pub use script_public_key::{ScriptPublicKey, ScriptPublicKeyVersion, ScriptVec, SCRIPT_VECTOR_SIZE};

/// COINBASE_TRANSACTION_INDEX is the index of the coinbase transaction in every block
pub const COINBASE_TRANSACTION_INDEX: usize = 0;

/// A 32-byte transaction identifier.
pub type TransactionId = Hash;

pub type TransactionIndexType = u32;

/// Represents a transaction outpoint
#[derive(Eq, Default, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: TransactionIndexType,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a transaction input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u64,
    pub sig_op_count: u8,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u64, sig_op_count: u8) -> Self {
        Self { previous_outpoint, signature_script, sequence, sig_op_count }
    }
}

/// Represents a transaction output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        Self { value, script_public_key }
    }
}

/// Represents a transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,
    pub subnetwork_id: SubnetworkId,
    pub gas: u64,
    pub payload: Vec<u8>,

    // A field that is used to cache the transaction ID.
    // Always use the corresponding self.id() instead of accessing this field directly
    id: TransactionId,
}

impl Transaction {
    pub fn new(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u64,
        subnetwork_id: SubnetworkId,
        gas: u64,
        payload: Vec<u8>,
    ) -> Self {
        let mut tx = Self::new_non_finalized(version, inputs, outputs, lock_time, subnetwork_id, gas, payload);
        tx.finalize();
        tx
    }

    pub fn new_non_finalized(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u64,
        subnetwork_id: SubnetworkId,
        gas: u64,
        payload: Vec<u8>,
    ) -> Self {
        Self { version, inputs, outputs, lock_time, subnetwork_id, gas, payload, id: Default::default() }
    }

    /// Determines whether or not a transaction is a coinbase transaction. A coinbase
    /// transaction is a special transaction created by miners that distributes fees and block subsidy
    /// to the previous blocks' miners, and specifies the script_pub_key that will be used to pay the current
    /// miner in future blocks.
    pub fn is_coinbase(&self) -> bool {
        self.subnetwork_id == subnets::SUBNETWORK_ID_COINBASE
    }

    /// Recompute and finalize the tx id based on updated tx fields
    pub fn finalize(&mut self) {
        self.id = hashing::tx::id(self);
    }

    /// Returns the transaction ID
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Full transaction hash, covering signature scripts as well
    pub fn hash(&self) -> Hash {
        hashing::tx::hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinbase_like() -> Transaction {
        Transaction::new(
            0,
            vec![],
            vec![
                TransactionOutput::new(300, ScriptPublicKey::from_vec(0, vec![1, 2, 3])),
                TransactionOutput::new(200, ScriptPublicKey::from_vec(0, vec![4, 5])),
            ],
            0,
            subnets::SUBNETWORK_ID_COINBASE,
            0,
            vec![9, 9, 9],
        )
    }

    #[test]
    fn test_coinbase_detection_and_values() {
        let tx = coinbase_like();
        assert!(tx.is_coinbase());
        assert_eq!(tx.outputs.iter().map(|output| output.value).sum::<u64>(), 500);

        let mut native = tx.clone();
        native.subnetwork_id = subnets::SUBNETWORK_ID_NATIVE;
        assert!(!native.is_coinbase());
    }

    #[test]
    fn test_finalize_refreshes_id() {
        let mut tx = coinbase_like();
        let id = tx.id();
        assert_eq!(id, hashing::tx::id(&tx));
        tx.payload.push(1);
        assert_eq!(tx.id(), id);
        tx.finalize();
        assert_ne!(tx.id(), id);
    }
}
