use serde::{Deserialize, Serialize};

use crate::{tx::Transaction, BlockHashMap, Hash};

/// Acceptance data of a chain block: one entry per merged block.
pub type AcceptanceData = Vec<MergesetBlockAcceptanceData>;

/// The transactions a merged block contributed and whether each was accepted.
/// The merged block's coinbase is always the first transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergesetBlockAcceptanceData {
    pub block_hash: Hash,
    pub accepted_transactions: Vec<TransactionAcceptanceData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAcceptanceData {
    pub transaction: Transaction,
    pub fee: u64,
    pub is_accepted: bool,
}

impl MergesetBlockAcceptanceData {
    pub fn new(block_hash: Hash, accepted_transactions: Vec<TransactionAcceptanceData>) -> Self {
        Self { block_hash, accepted_transactions }
    }

    /// Sum of the fees paid by the accepted transactions, `None` on overflow
    pub fn total_accepted_fees(&self) -> Option<u64> {
        self.accepted_transactions.iter().filter(|tx| tx.is_accepted).try_fold(0u64, |total, tx| total.checked_add(tx.fee))
    }
}

/// Indexes acceptance data by merged block hash
pub fn acceptance_data_by_block(acceptance_data: &AcceptanceData) -> BlockHashMap<&MergesetBlockAcceptanceData> {
    acceptance_data.iter().map(|entry| (entry.block_hash, entry)).collect()
}
