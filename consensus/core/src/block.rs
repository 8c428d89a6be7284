use serde::{Deserialize, Serialize};

use crate::{
    header::Header,
    tx::{Transaction, COINBASE_TRANSACTION_INDEX},
    Hash,
};

/// Complete block structure including header and transactions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: Header,
    /// The coinbase transaction comes first
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.header.is_genesis()
    }

    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.get(COINBASE_TRANSACTION_INDEX)
    }
}
