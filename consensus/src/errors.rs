use consensus_core::{errors::RuleError, Hash};
use database::{StoreError, StoreResult};
use thiserror::Error;

/// Errors surfaced by the consensus processes.
///
/// A `Rule` error means the block is invalid and must be rejected. `MissingData`
/// means a dependency was queried before it was processed (or after it was pruned).
/// `InvariantViolation` is a bug in the caller or in this crate and aborts the
/// current validation attempt.
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("{stage}: missing data for block {hash}")]
    MissingData {
        stage: &'static str,
        hash: Hash,
        #[source]
        source: StoreError,
    },

    #[error("{stage}: store failure while reading block {hash}")]
    Store {
        stage: &'static str,
        hash: Hash,
        #[source]
        source: StoreError,
    },

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl ConsensusError {
    pub fn is_missing_data(&self) -> bool {
        matches!(self, ConsensusError::MissingData { .. })
    }

    pub fn is_rule_error(&self) -> bool {
        matches!(self, ConsensusError::Rule(_))
    }
}

pub type ConsensusResult<T> = std::result::Result<T, ConsensusError>;

/// Attaches the requesting stage and block hash to a store result
pub trait StoreResultContext<T> {
    fn context(self, stage: &'static str, hash: Hash) -> ConsensusResult<T>;
}

impl<T> StoreResultContext<T> for StoreResult<T> {
    fn context(self, stage: &'static str, hash: Hash) -> ConsensusResult<T> {
        self.map_err(|source| {
            if source.is_not_found() {
                ConsensusError::MissingData { stage, hash, source }
            } else {
                ConsensusError::Store { stage, hash, source }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_context_splits_not_found() {
        let hash = Hash::from_u64_word(7);
        let missing: StoreResult<()> = Err(StoreError::KeyNotFound { store: "ghostdag", key: hash });
        let err = missing.context("coinbase", hash).unwrap_err();
        assert!(err.is_missing_data());
        assert!(err.to_string().starts_with("coinbase: missing data for block"));
        assert!(err.source().unwrap().to_string().contains("ghostdag"));

        let closed: StoreResult<()> = Err(StoreError::DatabaseClosed);
        assert!(matches!(closed.context("merge depth", hash), Err(ConsensusError::Store { stage: "merge depth", .. })));
    }

    #[test]
    fn test_rule_errors_convert() {
        let err: ConsensusError = RuleError::BadCoinbasePayloadLen(3, 19).into();
        assert!(err.is_rule_error());
        assert_eq!(err.to_string(), RuleError::BadCoinbasePayloadLen(3, 19).to_string());
    }
}
