use thiserror::Error;

use crate::Hash;

/// Consensus-rule violations. A block failing any of these must be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("block {0} merges block {1} which is neither in the past of the merge depth root {2} nor in the past of a kosherizing blue")]
    ViolatingBoundedMergeDepth(Hash, Hash, Hash),

    #[error("coinbase payload length is {0} while the minimum allowed length is {1}")]
    BadCoinbasePayloadLen(usize, usize),

    #[error("coinbase payload script public key length is {0} while the maximum allowed length is {1}")]
    BadCoinbasePayloadScriptPublicKeyLength(u8, u8),

    #[error("coinbase of block {0} has hash {1} while the expected coinbase has hash {2}")]
    BadCoinbaseTransaction(Hash, Hash, Hash),

    #[error("block {0} has no coinbase transaction")]
    MissingCoinbaseTransaction(Hash),

    #[error("block {0} has invalid proof of work")]
    InvalidPoW(Hash),
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_block() {
        let err = RuleError::ViolatingBoundedMergeDepth(Hash::from_u64_word(1), Hash::from_u64_word(2), Hash::from_u64_word(3));
        let msg = err.to_string();
        assert!(msg.contains(&Hash::from_u64_word(1).to_string()));
        assert!(msg.contains(&Hash::from_u64_word(2).to_string()));
        assert_eq!(RuleError::BadCoinbasePayloadLen(3, 19).to_string(), "coinbase payload length is 3 while the minimum allowed length is 19");
    }
}
