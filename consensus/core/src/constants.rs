use crate::KType;

/// Current block version
pub const BLOCK_VERSION: u16 = 1;

/// Current transaction version
pub const TX_VERSION: u16 = 0;

/// Number of sompi (base units) in one coin
pub const SOMPI_PER_CRYPTIX: u64 = 100_000_000;

/// GhostDAG K parameter - maximum number of blocks in anticone for blue selection
pub const GHOSTDAG_K: KType = 18;

/// Highest block level a block may be assigned by its proof of work
pub const MAX_BLOCK_LEVEL: u8 = 225;

/// Default bounded merge depth, in blue score units
pub const MERGE_DEPTH: u64 = 3600;

/// Longest script public key a coinbase payload may carry
pub const COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH: u8 = 150;

/// Seconds in a month of a 365.25-day year; also DAA score units per subsidy month
pub const SECONDS_PER_MONTH: u64 = 2_629_800;

pub mod perf {
    /// Capacity of the read-through caches kept in front of the stores
    pub const DEFAULT_STORE_CACHE_SIZE: usize = 10_000;
}
