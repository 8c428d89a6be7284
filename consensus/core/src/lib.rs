//! Core consensus types shared by the proof-of-work engine, the stores and
//! the consensus processes.

use std::collections::{HashMap, HashSet};

pub mod acceptance_data;
pub mod block;
pub mod blockhash;
pub mod coinbase;
pub mod config;
pub mod constants;
pub mod errors;
pub mod ghostdag;
pub mod hashing;
pub mod header;
pub mod subnets;
pub mod target;
pub mod tx;

pub use crypto_hashes::Hash;

/// Cumulative work of the blue past of a block.
pub type BlueWorkType = primitive_types::U256;

/// Integer type for the GHOSTDAG k parameter and anticone sizes.
pub type KType = u16;

/// Level of a block in the multi-level parents structure.
pub type BlockLevel = u8;

pub type BlockHashMap<V> = HashMap<Hash, V>;
pub type BlockHashSet = HashSet<Hash>;

pub const ZERO_HASH: Hash = Hash::zeroed();
