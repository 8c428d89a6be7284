//! Consensus processes of the blockDAG
//!
//! DAG traversal, the bounded merge depth rule and coinbase construction and
//! validation, all reading block data through a per-attempt staging area.

pub mod config;
pub mod consensus;
pub mod errors;
pub mod process;

#[cfg(test)]
mod test_helpers;

// Re-export key types for easier access
pub use consensus_core::Hash;
pub use config::Config;
pub use consensus::ConsensusServices;
pub use errors::{ConsensusError, ConsensusResult};
pub use process::{CoinbaseManager, DagTopology, DagTopologyManager, DagTraversal, MergeDepthManager};
