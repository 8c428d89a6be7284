//! Consensus processes
//!
//! Each process reads the stores through a caller-owned [`database::StagingArea`]
//! and stages whatever it derives into the same area.

pub mod coinbase;
pub mod merge_depth;
pub mod traversal;

pub use coinbase::CoinbaseManager;
pub use merge_depth::MergeDepthManager;
pub use traversal::{DagTopology, DagTopologyManager, DagTraversal};
