//! Consensus storage: committed key-value backends, the per-attempt staging
//! area and the typed stores read by the consensus processes.

pub mod cache;
pub mod db;
pub mod errors;
pub mod memory;
pub mod staging;
pub mod stores;

pub use cache::CachedDbAccess;
pub use db::{Database, DbAccess, DbWriteBatch};
pub use errors::{StoreError, StoreResult, StoreResultExtensions};
pub use memory::MemoryDb;
pub use staging::StagingArea;
pub use stores::ConsensusStores;
