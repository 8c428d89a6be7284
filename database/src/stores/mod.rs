pub mod access;
pub mod acceptance_data_store;
pub mod block_store;
pub mod daa_store;
pub mod ghostdag_store;
pub mod header_store;
pub mod merge_depth_root_store;
pub mod relations_store;

pub use acceptance_data_store::AcceptanceDataStore;
pub use block_store::BlockStore;
pub use daa_store::DaaStore;
pub use ghostdag_store::GhostdagStore;
pub use header_store::HeaderStore;
pub use merge_depth_root_store::MergeDepthRootStore;
pub use relations_store::RelationsStore;

use crate::db::DbAccess;
use std::sync::Arc;

/// Every store the consensus processes read, sharing one backend
#[derive(Clone)]
pub struct ConsensusStores {
    pub ghostdag: GhostdagStore,
    pub acceptance_data: AcceptanceDataStore,
    pub blocks: BlockStore,
    pub headers: HeaderStore,
    pub relations: RelationsStore,
    pub daa: DaaStore,
    pub merge_depth_roots: MergeDepthRootStore,
}

impl ConsensusStores {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self {
            ghostdag: GhostdagStore::new(db.clone()),
            acceptance_data: AcceptanceDataStore::new(db.clone()),
            blocks: BlockStore::new(db.clone()),
            headers: HeaderStore::new(db.clone()),
            relations: RelationsStore::new(db.clone()),
            daa: DaaStore::new(db.clone()),
            merge_depth_roots: MergeDepthRootStore::new(db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cache::CachedDbAccess, db::Database, staging::StagingArea};
    use consensus_core::{
        acceptance_data::MergesetBlockAcceptanceData,
        block::Block,
        config::genesis::GENESIS,
        ghostdag::{DataOrigin, GhostdagData},
        BlueWorkType,
    };
    use tempfile::TempDir;

    #[test]
    fn test_stores_over_cached_rocksdb() {
        let tmp = TempDir::new().unwrap();
        let rocks: Arc<dyn DbAccess> = Arc::new(Database::open(tmp.path()).unwrap());
        let db: Arc<dyn DbAccess> = Arc::new(CachedDbAccess::new(rocks.clone(), 64));
        let stores = ConsensusStores::new(db.clone());

        let genesis = Block::from(&GENESIS);
        let hash = genesis.hash();
        let mut staging = StagingArea::new();
        stores.blocks.stage(&mut staging, &genesis).unwrap();
        stores.headers.stage(&mut staging, &genesis.header).unwrap();
        stores.relations.stage_parents(&mut staging, hash, &[]).unwrap();
        stores.ghostdag.stage(&mut staging, hash, &GhostdagData::genesis(BlueWorkType::zero()), DataOrigin::Local).unwrap();
        stores.acceptance_data.stage(&mut staging, hash, &vec![MergesetBlockAcceptanceData::new(hash, vec![])]).unwrap();
        stores.merge_depth_roots.stage(&mut staging, hash, hash).unwrap();
        assert!(stores.blocks.is_staged(&staging) && stores.headers.is_staged(&staging));
        staging.commit(db.as_ref()).unwrap();

        // A fresh stores instance reads straight from rocksdb
        let cold = ConsensusStores::new(rocks);
        let staging = StagingArea::new();
        assert_eq!(cold.blocks.get(&staging, hash).unwrap(), genesis);
        assert_eq!(cold.headers.get_daa_score(&staging, hash).unwrap(), GENESIS.daa_score);
        assert!(cold.relations.get_parents(&staging, hash).unwrap().is_empty());
        assert!(cold.ghostdag.get(&staging, hash, DataOrigin::Local).unwrap().is_genesis());
        assert!(cold.ghostdag.get(&staging, hash, DataOrigin::Trusted).unwrap_err().is_not_found());
        assert_eq!(cold.acceptance_data.get(&staging, hash).unwrap()[0].block_hash, hash);
        assert_eq!(cold.merge_depth_roots.get(&staging, hash).unwrap(), hash);
    }
}
