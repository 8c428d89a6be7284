use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_BLOCKS},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::{block::Block, tx::Transaction, Hash};
use std::sync::Arc;

#[derive(Clone)]
pub struct BlockStore {
    access: StoreAccess<Block>,
}

impl BlockStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { access: StoreAccess::new(db, CF_BLOCKS) }
    }

    pub fn stage(&self, staging: &mut StagingArea, block: &Block) -> StoreResult<()> {
        self.access.stage(staging, block.hash(), block)
    }

    pub fn get(&self, staging: &StagingArea, hash: Hash) -> StoreResult<Block> {
        self.access.get(staging, hash)
    }

    pub fn get_transactions(&self, staging: &StagingArea, hash: Hash) -> StoreResult<Vec<Transaction>> {
        Ok(self.access.get(staging, hash)?.transactions)
    }

    pub fn has(&self, staging: &StagingArea, hash: Hash) -> StoreResult<bool> {
        self.access.has(staging, hash)
    }

    pub fn delete(&self, staging: &mut StagingArea, hash: Hash) {
        self.access.stage_delete(staging, hash)
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        self.access.is_staged(staging)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        self.access.unstage_all(staging)
    }
}
