use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_BLOCK_RELATIONS},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::Hash;
use std::sync::Arc;

/// Direct parents of every block
#[derive(Clone)]
pub struct RelationsStore {
    parents: StoreAccess<Vec<Hash>>,
}

impl RelationsStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { parents: StoreAccess::new(db, CF_BLOCK_RELATIONS) }
    }

    pub fn stage_parents(&self, staging: &mut StagingArea, hash: Hash, parents: &[Hash]) -> StoreResult<()> {
        self.parents.stage(staging, hash, &parents.to_vec())
    }

    pub fn get_parents(&self, staging: &StagingArea, hash: Hash) -> StoreResult<Vec<Hash>> {
        self.parents.get(staging, hash)
    }

    pub fn has(&self, staging: &StagingArea, hash: Hash) -> StoreResult<bool> {
        self.parents.has(staging, hash)
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        self.parents.is_staged(staging)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        self.parents.unstage_all(staging)
    }
}
