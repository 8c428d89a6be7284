use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_MERGE_DEPTH_ROOT},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::Hash;
use std::sync::Arc;

/// Cached merge depth root of every block
#[derive(Clone)]
pub struct MergeDepthRootStore {
    access: StoreAccess<Hash>,
}

impl MergeDepthRootStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { access: StoreAccess::new(db, CF_MERGE_DEPTH_ROOT) }
    }

    pub fn stage(&self, staging: &mut StagingArea, hash: Hash, root: Hash) -> StoreResult<()> {
        self.access.stage(staging, hash, &root)
    }

    pub fn get(&self, staging: &StagingArea, hash: Hash) -> StoreResult<Hash> {
        self.access.get(staging, hash)
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        self.access.is_staged(staging)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        self.access.unstage_all(staging)
    }
}
