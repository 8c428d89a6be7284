use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_DAA_ADDED_BLOCKS, CF_DAA_SCORE},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::{BlockHashSet, Hash};
use std::sync::Arc;

/// DAA score of every block and the blocks its DAA window added
#[derive(Clone)]
pub struct DaaStore {
    scores: StoreAccess<u64>,
    added_blocks: StoreAccess<Vec<Hash>>,
}

impl DaaStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { scores: StoreAccess::new(db.clone(), CF_DAA_SCORE), added_blocks: StoreAccess::new(db, CF_DAA_ADDED_BLOCKS) }
    }

    pub fn stage_daa_score(&self, staging: &mut StagingArea, hash: Hash, daa_score: u64) -> StoreResult<()> {
        self.scores.stage(staging, hash, &daa_score)
    }

    pub fn stage_daa_added_blocks(&self, staging: &mut StagingArea, hash: Hash, added_blocks: &[Hash]) -> StoreResult<()> {
        self.added_blocks.stage(staging, hash, &added_blocks.to_vec())
    }

    pub fn get_daa_score(&self, staging: &StagingArea, hash: Hash) -> StoreResult<u64> {
        self.scores.get(staging, hash)
    }

    /// DAA-added blocks of `hash` as a set, for membership tests
    pub fn get_daa_added_blocks_set(&self, staging: &StagingArea, hash: Hash) -> StoreResult<BlockHashSet> {
        Ok(self.added_blocks.get(staging, hash)?.into_iter().collect())
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        self.scores.is_staged(staging) || self.added_blocks.is_staged(staging)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        self.scores.unstage_all(staging);
        self.added_blocks.unstage_all(staging);
    }
}
