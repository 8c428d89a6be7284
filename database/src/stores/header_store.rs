use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_HEADERS},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::{header::Header, Hash};
use std::sync::Arc;

#[derive(Clone)]
pub struct HeaderStore {
    access: StoreAccess<Header>,
}

impl HeaderStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { access: StoreAccess::new(db, CF_HEADERS) }
    }

    pub fn stage(&self, staging: &mut StagingArea, header: &Header) -> StoreResult<()> {
        self.access.stage(staging, header.hash, header)
    }

    pub fn get(&self, staging: &StagingArea, hash: Hash) -> StoreResult<Header> {
        self.access.get(staging, hash)
    }

    pub fn get_daa_score(&self, staging: &StagingArea, hash: Hash) -> StoreResult<u64> {
        Ok(self.access.get(staging, hash)?.daa_score)
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
