use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_ACCEPTANCE_DATA},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::{acceptance_data::AcceptanceData, Hash};
use std::sync::Arc;

/// Acceptance data of chain blocks, keyed by the accepting block
#[derive(Clone)]
pub struct AcceptanceDataStore {
    access: StoreAccess<AcceptanceData>,
}

impl AcceptanceDataStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { access: StoreAccess::new(db, CF_ACCEPTANCE_DATA) }
    }

    pub fn stage(&self, staging: &mut StagingArea, hash: Hash, acceptance_data: &AcceptanceData) -> StoreResult<()> {
        self.access.stage(staging, hash, acceptance_data)
    }

    pub fn get(&self, staging: &StagingArea, hash: Hash) -> StoreResult<AcceptanceData> {
        self.access.get(staging, hash)
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
