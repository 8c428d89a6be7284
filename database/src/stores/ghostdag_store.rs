use super::access::StoreAccess;
use crate::{
    db::{DbAccess, CF_GHOSTDAG, CF_GHOSTDAG_TRUSTED},
    errors::StoreResult,
    staging::StagingArea,
};
use consensus_core::{
    ghostdag::{DataOrigin, GhostdagData},
    BlueWorkType, Hash,
};
use std::sync::Arc;

/// GHOSTDAG data of every processed block, in a trusted and a local variant.
///
/// The two variants live under separate prefixes and are selected explicitly
/// by [`DataOrigin`]; falling back from one to the other is up to the caller.
#[derive(Clone)]
pub struct GhostdagStore {
    local: StoreAccess<GhostdagData>,
    trusted: StoreAccess<GhostdagData>,
}

impl GhostdagStore {
    pub fn new(db: Arc<dyn DbAccess>) -> Self {
        Self { local: StoreAccess::new(db.clone(), CF_GHOSTDAG), trusted: StoreAccess::new(db, CF_GHOSTDAG_TRUSTED) }
    }

    fn access(&self, origin: DataOrigin) -> &StoreAccess<GhostdagData> {
        match origin {
            DataOrigin::Trusted => &self.trusted,
            DataOrigin::Local => &self.local,
        }
    }

    pub fn stage(&self, staging: &mut StagingArea, hash: Hash, data: &GhostdagData, origin: DataOrigin) -> StoreResult<()> {
        self.access(origin).stage(staging, hash, data)
    }

    pub fn get(&self, staging: &StagingArea, hash: Hash, origin: DataOrigin) -> StoreResult<GhostdagData> {
        self.access(origin).get(staging, hash)
    }

    pub fn has(&self, staging: &StagingArea, hash: Hash, origin: DataOrigin) -> StoreResult<bool> {
        self.access(origin).has(staging, hash)
    }

    pub fn get_blue_score(&self, staging: &StagingArea, hash: Hash) -> StoreResult<u64> {
        Ok(self.local.get(staging, hash)?.blue_score)
    }

    pub fn get_blue_work(&self, staging: &StagingArea, hash: Hash) -> StoreResult<BlueWorkType> {
        Ok(self.local.get(staging, hash)?.blue_work)
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        self.local.is_staged(staging) || self.trusted.is_staged(staging)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        self.local.unstage_all(staging);
        self.trusted.unstage_all(staging);
    }
}
