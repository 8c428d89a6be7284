use crate::{
    db::DbAccess,
    errors::{StoreError, StoreResult},
    staging::{StagedValue, StagingArea},
};
use consensus_core::Hash;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

/// Hash-keyed, bincode-encoded access to one store, layered over a staging area.
pub struct StoreAccess<T> {
    db: Arc<dyn DbAccess>,
    prefix: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for StoreAccess<T> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), prefix: self.prefix, _marker: PhantomData }
    }
}

impl<T: Serialize + DeserializeOwned> StoreAccess<T> {
    pub fn new(db: Arc<dyn DbAccess>, prefix: &'static str) -> Self {
        Self { db, prefix, _marker: PhantomData }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Stages `value` under `key`. A key may be staged once per staging area.
    pub fn stage(&self, staging: &mut StagingArea, key: Hash, value: &T) -> StoreResult<()> {
        if matches!(staging.staged(self.prefix, key.as_slice()), Some(StagedValue::Put(_))) {
            return Err(StoreError::KeyAlreadyExists { store: self.prefix, key });
        }
        let bytes = bincode::serialize(value)?;
        staging.stage(self.prefix, key.as_slice().to_vec(), bytes);
        Ok(())
    }

    pub fn stage_delete(&self, staging: &mut StagingArea, key: Hash) {
        staging.stage_delete(self.prefix, key.as_slice().to_vec());
    }

    /// Reads the staged value if any, otherwise the committed one
    pub fn get(&self, staging: &StagingArea, key: Hash) -> StoreResult<T> {
        let bytes = match staging.staged(self.prefix, key.as_slice()) {
            Some(StagedValue::Put(bytes)) => Some(bytes.clone()),
            Some(StagedValue::Delete) => None,
            None => self.db.get(self.prefix, key.as_slice())?,
        };
        match bytes {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(StoreError::KeyNotFound { store: self.prefix, key }),
        }
    }

    pub fn has(&self, staging: &StagingArea, key: Hash) -> StoreResult<bool> {
        match staging.staged(self.prefix, key.as_slice()) {
            Some(StagedValue::Put(_)) => Ok(true),
            Some(StagedValue::Delete) => Ok(false),
            None => self.db.has(self.prefix, key.as_slice()),
        }
    }

    pub fn is_staged(&self, staging: &StagingArea) -> bool {
        staging.is_staged(self.prefix)
    }

    pub fn unstage_all(&self, staging: &mut StagingArea) {
        staging.unstage_all(self.prefix)
    }
}
