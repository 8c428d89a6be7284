use crate::{
    db::{BatchOp, DbAccess, DbWriteBatch},
    errors::StoreResult,
};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory backend for tests and tooling. Batches apply under one write lock.
#[derive(Default)]
pub struct MemoryDb {
    stores: RwLock<HashMap<&'static str, HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed keys in `store`
    pub fn len(&self, store: &'static str) -> usize {
        self.stores.read().get(store).map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.stores.read().values().all(|entries| entries.is_empty())
    }
}

impl DbAccess for MemoryDb {
    fn get(&self, store: &'static str, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.stores.read().get(store).and_then(|entries| entries.get(key).cloned()))
    }

    fn write_batch(&self, batch: DbWriteBatch) -> StoreResult<()> {
        let mut stores = self.stores.write();
        for op in batch {
            match op {
                BatchOp::Put { store, key, value } => {
                    stores.entry(store).or_default().insert(key, value);
                }
                BatchOp::Delete { store, key } => {
                    if let Some(entries) = stores.get_mut(store) {
                        entries.remove(&key);
                    }
                }
            }
        }
        Ok(())
    }
}
