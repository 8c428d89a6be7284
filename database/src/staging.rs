use crate::{
    db::{DbAccess, DbWriteBatch},
    errors::StoreResult,
};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedValue {
    Put(Vec<u8>),
    Delete,
}

/// Uncommitted writes of a single validation attempt, sharded by store.
///
/// Each attempt owns its own staging area, so concurrent attempts never see
/// each other's writes. Reads through the typed stores check the staged shard
/// first and fall through to the committed backend.
#[derive(Debug, Default)]
pub struct StagingArea {
    shards: HashMap<&'static str, HashMap<Vec<u8>, StagedValue>>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, store: &'static str, key: Vec<u8>, value: Vec<u8>) {
        self.shards.entry(store).or_default().insert(key, StagedValue::Put(value));
    }

    pub fn stage_delete(&mut self, store: &'static str, key: Vec<u8>) {
        self.shards.entry(store).or_default().insert(key, StagedValue::Delete);
    }

    pub fn staged(&self, store: &'static str, key: &[u8]) -> Option<&StagedValue> {
        self.shards.get(store).and_then(|shard| shard.get(key))
    }

    /// Whether anything is pending for `store`
    pub fn is_staged(&self, store: &'static str) -> bool {
        self.shards.get(store).is_some_and(|shard| !shard.is_empty())
    }

    /// Discards every pending write of `store`
    pub fn unstage_all(&mut self, store: &'static str) {
        if let Some(shard) = self.shards.remove(store) {
            trace!("unstaged {} entries from {}", shard.len(), store);
        }
    }

    pub fn len(&self) -> usize {
        self.shards.values().map(|shard| shard.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes all shards to `db` as one batch
    pub fn commit(self, db: &dyn DbAccess) -> StoreResult<()> {
        let mut batch = DbWriteBatch::default();
        for (store, shard) in self.shards {
            for (key, value) in shard {
                match value {
                    StagedValue::Put(value) => batch.put(store, key, value),
                    StagedValue::Delete => batch.delete(store, key),
                }
            }
        }
        trace!("committing staging area with {} operations", batch.len());
        if batch.is_empty() {
            return Ok(());
        }
        db.write_batch(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{CF_BLOCKS, CF_HEADERS},
        memory::MemoryDb,
    };
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_stage_and_commit() {
        let db = MemoryDb::new();
        let mut staging = StagingArea::new();
        staging.stage(CF_HEADERS, vec![1], vec![10]);
        staging.stage(CF_BLOCKS, vec![1], vec![11]);
        assert!(staging.is_staged(CF_HEADERS));
        assert_eq!(staging.staged(CF_HEADERS, &[1]), Some(&StagedValue::Put(vec![10])));
        // Nothing is visible before commit
        assert!(!db.has(CF_HEADERS, &[1]).unwrap());

        staging.commit(&db).unwrap();
        assert_eq!(db.get(CF_HEADERS, &[1]).unwrap(), Some(vec![10]));
        assert_eq!(db.get(CF_BLOCKS, &[1]).unwrap(), Some(vec![11]));
    }

    #[test]
    fn test_unstage_all_is_per_store() {
        let db = MemoryDb::new();
        let mut staging = StagingArea::new();
        staging.stage(CF_HEADERS, vec![1], vec![10]);
        staging.stage(CF_BLOCKS, vec![1], vec![11]);
        staging.unstage_all(CF_HEADERS);
        assert!(!staging.is_staged(CF_HEADERS));
        assert!(staging.is_staged(CF_BLOCKS));
        assert_eq!(staging.len(), 1);

        staging.commit(&db).unwrap();
        assert!(!db.has(CF_HEADERS, &[1]).unwrap());
        assert!(db.has(CF_BLOCKS, &[1]).unwrap());
    }

    #[test]
    fn test_staged_delete_commits_as_delete() {
        let db = MemoryDb::new();
        let mut staging = StagingArea::new();
        staging.stage(CF_HEADERS, vec![1], vec![10]);
        staging.commit(&db).unwrap();

        let mut staging = StagingArea::new();
        staging.stage_delete(CF_HEADERS, vec![1]);
        assert_eq!(staging.staged(CF_HEADERS, &[1]), Some(&StagedValue::Delete));
        staging.commit(&db).unwrap();
        assert!(!db.has(CF_HEADERS, &[1]).unwrap());
    }

    #[test]
    fn test_concurrent_staging_areas_are_isolated() {
        let db = Arc::new(MemoryDb::new());
        let handles: Vec<_> = (0u8..4)
            .map(|i| {
                let db = db.clone();
                thread::spawn(move || {
                    let mut staging = StagingArea::new();
                    staging.stage(CF_HEADERS, vec![i], vec![i]);
                    // Only this thread's write is staged here
                    for other in (0u8..4).filter(|&other| other != i) {
                        assert!(staging.staged(CF_HEADERS, &[other]).is_none());
                    }
                    staging.commit(db.as_ref()).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(db.len(CF_HEADERS), 4);
    }
}
