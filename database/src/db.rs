use crate::errors::{StoreError, StoreResult};
use parking_lot::RwLock;
use rocksdb::{ColumnFamilyDescriptor, Options, WriteBatch, DB};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

pub const CF_BLOCKS: &str = "blocks";
pub const CF_HEADERS: &str = "headers";
pub const CF_GHOSTDAG: &str = "ghostdag";
pub const CF_GHOSTDAG_TRUSTED: &str = "ghostdag_trusted";
pub const CF_ACCEPTANCE_DATA: &str = "acceptance_data";
pub const CF_BLOCK_RELATIONS: &str = "block_relations";
pub const CF_DAA_SCORE: &str = "daa_score";
pub const CF_DAA_ADDED_BLOCKS: &str = "daa_added_blocks";
pub const CF_MERGE_DEPTH_ROOT: &str = "merge_depth_root";

pub const ALL_COLUMN_FAMILIES: [&str; 9] = [
    CF_BLOCKS,
    CF_HEADERS,
    CF_GHOSTDAG,
    CF_GHOSTDAG_TRUSTED,
    CF_ACCEPTANCE_DATA,
    CF_BLOCK_RELATIONS,
    CF_DAA_SCORE,
    CF_DAA_ADDED_BLOCKS,
    CF_MERGE_DEPTH_ROOT,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Put { store: &'static str, key: Vec<u8>, value: Vec<u8> },
    Delete { store: &'static str, key: Vec<u8> },
}

/// Backend-agnostic set of writes applied atomically by [`DbAccess::write_batch`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbWriteBatch {
    ops: Vec<BatchOp>,
}

impl DbWriteBatch {
    pub fn put(&mut self, store: &'static str, key: Vec<u8>, value: Vec<u8>) {
        self.ops.push(BatchOp::Put { store, key, value });
    }

    pub fn delete(&mut self, store: &'static str, key: Vec<u8>) {
        self.ops.push(BatchOp::Delete { store, key });
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl IntoIterator for DbWriteBatch {
    type Item = BatchOp;
    type IntoIter = std::vec::IntoIter<BatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Committed key-value storage, partitioned into named stores.
///
/// Reads never observe staged data; the only way to write is a whole batch.
pub trait DbAccess: Send + Sync {
    fn get(&self, store: &'static str, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    fn has(&self, store: &'static str, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(store, key)?.is_some())
    }

    fn write_batch(&self, batch: DbWriteBatch) -> StoreResult<()>;
}

/// RocksDB backend with one column family per store
pub struct Database {
    db: Arc<DB>,
    is_closed: Arc<RwLock<bool>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_max_open_files(10000);
        opts.set_keep_log_file_num(10);
        opts.set_max_background_jobs(4);
        opts.set_bytes_per_sync(1048576);
        opts.increase_parallelism(4);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts.set_write_buffer_size(64 * 1024 * 1024);
        opts.set_max_write_buffer_number(3);

        let cf_descriptors: Vec<_> =
            ALL_COLUMN_FAMILIES.iter().map(|name| ColumnFamilyDescriptor::new(*name, Options::default())).collect();

        let db = DB::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)?;
        debug!("opened consensus database at {}", path.as_ref().display());
        Ok(Self { db: Arc::new(db), is_closed: Arc::new(RwLock::new(false)) })
    }

    fn check_closed(&self) -> StoreResult<()> {
        if *self.is_closed.read() {
            return Err(StoreError::DatabaseClosed);
        }
        Ok(())
    }

    fn get_cf_handle(&self, cf_name: &str) -> StoreResult<&rocksdb::ColumnFamily> {
        self.db.cf_handle(cf_name).ok_or_else(|| StoreError::ColumnFamilyNotFound(cf_name.to_string()))
    }

    pub fn close(&self) {
        *self.is_closed.write() = true;
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), is_closed: self.is_closed.clone() }
    }
}

impl DbAccess for Database {
    fn get(&self, store: &'static str, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.check_closed()?;
        let cf = self.get_cf_handle(store)?;
        Ok(self.db.get_cf(cf, key)?)
    }

    fn has(&self, store: &'static str, key: &[u8]) -> StoreResult<bool> {
        self.check_closed()?;
        let cf = self.get_cf_handle(store)?;
        Ok(self.db.get_pinned_cf(cf, key)?.is_some())
    }

    fn write_batch(&self, batch: DbWriteBatch) -> StoreResult<()> {
        self.check_closed()?;
        let len = batch.len();
        let mut rocks_batch = WriteBatch::default();
        for op in batch {
            match op {
                BatchOp::Put { store, key, value } => rocks_batch.put_cf(self.get_cf_handle(store)?, key, value),
                BatchOp::Delete { store, key } => rocks_batch.delete_cf(self.get_cf_handle(store)?, key),
            }
        }
        self.db.write(rocks_batch)?;
        trace!("wrote batch of {} operations", len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_batch_put_get() {
        let tmp = TempDir::new().unwrap();
        let db = Database::open(tmp.path()).unwrap();

        let mut batch = DbWriteBatch::default();
        batch.put(CF_HEADERS, b"k".to_vec(), b"v".to_vec());
        batch.put(CF_BLOCKS, b"gone".to_vec(), b"x".to_vec());
        db.write_batch(batch).unwrap();
        assert_eq!(db.get(CF_HEADERS, b"k").unwrap(), Some(b"v".to_vec()));
        // Stores are separate column families
        assert_eq!(db.get(CF_BLOCKS, b"k").unwrap(), None);

        let mut batch = DbWriteBatch::default();
        batch.delete(CF_BLOCKS, b"gone".to_vec());
        db.write_batch(batch).unwrap();
        assert!(!db.has(CF_BLOCKS, b"gone").unwrap());
    }

    #[test]
    fn test_database_reopen_and_close() {
        let tmp = TempDir::new().unwrap();
        {
            let db = Database::open(tmp.path()).unwrap();
            let mut batch = DbWriteBatch::default();
            batch.put(CF_MERGE_DEPTH_ROOT, b"k".to_vec(), b"v".to_vec());
            db.write_batch(batch).unwrap();
        }
        let db = Database::open(tmp.path()).unwrap();
        assert!(db.has(CF_MERGE_DEPTH_ROOT, b"k").unwrap());

        db.clone().close();
        assert!(matches!(db.get(CF_MERGE_DEPTH_ROOT, b"k"), Err(StoreError::DatabaseClosed)));
    }

    #[test]
    fn test_unknown_store() {
        let tmp = TempDir::new().unwrap();
        let db = Database::open(tmp.path()).unwrap();
        assert!(matches!(db.get("utxos", b"k"), Err(StoreError::ColumnFamilyNotFound(_))));
    }
}
