use consensus_core::Hash;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key {key} not found in store {store}")]
    KeyNotFound { store: &'static str, key: Hash },

    #[error("key {key} is already staged in store {store}")]
    KeyAlreadyExists { store: &'static str, key: Hash },

    #[error("rocksdb error: {0}")]
    DbError(#[from] rocksdb::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("column family not found: {0}")]
    ColumnFamilyNotFound(String),

    #[error("database is closed")]
    DatabaseClosed,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait StoreResultExtensions<T> {
    /// Maps a not-found error to `Ok(None)`, keeping every other error
    fn optional(self) -> StoreResult<Option<T>>;
}

impl<T> StoreResultExtensions<T> for StoreResult<T> {
    fn optional(self) -> StoreResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
