use crate::Hash;

/// Sentinel hash standing in for the virtual block (the DAG's current tip set).
pub const VIRTUAL: Hash = Hash::from_bytes([0xff; 32]);

/// Sentinel hash of the virtual genesis: the selected parent of genesis and the
/// merge depth root of blocks arriving with trusted data.
pub const ORIGIN: Hash = Hash::from_bytes([0xfe; 32]);

pub trait BlockHashExtensions {
    fn is_origin(&self) -> bool;
}

impl BlockHashExtensions for Hash {
    fn is_origin(&self) -> bool {
        self.eq(&ORIGIN)
    }
}
