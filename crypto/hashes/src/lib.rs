pub mod hashers;
pub mod pow_hash;

pub use hashers::{blake3_256, sha3_256, BlockHash, Hasher, HasherBase, KHeavyHash, TransactionHash, TransactionID};
pub use pow_hash::PowHash;

use std::fmt;
use std::hash::{Hash as StdHash, Hasher as StdHasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const HASH_SIZE: usize = 32;

/// A 32-byte hash used as block id, transaction id and PoW pipeline value.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Creates a zeroed hash. Can be used in const contexts.
    pub const fn zeroed() -> Self {
        Self([0u8; HASH_SIZE])
    }

    /// Builds a hash from four little-endian u64 lanes
    pub const fn from_le_u64(parts: [u64; 4]) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let mut i = 0;
        while i < 4 {
            let le = parts[i].to_le_bytes();
            let mut j = 0;
            while j < 8 {
                bytes[i * 8 + j] = le[j];
                j += 1;
            }
            i += 1;
        }
        Self(bytes)
    }

    pub fn to_le_u64(&self) -> [u64; 4] {
        let mut out = [0u64; 4];
        for (lane, chunk) in out.iter_mut().zip(self.0.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *lane = u64::from_le_bytes(le);
        }
        out
    }

    /// Places `word` in the last lane, which is also the lane `std::hash::Hash` feeds on.
    pub const fn from_u64_word(word: u64) -> Self {
        Self::from_le_u64([0, 0, 0, word])
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, std::array::TryFromSliceError> {
        Ok(Self(slice.try_into()?))
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(slice)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl StdHash for Hash {
    // Hashes are uniformly distributed so a single lane is enough for hash maps
    fn hash<H: StdHasher>(&self, state: &mut H) {
        self.to_le_u64()[3].hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::Hash;

    #[test]
    fn from_le_u64_lanes() {
        let h = Hash::from_le_u64([1, 2, 3, 4]);
        let bytes = h.as_bytes();
        assert_eq!(&bytes[0..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2u64.to_le_bytes());
        assert_eq!(&bytes[24..32], &4u64.to_le_bytes());
        assert_eq!(h.to_le_u64(), [1, 2, 3, 4]);
    }

    #[test]
    fn hex_display_parses_back() {
        let h = Hash::from_u64_word(0xdead_beef);
        let parsed: Hash = h.to_string().parse().unwrap();
        assert_eq!(parsed, h);
        assert!("00".parse::<Hash>().is_err());
    }
}
