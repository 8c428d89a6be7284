use crate::hashers::PowHasher;
use crate::Hash;

/// PoW pre-image writer: `PRE_POW_HASH || TIME || 32 zero byte padding || NONCE`.
///
/// Everything but the nonce is absorbed on construction, so a mining loop only
/// clones the state and appends the nonce per attempt.
#[derive(Clone)]
pub struct PowHash(PowHasher);

impl PowHash {
    #[inline]
    pub fn new(pre_pow_hash: Hash, timestamp: u64) -> Self {
        let mut hasher = PowHasher::new();
        hasher.write(pre_pow_hash);
        hasher.write(timestamp.to_le_bytes());
        hasher.write([0u8; 32]);
        Self(hasher)
    }

    #[inline(always)]
    pub fn finalize_with_nonce(mut self, nonce: u64) -> Hash {
        self.0.write(nonce.to_le_bytes());
        self.0.finalize()
    }
}
