// public for benchmarks
#[doc(hidden)]
pub mod diffusion;
#[doc(hidden)]
pub mod matrix;
#[doc(hidden)]
pub mod xoshiro;

use std::cmp::max;

use crate::matrix::Matrix;
use consensus_core::{hashing, header::Header, target::compact_to_target, BlockLevel};
use crypto_hashes::{Hash, PowHash};
use primitive_types::U256;
use tracing::{debug, trace};

/// State is an intermediate data structure with pre-computed values to speed up mining.
///
/// The matrix depends only on the pre-PoW hash, so it survives timestamp
/// updates and is shared by every nonce attempt.
pub struct State {
    pub(crate) matrix: Matrix,
    /// `None` when the header bits encode a negative target
    pub(crate) target: Option<U256>,
    // PRE_POW_HASH || TIME || 32 zero byte padding; without NONCE
    pub(crate) hasher: PowHash,
    pre_pow_hash: Hash,
    timestamp: u64,
}

impl State {
    #[inline]
    pub fn new(header: &Header) -> Self {
        let target = compact_to_target(header.bits);
        // Zero out the time and nonce to produce pre-pow hash.
        let pre_pow_hash = hashing::header::hash_override_nonce_time(header, 0, 0);
        // PRE_POW_HASH || TIME || 32 zero byte padding || NONCE
        let hasher = PowHash::new(pre_pow_hash, header.timestamp);
        let matrix = Matrix::generate(pre_pow_hash);

        Self { matrix, target, hasher, pre_pow_hash, timestamp: header.timestamp }
    }

    pub fn pre_pow_hash(&self) -> Hash {
        self.pre_pow_hash
    }

    pub fn target(&self) -> Option<U256> {
        self.target
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Moves the state to a new header timestamp, keeping the generated matrix
    pub fn update_timestamp(&mut self, timestamp: u64) {
        self.hasher = PowHash::new(self.pre_pow_hash, timestamp);
        self.timestamp = timestamp;
    }

    #[inline]
    #[must_use]
    /// PRE_POW_HASH || TIME || 32 zero byte padding || NONCE
    pub fn calculate_pow(&self, nonce: u64) -> U256 {
        // Hasher already contains PRE_POW_HASH || TIME || 32 zero byte padding; so only the NONCE is missing
        let hash = self.hasher.clone().finalize_with_nonce(nonce);
        let mixed = diffusion::diffuse(hash, nonce);
        let hash = self.matrix.heavy_hash(mixed);
        // The digest is read as a little-endian number
        U256::from_little_endian(hash.as_slice())
    }

    #[inline]
    #[must_use]
    pub fn check_pow(&self, nonce: u64) -> (bool, U256) {
        let pow = self.calculate_pow(nonce);
        // The pow hash must be less or equal than the claimed target.
        (self.target.is_some_and(|target| pow <= target), pow)
    }

    /// Tries up to `attempts` successive nonces from `start` (wrapping) and returns the first
    /// one meeting the target. `should_stop` is polled between attempts.
    pub fn search_nonce(&self, start: u64, attempts: u64, should_stop: impl Fn() -> bool) -> Option<u64> {
        let mut nonce = start;
        for _ in 0..attempts {
            if should_stop() {
                trace!("nonce search stopped at {}", nonce);
                return None;
            }
            if self.check_pow(nonce).0 {
                debug!("found nonce {} for pre-pow hash {}", nonce, self.pre_pow_hash);
                return Some(nonce);
            }
            nonce = nonce.wrapping_add(1);
        }
        None
    }
}

/// Validates the header nonce against the target encoded in the header bits.
/// Does not check that the bits themselves are the expected difficulty.
pub fn check_proof_of_work(header: &Header) -> bool {
    let (passed, _) = State::new(header).check_pow(header.nonce);
    if !passed {
        trace!("block {} does not meet its declared target {:#x}", header.hash, header.bits);
    }
    passed
}

/// Same check as [`check_proof_of_work`], named after the compact bits it reads.
pub fn check_proof_of_work_by_bits(header: &Header) -> bool {
    check_proof_of_work(header)
}

pub fn calc_block_level(header: &Header, max_block_level: BlockLevel) -> BlockLevel {
    let (block_level, _) = calc_block_level_check_pow(header, max_block_level);
    block_level
}

pub fn calc_block_level_check_pow(header: &Header, max_block_level: BlockLevel) -> (BlockLevel, bool) {
    if header.is_genesis() {
        return (max_block_level, true); // Genesis has the max block level
    }

    let state = State::new(header);
    let (passed, pow) = state.check_pow(header.nonce);
    let block_level = calc_level_from_pow(pow, max_block_level);
    (block_level, passed)
}

pub fn calc_level_from_pow(pow: U256, max_block_level: BlockLevel) -> BlockLevel {
    let signed_block_level = max_block_level as i64 - pow.bits() as i64;
    max(signed_block_level, 0) as BlockLevel
}
