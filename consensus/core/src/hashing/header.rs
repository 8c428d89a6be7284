use super::HasherExtensions;
use crate::{header::Header, BlueWorkType, Hash};
use crypto_hashes::{BlockHash, HasherBase};

/// Returns the header hash, optionally overriding nonce and timestamp.
/// Used by the PoW engine to obtain the pre-PoW hash without mutating the header.
#[inline]
pub fn hash_override_nonce_time(header: &Header, nonce: u64, timestamp: u64) -> Hash {
    let mut hasher = BlockHash::new();
    hasher.write_u16(header.version).write_len(header.parents_by_level.len()); // Write the number of parent levels

    // Write parents at each level
    header.parents_by_level.iter().for_each(|level| {
        hasher.write_var_array(level);
    });

    hasher
        .update(header.hash_merkle_root)
        .update(header.accepted_id_merkle_root)
        .update(header.utxo_commitment)
        .write_u64(timestamp)
        .write_u32(header.bits)
        .write_u64(nonce)
        .write_u64(header.daa_score)
        .write_u64(header.blue_score)
        .write_var_bytes(&blue_work_be_bytes(header.blue_work))
        .update(header.pruning_point);

    hasher.finalize()
}

/// Returns the header hash.
pub fn hash(header: &Header) -> Hash {
    hash_override_nonce_time(header, header.nonce, header.timestamp)
}

/// Big-endian bytes of the blue work with leading zero bytes stripped (empty for zero work).
fn blue_work_be_bytes(blue_work: BlueWorkType) -> Vec<u8> {
    let mut be = [0u8; 32];
    blue_work.to_big_endian(&mut be);
    let start = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    be[start..].to_vec()
}
