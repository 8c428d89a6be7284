//! The multi-primitive stage between the PoW pre-image hash and the heavy hash:
//! data-dependent BLAKE3 and SHA3-256 rounds, a nonce-keyed per-byte branch
//! transform and two fixed bit-diffusion passes.

use crypto_hashes::{blake3_256, sha3_256, Hash};

const B3_ROUND_OFFSET: usize = 4;
const SHA3_ROUND_OFFSET: usize = 8;
const ROUND_RANGE_SIZE: usize = 4;

/// Turns the PoW pre-image hash into the 32 bytes fed to the heavy hash.
pub fn diffuse(pow_hash: Hash, nonce: u64) -> Hash {
    let mut sha3_hash = sha3_256(pow_hash.as_slice());
    let mut b3_hash = blake3_256(&sha3_hash);

    // Round counts are fixed by the first SHA3 digest, before any iteration
    let b3_rounds = round_count(&sha3_hash, B3_ROUND_OFFSET, 5);
    let sha3_rounds = round_count(&sha3_hash, SHA3_ROUND_OFFSET, 4);
    let extra_rounds = usize::from(sha3_hash[0] % 6);

    for _ in 0..b3_rounds + extra_rounds {
        b3_hash = blake3_256(&b3_hash);
        if b3_hash[5] % 2 == 0 {
            b3_hash[10] ^= 0xAA;
        } else {
            b3_hash[15] = b3_hash[15].wrapping_add(23);
        }
    }

    for _ in 0..sha3_rounds + extra_rounds {
        sha3_hash = sha3_256(&sha3_hash);
        if sha3_hash[3] % 3 == 0 {
            sha3_hash[20] ^= 0x55;
        } else if sha3_hash[7] % 5 == 0 {
            sha3_hash[25] = sha3_hash[25].rotate_left(7);
        }
    }

    branch_transform(&mut sha3_hash, nonce as u8);
    bit_manipulations(&mut sha3_hash);
    Hash::from_bytes(byte_mixing(&sha3_hash, &b3_hash))
}

/// A round count in `1..=modulus` read from four little-endian bytes at `offset`
#[inline]
fn round_count(seed: &[u8; 32], offset: usize, modulus: u32) -> usize {
    let mut word = [0u8; ROUND_RANGE_SIZE];
    word.copy_from_slice(&seed[offset..offset + ROUND_RANGE_SIZE]);
    (u32::from_le_bytes(word) % modulus + 1) as usize
}

/// Applies one of six fixed byte transforms, selected by `(byte ^ nonce) % 6`
fn branch_transform(data: &mut [u8; 32], nonce: u8) {
    for byte in data.iter_mut() {
        let b = *byte;
        *byte = match (b ^ nonce) % 6 {
            0 => b.wrapping_add(13).rotate_left(3),
            1 => b.wrapping_sub(7).rotate_left(5),
            2 => (b ^ 0x5A).wrapping_add(0xAC),
            3 => b.wrapping_mul(17) ^ 0xAA,
            4 => b.wrapping_sub(29).rotate_left(1),
            _ => b.wrapping_add(0xAA ^ nonce) ^ 0x45,
        };
    }
}

/// In-place pass; byte `i` reads byte `i + 1` before that byte is rewritten,
/// except the last byte which reads the already rewritten first byte.
fn bit_manipulations(data: &mut [u8; 32]) {
    for i in 0..32 {
        let next = data[(i + 1) % 32];
        let mut b = data[i] ^ next;
        b = b.rotate_left(3);
        b = b.wrapping_add(0x9F);
        b &= 0xFE;
        b ^= (i << 2) as u8;
        data[i] = b;
    }
}

fn byte_mixing(sha3_hash: &[u8; 32], b3_hash: &[u8; 32]) -> [u8; 32] {
    std::array::from_fn(|i| {
        let (a, b) = (sha3_hash[i], b3_hash[i]);
        (a | b).rotate_left(5) ^ ((a & b) << 3)
    })
}
