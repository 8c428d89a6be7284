use crate::xoshiro::XoShiRo256PlusPlus;
use crypto_hashes::{Hash, Hasher, KHeavyHash};

const EPS: f64 = 1e-9;

const MEMORY_TABLE_SIZE: usize = 16 * 1024;
const MEMORY_TABLE_MASK: usize = 0x3FFF;
const MEMORY_TABLE_ROUNDS: usize = 12;

/// Mixed into the product right before the S-box stage
pub const FINAL_CRYPTIX: [u8; 32] = [
    0xE4, 0x7F, 0x3F, 0x73, 0xB4, 0xF2, 0xD2, 0x8C, 0x55, 0xD1, 0xE7, 0x6B, 0xE0, 0xAD, 0x70, 0x55, 0xCB, 0x3F, 0x8C, 0x8F, 0xF5, 0xA0,
    0xE2, 0x60, 0x81, 0xC2, 0x5A, 0x84, 0x32, 0x81, 0xE4, 0x92,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix([[u16; 64]; 64]);

impl Matrix {
    /// Fills matrices from the generator seeded by `hash` until one has full rank
    pub fn generate(hash: Hash) -> Self {
        let mut generator = XoShiRo256PlusPlus::new(hash);
        loop {
            let mat = Self::rand_matrix_no_rank_check(&mut generator);
            if mat.compute_rank() == 64 {
                return mat;
            }
        }
    }

    #[inline(always)]
    fn rand_matrix_no_rank_check(generator: &mut XoShiRo256PlusPlus) -> Self {
        Self(std::array::from_fn(|_| {
            let mut row = [0u16; 64];
            for chunk in row.chunks_exact_mut(16) {
                let val = generator.u64();
                for (shift, elem) in chunk.iter_mut().enumerate() {
                    *elem = ((val >> (4 * shift)) & 0x0F) as u16;
                }
            }
            row
        }))
    }

    /// Rank over the reals, by Gaussian elimination with an `EPS` pivot tolerance
    pub fn compute_rank(&self) -> usize {
        let mut mat_float = [[0f64; 64]; 64];
        for i in 0..64 {
            for j in 0..64 {
                mat_float[i][j] = f64::from(self.0[i][j]);
            }
        }
        let mut rank = 0;
        let mut row_selected = [false; 64];
        for i in 0..64 {
            let mut j = 0;
            while j < 64 {
                if !row_selected[j] && mat_float[j][i].abs() > EPS {
                    break;
                }
                j += 1;
            }
            if j != 64 {
                rank += 1;
                row_selected[j] = true;
                for p in (i + 1)..64 {
                    mat_float[j][p] /= mat_float[j][i];
                }
                for k in 0..64 {
                    if k != j && mat_float[k][i].abs() > EPS {
                        for p in (i + 1)..64 {
                            mat_float[k][p] -= mat_float[j][p] * mat_float[k][i];
                        }
                    }
                }
            }
        }
        rank
    }

    /// Matrix product of the input nibbles followed by the memory table, the
    /// `FINAL_CRYPTIX` mask and the input-keyed S-box, finalized with `KHeavyHash`.
    pub fn heavy_hash(&self, hash: Hash) -> Hash {
        let hash_bytes = hash.as_bytes();
        let nibbles: [u16; 64] = {
            let mut arr = [0u16; 64];
            for (i, &byte) in hash_bytes.iter().enumerate() {
                arr[2 * i] = u16::from(byte >> 4);
                arr[2 * i + 1] = u16::from(byte & 0x0F);
            }
            arr
        };

        let mut product = [0u8; 32];
        let mut row_sums = [0u16; 32];
        for i in 0..32 {
            let (sum1, sum2) = self.0[2 * i]
                .iter()
                .zip(self.0[2 * i + 1].iter())
                .zip(nibbles.iter())
                .fold((0u16, 0u16), |(sum1, sum2), ((&a, &b), &nibble)| (sum1 + a * nibble, sum2 + b * nibble));

            let a_nibble = (sum1 & 0xF) ^ ((sum2 >> 4) & 0xF) ^ ((sum1 >> 8) & 0xF);
            let b_nibble = (sum2 & 0xF) ^ ((sum1 >> 4) & 0xF) ^ ((sum2 >> 8) & 0xF);
            product[i] = ((a_nibble << 4) | b_nibble) as u8 ^ hash_bytes[i];
            row_sums[i] = sum1;
        }

        let table = memory_table(&row_sums);
        for (i, byte) in product.iter_mut().enumerate() {
            *byte ^= table[(usize::from(*byte) * 47 + i) % MEMORY_TABLE_SIZE];
            *byte ^= FINAL_CRYPTIX[i];
        }

        let sbox = sbox(&hash_bytes);
        for byte in product.iter_mut() {
            *byte = sbox[usize::from(*byte)];
        }

        KHeavyHash::hash(product)
    }
}

/// 16 KiB table scrambled by twelve data-dependent writes per row sum
fn memory_table(row_sums: &[u16; 32]) -> Box<[u8; MEMORY_TABLE_SIZE]> {
    let mut table = Box::new([0u8; MEMORY_TABLE_SIZE]);
    let mut index = 0usize;
    for (i, &sum) in row_sums.iter().enumerate() {
        for _ in 0..MEMORY_TABLE_ROUNDS {
            index = (index ^ (usize::from(table[(index * 7 + i) % MEMORY_TABLE_SIZE]) * 19)) & MEMORY_TABLE_MASK;
            index = ((index * 73 + i * 41) & MEMORY_TABLE_MASK) % MEMORY_TABLE_SIZE;
            table[(index + i * 13) % MEMORY_TABLE_SIZE] ^= sum as u8;
        }
    }
    table
}

/// Substitution table keyed by the heavy hash input
fn sbox(key: &[u8; 32]) -> [u8; 256] {
    std::array::from_fn(|v| {
        let s = (v as u8).wrapping_mul(key[v % 32]).rotate_left(5) ^ 0x5A;
        s ^ s.rotate_left(4) ^ s.rotate_right(2)
    })
}
