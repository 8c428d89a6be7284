use crypto_hashes::Hash;
use std::num::Wrapping;

/// xoshiro256++ seeded with the four little-endian lanes of a hash.
pub struct XoShiRo256PlusPlus {
    s0: Wrapping<u64>,
    s1: Wrapping<u64>,
    s2: Wrapping<u64>,
    s3: Wrapping<u64>,
}

impl XoShiRo256PlusPlus {
    #[inline(always)]
    pub fn new(hash: Hash) -> Self {
        let [s0, s1, s2, s3] = hash.to_le_u64();
        Self { s0: Wrapping(s0), s1: Wrapping(s1), s2: Wrapping(s2), s3: Wrapping(s3) }
    }

    #[inline(always)]
    pub fn u64(&mut self) -> u64 {
        let res = self.s0 + Wrapping((self.s0 + self.s3).0.rotate_left(23));
        let t = self.s1 << 17;
        self.s2 ^= self.s0;
        self.s3 ^= self.s1;
        self.s1 ^= self.s2;
        self.s0 ^= self.s3;

        self.s2 ^= t;
        self.s3 = Wrapping(self.s3.0.rotate_left(45));

        res.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let seed = Hash::from_bytes(std::array::from_fn(|i| i as u8));
        let mut generator = XoShiRo256PlusPlus::new(seed);
        assert_eq!(generator.u64(), 0x171513110f151311);
        assert_eq!(generator.u64(), 0xa2209f1d9c1e9d1b);
        assert_eq!(generator.u64(), 0xe0d100f0a090c0b0);
    }
}
