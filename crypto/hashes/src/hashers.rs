use once_cell::sync::Lazy;
use sha3::digest::{ExtendableOutput, Update};
use sha3::{CShake256, CShake256Core, Digest, Sha3_256};

pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

pub trait Hasher: HasherBase + Clone + Default {
    fn finalize(self) -> crate::Hash;
    fn reset(&mut self);
    #[inline(always)]
    fn hash<A: AsRef<[u8]>>(data: A) -> crate::Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

blake2b_hasher! {
    struct TransactionHash => b"TransactionHash",
    struct TransactionID => b"TransactionID",
    struct BlockHash => b"BlockHash",
}

cshake256_hasher! {
    struct PowHasher => b"ProofOfWorkHash",
    struct KHeavyHash => b"HeavyHash",
}

/// SHA3-256 of `data`, the general purpose hash of the PoW pipeline.
#[inline]
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Unkeyed BLAKE3 with a 32-byte output, the fast hash of the PoW pipeline.
#[inline]
pub fn blake3_256(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

macro_rules! cshake256_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        #[derive(Clone)]
        pub struct $name(CShake256);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                // The customized initial state is absorbed once and cloned afterwards
                static HASHER: Lazy<CShake256> = Lazy::new(|| CShake256::from_core(CShake256Core::new($domain_sep)));
                Self((*HASHER).clone())
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                Update::update(&mut self.0, data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> crate::Hash {
                let mut out = [0u8; 32];
                self.0.finalize_xof_into(&mut out);
                crate::Hash::from_bytes(out)
            }
        }
    impl_hasher!{ struct $name }
    )*};
}

macro_rules! blake2b_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        #[derive(Clone)]
        pub struct $name(blake2b_simd::State);

        impl $name {
            #[inline(always)]
            pub fn new() -> Self {
                Self(
                    blake2b_simd::Params::new()
                        .hash_length(32)
                        .key($domain_sep)
                        .to_state(),
                )
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> crate::Hash {
                let mut out = [0u8; 32];
                out.copy_from_slice(self.0.finalize().as_bytes());
                crate::Hash::from_bytes(out)
            }
        }
    impl_hasher!{ struct $name }
    )*};
}

macro_rules! impl_hasher {
    (struct $name:ident) => {
        impl HasherBase for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }
        }
        impl Hasher for $name {
            #[inline(always)]
            fn finalize(self) -> crate::Hash {
                $name::finalize(self)
            }
            #[inline(always)]
            fn reset(&mut self) {
                *self = Self::new();
            }
        }
        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

use {blake2b_hasher, cshake256_hasher, impl_hasher};

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha3_and_blake3_known_vectors() {
        assert_eq!(sha3_256(b""), hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"));
        assert_eq!(blake3_256(b""), hex!("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"));
    }

    #[test]
    fn domains_separate_outputs() {
        let data = b"cryptix";
        let block = BlockHash::hash(data);
        let tx = TransactionHash::hash(data);
        let pow = PowHasher::hash(data);
        let heavy = KHeavyHash::hash(data);
        assert_ne!(block, tx);
        assert_ne!(pow, heavy);
        assert_ne!(block, pow);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut hasher = KHeavyHash::new();
        hasher.update(b"heavy").update(b"hash");
        assert_eq!(hasher.finalize(), KHeavyHash::hash(b"heavyhash"));

        let mut hasher = BlockHash::new();
        hasher.update(b"block").update(b"hash");
        hasher.reset();
        assert_eq!(hasher.finalize(), BlockHash::hash(b""));
    }
}
