//! Compact ("bits") encoding of proof-of-work targets.
//!
//! The compact form packs a 256-bit target into 32 bits: the high byte is a
//! base-256 exponent, bit 23 is a sign bit and the low 23 bits are the mantissa.

use primitive_types::U256;

const MANTISSA_MASK: u32 = 0x007f_ffff;
const SIGN_BIT: u32 = 0x0080_0000;

/// Decodes compact bits into a target.
///
/// Returns `None` for a negative target, which no hash can satisfy. Targets
/// wider than 256 bits saturate to `U256::MAX`.
pub fn compact_to_target(bits: u32) -> Option<U256> {
    let mantissa = bits & MANTISSA_MASK;
    let exponent = bits >> 24;

    if bits & SIGN_BIT != 0 && mantissa != 0 {
        return None;
    }

    if exponent <= 3 {
        return Some(U256::from(mantissa >> (8 * (3 - exponent))));
    }

    let overflows = mantissa != 0 && (exponent > 34 || (mantissa > 0xff && exponent > 33) || (mantissa > 0xffff && exponent > 32));
    if overflows {
        return Some(U256::MAX);
    }
    Some(U256::from(mantissa) << (8 * (exponent as usize - 3)))
}

/// Encodes a target into its compact form, losing precision below the top 23 bits.
pub fn target_to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 { (target.low_u64() << (8 * (3 - size))) as u32 } else { (target >> (8 * (size - 3))).low_u32() };

    // Keep the sign bit clear by moving to a larger exponent
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | ((size as u32) << 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_bits() {
        assert_eq!(compact_to_target(0x1d00ffff), Some(U256::from(0xffffu64) << 208usize));
        assert_eq!(compact_to_target(0x207fffff), Some(U256::from(0x7fffffu64) << 232usize));
        assert_eq!(compact_to_target(0x03123456), Some(U256::from(0x123456u64)));
        assert_eq!(compact_to_target(0x02123456), Some(U256::from(0x1234u64)));
        assert_eq!(compact_to_target(0x01003456), Some(U256::zero()));
        assert_eq!(compact_to_target(0), Some(U256::zero()));
    }

    #[test]
    fn test_negative_and_overflow() {
        assert_eq!(compact_to_target(0x1d80ffff), None);
        // Sign bit with a zero mantissa is just zero
        assert_eq!(compact_to_target(0x1d800000), Some(U256::zero()));
        assert_eq!(compact_to_target(0xff123456), Some(U256::MAX));
        assert_eq!(compact_to_target(0x22000001), Some(U256::one() << 248usize));
        assert_eq!(compact_to_target(0x22000100), Some(U256::MAX));
    }

    #[test]
    fn test_compact_roundtrip_on_normalized_bits() {
        for bits in [0x1d00ffffu32, 0x207fffff, 0x1e7fffff, 0x1f00ffff, 0x1b0404cb, 0x03123456] {
            let target = compact_to_target(bits).unwrap();
            assert_eq!(target_to_compact(target), bits, "bits {bits:#x}");
        }
        assert_eq!(target_to_compact(U256::from(0x80u64)), 0x02008000);
    }
}
