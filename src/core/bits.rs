// src/core/bits.rs

//! Big-endian conversion between measured bit sequences and integers.

/// Decodes a big-endian bit sequence (first element is the most significant bit).
///
/// ```
/// use onq_grover::core::bits_to_int;
/// assert_eq!(bits_to_int(&[true, false]), 2);
/// assert_eq!(bits_to_int(&[]), 0);
/// ```
pub fn bits_to_int(bits: &[bool]) -> u64 {
    bits.iter().fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Encodes `value` as `width` big-endian bits. Bits above `width` are dropped.
pub fn int_to_bits(value: u64, width: usize) -> Vec<bool> {
    (0..width)
        .rev()
        .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
        .collect()
}

/// True when `value` is representable in `width` bits.
pub(crate) fn fits_in(value: u64, width: usize) -> bool {
    width >= 64 || value < (1u64 << width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_bits_big_endian() {
        assert_eq!(int_to_bits(1, 2), vec![false, true]);
        assert_eq!(int_to_bits(6, 3), vec![true, true, false]);
        assert_eq!(int_to_bits(0, 0), Vec::<bool>::new());
    }

    #[test]
    fn test_bits_round_trip_all_three_bit_values() {
        for v in 0..8 {
            assert_eq!(bits_to_int(&int_to_bits(v, 3)), v);
        }
    }

    #[test]
    fn test_fits_in() {
        assert!(fits_in(3, 2));
        assert!(!fits_in(4, 2));
        assert!(fits_in(u64::MAX, 64));
    }
}
