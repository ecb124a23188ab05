//! Bit layout of the canonical 32-bit ACE value.
//!
//! The four fields occupy fixed, non-overlapping ranges; the top six bits
//! are reserved and must be zero in any valid value. Transports and
//! translation tables both read these constants rather than hard-coding
//! shifts, so the layout has a single point of truth.

use crate::ace::{AceTag, AceType};
use crate::error::InvalidEncoding;

/// Number of permission bits (bits 0-13).
pub const PERM_BITS: u32 = 14;
/// Mask covering the permission field.
pub const PERM_MASK: u32 = (1 << PERM_BITS) - 1;

/// Bit offset of the tag field.
pub const TAG_SHIFT: u32 = 14;
/// Width of the tag field in bits.
pub const TAG_BITS: u32 = 3;
/// Mask covering the tag field.
pub const TAG_MASK: u32 = 0b111 << TAG_SHIFT;

/// Bit offset of the entry type field.
pub const TYPE_SHIFT: u32 = 17;
/// Width of the entry type field in bits.
pub const TYPE_BITS: u32 = 2;
/// Mask covering the entry type field.
pub const TYPE_MASK: u32 = 0b11 << TYPE_SHIFT;

/// Bit offset of the flag field.
pub const FLAG_SHIFT: u32 = 19;
/// Width of the flag field in bits.
pub const FLAG_BITS: u32 = 7;
/// Mask covering the flag field.
pub const FLAG_MASK: u32 = 0x7F << FLAG_SHIFT;

/// Mask of all bits a valid canonical value may use (bits 0-25).
pub const VALID_MASK: u32 = (1 << 26) - 1;

/// Extracts the permission bits from a canonical word.
#[must_use]
pub const fn perm_bits(word: u32) -> u32 {
    word & PERM_MASK
}

/// Extracts the tag code (0-7) from a canonical word.
#[must_use]
pub const fn tag_code(word: u32) -> u32 {
    (word & TAG_MASK) >> TAG_SHIFT
}

/// Extracts the entry type code (0-3) from a canonical word.
#[must_use]
pub const fn type_code(word: u32) -> u32 {
    (word & TYPE_MASK) >> TYPE_SHIFT
}

/// Extracts the flag bits (field-relative, 7 bits) from a canonical word.
#[must_use]
pub const fn flag_bits(word: u32) -> u32 {
    (word & FLAG_MASK) >> FLAG_SHIFT
}

/// Checks that a raw 32-bit value is a well-formed canonical ACE word.
///
/// Fails when any reserved bit is set or when the tag/type field decodes
/// outside its enumerant set. Brand applicability is a separate concern,
/// see [`crate::validate_for_brand`].
pub fn validate(word: u32) -> Result<(), InvalidEncoding> {
    if word & !VALID_MASK != 0 {
        return Err(InvalidEncoding::ReservedBits { value: word });
    }
    AceTag::try_from(tag_code(word))?;
    AceType::try_from(type_code(word))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_do_not_overlap() {
        assert_eq!(PERM_MASK & TAG_MASK, 0);
        assert_eq!(TAG_MASK & TYPE_MASK, 0);
        assert_eq!(TYPE_MASK & FLAG_MASK, 0);
        assert_eq!(PERM_MASK | TAG_MASK | TYPE_MASK | FLAG_MASK, VALID_MASK);
    }

    #[test]
    fn validate_accepts_every_in_range_value() {
        assert!(validate(0).is_ok());
        assert!(validate(VALID_MASK).is_ok());
        assert!(validate(PERM_MASK).is_ok());
        assert!(validate(TAG_MASK | TYPE_MASK).is_ok());
    }

    #[test]
    fn validate_rejects_reserved_bits() {
        for bit in 26..32 {
            let word = 1u32 << bit;
            assert_eq!(
                validate(word),
                Err(InvalidEncoding::ReservedBits { value: word })
            );
        }
        assert!(validate(u32::MAX).is_err());
    }

    #[test]
    fn extractors_pick_their_field() {
        let word = 0b101 << TAG_SHIFT | 0b10 << TYPE_SHIFT | 0x55 << FLAG_SHIFT | 0x2AAA;
        assert_eq!(perm_bits(word), 0x2AAA);
        assert_eq!(tag_code(word), 0b101);
        assert_eq!(type_code(word), 0b10);
        assert_eq!(flag_bits(word), 0x55);
    }
}
