//! Error types raised when canonical ACE values fail validation.

use crate::ace::{AceTag, AceType};
use crate::brand::Brand;

/// A raw integer could not be decoded as a canonical value.
///
/// Raised whenever a value crosses a trust boundary: decoding an ACE word
/// received from a peer, converting a discriminator byte, or re-checking a
/// word produced by a translation table. Always fatal to the value being
/// processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEncoding {
    /// One or more of the reserved bits 26-31 is set.
    #[error("reserved bits set in canonical ACE value {value:#010x}")]
    ReservedBits {
        /// The offending 32-bit value.
        value: u32,
    },
    /// The tag field decodes to a code outside the defined enumerants.
    #[error("undefined ACE tag code {0}")]
    UndefinedTag(u32),
    /// The entry type field decodes to a code outside the defined enumerants.
    #[error("undefined ACE type code {0}")]
    UndefinedType(u32),
    /// A brand discriminator byte outside the defined enumerants.
    #[error("undefined ACL brand {0}")]
    UndefinedBrand(u8),
    /// An ACL type discriminator byte outside the defined enumerants.
    #[error("undefined ACL type {0}")]
    UndefinedAclType(u8),
}

/// A field value is legal in the canonical model but not under the stated
/// brand.
///
/// The cross-field rules (POSIX-only tags, NFS4-only type/flag values) are
/// enforced here once rather than scattered across every code path that
/// manufactures an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BrandMismatch {
    /// Permission bits outside the brand's allowed mask.
    #[error("permissions {perms:#06x} outside the {brand:?} permission mask")]
    Perms {
        /// Brand the entry claimed.
        brand: Brand,
        /// Raw permission bits carried by the entry.
        perms: u32,
    },
    /// A tag reserved for the other brand.
    #[error("tag {tag:?} is not valid under the {brand:?} brand")]
    Tag {
        /// Brand the entry claimed.
        brand: Brand,
        /// The offending tag.
        tag: AceTag,
    },
    /// An entry type reserved for the NFS4 brand.
    #[error("entry type {ace_type:?} is not valid under the {brand:?} brand")]
    Type {
        /// Brand the entry claimed.
        brand: Brand,
        /// The offending entry type.
        ace_type: AceType,
    },
    /// Inheritance/audit flags on a brand that carries none.
    #[error("flags {flags:#04x} are not valid under the {brand:?} brand")]
    Flags {
        /// Brand the entry claimed.
        brand: Brand,
        /// Raw flag bits carried by the entry.
        flags: u32,
    },
    /// No field can be vouched for under an unknown brand.
    #[error("cannot validate an entry under an unknown ACL brand")]
    UnknownBrand,
}
