//! Canonical Access Control Entry: vocabulary types and the packed value.
//!
//! An [`Ace`] is an immutable value object. It is created either by
//! decoding a canonical word that arrived from a peer or by translating a
//! native entry, and both paths validate before construction, so a
//! well-typed `Ace` always packs into a well-formed word.

use crate::brand::Brand;
use crate::error::{BrandMismatch, InvalidEncoding};
use crate::layout;

/// Permission bit set, drawn from the 14-entry canonical vocabulary.
///
/// The low three bits are the POSIX rwx permissions; the remaining eleven
/// exist only under NFS4-family brands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcePerms(u32);

impl AcePerms {
    /// Execute file / traverse directory.
    pub const EXECUTE: u32 = 1 << 0;
    /// Write data / add file.
    pub const WRITE: u32 = 1 << 1;
    /// Read data / list directory.
    pub const READ: u32 = 1 << 2;
    /// Append data / add subdirectory.
    pub const APPEND_DATA: u32 = 1 << 3;
    /// Read extended (named) attributes.
    pub const READ_EXT_ATTRS: u32 = 1 << 4;
    /// Write extended (named) attributes.
    pub const WRITE_EXT_ATTRS: u32 = 1 << 5;
    /// Delete a child within a directory.
    pub const DELETE_CHILD: u32 = 1 << 6;
    /// Read basic attributes.
    pub const READ_ATTRS: u32 = 1 << 7;
    /// Write basic attributes.
    pub const WRITE_ATTRS: u32 = 1 << 8;
    /// Delete the object itself.
    pub const DELETE: u32 = 1 << 9;
    /// Read the ACL.
    pub const READ_ACL: u32 = 1 << 10;
    /// Write the ACL.
    pub const WRITE_ACL: u32 = 1 << 11;
    /// Change the owner.
    pub const WRITE_OWNER: u32 = 1 << 12;
    /// Synchronize (Windows semantics).
    pub const SYNCHRONIZE: u32 = 1 << 13;

    /// Permissions expressible under the POSIX brand (rwx only).
    pub const POSIX_MASK: u32 = 0b111;
    /// Permissions expressible under the NFS4 brand (all fourteen).
    pub const NFS4_MASK: u32 = (1 << layout::PERM_BITS) - 1;

    /// Wraps raw permission bits.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw permission bits.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Checks whether all of `bits` are set.
    #[must_use]
    pub const fn contains(self, bits: u32) -> bool {
        (self.0 & bits) == bits
    }

    /// Returns `true` when no permission bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The principal class an entry applies to, a 3-bit code in the canonical
/// word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum AceTag {
    /// No principal class recorded.
    #[default]
    Undefined = 0,
    /// The owning user of the object.
    UserObj = 1,
    /// A named user, identified by the carried principal.
    User = 2,
    /// The owning group of the object.
    GroupObj = 3,
    /// A named group, identified by the carried principal.
    Group = 4,
    /// Everyone else (POSIX.1e only).
    Other = 5,
    /// The POSIX.1e permission mask entry (POSIX.1e only).
    Mask = 6,
    /// All principals including the owner (NFS4 only).
    Everyone = 7,
}

impl TryFrom<u32> for AceTag {
    type Error = InvalidEncoding;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Undefined),
            1 => Ok(Self::UserObj),
            2 => Ok(Self::User),
            3 => Ok(Self::GroupObj),
            4 => Ok(Self::Group),
            5 => Ok(Self::Other),
            6 => Ok(Self::Mask),
            7 => Ok(Self::Everyone),
            other => Err(InvalidEncoding::UndefinedTag(other)),
        }
    }
}

/// The effect of an entry, a 2-bit code in the canonical word.
///
/// POSIX ACLs only ever use the implicit [`AceType::Allow`]; the audit
/// variants exist only under the NFS4 brand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum AceType {
    /// Access allowed.
    #[default]
    Allow = 0,
    /// Access denied.
    Deny = 1,
    /// Log matching accesses.
    Audit = 2,
    /// Raise an alarm on matching accesses.
    Alarm = 3,
}

impl TryFrom<u32> for AceType {
    type Error = InvalidEncoding;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Allow),
            1 => Ok(Self::Deny),
            2 => Ok(Self::Audit),
            3 => Ok(Self::Alarm),
            other => Err(InvalidEncoding::UndefinedType(other)),
        }
    }
}

/// Inheritance and audit flag set (NFS4 only; POSIX entries carry none).
///
/// Values are field-relative: bit 0 here lands on bit 19 of the packed
/// canonical word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AceFlags(u32);

impl AceFlags {
    /// Entry applies to files created in this directory.
    pub const OBJECT_INHERIT: u32 = 1 << 0;
    /// Entry applies to subdirectories created in this directory.
    pub const CONTAINER_INHERIT: u32 = 1 << 1;
    /// Inheritance stops after one level.
    pub const NO_PROPAGATE_INHERIT: u32 = 1 << 2;
    /// Entry exists only to be inherited, not applied here.
    pub const INHERIT_ONLY: u32 = 1 << 3;
    /// Entry was inherited from a parent.
    pub const INHERITED: u32 = 1 << 4;
    /// Audit successful accesses.
    pub const SUCCESSFUL_ACCESS: u32 = 1 << 5;
    /// Audit failed accesses.
    pub const FAILED_ACCESS: u32 = 1 << 6;

    /// All seven defined flag bits.
    pub const ALL: u32 = (1 << layout::FLAG_BITS) - 1;

    /// Wraps raw field-relative flag bits.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw field-relative flag bits.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Checks whether all of `bits` are set.
    #[must_use]
    pub const fn contains(self, bits: u32) -> bool {
        (self.0 & bits) == bits
    }

    /// Returns `true` when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The principal an entry applies to, carried alongside the packed word.
///
/// The identifier is owned by the platform and transport collaborators;
/// it never participates in the 32-bit encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Principal {
    /// No explicit principal (owner/group/everyone classes need none).
    #[default]
    None,
    /// A numeric user or group identifier.
    Id(u32),
    /// A symbolic user or group name.
    Name(String),
}

/// One canonical permission rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ace {
    /// The ACL family this entry's rules belong to.
    pub brand: Brand,
    /// Granted or affected permissions.
    pub perms: AcePerms,
    /// Principal class.
    pub tag: AceTag,
    /// Effect of the entry.
    pub ace_type: AceType,
    /// Inheritance/audit flags.
    pub flags: AceFlags,
    /// Principal identifier, if the tag calls for one.
    pub principal: Principal,
}

impl Ace {
    /// Packs the entry into its canonical 32-bit word.
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.perms.as_raw()
            | (self.tag as u32) << layout::TAG_SHIFT
            | (self.ace_type as u32) << layout::TYPE_SHIFT
            | self.flags.as_raw() << layout::FLAG_SHIFT
    }

    /// Unpacks a canonical word received from an untrusted source.
    ///
    /// Runs [`layout::validate`] first; a raw integer arriving from a
    /// platform or a peer is never trusted implicitly.
    pub fn from_bits(
        brand: Brand,
        word: u32,
        principal: Principal,
    ) -> Result<Self, InvalidEncoding> {
        layout::validate(word)?;
        Ok(Self {
            brand,
            perms: AcePerms::from_raw(layout::perm_bits(word)),
            tag: AceTag::try_from(layout::tag_code(word))?,
            ace_type: AceType::try_from(layout::type_code(word))?,
            flags: AceFlags::from_raw(layout::flag_bits(word)),
            principal,
        })
    }
}

/// Checks that every field of `ace` is legal under `brand`.
///
/// This is the single central cross-field check: `Mask` and `Other` tags
/// are POSIX-only, `Everyone`, non-`Allow` types and all flags are
/// NFS4-only, and each brand admits only its own permission mask. An
/// unknown brand vouches for nothing and always fails.
pub fn validate_for_brand(ace: &Ace, brand: Brand) -> Result<(), BrandMismatch> {
    match brand {
        Brand::Unknown => Err(BrandMismatch::UnknownBrand),
        Brand::Posix => {
            if ace.perms.as_raw() & !AcePerms::POSIX_MASK != 0 {
                return Err(BrandMismatch::Perms {
                    brand,
                    perms: ace.perms.as_raw(),
                });
            }
            if ace.tag == AceTag::Everyone {
                return Err(BrandMismatch::Tag {
                    brand,
                    tag: ace.tag,
                });
            }
            if ace.ace_type != AceType::Allow {
                return Err(BrandMismatch::Type {
                    brand,
                    ace_type: ace.ace_type,
                });
            }
            if !ace.flags.is_empty() {
                return Err(BrandMismatch::Flags {
                    brand,
                    flags: ace.flags.as_raw(),
                });
            }
            Ok(())
        }
        Brand::Nfs4 => {
            if ace.perms.as_raw() & !AcePerms::NFS4_MASK != 0 {
                return Err(BrandMismatch::Perms {
                    brand,
                    perms: ace.perms.as_raw(),
                });
            }
            if matches!(ace.tag, AceTag::Other | AceTag::Mask) {
                return Err(BrandMismatch::Tag {
                    brand,
                    tag: ace.tag,
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nfs4_ace() -> Ace {
        Ace {
            brand: Brand::Nfs4,
            perms: AcePerms::from_raw(AcePerms::READ | AcePerms::WRITE_ACL),
            tag: AceTag::Everyone,
            ace_type: AceType::Deny,
            flags: AceFlags::from_raw(AceFlags::CONTAINER_INHERIT),
            principal: Principal::None,
        }
    }

    #[test]
    fn pack_unpack_round_trip() {
        let ace = nfs4_ace();
        let word = ace.bits();
        let back = Ace::from_bits(Brand::Nfs4, word, Principal::None).expect("valid word");
        assert_eq!(back, ace);
    }

    #[test]
    fn bits_places_each_field() {
        let ace = nfs4_ace();
        let word = ace.bits();
        assert_eq!(layout::perm_bits(word), AcePerms::READ | AcePerms::WRITE_ACL);
        assert_eq!(layout::tag_code(word), AceTag::Everyone as u32);
        assert_eq!(layout::type_code(word), AceType::Deny as u32);
        assert_eq!(layout::flag_bits(word), AceFlags::CONTAINER_INHERIT);
    }

    #[test]
    fn from_bits_rejects_reserved_bits() {
        let word = nfs4_ace().bits() | 1 << 27;
        assert_eq!(
            Ace::from_bits(Brand::Nfs4, word, Principal::None),
            Err(InvalidEncoding::ReservedBits { value: word })
        );
    }

    #[test]
    fn posix_brand_rejects_extended_permissions() {
        let ace = Ace {
            brand: Brand::Posix,
            perms: AcePerms::from_raw(AcePerms::READ | AcePerms::APPEND_DATA),
            tag: AceTag::UserObj,
            ..Ace::default()
        };
        assert!(matches!(
            validate_for_brand(&ace, Brand::Posix),
            Err(BrandMismatch::Perms { .. })
        ));
    }

    #[test]
    fn posix_brand_rejects_nfs4_only_values() {
        let mut ace = Ace {
            brand: Brand::Posix,
            perms: AcePerms::from_raw(AcePerms::READ),
            tag: AceTag::UserObj,
            ..Ace::default()
        };
        assert_eq!(validate_for_brand(&ace, Brand::Posix), Ok(()));

        ace.tag = AceTag::Everyone;
        assert!(matches!(
            validate_for_brand(&ace, Brand::Posix),
            Err(BrandMismatch::Tag { .. })
        ));

        ace.tag = AceTag::UserObj;
        ace.ace_type = AceType::Deny;
        assert!(matches!(
            validate_for_brand(&ace, Brand::Posix),
            Err(BrandMismatch::Type { .. })
        ));

        ace.ace_type = AceType::Allow;
        ace.flags = AceFlags::from_raw(AceFlags::INHERIT_ONLY);
        assert!(matches!(
            validate_for_brand(&ace, Brand::Posix),
            Err(BrandMismatch::Flags { .. })
        ));
    }

    #[test]
    fn posix_only_tags_are_accepted_under_posix() {
        for tag in [AceTag::Other, AceTag::Mask] {
            let ace = Ace {
                brand: Brand::Posix,
                perms: AcePerms::from_raw(AcePerms::POSIX_MASK),
                tag,
                ..Ace::default()
            };
            assert_eq!(validate_for_brand(&ace, Brand::Posix), Ok(()));
        }
    }

    #[test]
    fn nfs4_accepts_what_posix_rejects() {
        let ace = nfs4_ace();
        assert_eq!(validate_for_brand(&ace, Brand::Nfs4), Ok(()));
        assert!(validate_for_brand(&ace, Brand::Posix).is_err());
    }

    #[test]
    fn nfs4_rejects_posix_only_tags() {
        for tag in [AceTag::Other, AceTag::Mask] {
            let ace = Ace {
                brand: Brand::Nfs4,
                tag,
                ..Ace::default()
            };
            assert!(matches!(
                validate_for_brand(&ace, Brand::Nfs4),
                Err(BrandMismatch::Tag { .. })
            ));
        }
    }

    #[test]
    fn unknown_brand_vouches_for_nothing() {
        assert_eq!(
            validate_for_brand(&Ace::default(), Brand::Unknown),
            Err(BrandMismatch::UnknownBrand)
        );
    }

    #[test]
    fn tag_and_type_conversion_reject_out_of_range_codes() {
        assert_eq!(AceTag::try_from(7), Ok(AceTag::Everyone));
        assert_eq!(AceTag::try_from(8), Err(InvalidEncoding::UndefinedTag(8)));
        assert_eq!(AceType::try_from(3), Ok(AceType::Alarm));
        assert_eq!(AceType::try_from(4), Err(InvalidEncoding::UndefinedType(4)));
    }
}
