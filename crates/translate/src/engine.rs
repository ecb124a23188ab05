//! # Overview
//!
//! Whole-entry and whole-ACL translation between native and canonical
//! representations. [`translate_ace`] and [`translate_acl`] carry a
//! platform ACL into the canonical model; [`reverse_ace`] and
//! [`reverse_acl`] are the writer-side mirror. Every path validates the
//! result (or, in the reverse direction, the input) and refuses to
//! proceed over unmapped residue, so a lossy conversion is always an
//! explicit error and never a silently narrowed ACL.
//!
//! # Errors
//!
//! [`TranslationError`] reports per entry: which bit group failed, which
//! bits were unmapped, and for ACL-level calls the index of the failing
//! entry. ACL translation is all-or-nothing; a partially translated ACL
//! could under-enforce security and is never returned.

use std::fmt;

use aclbridge_model::{
    Ace, Acl, AclType, Brand, BrandMismatch, InvalidEncoding, layout, validate, validate_for_brand,
};

use crate::native::{NativeAce, NativeAcl};
use crate::table::BitTable;

/// The three translated bit groups of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitGroup {
    /// Permission bits.
    Perms,
    /// Combined tag and entry-type bits.
    TagType,
    /// Inheritance/audit flag bits.
    Flags,
}

impl fmt::Display for BitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perms => f.write_str("permission"),
            Self::TagType => f.write_str("tag/type"),
            Self::Flags => f.write_str("flag"),
        }
    }
}

/// A translation failure, with enough context to log or reject precisely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    /// Bits in one group had no counterpart in the active table.
    #[error("{group} bits {bits:#010x} have no counterpart in the active table")]
    Unmapped {
        /// The bit group that produced the residue.
        group: BitGroup,
        /// The unmapped bits, in the representation being translated from.
        bits: u32,
    },
    /// The translated word failed canonical validation.
    #[error(transparent)]
    Encoding(#[from] InvalidEncoding),
    /// The translated entry is not legal under the table's brand.
    #[error(transparent)]
    Brand(#[from] BrandMismatch),
    /// The ACL's type discriminator does not belong to the table's brand.
    #[error("ACL type {acl_type:?} does not belong to the {brand:?} brand of the active table")]
    AclBrand {
        /// The ACL type supplied.
        acl_type: AclType,
        /// The brand the table translates for.
        brand: Brand,
    },
    /// A specific entry of an ACL failed to translate.
    #[error("ACL entry {index}: {source}")]
    Entry {
        /// Zero-based index of the failing entry.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<TranslationError>,
    },
}

/// One platform's full table set: a brand plus one [`BitTable`] per bit
/// group.
///
/// Built once at startup and immutable afterwards; holding no interior
/// mutability, a table set can be shared freely across concurrent
/// translation calls.
#[derive(Debug, Clone)]
pub struct AceTables {
    brand: Brand,
    perms: BitTable,
    tag_type: BitTable,
    flags: BitTable,
}

impl AceTables {
    /// Assembles a table set.
    ///
    /// The canonical side of `tag_type` carries field codes already
    /// shifted into the canonical word (tag at bit 14, type at bit 17),
    /// and the canonical side of `flags` carries flag bits shifted to
    /// bit 19, so the three groups OR together into one word.
    #[must_use]
    pub const fn new(brand: Brand, perms: BitTable, tag_type: BitTable, flags: BitTable) -> Self {
        Self {
            brand,
            perms,
            tag_type,
            flags,
        }
    }

    /// The brand this table set translates for.
    #[must_use]
    pub const fn brand(&self) -> Brand {
        self.brand
    }

    /// The permission-group table.
    #[must_use]
    pub const fn perms(&self) -> &BitTable {
        &self.perms
    }

    /// The combined tag/type-group table.
    #[must_use]
    pub const fn tag_type(&self) -> &BitTable {
        &self.tag_type
    }

    /// The flag-group table.
    #[must_use]
    pub const fn flags(&self) -> &BitTable {
        &self.flags
    }
}

fn group_to_canonical(
    table: &BitTable,
    group: BitGroup,
    native: u32,
) -> Result<u32, TranslationError> {
    let out = table.encode(native);
    if out.unmapped != 0 {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            group = %group,
            unmapped = out.unmapped,
            "native bits without canonical counterpart"
        );
        return Err(TranslationError::Unmapped {
            group,
            bits: out.unmapped,
        });
    }
    Ok(out.bits)
}

fn group_to_native(
    table: &BitTable,
    group: BitGroup,
    canonical: u32,
) -> Result<u32, TranslationError> {
    let out = table.decode(canonical);
    if out.unmapped != 0 {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            group = %group,
            unmapped = out.unmapped,
            "canonical bits without native counterpart"
        );
        return Err(TranslationError::Unmapped {
            group,
            bits: out.unmapped,
        });
    }
    Ok(out.bits)
}

/// Translates one native entry into a canonical [`Ace`].
///
/// Applies the three bit-group translations in sequence, then validates
/// the assembled word and its brand applicability. This is the entry
/// point platform readers drive; the per-group operations are exposed on
/// [`BitTable`] for callers that need raw residue reporting.
pub fn translate_ace(tables: &AceTables, native: &NativeAce) -> Result<Ace, TranslationError> {
    let perms = group_to_canonical(&tables.perms, BitGroup::Perms, native.perms)?;
    let tag_type = group_to_canonical(&tables.tag_type, BitGroup::TagType, native.tag_type)?;
    let flags = group_to_canonical(&tables.flags, BitGroup::Flags, native.flags)?;

    let word = perms | tag_type | flags;
    validate(word)?;
    let ace = Ace::from_bits(tables.brand, word, native.principal.clone())?;
    validate_for_brand(&ace, tables.brand)?;
    Ok(ace)
}

/// Translates a canonical [`Ace`] back into the platform's native bit
/// groups.
///
/// The canonical value is validated before any table lookup; a canonical
/// entry that is not legal under the table's brand never reaches the
/// bit level.
pub fn reverse_ace(tables: &AceTables, ace: &Ace) -> Result<NativeAce, TranslationError> {
    let word = ace.bits();
    validate(word)?;
    validate_for_brand(ace, tables.brand)?;

    let perms = group_to_native(&tables.perms, BitGroup::Perms, layout::perm_bits(word))?;
    let tag_type = group_to_native(
        &tables.tag_type,
        BitGroup::TagType,
        word & (layout::TAG_MASK | layout::TYPE_MASK),
    )?;
    let flags = group_to_native(&tables.flags, BitGroup::Flags, word & layout::FLAG_MASK)?;

    Ok(NativeAce {
        perms,
        tag_type,
        flags,
        principal: ace.principal.clone(),
    })
}

/// Translates a whole native ACL, preserving entry order.
///
/// Fails on the first entry that does not translate, reporting its
/// index; no partial ACL is ever returned.
pub fn translate_acl(tables: &AceTables, native: &NativeAcl) -> Result<Acl, TranslationError> {
    if native.acl_type.brand() != tables.brand {
        return Err(TranslationError::AclBrand {
            acl_type: native.acl_type,
            brand: tables.brand,
        });
    }

    let mut acl = Acl::new(native.acl_type);
    for (index, entry) in native.entries.iter().enumerate() {
        let ace = translate_ace(tables, entry).map_err(|source| TranslationError::Entry {
            index,
            source: Box::new(source),
        })?;
        acl.entries.push(ace);
    }
    Ok(acl)
}

/// Translates a whole canonical ACL back to native form, preserving
/// entry order, with the same all-or-nothing contract as
/// [`translate_acl`].
pub fn reverse_acl(tables: &AceTables, acl: &Acl) -> Result<NativeAcl, TranslationError> {
    if acl.acl_type.brand() != tables.brand {
        return Err(TranslationError::AclBrand {
            acl_type: acl.acl_type,
            brand: tables.brand,
        });
    }

    let mut native = NativeAcl::new(acl.acl_type);
    for (index, ace) in acl.iter().enumerate() {
        let entry = reverse_ace(tables, ace).map_err(|source| TranslationError::Entry {
            index,
            source: Box::new(source),
        })?;
        native.entries.push(entry);
    }
    Ok(native)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MapPair;
    use aclbridge_model::{AceFlags, AcePerms, AceTag, AceType, Principal};

    fn rwx_tables() -> AceTables {
        let perms = BitTable::build([
            MapPair::new(AcePerms::EXECUTE, 1 << 0),
            MapPair::new(AcePerms::WRITE, 1 << 1),
            MapPair::new(AcePerms::READ, 1 << 2),
        ])
        .expect("distinct pairs");
        let tag_type = BitTable::build([
            MapPair::new((AceTag::Mask as u32) << layout::TAG_SHIFT, 0x10),
            MapPair::new((AceTag::Other as u32) << layout::TAG_SHIFT, 0x20),
            MapPair::new((AceTag::Group as u32) << layout::TAG_SHIFT, 0x08),
            MapPair::new((AceTag::GroupObj as u32) << layout::TAG_SHIFT, 0x04),
            MapPair::new((AceTag::User as u32) << layout::TAG_SHIFT, 0x02),
            MapPair::new((AceTag::UserObj as u32) << layout::TAG_SHIFT, 0x01),
        ])
        .expect("distinct pairs");
        AceTables::new(Brand::Posix, perms, tag_type, BitTable::empty())
    }

    #[test]
    fn translates_posix_rwx_entry() {
        let tables = rwx_tables();
        let native = NativeAce {
            perms: 0b111,
            tag_type: 0x01,
            flags: 0,
            principal: Principal::None,
        };

        let ace = translate_ace(&tables, &native).expect("clean translation");
        assert_eq!(ace.perms.as_raw(), 0b111);
        assert_eq!(ace.tag, AceTag::UserObj);
        assert_eq!(ace.ace_type, AceType::Allow);
        assert!(ace.flags.is_empty());

        let back = reverse_ace(&tables, &ace).expect("clean reverse");
        assert_eq!(back, native);
    }

    #[test]
    fn unmapped_native_bit_is_an_error_not_a_truncation() {
        let tables = rwx_tables();
        let native = NativeAce {
            perms: 0b111 | 1 << 5,
            tag_type: 0x01,
            ..NativeAce::default()
        };
        assert_eq!(
            translate_ace(&tables, &native),
            Err(TranslationError::Unmapped {
                group: BitGroup::Perms,
                bits: 1 << 5,
            })
        );
    }

    #[test]
    fn reverse_validates_brand_before_decoding() {
        let tables = rwx_tables();
        let ace = Ace {
            brand: Brand::Posix,
            perms: AcePerms::from_raw(AcePerms::READ),
            tag: AceTag::UserObj,
            ace_type: AceType::Allow,
            flags: AceFlags::from_raw(AceFlags::INHERIT_ONLY),
            principal: Principal::None,
        };
        assert!(matches!(
            reverse_ace(&tables, &ace),
            Err(TranslationError::Brand(BrandMismatch::Flags { .. }))
        ));
    }

    #[test]
    fn acl_translation_reports_failing_entry_index() {
        let tables = rwx_tables();
        let native = NativeAcl {
            acl_type: AclType::Access,
            entries: vec![
                NativeAce {
                    perms: 0b101,
                    tag_type: 0x01,
                    ..NativeAce::default()
                },
                NativeAce {
                    perms: 1 << 9,
                    tag_type: 0x04,
                    ..NativeAce::default()
                },
            ],
        };

        match translate_acl(&tables, &native) {
            Err(TranslationError::Entry { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(
                    *source,
                    TranslationError::Unmapped {
                        group: BitGroup::Perms,
                        bits: 1 << 9,
                    }
                );
            }
            other => panic!("expected per-entry error, got {other:?}"),
        }
    }

    #[test]
    fn acl_type_must_match_table_brand() {
        let tables = rwx_tables();
        let native = NativeAcl::new(AclType::Nfs4);
        assert_eq!(
            translate_acl(&tables, &native),
            Err(TranslationError::AclBrand {
                acl_type: AclType::Nfs4,
                brand: Brand::Posix,
            })
        );
    }

    #[test]
    fn acl_round_trip_preserves_order() {
        let tables = rwx_tables();
        let native = NativeAcl {
            acl_type: AclType::Access,
            entries: vec![
                NativeAce {
                    perms: 0b111,
                    tag_type: 0x01,
                    ..NativeAce::default()
                },
                NativeAce {
                    perms: 0b101,
                    tag_type: 0x04,
                    ..NativeAce::default()
                },
                NativeAce {
                    perms: 0b100,
                    tag_type: 0x20,
                    ..NativeAce::default()
                },
            ],
        };

        let acl = translate_acl(&tables, &native).expect("clean translation");
        assert_eq!(acl.len(), 3);
        assert_eq!(acl.entries[1].tag, AceTag::GroupObj);

        let back = reverse_acl(&tables, &acl).expect("clean reverse");
        assert_eq!(back, native);
    }
}
