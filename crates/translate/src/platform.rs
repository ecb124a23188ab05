//! Built-in translation tables for the platform families the codec
//! understands.
//!
//! Each constructor is pure data: an ordered pair list per bit group,
//! assembled into an [`AceTables`]. The native values are the constants
//! the corresponding adapter hands over, so adding a platform (or
//! tracking a kernel that moves a bit) means editing a table here, not
//! translation code.
//!
//! Coverage matches brand legality: every canonical pattern a brand
//! admits has a counterpart in that brand's table, so legal values
//! round-trip with zero residue.

use aclbridge_model::{AceFlags, AcePerms, AceTag, AceType, Brand, layout};

use crate::engine::AceTables;
use crate::table::{BitTable, MapPair};

const fn tag(tag: AceTag) -> u32 {
    (tag as u32) << layout::TAG_SHIFT
}

const fn entry_type(ty: AceType) -> u32 {
    (ty as u32) << layout::TYPE_SHIFT
}

const fn flag(bit: u32) -> u32 {
    bit << layout::FLAG_SHIFT
}

/// POSIX.1e table, matching the libacl bit assignment.
///
/// Only the rwx permissions and the six POSIX tags exist; entry types
/// (POSIX is implicitly allow) and inheritance flags have no native
/// bits, so those tables are empty and any canonical value using them
/// fails brand validation before reaching the bit level.
#[must_use]
pub fn posix() -> AceTables {
    let perms = BitTable::build([
        MapPair::new(AcePerms::EXECUTE, 0x01),
        MapPair::new(AcePerms::WRITE, 0x02),
        MapPair::new(AcePerms::READ, 0x04),
    ])
    .expect("static POSIX permission table is well formed");

    // Tag codes are multi-bit patterns; most-specific first.
    let tag_type = BitTable::build([
        MapPair::new(tag(AceTag::Mask), 0x10),
        MapPair::new(tag(AceTag::Other), 0x20),
        MapPair::new(tag(AceTag::Group), 0x08),
        MapPair::new(tag(AceTag::GroupObj), 0x04),
        MapPair::new(tag(AceTag::User), 0x02),
        MapPair::new(tag(AceTag::UserObj), 0x01),
    ])
    .expect("static POSIX tag table is well formed");

    AceTables::new(Brand::Posix, perms, tag_type, BitTable::empty())
}

/// NFSv4/ZFS table, matching the NFSv4 access mask and ace flag bits.
///
/// The three special principals carry their native who-bits; a named
/// group carries the identifier-group bit. The native model expresses
/// "named user" structurally (no who-bit at all), so this adapter
/// convention reserves `0x0800` as the named-user marker.
#[must_use]
pub fn nfs4() -> AceTables {
    let perms = BitTable::build([
        MapPair::new(AcePerms::READ, 0x0000_0001),
        MapPair::new(AcePerms::WRITE, 0x0000_0002),
        MapPair::new(AcePerms::APPEND_DATA, 0x0000_0004),
        MapPair::new(AcePerms::READ_EXT_ATTRS, 0x0000_0008),
        MapPair::new(AcePerms::WRITE_EXT_ATTRS, 0x0000_0010),
        MapPair::new(AcePerms::EXECUTE, 0x0000_0020),
        MapPair::new(AcePerms::DELETE_CHILD, 0x0000_0040),
        MapPair::new(AcePerms::READ_ATTRS, 0x0000_0080),
        MapPair::new(AcePerms::WRITE_ATTRS, 0x0000_0100),
        MapPair::new(AcePerms::DELETE, 0x0001_0000),
        MapPair::new(AcePerms::READ_ACL, 0x0002_0000),
        MapPair::new(AcePerms::WRITE_ACL, 0x0004_0000),
        MapPair::new(AcePerms::WRITE_OWNER, 0x0008_0000),
        MapPair::new(AcePerms::SYNCHRONIZE, 0x0010_0000),
    ])
    .expect("static NFSv4 permission table is well formed");

    let tag_type = BitTable::build([
        MapPair::new(tag(AceTag::Everyone), 0x4000),
        MapPair::new(tag(AceTag::Group), 0x0040),
        MapPair::new(tag(AceTag::GroupObj), 0x2000),
        MapPair::new(tag(AceTag::User), 0x0800),
        MapPair::new(tag(AceTag::UserObj), 0x1000),
        MapPair::new(entry_type(AceType::Alarm), 0x0003),
        MapPair::new(entry_type(AceType::Audit), 0x0002),
        MapPair::new(entry_type(AceType::Deny), 0x0001),
    ])
    .expect("static NFSv4 tag/type table is well formed");

    let flags = BitTable::build([
        MapPair::new(flag(AceFlags::OBJECT_INHERIT), 0x01),
        MapPair::new(flag(AceFlags::CONTAINER_INHERIT), 0x02),
        MapPair::new(flag(AceFlags::NO_PROPAGATE_INHERIT), 0x04),
        MapPair::new(flag(AceFlags::INHERIT_ONLY), 0x08),
        MapPair::new(flag(AceFlags::SUCCESSFUL_ACCESS), 0x10),
        MapPair::new(flag(AceFlags::FAILED_ACCESS), 0x20),
        MapPair::new(flag(AceFlags::INHERITED), 0x80),
    ])
    .expect("static NFSv4 flag table is well formed");

    AceTables::new(Brand::Nfs4, perms, tag_type, flags)
}

/// SMB/NT security descriptor table.
///
/// The NT file access mask shares its values with the NFSv4 mask, but
/// the ACE header flags differ (notably `INHERITED_ACE` at `0x10` and
/// the audit flags at `0x40`/`0x80`). Principal classes use the same
/// adapter who-bit convention as [`nfs4`], since SIDs have no bit
/// representation of their own.
#[must_use]
pub fn smb() -> AceTables {
    let perms = BitTable::build([
        MapPair::new(AcePerms::READ, 0x0000_0001),
        MapPair::new(AcePerms::WRITE, 0x0000_0002),
        MapPair::new(AcePerms::APPEND_DATA, 0x0000_0004),
        MapPair::new(AcePerms::READ_EXT_ATTRS, 0x0000_0008),
        MapPair::new(AcePerms::WRITE_EXT_ATTRS, 0x0000_0010),
        MapPair::new(AcePerms::EXECUTE, 0x0000_0020),
        MapPair::new(AcePerms::DELETE_CHILD, 0x0000_0040),
        MapPair::new(AcePerms::READ_ATTRS, 0x0000_0080),
        MapPair::new(AcePerms::WRITE_ATTRS, 0x0000_0100),
        MapPair::new(AcePerms::DELETE, 0x0001_0000),
        MapPair::new(AcePerms::READ_ACL, 0x0002_0000),
        MapPair::new(AcePerms::WRITE_ACL, 0x0004_0000),
        MapPair::new(AcePerms::WRITE_OWNER, 0x0008_0000),
        MapPair::new(AcePerms::SYNCHRONIZE, 0x0010_0000),
    ])
    .expect("static SMB permission table is well formed");

    let tag_type = BitTable::build([
        MapPair::new(tag(AceTag::Everyone), 0x4000),
        MapPair::new(tag(AceTag::Group), 0x0040),
        MapPair::new(tag(AceTag::GroupObj), 0x2000),
        MapPair::new(tag(AceTag::User), 0x0800),
        MapPair::new(tag(AceTag::UserObj), 0x1000),
        MapPair::new(entry_type(AceType::Alarm), 0x0003),
        MapPair::new(entry_type(AceType::Audit), 0x0002),
        MapPair::new(entry_type(AceType::Deny), 0x0001),
    ])
    .expect("static SMB tag/type table is well formed");

    let flags = BitTable::build([
        MapPair::new(flag(AceFlags::OBJECT_INHERIT), 0x01),
        MapPair::new(flag(AceFlags::CONTAINER_INHERIT), 0x02),
        MapPair::new(flag(AceFlags::NO_PROPAGATE_INHERIT), 0x04),
        MapPair::new(flag(AceFlags::INHERIT_ONLY), 0x08),
        MapPair::new(flag(AceFlags::INHERITED), 0x10),
        MapPair::new(flag(AceFlags::SUCCESSFUL_ACCESS), 0x40),
        MapPair::new(flag(AceFlags::FAILED_ACCESS), 0x80),
    ])
    .expect("static SMB flag table is well formed");

    AceTables::new(Brand::Nfs4, perms, tag_type, flags)
}
