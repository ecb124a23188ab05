//! Collaborator-facing native ACL structures.
//!
//! A platform ACL reader fills these in from raw syscall results, one
//! `u32` per bit group in the platform's own bit assignment; a platform
//! ACL writer consumes the mirror structure produced by the reverse
//! translation. Neither the syscalls nor the principal identifier
//! resolution happen in this crate.

use aclbridge_model::{AclType, Principal};

/// One native Access Control Entry, as three raw bit groups plus the
/// principal the platform reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeAce {
    /// Permission bits in the platform's assignment.
    pub perms: u32,
    /// Tag and entry-type bits, combined in one group the way the
    /// platform (or its adapter) packs them.
    pub tag_type: u32,
    /// Inheritance/audit flag bits in the platform's assignment.
    pub flags: u32,
    /// Principal identifier supplied by the platform.
    pub principal: Principal,
}

/// An ordered native ACL as supplied by a platform reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeAcl {
    /// Which ACL variant the platform reported.
    pub acl_type: AclType,
    /// Entries in the platform's evaluation order.
    pub entries: Vec<NativeAce>,
}

impl NativeAcl {
    /// Creates an empty native ACL of the given type.
    #[must_use]
    pub const fn new(acl_type: AclType) -> Self {
        Self {
            acl_type,
            entries: Vec::new(),
        }
    }
}
