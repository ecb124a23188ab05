//! Canonical ACL: an ordered sequence of entries plus its type
//! discriminator.

use crate::ace::Ace;
use crate::brand::Brand;
use crate::error::InvalidEncoding;

/// The ACL type discriminator carried on the wire.
///
/// `Access` and `Default` are the two POSIX.1e variants; a default ACL
/// applies only to directories and governs inheritance for newly created
/// children. `Nfs4` covers all extended-ACL platforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AclType {
    /// Type not (yet) known.
    #[default]
    Unknown = 0,
    /// POSIX.1e access ACL.
    Access = 1,
    /// POSIX.1e default ACL (directories only).
    Default = 2,
    /// NFSv4/ZFS/SMB/macOS extended ACL.
    Nfs4 = 3,
}

impl AclType {
    /// The brand whose vocabulary entries of this ACL type use.
    #[must_use]
    pub const fn brand(self) -> Brand {
        match self {
            Self::Unknown => Brand::Unknown,
            Self::Access | Self::Default => Brand::Posix,
            Self::Nfs4 => Brand::Nfs4,
        }
    }
}

impl TryFrom<u8> for AclType {
    type Error = InvalidEncoding;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Access),
            2 => Ok(Self::Default),
            3 => Ok(Self::Nfs4),
            other => Err(InvalidEncoding::UndefinedAclType(other)),
        }
    }
}

/// An ordered list of canonical entries governing one filesystem object.
///
/// Entry order is preserved verbatim through every codec: NFS4-family
/// ACLs evaluate first-match-wins, and POSIX order, while conventionally
/// irrelevant, is still round-tripped exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Acl {
    /// Which ACL variant this is.
    pub acl_type: AclType,
    /// Entries in evaluation order.
    pub entries: Vec<Ace>,
}

impl Acl {
    /// Creates an empty ACL of the given type.
    #[must_use]
    pub const fn new(acl_type: AclType) -> Self {
        Self {
            acl_type,
            entries: Vec::new(),
        }
    }

    /// The brand of this ACL's entries, derived from its type.
    #[must_use]
    pub const fn brand(&self) -> Brand {
        self.acl_type.brand()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the ACL holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ace> {
        self.entries.iter()
    }
}
