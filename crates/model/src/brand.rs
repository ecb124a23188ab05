//! ACL brand: which family of rules an entry belongs to.

use crate::error::InvalidEncoding;

/// The ACL family governing which field values are legal for an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Brand {
    /// Brand not (yet) known; no field values can be vouched for.
    #[default]
    Unknown = 0,
    /// POSIX.1e access/default ACLs: rwx permissions, implicit allow.
    Posix = 1,
    /// NFSv4/ZFS/SMB/macOS extended ACLs: 14 permissions, typed entries,
    /// inheritance flags.
    Nfs4 = 2,
}

impl TryFrom<u8> for Brand {
    type Error = InvalidEncoding;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Posix),
            2 => Ok(Self::Nfs4),
            other => Err(InvalidEncoding::UndefinedBrand(other)),
        }
    }
}
