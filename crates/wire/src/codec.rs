//! # Overview
//!
//! Byte-level codec for canonical ACLs. The payload is self-describing
//! and fixed big-endian:
//!
//! ```text
//! acl_type  : 1 byte    discriminator
//! count     : u32       entry count
//! entries   : count ×
//!   word      : u32     canonical ACE value
//!   principal : 1 byte  discriminant
//!     0x01 -> id   : u32
//!     0x02 -> name : u32 length + bytes, zero-padded to 4
//! ```
//!
//! Decoding never trusts the peer: every ACE word passes full canonical
//! validation plus the brand check for the ACL's type before it is
//! accepted, counts and name lengths are bounded before allocation, and
//! trailing bytes are rejected.

use std::io::{self, Read, Write};

use aclbridge_model::{
    Ace, Acl, AclType, BrandMismatch, InvalidEncoding, Principal, validate_for_brand,
};

/// Upper bound on the entry count accepted from a peer.
///
/// Real filesystems cap ACLs far lower; the bound only exists so a
/// corrupt count cannot trigger a huge allocation.
pub const MAX_ACL_ENTRIES: usize = 8192;

/// Upper bound on a principal name accepted from a peer.
pub const MAX_PRINCIPAL_NAME: usize = 4096;

const PRINCIPAL_NONE: u8 = 0;
const PRINCIPAL_ID: u8 = 1;
const PRINCIPAL_NAME: u8 = 2;

/// Errors raised while encoding or decoding ACL payloads.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The payload ended before the advertised structure was complete.
    #[error("ACL payload truncated")]
    Truncated,
    /// A canonical value or discriminator failed validation.
    #[error(transparent)]
    Encoding(#[from] InvalidEncoding),
    /// An entry is not legal under the brand of the ACL carrying it.
    #[error(transparent)]
    Brand(#[from] BrandMismatch),
    /// An undefined principal discriminant byte.
    #[error("undefined principal discriminant {0}")]
    UndefinedPrincipal(u8),
    /// A principal name that is not valid UTF-8.
    #[error("principal name is not valid UTF-8")]
    PrincipalNotUtf8,
    /// A principal name longer than [`MAX_PRINCIPAL_NAME`].
    #[error("principal name length {len} exceeds the {max} byte limit")]
    PrincipalTooLong {
        /// Advertised name length.
        len: usize,
        /// The enforced limit.
        max: usize,
    },
    /// An entry count larger than [`MAX_ACL_ENTRIES`].
    #[error("entry count {count} exceeds the {max} entry limit")]
    TooManyEntries {
        /// Advertised entry count.
        count: usize,
        /// The enforced limit.
        max: usize,
    },
    /// Bytes left over after the advertised structure was consumed.
    #[error("ACL payload contained {bytes} trailing byte(s)")]
    TrailingData {
        /// Number of unexpected trailing bytes.
        bytes: usize,
    },
    /// A cache index referencing an ACL the receiver never saw.
    #[error("ACL cache index {index} out of range ({len} cached)")]
    BadCacheIndex {
        /// The index received.
        index: u32,
        /// Number of ACLs currently cached.
        len: usize,
    },
    /// Underlying stream failure.
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for WireError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(error)
        }
    }
}

pub(crate) fn read_u8<R: Read + ?Sized>(reader: &mut R) -> Result<u8, WireError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u32<R: Read + ?Sized>(reader: &mut R) -> Result<u32, WireError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn encode_principal(data: &mut Vec<u8>, principal: &Principal) {
    match principal {
        Principal::None => data.push(PRINCIPAL_NONE),
        Principal::Id(id) => {
            data.push(PRINCIPAL_ID);
            data.extend_from_slice(&id.to_be_bytes());
        }
        Principal::Name(name) => {
            data.push(PRINCIPAL_NAME);
            let bytes = name.as_bytes();
            data.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            data.extend_from_slice(bytes);
            let padding = (4 - bytes.len() % 4) % 4;
            data.extend(std::iter::repeat_n(0u8, padding));
        }
    }
}

fn recv_principal<R: Read + ?Sized>(reader: &mut R) -> Result<Principal, WireError> {
    match read_u8(reader)? {
        PRINCIPAL_NONE => Ok(Principal::None),
        PRINCIPAL_ID => Ok(Principal::Id(read_u32(reader)?)),
        PRINCIPAL_NAME => {
            let len = read_u32(reader)? as usize;
            if len > MAX_PRINCIPAL_NAME {
                return Err(WireError::PrincipalTooLong {
                    len,
                    max: MAX_PRINCIPAL_NAME,
                });
            }
            let padded = len + (4 - len % 4) % 4;
            let mut buf = vec![0u8; padded];
            reader.read_exact(&mut buf)?;
            buf.truncate(len);
            let name = String::from_utf8(buf).map_err(|_| WireError::PrincipalNotUtf8)?;
            Ok(Principal::Name(name))
        }
        other => Err(WireError::UndefinedPrincipal(other)),
    }
}

/// Encodes an ACL into its wire payload.
///
/// Infallible: a well-typed [`Acl`] always has a representation. The
/// inverse direction carries all the validation.
#[must_use]
pub fn encode_acl(acl: &Acl) -> Vec<u8> {
    let mut data = Vec::with_capacity(5 + acl.len() * 9);
    data.push(acl.acl_type as u8);
    data.extend_from_slice(&(acl.len() as u32).to_be_bytes());
    for ace in acl.iter() {
        data.extend_from_slice(&ace.bits().to_be_bytes());
        encode_principal(&mut data, &ace.principal);
    }
    data
}

/// Writes an ACL payload to a stream.
pub fn send_acl<W: Write + ?Sized>(writer: &mut W, acl: &Acl) -> io::Result<()> {
    writer.write_all(&encode_acl(acl))
}

/// Reads one ACL payload from a stream, validating every entry.
///
/// Entries are checked against the brand implied by the ACL type, so an
/// ACL with the unknown discriminator can only arrive empty.
pub fn recv_acl<R: Read + ?Sized>(reader: &mut R) -> Result<Acl, WireError> {
    let acl_type = AclType::try_from(read_u8(reader)?)?;
    let brand = acl_type.brand();

    let count = read_u32(reader)? as usize;
    if count > MAX_ACL_ENTRIES {
        return Err(WireError::TooManyEntries {
            count,
            max: MAX_ACL_ENTRIES,
        });
    }

    let mut acl = Acl::new(acl_type);
    acl.entries.reserve_exact(count);
    for _ in 0..count {
        let word = read_u32(reader)?;
        let principal = recv_principal(reader)?;
        let ace = Ace::from_bits(brand, word, principal)?;
        validate_for_brand(&ace, brand)?;
        acl.entries.push(ace);
    }
    Ok(acl)
}

/// Decodes an ACL from a complete in-memory payload.
///
/// Unlike [`recv_acl`], the whole buffer must be consumed; leftover
/// bytes indicate a framing error in the carrier.
pub fn decode_acl(data: &[u8]) -> Result<Acl, WireError> {
    let mut slice = data;
    let acl = recv_acl(&mut slice)?;
    if !slice.is_empty() {
        return Err(WireError::TrailingData {
            bytes: slice.len(),
        });
    }
    Ok(acl)
}
