//! Duplicate-ACL cache for the index-or-literal transmission scheme.
//!
//! ACLs repeat heavily across a file tree, so a sender transmits each
//! distinct ACL once and thereafter only a small index. Both ends append
//! every literal to their cache in arrival order, which keeps the index
//! spaces in lockstep without any negotiation.
//!
//! # Wire Format
//!
//! ```text
//! ndx+1 : u32   0 means a literal ACL payload follows
//! ```

use std::io::{self, Read, Write};

use aclbridge_model::Acl;

use crate::codec::{WireError, read_u32, recv_acl, send_acl};

/// Previously transmitted ACLs, in transmission order.
#[derive(Debug, Clone, Default)]
pub struct AclCache {
    entries: Vec<Acl>,
}

impl AclCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index of a previously stored ACL equal to `acl`, if any.
    #[must_use]
    pub fn find(&self, acl: &Acl) -> Option<u32> {
        self.entries
            .iter()
            .position(|cached| cached == acl)
            .map(|index| index as u32)
    }

    /// Appends an ACL, returning its index.
    pub fn store(&mut self, acl: Acl) -> u32 {
        self.entries.push(acl);
        (self.entries.len() - 1) as u32
    }

    /// Looks up a cached ACL by index.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Acl> {
        self.entries.get(index as usize)
    }

    /// Number of cached ACLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sends an ACL, replacing repeats with a cache index.
///
/// The first transmission of a distinct ACL goes out literally and is
/// stored; later transmissions of an equal ACL send only its index.
pub fn send_cached_acl<W: Write + ?Sized>(
    writer: &mut W,
    acl: &Acl,
    cache: &mut AclCache,
) -> io::Result<()> {
    if let Some(index) = cache.find(acl) {
        #[cfg(feature = "tracing")]
        tracing::trace!(index, "ACL cache hit");
        return writer.write_all(&(index + 1).to_be_bytes());
    }

    writer.write_all(&0u32.to_be_bytes())?;
    cache.store(acl.clone());
    send_acl(writer, acl)
}

/// Receives an ACL sent by [`send_cached_acl`], resolving cache indices.
///
/// Literal payloads are validated by [`recv_acl`] and appended to the
/// cache; an index referencing an ACL this receiver never saw is a
/// protocol error.
pub fn recv_cached_acl<R: Read + ?Sized>(
    reader: &mut R,
    cache: &mut AclCache,
) -> Result<Acl, WireError> {
    let ndx_plus_one = read_u32(reader)?;
    if ndx_plus_one == 0 {
        let acl = recv_acl(reader)?;
        cache.store(acl.clone());
        return Ok(acl);
    }

    let index = ndx_plus_one - 1;
    cache
        .get(index)
        .cloned()
        .ok_or(WireError::BadCacheIndex {
            index,
            len: cache.len(),
        })
}
