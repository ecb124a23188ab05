#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Wire codec for canonical ACLs.
//!
//! The canonical 32-bit ACE layout is defined by `aclbridge-model`; this
//! crate owns everything around it on the wire: the byte framing of a
//! whole ACL, streaming send/receive over `Read`/`Write`, and the
//! duplicate-ACL cache that collapses repeated ACLs into small indices.
//! Byte order is fixed big-endian so two ends never need to negotiate
//! it.
//!
//! Decoding is the trust boundary: every word coming off the wire is
//! validated against the canonical layout and against the brand implied
//! by the ACL's type discriminator before a value is handed to the
//! caller.
//!
//! # Examples
//!
//! ```
//! use aclbridge_model::{Ace, AcePerms, AceTag, Acl, AclType, Brand};
//! use aclbridge_wire::{decode_acl, encode_acl};
//!
//! let acl = Acl {
//!     acl_type: AclType::Access,
//!     entries: vec![Ace {
//!         brand: Brand::Posix,
//!         perms: AcePerms::from_raw(AcePerms::READ | AcePerms::WRITE),
//!         tag: AceTag::UserObj,
//!         ..Ace::default()
//!     }],
//! };
//!
//! let payload = encode_acl(&acl);
//! assert_eq!(decode_acl(&payload).unwrap(), acl);
//! ```

mod cache;
mod codec;

pub use cache::{AclCache, recv_cached_acl, send_cached_acl};
pub use codec::{
    MAX_ACL_ENTRIES, MAX_PRINCIPAL_NAME, WireError, decode_acl, encode_acl, recv_acl, send_acl,
};
