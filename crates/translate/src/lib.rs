#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Bidirectional, table-driven translation between canonical ACEs and
//! platform-native ACL bits.
//!
//! A platform is described by an [`AceTables`] value: one ordered
//! [`BitTable`] per bit group, pairing canonical patterns with native
//! ones. Tables are built once from static definitions (see
//! [`platform`]) or from caller data via [`build_table`], and are then
//! immutable; translation calls are pure and can share a table set
//! across threads without locking.
//!
//! The unmapped-residue contract runs through every level: bit-group
//! operations ([`BitTable::encode`]/[`BitTable::decode`]) always return
//! the residue and never fail, while the ACE/ACL entry points
//! ([`translate_ace`], [`translate_acl`], [`reverse_ace`],
//! [`reverse_acl`]) treat nonzero residue as an error. Dropping
//! permission bits silently is a security decision no library should
//! make on a caller's behalf.
//!
//! # Examples
//!
//! ```
//! use aclbridge_model::{AceTag, AclType, Principal};
//! use aclbridge_translate::{NativeAce, NativeAcl, platform, translate_acl};
//!
//! let tables = platform::posix();
//! let native = NativeAcl {
//!     acl_type: AclType::Access,
//!     entries: vec![NativeAce {
//!         perms: 0x04 | 0x02 | 0x01, // rwx in libacl bits
//!         tag_type: 0x01,            // ACL_USER_OBJ
//!         flags: 0,
//!         principal: Principal::None,
//!     }],
//! };
//!
//! let acl = translate_acl(&tables, &native).unwrap();
//! assert_eq!(acl.entries[0].tag, AceTag::UserObj);
//! assert_eq!(acl.entries[0].perms.as_raw(), 0b111);
//! ```

mod engine;
mod native;
pub mod platform;
mod table;

pub use engine::{
    AceTables, BitGroup, TranslationError, reverse_ace, reverse_acl, translate_ace, translate_acl,
};
pub use native::{NativeAce, NativeAcl};
pub use table::{BitTable, MapPair, MapSide, TableError, Translated, build_table};
