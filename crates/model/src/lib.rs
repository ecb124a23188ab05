#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Canonical Access Control Entry model for transport-neutral ACL exchange.
//!
//! Filesystem ACLs come in two broad families: POSIX.1e minimal/default
//! ACLs and the NFSv4/ZFS/SMB extended model. To move an ACL between hosts
//! that do not share a native representation, every entry is packed into a
//! single 32-bit canonical value with a fixed field layout:
//!
//! ```text
//! bit  0-13  permissions (14 named bits, low 3 shared with POSIX rwx)
//! bit 14-16  tag (principal class, 3-bit code)
//! bit 17-18  entry type (allow/deny/audit/alarm, 2-bit code)
//! bit 19-25  inheritance/audit flags (7 named bits)
//! bit 26-31  reserved, must be zero
//! ```
//!
//! This crate defines that layout, the brand/tag/type/flag vocabularies,
//! and the validation that every boundary crossing runs before trusting a
//! raw integer. It has no behavior beyond pure validation: translation to
//! and from native platform bits lives in `aclbridge-translate`, and the
//! byte-level wire codec in `aclbridge-wire`.
//!
//! # Examples
//!
//! ```
//! use aclbridge_model::{validate, Ace, AcePerms, AceTag, AceType, Brand, Principal};
//!
//! let ace = Ace {
//!     brand: Brand::Nfs4,
//!     perms: AcePerms::from_raw(AcePerms::READ | AcePerms::READ_ACL),
//!     tag: AceTag::Everyone,
//!     ace_type: AceType::Allow,
//!     flags: aclbridge_model::AceFlags::empty(),
//!     principal: Principal::None,
//! };
//!
//! let word = ace.bits();
//! assert!(validate(word).is_ok());
//! let back = Ace::from_bits(Brand::Nfs4, word, Principal::None).unwrap();
//! assert_eq!(back, ace);
//! ```

mod ace;
mod acl;
mod brand;
mod error;
pub mod layout;

pub use ace::{Ace, AceFlags, AcePerms, AceTag, AceType, Principal, validate_for_brand};
pub use acl::{Acl, AclType};
pub use brand::Brand;
pub use error::{BrandMismatch, InvalidEncoding};
pub use layout::validate;
