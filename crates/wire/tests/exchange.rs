//! Full exchange paths: a platform reader's native ACL translated to
//! canonical form, carried across the wire, and handed to a different
//! platform's writer.

use std::io::Cursor;

use aclbridge_model::{Ace, AceFlags, AcePerms, AceTag, AceType, Acl, AclType, Brand, Principal};
use aclbridge_translate::{NativeAce, NativeAcl, platform, reverse_acl, translate_acl};
use aclbridge_wire::{
    AclCache, decode_acl, encode_acl, recv_acl, recv_cached_acl, send_acl, send_cached_acl,
};
use proptest::prelude::*;

#[test]
fn nfs4_acl_crosses_the_wire_to_an_smb_consumer() {
    // owner@ rwx with inheritance, everyone@ read deny
    let source = NativeAcl {
        acl_type: AclType::Nfs4,
        entries: vec![
            NativeAce {
                perms: 0x0001 | 0x0002 | 0x0020,
                tag_type: 0x1000,
                flags: 0x01 | 0x02,
                principal: Principal::None,
            },
            NativeAce {
                perms: 0x0001,
                tag_type: 0x4000 | 0x0001,
                flags: 0,
                principal: Principal::None,
            },
        ],
    };

    let canonical = translate_acl(&platform::nfs4(), &source).expect("clean translation");
    assert_eq!(canonical.entries[0].tag, AceTag::UserObj);
    assert_eq!(canonical.entries[1].ace_type, AceType::Deny);

    let payload = encode_acl(&canonical);
    let received = decode_acl(&payload).expect("valid payload");
    assert_eq!(received, canonical);

    let nt = reverse_acl(&platform::smb(), &received).expect("clean reverse");
    assert_eq!(nt.entries[0].perms, 0x0001 | 0x0002 | 0x0020);
    assert_eq!(nt.entries[0].flags, 0x01 | 0x02);
    assert_eq!(nt.entries[1].tag_type, 0x4000 | 0x0001);
}

#[test]
fn posix_default_acl_round_trips_over_a_stream() {
    let source = NativeAcl {
        acl_type: AclType::Default,
        entries: vec![
            NativeAce {
                perms: 0x04 | 0x02 | 0x01,
                tag_type: 0x01,
                ..NativeAce::default()
            },
            NativeAce {
                perms: 0x04,
                tag_type: 0x04,
                ..NativeAce::default()
            },
            NativeAce {
                perms: 0x04,
                tag_type: 0x20,
                ..NativeAce::default()
            },
        ],
    };

    let tables = platform::posix();
    let canonical = translate_acl(&tables, &source).expect("clean translation");

    let mut wire = Vec::new();
    send_acl(&mut wire, &canonical).expect("write to vec");
    let received = recv_acl(&mut Cursor::new(wire)).expect("valid stream");
    assert_eq!(received.acl_type, AclType::Default);

    let back = reverse_acl(&tables, &received).expect("clean reverse");
    assert_eq!(back, source);
}

#[test]
fn cached_exchange_stays_in_lockstep() {
    let dir_acl = NativeAcl {
        acl_type: AclType::Access,
        entries: vec![NativeAce {
            perms: 0b111,
            tag_type: 0x01,
            ..NativeAce::default()
        }],
    };
    let file_acl = NativeAcl {
        acl_type: AclType::Access,
        entries: vec![NativeAce {
            perms: 0b110,
            tag_type: 0x01,
            ..NativeAce::default()
        }],
    };

    let tables = platform::posix();
    let dir_canonical = translate_acl(&tables, &dir_acl).expect("clean translation");
    let file_canonical = translate_acl(&tables, &file_acl).expect("clean translation");

    // A tree transfer: one directory ACL, many files sharing one ACL.
    let sequence = [
        &dir_canonical,
        &file_canonical,
        &file_canonical,
        &file_canonical,
    ];

    let mut sender = AclCache::new();
    let mut wire = Vec::new();
    for acl in sequence {
        send_cached_acl(&mut wire, acl, &mut sender).expect("write to vec");
    }

    let mut receiver = AclCache::new();
    let mut cursor = Cursor::new(wire);
    for expected in sequence {
        let got = recv_cached_acl(&mut cursor, &mut receiver).expect("valid stream");
        assert_eq!(&got, expected);
    }
    assert_eq!(receiver.len(), 2);
}

fn nfs4_entry() -> impl Strategy<Value = Ace> {
    let tag = prop_oneof![
        Just(AceTag::Undefined),
        Just(AceTag::UserObj),
        Just(AceTag::User),
        Just(AceTag::GroupObj),
        Just(AceTag::Group),
        Just(AceTag::Everyone),
    ];
    let ace_type = prop_oneof![
        Just(AceType::Allow),
        Just(AceType::Deny),
        Just(AceType::Audit),
        Just(AceType::Alarm),
    ];
    let principal = prop_oneof![
        Just(Principal::None),
        any::<u32>().prop_map(Principal::Id),
        "[a-z]{1,12}".prop_map(Principal::Name),
    ];
    (
        0u32..=AcePerms::NFS4_MASK,
        tag,
        ace_type,
        0u32..=AceFlags::ALL,
        principal,
    )
        .prop_map(|(perms, tag, ace_type, flags, principal)| Ace {
            brand: Brand::Nfs4,
            perms: AcePerms::from_raw(perms),
            tag,
            ace_type,
            flags: AceFlags::from_raw(flags),
            principal,
        })
}

proptest! {
    #[test]
    fn any_legal_acl_survives_the_wire(
        entries in proptest::collection::vec(nfs4_entry(), 0..8),
    ) {
        let acl = Acl {
            acl_type: AclType::Nfs4,
            entries,
        };
        let payload = encode_acl(&acl);
        prop_assert_eq!(decode_acl(&payload).expect("valid payload"), acl);
    }
}
