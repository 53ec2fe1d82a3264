// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use crate::access::{AccessControl, AccessLevel};
use crate::bytes::{InviteCiphertext, LinkPassword, Presentation};
use crate::change::{ApprovedMember, BannedEntry, PendingRemoval, RoleChange};
use crate::identity::AccountId;
use crate::keys::ProfileKey;
use crate::member::{BannedMember, Member, PendingMember, RequestingMember, Role};
use crate::snapshot::{GroupSnapshot, SnapshotError};

use super::{reconcile, reconcile_checked};

fn account(seed: u8) -> AccountId {
    AccountId::from_bytes([seed; 16])
}

fn member(seed: u8, role: Role) -> Member {
    Member {
        id: account(seed),
        role,
        profile_key: ProfileKey::from_bytes([seed; 32]),
        presentation: Presentation::new(vec![seed, seed]),
    }
}

fn invite(seed: u8, added_by: u8) -> PendingMember {
    PendingMember {
        id: account(seed),
        invite_ciphertext: InviteCiphertext::new(vec![seed; 4]),
        added_by: account(added_by),
        timestamp: 1_690_000_000_000 + seed as u64,
    }
}

fn request(seed: u8) -> RequestingMember {
    RequestingMember {
        id: account(seed),
        profile_key: ProfileKey::from_bytes([seed; 32]),
        timestamp: 1_690_000_000_000 + seed as u64,
    }
}

fn snapshot(revision: u32) -> GroupSnapshot {
    GroupSnapshot {
        revision,
        title: "climbing club".to_string(),
        description: "tuesdays at the wall".to_string(),
        avatar: "avatar-001".to_string(),
        timer: Duration::ZERO,
        announcement_only: false,
        access: AccessControl::default(),
        invite_link_password: LinkPassword::default(),
        members: Vec::new(),
        pending: Vec::new(),
        requesting: Vec::new(),
        banned: Vec::new(),
    }
}

#[test]
fn identical_snapshots_reconcile_to_empty_change() {
    let mut state = snapshot(7);
    state.members = vec![member(1, Role::Administrator), member(2, Role::Default)];
    state.pending = vec![invite(3, 1)];
    state.requesting = vec![request(4)];
    state.banned = vec![BannedMember {
        id: account(5),
        banned_at: Some(1_690_000_000_000),
    }];

    let change = reconcile(&state, &state);

    assert_eq!(change.revision, 7);
    assert!(change.is_empty());
}

#[test]
fn scalar_fields_take_target_values() {
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(4);
    from.members = vec![alice.clone()];
    let mut to = from.clone();
    to.revision = 5;
    to.title = "bouldering club".to_string();
    to.description = "wednesdays now".to_string();
    to.avatar = "avatar-002".to_string();
    to.timer = Duration::from_secs(86_400);
    to.announcement_only = true;
    to.access.attributes = AccessLevel::Administrator;
    to.access.members = AccessLevel::Member;

    let change = reconcile(&from, &to);

    assert_eq!(change.revision, 5);
    assert_eq!(change.new_title.as_deref(), Some("bouldering club"));
    assert_eq!(change.new_description.as_deref(), Some("wednesdays now"));
    assert_eq!(change.new_avatar.as_deref(), Some("avatar-002"));
    assert_eq!(change.new_timer, Some(Duration::from_secs(86_400)));
    assert_eq!(change.new_announcement_only, Some(true));
    assert_eq!(change.new_attribute_access, Some(AccessLevel::Administrator));
    assert_eq!(change.new_member_access, Some(AccessLevel::Member));

    // Untouched categories stay absent.
    assert_eq!(change.new_invite_link_access, None);
    assert_eq!(change.new_invite_link_password, None);
    assert!(change.deleted_members.is_empty());
    assert!(change.new_members.is_empty());
}

#[test]
fn role_change_emits_no_membership_entries() {
    let mut from = snapshot(9);
    from.members = vec![member(1, Role::Default)];
    let mut to = from.clone();
    to.revision = 10;
    to.members = vec![member(1, Role::Administrator)];

    let change = reconcile(&from, &to);

    assert_eq!(change.revision, 10);
    assert_eq!(
        change.role_changes,
        vec![RoleChange {
            id: account(1),
            role: Role::Administrator,
        }]
    );
    assert!(change.deleted_members.is_empty());
    assert!(change.new_members.is_empty());
    assert!(change.profile_key_changes.is_empty());
}

#[test]
fn accepted_invite_is_one_promotion() {
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(2);
    from.members = vec![alice.clone()];
    from.pending = vec![invite(2, 1)];

    let bob = member(2, Role::Default);
    let mut to = snapshot(3);
    to.members = vec![alice, bob.clone()];

    let change = reconcile(&from, &to);

    // Bob shows up once, as a promotion carrying his full member record.
    assert_eq!(change.promoted_pending, vec![bob]);
    assert!(change.new_members.is_empty());
    assert!(change.deleted_pending.is_empty());
    assert!(change.promoted_requesting.is_empty());
}

#[test]
fn revoked_invite_carries_original_ciphertext() {
    let alice = member(1, Role::Administrator);
    let bob_invite = invite(2, 1);
    let mut from = snapshot(2);
    from.members = vec![alice.clone()];
    from.pending = vec![bob_invite.clone()];

    let mut to = snapshot(3);
    to.members = vec![alice];

    let change = reconcile(&from, &to);

    assert_eq!(
        change.deleted_pending,
        vec![PendingRemoval {
            id: account(2),
            invite_ciphertext: bob_invite.invite_ciphertext,
        }]
    );
    assert!(change.promoted_pending.is_empty());
    assert!(change.new_members.is_empty());
}

#[test]
fn approved_request_promotes_with_assigned_role() {
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(5);
    from.members = vec![alice.clone()];
    from.requesting = vec![request(2)];

    let mut to = snapshot(6);
    to.members = vec![alice, member(2, Role::Administrator)];

    let change = reconcile(&from, &to);

    assert_eq!(
        change.promoted_requesting,
        vec![ApprovedMember {
            id: account(2),
            role: Role::Administrator,
        }]
    );
    assert!(change.new_members.is_empty());
    assert!(change.deleted_requesting.is_empty());
    assert!(change.promoted_pending.is_empty());
}

#[test]
fn rejected_request_deletes_identity_only() {
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(5);
    from.members = vec![alice.clone()];
    from.requesting = vec![request(2)];

    let mut to = snapshot(6);
    to.members = vec![alice];

    let change = reconcile(&from, &to);

    assert_eq!(change.deleted_requesting, vec![account(2)]);
    assert!(change.promoted_requesting.is_empty());
    assert!(change.new_members.is_empty());
}

#[test]
fn direct_additions_and_removals() {
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Administrator), member(2, Role::Default)];

    let claire = member(3, Role::Default);
    let mut to = snapshot(2);
    to.members = vec![member(1, Role::Administrator), claire.clone()];

    let change = reconcile(&from, &to);

    assert_eq!(change.deleted_members, vec![account(2)]);
    assert_eq!(change.new_members, vec![claire]);
    assert!(change.promoted_pending.is_empty());
    assert!(change.promoted_requesting.is_empty());
}

#[test]
fn added_members_are_classified_exactly_once() {
    // Bob accepted an invite, claire's request was approved and dora was
    // added directly, all in one step.
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(10);
    from.members = vec![alice.clone()];
    from.pending = vec![invite(2, 1)];
    from.requesting = vec![request(3)];

    let bob = member(2, Role::Default);
    let claire = member(3, Role::Default);
    let dora = member(4, Role::Default);
    let mut to = snapshot(11);
    to.members = vec![alice, bob.clone(), claire.clone(), dora.clone()];

    let change = reconcile(&from, &to);

    assert_eq!(change.promoted_pending, vec![bob]);
    assert_eq!(
        change.promoted_requesting,
        vec![ApprovedMember {
            id: account(3),
            role: Role::Default,
        }]
    );
    assert_eq!(change.new_members, vec![dora]);

    // The overlapping transitions leave no removal entries behind.
    assert!(change.deleted_pending.is_empty());
    assert!(change.deleted_requesting.is_empty());
    assert!(change.deleted_members.is_empty());

    // No id appears in more than one list.
    for id in [account(2), account(3), account(4)] {
        let hits = change.promoted_pending.iter().filter(|m| m.id == id).count()
            + change
                .promoted_requesting
                .iter()
                .filter(|m| m.id == id)
                .count()
            + change.new_members.iter().filter(|m| m.id == id).count();
        assert_eq!(hits, 1);
    }
}

#[test]
fn attribute_diff_skips_added_and_removed_members() {
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Default), member(2, Role::Default)];

    // Alice becomes admin, bob leaves, claire arrives as admin.
    let mut to = snapshot(2);
    to.members = vec![member(1, Role::Administrator), member(3, Role::Administrator)];

    let change = reconcile(&from, &to);

    assert_eq!(
        change.role_changes,
        vec![RoleChange {
            id: account(1),
            role: Role::Administrator,
        }]
    );
    assert_eq!(change.deleted_members, vec![account(2)]);
    assert_eq!(change.new_members, vec![member(3, Role::Administrator)]);
}

#[test]
fn profile_key_change_carries_new_record() {
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Default)];

    let mut rekeyed = member(1, Role::Default);
    rekeyed.profile_key = ProfileKey::from_bytes([99; 32]);
    let mut to = snapshot(2);
    to.members = vec![rekeyed.clone()];

    let change = reconcile(&from, &to);

    assert_eq!(change.profile_key_changes, vec![rekeyed]);
    assert!(change.role_changes.is_empty());
    assert!(change.new_members.is_empty());
    assert!(change.deleted_members.is_empty());
}

#[test]
fn ban_copies_known_timestamp_verbatim() {
    let from = snapshot(3);
    let mut to = snapshot(4);
    to.banned = vec![BannedMember {
        id: account(9),
        banned_at: Some(1_700_000_000_123),
    }];

    let change = reconcile(&from, &to);

    assert_eq!(change.revision, 4);
    assert_eq!(
        change.new_banned,
        vec![BannedEntry {
            id: account(9),
            banned_at: Some(1_700_000_000_123),
        }]
    );
    assert!(change.deleted_banned.is_empty());
}

#[test]
fn ban_without_timestamp_stays_absent() {
    let from = snapshot(3);
    let mut to = snapshot(4);
    to.banned = vec![BannedMember {
        id: account(9),
        banned_at: None,
    }];

    let change = reconcile(&from, &to);

    assert_eq!(
        change.new_banned,
        vec![BannedEntry {
            id: account(9),
            banned_at: None,
        }]
    );
}

#[test]
fn unban_deletes_identity_only() {
    let mut from = snapshot(3);
    from.banned = vec![BannedMember {
        id: account(9),
        banned_at: Some(1_700_000_000_123),
    }];
    let to = snapshot(4);

    let change = reconcile(&from, &to);

    assert_eq!(change.deleted_banned, vec![account(9)]);
    assert!(change.new_banned.is_empty());
}

#[test]
fn invite_link_fields_diff_independently() {
    let from = snapshot(1);
    let mut to = snapshot(2);
    to.access.add_from_invite_link = AccessLevel::Any;
    to.invite_link_password = LinkPassword::new(vec![1, 2, 3, 4]);

    let change = reconcile(&from, &to);

    assert_eq!(change.new_invite_link_access, Some(AccessLevel::Any));
    assert_eq!(
        change.new_invite_link_password,
        Some(LinkPassword::new(vec![1, 2, 3, 4]))
    );
    // The unrelated access levels stay absent.
    assert_eq!(change.new_attribute_access, None);
    assert_eq!(change.new_member_access, None);
}

#[test]
fn new_invites_and_requests_are_emitted() {
    let alice = member(1, Role::Administrator);
    let mut from = snapshot(1);
    from.members = vec![alice.clone()];

    let bob_invite = invite(2, 1);
    let claire_request = request(3);
    let mut to = snapshot(2);
    to.members = vec![alice];
    to.pending = vec![bob_invite.clone()];
    to.requesting = vec![claire_request.clone()];

    let change = reconcile(&from, &to);

    assert_eq!(change.new_pending, vec![bob_invite]);
    assert_eq!(change.new_requesting, vec![claire_request]);
    assert!(change.deleted_pending.is_empty());
    assert!(change.deleted_requesting.is_empty());
}

#[test]
fn entry_order_follows_snapshot_order() {
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Administrator)];

    // Additions listed out of numeric order on purpose.
    let mut to = snapshot(2);
    to.members = vec![
        member(1, Role::Administrator),
        member(7, Role::Default),
        member(3, Role::Default),
        member(5, Role::Default),
    ];

    let change = reconcile(&from, &to);

    let ids: Vec<AccountId> = change.new_members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![account(7), account(3), account(5)]);

    // Two runs over identical input agree field for field, entry for entry.
    assert_eq!(change, reconcile(&from, &to));
}

#[test]
fn checked_reconcile_rejects_duplicate_ids() {
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Default), member(1, Role::Default)];
    let to = snapshot(2);

    let result = reconcile_checked(&from, &to);
    assert!(matches!(
        result,
        Err(SnapshotError::DuplicateId {
            list: "members",
            revision: 1,
            ..
        })
    ));

    // A valid pair passes through to the engine.
    let mut from = snapshot(1);
    from.members = vec![member(1, Role::Default)];
    let mut to = snapshot(2);
    to.members = vec![member(1, Role::Default)];
    let change = reconcile_checked(&from, &to).unwrap();
    assert!(change.is_empty());
}
