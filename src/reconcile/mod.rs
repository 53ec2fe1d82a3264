// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconstruction of the change record between two group snapshots.
//!
//! Given two full states of the same group on one linear history, the
//! reconciler computes the minimal classified change taking the first state
//! to the second. The hard part is cross-classification: an account which
//! left the pending-invite list *and* entered the member list in the same
//! step is one promotion, not an invite removal plus a member addition.

use tracing::debug;

use crate::change::{ApprovedMember, BannedEntry, GroupChange, PendingRemoval, RoleChange};
use crate::ordered::{classify_added, intersect, key_map, key_set, select, subtract};
use crate::snapshot::{GroupSnapshot, SnapshotError};

#[cfg(test)]
mod tests;

/// Compute the change record which takes `from` to `to`.
///
/// Both snapshots must describe the same group, with `to` at the later
/// revision; the result carries `to`'s revision. Applying the returned
/// change to `from` yields exactly `to`.
///
/// A scalar field of the result is set only when the snapshots disagree on
/// it, always to the target value, never merged. Entry lists keep the order
/// of the snapshot list they were derived from, so identical inputs
/// reconcile to identical output.
///
/// Total over well-formed input (ids unique within each membership list of
/// each snapshot); use [`reconcile_checked`] when that invariant is not
/// already established.
pub fn reconcile(from: &GroupSnapshot, to: &GroupSnapshot) -> GroupChange {
    let mut change = GroupChange::new(to.revision);

    // Scalar fields, all or nothing.
    if from.title != to.title {
        change.new_title = Some(to.title.clone());
    }
    if from.description != to.description {
        change.new_description = Some(to.description.clone());
    }
    if from.avatar != to.avatar {
        change.new_avatar = Some(to.avatar.clone());
    }
    if from.timer != to.timer {
        change.new_timer = Some(to.timer);
    }
    if from.announcement_only != to.announcement_only {
        change.new_announcement_only = Some(to.announcement_only);
    }
    if from.access.attributes != to.access.attributes {
        change.new_attribute_access = Some(to.access.attributes);
    }
    if from.access.members != to.access.members {
        change.new_member_access = Some(to.access.members);
    }

    // Identity sets of all four membership lists, in snapshot order.
    let from_members = key_set(&from.members, |member| member.id);
    let to_members = key_set(&to.members, |member| member.id);
    let from_pending = key_set(&from.pending, |member| member.id);
    let to_pending = key_set(&to.pending, |member| member.id);
    let from_requesting = key_set(&from.requesting, |member| member.id);
    let to_requesting = key_set(&to.requesting, |member| member.id);
    let from_banned = key_set(&from.banned, |member| member.id);
    let to_banned = key_set(&to.banned, |member| member.id);

    let removed_members = subtract(&from_members, &to_members);
    let added_members = subtract(&to_members, &from_members);
    let removed_pending = subtract(&from_pending, &to_pending);
    let added_pending = subtract(&to_pending, &from_pending);
    let removed_requesting = subtract(&from_requesting, &to_requesting);
    let added_requesting = subtract(&to_requesting, &from_requesting);
    let removed_banned = subtract(&from_banned, &to_banned);
    let added_banned = subtract(&to_banned, &from_banned);

    // An added member either accepted an invite, had a join request
    // approved, or was added directly. Exactly one of the three.
    let classified = classify_added(&added_members, &removed_pending, &removed_requesting);

    change.deleted_members = removed_members.iter().copied().collect();
    change.new_members = select(&to.members, &classified.plain, |member| member.id)
        .into_iter()
        .cloned()
        .collect();
    change.promoted_pending =
        select(&to.members, &classified.promoted_from_invite, |member| member.id)
            .into_iter()
            .cloned()
            .collect();
    change.promoted_requesting =
        select(&to.members, &classified.promoted_from_request, |member| member.id)
            .into_iter()
            .map(|member| ApprovedMember {
                id: member.id,
                role: member.role,
            })
            .collect();

    // Invites withdrawn without a promotion carry the original invite
    // ciphertext so the holder can discard the right record.
    let revoked_invites = subtract(&removed_pending, &classified.promoted_from_invite);
    change.deleted_pending = select(&from.pending, &revoked_invites, |member| member.id)
        .into_iter()
        .map(|member| PendingRemoval {
            id: member.id,
            invite_ciphertext: member.invite_ciphertext.clone(),
        })
        .collect();
    change.new_pending = select(&to.pending, &added_pending, |member| member.id)
        .into_iter()
        .cloned()
        .collect();

    let rejected_requests = subtract(&removed_requesting, &classified.promoted_from_request);
    change.deleted_requesting = rejected_requests.iter().copied().collect();
    change.new_requesting = select(&to.requesting, &added_requesting, |member| member.id)
        .into_iter()
        .cloned()
        .collect();

    // Role and profile key changes only apply to ids present in both
    // states; added, removed and promoted ids never show up here.
    let consistent_members = intersect(&from_members, &to_members);
    let old_records = key_map(&from.members, |member| member.id);
    for member in select(&to.members, &consistent_members, |member| member.id) {
        let old = old_records
            .get(&member.id)
            .expect("consistent ids are keyed in both member lists");

        if old.role != member.role {
            change.role_changes.push(RoleChange {
                id: member.id,
                role: member.role,
            });
        }
        if old.profile_key != member.profile_key {
            change.profile_key_changes.push(member.clone());
        }
    }

    // Invite link surface.
    if from.access.add_from_invite_link != to.access.add_from_invite_link {
        change.new_invite_link_access = Some(to.access.add_from_invite_link);
    }
    if from.invite_link_password != to.invite_link_password {
        change.new_invite_link_password = Some(to.invite_link_password.clone());
    }

    // Banned list. A new entry copies the known ban time verbatim; an
    // unknown ban time stays absent, it is never zero-filled.
    change.deleted_banned = removed_banned.iter().copied().collect();
    let banned_records = key_map(&to.banned, |member| member.id);
    change.new_banned = added_banned
        .iter()
        .map(|id| BannedEntry {
            id: *id,
            banned_at: banned_records.get(id).and_then(|member| member.banned_at),
        })
        .collect();

    debug!(
        revision = change.revision,
        added = change.new_members.len(),
        removed = change.deleted_members.len(),
        promoted = change.promoted_pending.len() + change.promoted_requesting.len(),
        "reconciled group change"
    );

    change
}

/// Validate both snapshots, then reconcile them.
///
/// Surfaces the out-of-contract input (an id repeated within one membership
/// list) before any classification runs instead of mis-classifying.
pub fn reconcile_checked(
    from: &GroupSnapshot,
    to: &GroupSnapshot,
) -> Result<GroupChange, SnapshotError> {
    from.validate()?;
    to.validate()?;

    Ok(reconcile(from, to))
}
