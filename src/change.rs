// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;
use crate::bytes::{InviteCiphertext, LinkPassword};
use crate::identity::AccountId;
use crate::member::{Member, PendingMember, RequestingMember, Role};

/// A withdrawn invite.
///
/// Carries the invite ciphertext from the *old* state so the invited account
/// can locate and discard the matching invite record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRemoval {
    pub id: AccountId,
    pub invite_ciphertext: InviteCiphertext,
}

/// A join request approved into membership, with the role it was granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedMember {
    pub id: AccountId,
    pub role: Role,
}

/// A member whose role changed, with the new role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChange {
    pub id: AccountId,
    pub role: Role,
}

/// A newly banned account. The ban time is copied verbatim from the target
/// state when known and stays absent otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedEntry {
    pub id: AccountId,
    pub banned_at: Option<u64>,
}

/// The classified difference between two group snapshots.
///
/// Sparse by construction: a scalar field is `Some` only when the two
/// snapshots disagree on it, an entry list is non-empty only when that
/// category of transition occurred. `revision` is always set and equals the
/// target snapshot's revision. Across all entry lists an id appears at most
/// once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChange {
    pub revision: u32,

    pub new_title: Option<String>,
    pub new_description: Option<String>,
    pub new_avatar: Option<String>,
    pub new_timer: Option<Duration>,
    pub new_announcement_only: Option<bool>,
    pub new_attribute_access: Option<AccessLevel>,
    pub new_member_access: Option<AccessLevel>,
    pub new_invite_link_access: Option<AccessLevel>,
    pub new_invite_link_password: Option<LinkPassword>,

    /// Members no longer present in the target state.
    pub deleted_members: Vec<AccountId>,

    /// Members added directly, with no invite or request history.
    pub new_members: Vec<Member>,

    /// Invitees who accepted, carried as their full new member record.
    pub promoted_pending: Vec<Member>,

    /// Invites withdrawn without the invitee joining.
    pub deleted_pending: Vec<PendingRemoval>,

    /// Freshly issued invites.
    pub new_pending: Vec<PendingMember>,

    /// Join requests approved into membership.
    pub promoted_requesting: Vec<ApprovedMember>,

    /// Join requests rejected or withdrawn.
    pub deleted_requesting: Vec<AccountId>,

    /// Freshly raised join requests.
    pub new_requesting: Vec<RequestingMember>,

    pub role_changes: Vec<RoleChange>,

    /// Members whose profile key changed, carried as their full new record.
    pub profile_key_changes: Vec<Member>,

    pub deleted_banned: Vec<AccountId>,
    pub new_banned: Vec<BannedEntry>,
}

impl GroupChange {
    /// An empty change at the given revision.
    pub fn new(revision: u32) -> Self {
        Self {
            revision,
            ..Default::default()
        }
    }

    /// Return true if the change carries nothing besides its revision.
    pub fn is_empty(&self) -> bool {
        self.new_title.is_none()
            && self.new_description.is_none()
            && self.new_avatar.is_none()
            && self.new_timer.is_none()
            && self.new_announcement_only.is_none()
            && self.new_attribute_access.is_none()
            && self.new_member_access.is_none()
            && self.new_invite_link_access.is_none()
            && self.new_invite_link_password.is_none()
            && self.deleted_members.is_empty()
            && self.new_members.is_empty()
            && self.promoted_pending.is_empty()
            && self.deleted_pending.is_empty()
            && self.new_pending.is_empty()
            && self.promoted_requesting.is_empty()
            && self.deleted_requesting.is_empty()
            && self.new_requesting.is_empty()
            && self.role_changes.is_empty()
            && self.profile_key_changes.is_empty()
            && self.deleted_banned.is_empty()
            && self.new_banned.is_empty()
    }
}
