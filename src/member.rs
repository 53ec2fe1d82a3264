// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types for the four membership categories of a group.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::bytes::{InviteCiphertext, Presentation};
use crate::identity::AccountId;
use crate::keys::ProfileKey;

/// Role of an active group member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Default,
    Administrator,
}

impl Role {
    /// Return true if this role grants administrative rights.
    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Default => "default",
            Role::Administrator => "administrator",
        };

        write!(f, "{}", s)
    }
}

/// An active member of the group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: AccountId,
    pub role: Role,
    pub profile_key: ProfileKey,

    /// Credential the member entered the group with. Informational.
    pub presentation: Presentation,
}

/// An account invited to the group which has not accepted yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMember {
    pub id: AccountId,

    /// Ciphertext binding the invite to the invited account. The invitee
    /// needs it to locate their invite record, so removals carry it back.
    pub invite_ciphertext: InviteCiphertext,

    /// Member who issued the invite.
    pub added_by: AccountId,

    /// Invite time in epoch milliseconds.
    pub timestamp: u64,
}

/// An account which asked to join and awaits administrator approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestingMember {
    pub id: AccountId,
    pub profile_key: ProfileKey,

    /// Request time in epoch milliseconds.
    pub timestamp: u64,
}

/// An account barred from joining, independent of invite or request state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedMember {
    pub id: AccountId,

    /// Ban time in epoch milliseconds, when known.
    pub banned_at: Option<u64>,
}
