// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::AccessControl;
use crate::bytes::LinkPassword;
use crate::identity::AccountId;
use crate::member::{BannedMember, Member, PendingMember, RequestingMember};

/// Full state of a group at one revision.
///
/// The four membership lists are insertion-ordered and unique by id within
/// each list. Reconciliation relies on that uniqueness; [`validate`] checks
/// it ahead of time.
///
/// [`validate`]: GroupSnapshot::validate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// Monotonic counter identifying this state.
    pub revision: u32,

    pub title: String,
    pub description: String,

    /// Reference to the group's avatar, resolved outside this crate.
    pub avatar: String,

    /// Disappearing-message timeout. Zero disables it.
    pub timer: Duration,

    /// Only administrators may post when set.
    pub announcement_only: bool,

    pub access: AccessControl,
    pub invite_link_password: LinkPassword,

    pub members: Vec<Member>,
    pub pending: Vec<PendingMember>,
    pub requesting: Vec<RequestingMember>,
    pub banned: Vec<BannedMember>,
}

impl GroupSnapshot {
    /// Check the per-list uniqueness invariant.
    ///
    /// Reconciling a snapshot which repeats an id inside one list would
    /// mis-classify transitions, so callers holding states from an untrusted
    /// assembly path should validate before reconciling.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.check_unique("members", self.members.iter().map(|member| member.id))?;
        self.check_unique("pending", self.pending.iter().map(|member| member.id))?;
        self.check_unique("requesting", self.requesting.iter().map(|member| member.id))?;
        self.check_unique("banned", self.banned.iter().map(|member| member.id))?;

        Ok(())
    }

    fn check_unique(
        &self,
        list: &'static str,
        ids: impl Iterator<Item = AccountId>,
    ) -> Result<(), SnapshotError> {
        let mut seen = IndexSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(SnapshotError::DuplicateId {
                    list,
                    id,
                    revision: self.revision,
                });
            }
        }

        Ok(())
    }
}

/// Error types for `GroupSnapshot` struct.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// One membership list names the same id twice.
    #[error("duplicate id {id} in {list} list of snapshot at revision {revision}")]
    DuplicateId {
        list: &'static str,
        id: AccountId,
        revision: u32,
    },
}
