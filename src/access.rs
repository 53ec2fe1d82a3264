// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Permission level required to perform one category of group change.
///
/// `Unsatisfiable` marks a category no participant may change; `Unknown` is
/// carried through from states recorded before the category existed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    #[default]
    Unknown,

    /// Anyone, member or not.
    Any,

    /// Any current group member.
    Member,

    /// Administrators only.
    Administrator,

    /// No one.
    Unsatisfiable,
}

impl AccessLevel {
    /// Access level is restricted to administrators.
    pub fn is_administrator(&self) -> bool {
        matches!(self, AccessLevel::Administrator)
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessLevel::Unknown => "unknown",
            AccessLevel::Any => "any",
            AccessLevel::Member => "member",
            AccessLevel::Administrator => "administrator",
            AccessLevel::Unsatisfiable => "unsatisfiable",
        };

        write!(f, "{}", s)
    }
}

/// The three independent permission levels of a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    /// Who may edit group attributes (title, description, avatar, timer).
    pub attributes: AccessLevel,

    /// Who may add and remove members.
    pub members: AccessLevel,

    /// Who may join directly through the group's invite link.
    pub add_from_invite_link: AccessLevel,
}
