// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod access;
pub mod bytes;
pub mod change;
pub mod identity;
pub mod keys;
pub mod member;
pub mod ordered;
pub mod reconcile;
pub mod snapshot;

pub use access::{AccessControl, AccessLevel};
pub use bytes::{InviteCiphertext, LinkPassword, Presentation};
pub use change::{ApprovedMember, BannedEntry, GroupChange, PendingRemoval, RoleChange};
pub use identity::{ACCOUNT_ID_LEN, AccountId, AccountIdError};
pub use keys::{PROFILE_KEY_LEN, ProfileKey, ProfileKeyError};
pub use member::{BannedMember, Member, PendingMember, RequestingMember, Role};
pub use reconcile::{reconcile, reconcile_checked};
pub use snapshot::{GroupSnapshot, SnapshotError};
