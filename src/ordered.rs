// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insertion-ordered set algebra.
//!
//! Every operation in this module keeps elements in the order they first
//! appeared, so a computation over two identical inputs always produces
//! identical output, element for element. Hash-ordered collections must not
//! leak into any path that decides output order.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Elements of `a` which are not in `b`, in `a`'s order.
pub fn subtract<T>(a: &IndexSet<T>, b: &IndexSet<T>) -> IndexSet<T>
where
    T: Hash + Eq + Clone,
{
    a.iter().filter(|value| !b.contains(*value)).cloned().collect()
}

/// Elements of `a` which are also in `b`, in `a`'s order.
pub fn intersect<T>(a: &IndexSet<T>, b: &IndexSet<T>) -> IndexSet<T>
where
    T: Hash + Eq + Clone,
{
    a.iter().filter(|value| b.contains(*value)).cloned().collect()
}

/// Project a record list to its key set, preserving list order.
pub fn key_set<T, K, F>(items: &[T], key: F) -> IndexSet<K>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    items.iter().map(key).collect()
}

/// Index a record list by key, preserving list order.
///
/// Later records win on a duplicate key; callers relying on this module for
/// reconciliation hand in lists which are unique by key already.
pub fn key_map<T, K, F>(items: &[T], key: F) -> IndexMap<K, &T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    items.iter().map(|item| (key(item), item)).collect()
}

/// Records from `items` whose key is in `keys`, in list order.
pub fn select<'a, T, K, F>(items: &'a [T], keys: &IndexSet<K>, key: F) -> Vec<&'a T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    items.iter().filter(|item| keys.contains(&key(item))).collect()
}

/// The three disjoint categories a newly added member id falls into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddedClassification<T: Hash + Eq> {
    /// Added ids which simultaneously left the pending-invite set: the
    /// account accepted its invite.
    pub promoted_from_invite: IndexSet<T>,

    /// Added ids which simultaneously left the requesting set: the join
    /// request was approved.
    pub promoted_from_request: IndexSet<T>,

    /// Added ids with no pending or requesting history: a direct addition.
    pub plain: IndexSet<T>,
}

/// Classify every added id into exactly one of three categories.
///
/// Assumes the two states are well formed: an id sits in at most one of the
/// pending/requesting collections at a time, so no added id can match both
/// removal sets at once. The split intersects against invites first and does
/// not re-verify that assumption.
pub fn classify_added<T>(
    added: &IndexSet<T>,
    removed_pending: &IndexSet<T>,
    removed_requesting: &IndexSet<T>,
) -> AddedClassification<T>
where
    T: Hash + Eq + Clone,
{
    let promoted_from_invite = intersect(added, removed_pending);
    let promoted_from_request = intersect(added, removed_requesting);
    let plain = added
        .iter()
        .filter(|id| !promoted_from_invite.contains(*id) && !promoted_from_request.contains(*id))
        .cloned()
        .collect();

    AddedClassification {
        promoted_from_invite,
        promoted_from_request,
        plain,
    }
}
