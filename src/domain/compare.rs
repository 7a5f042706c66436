// SPDX-License-Identifier: MIT
//! Total orders over [`Entry`] used to produce deterministic export ordering
//!
//! Pure functions with no side effects; the codecs themselves never sort.

use std::cmp::Ordering;

use super::entry::Entry;

/// Compare entries by `entry_id`, ascending
pub fn compare_by_id(a: &Entry, b: &Entry) -> Ordering {
    a.entry_id.cmp(&b.entry_id)
}

/// Compare entries by the person's last name, ascending
///
/// If either side has no last name set, the entries compare equal so a sort
/// never aborts on sparse data.
pub fn compare_by_last_name(a: &Entry, b: &Entry) -> Ordering {
    match (a.person.last_name.as_deref(), b.person.last_name.as_deref()) {
        (Some(left), Some(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}
