//! First-occurrence de-duplication
//!
//! Equivalent of a "drop duplicates on a column subset, keep first" over borrowed
//! rows. Order of the surviving rows is the input order.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Keep the first item of every distinct key, preserving input order.
pub fn distinct_by<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, key: F) -> Vec<&'a T>
where
    T: 'a,
    K: Hash + Eq,
    F: Fn(&'a T) -> K,
{
    let mut seen: FxHashSet<K> = FxHashSet::default();
    items
        .into_iter()
        .filter(|&item| seen.insert(key(item)))
        .collect()
}
