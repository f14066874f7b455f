//! Set difference between the current and desired members of a relation.
//!
//! Used by the relation synchronizer to turn "the work should be linked to
//! exactly these IDs" into the minimal set of inserts and deletes.

use std::collections::HashSet;
use std::hash::Hash;

/// The result of comparing a current ID collection against a desired one.
///
/// Both vectors are duplicate-free and keep the first-occurrence order of the
/// input they were drawn from, so the same inputs always produce the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdDiff<T> {
    /// IDs in `desired` that are not in `current`.
    pub to_add: Vec<T>,
    /// IDs in `current` that are not in `desired`.
    pub to_remove: Vec<T>,
}

impl<T> IdDiff<T> {
    /// `true` when the current and desired sets are already equal.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

impl<T> Default for IdDiff<T> {
    fn default() -> Self {
        Self {
            to_add: Vec::new(),
            to_remove: Vec::new(),
        }
    }
}

/// Compute `desired - current` and `current - desired` as sets.
///
/// Runs in `O(|current| + |desired|)` using hash membership tests.
pub fn compute_diff<T>(current: &[T], desired: &[T]) -> IdDiff<T>
where
    T: Eq + Hash + Clone,
{
    let current_set: HashSet<&T> = current.iter().collect();
    let desired_set: HashSet<&T> = desired.iter().collect();

    IdDiff {
        to_add: missing_from(desired, &current_set),
        to_remove: missing_from(current, &desired_set),
    }
}

/// Drop `None` entries from a list of optional IDs.
///
/// A `None` means "no relation", never a relation to a null identifier.
pub fn flatten_ids<T: Clone>(ids: &[Option<T>]) -> Vec<T> {
    ids.iter().flatten().cloned().collect()
}

/// Items of `items` absent from `other`, deduplicated, in first-seen order.
fn missing_from<T>(items: &[T], other: &HashSet<&T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| !other.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
