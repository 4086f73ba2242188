//! # Preference Sets
//!
//! A [`PreferenceSet`] is the registry behind one extension point: an ordered,
//! duplicate-free collection of [`ClassRef`]s.
//!
//! ## Invariants
//!
//! - **Order**: members are kept in first-insertion order.
//! - **Uniqueness**: a member appears at most once. Adding it again is a silent no-op.
//! - **Idempotent removal**: removing an absent member is a silent no-op.
//!
//! ## Concurrency
//!
//! There is no internal synchronization. Mutation takes `&mut self`, so registrations
//! can only happen while the owner has exclusive access (typically during boot).
//! Consumers iterate through `&self` or take a [`to_sequence`](PreferenceSet::to_sequence)
//! snapshot.
//!
//! Sets are small (a handful of implementations per extension point), so membership
//! checks are a linear scan over a `Vec`.

use crate::class_ref::ClassRef;
use std::fmt::Debug;
use tracing::debug;

/// Ordered, duplicate-free registry of implementation types for one extension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSet<T = ClassRef> {
    name: &'static str,
    items: Vec<T>,
}

impl<T: PartialEq + Clone + Debug> PreferenceSet<T> {
    /// Creates an empty set. `name` is only used for logging.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    /// Creates a set pre-populated from `items`, dropping duplicates.
    pub fn with_items(name: &'static str, items: impl IntoIterator<Item = T>) -> Self {
        let mut set = Self::new(name);
        set.extend(items);
        set
    }

    /// The qualified name of the extension point (e.g. `calculators.tax_rates`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends `item` unless it is already registered.
    ///
    /// Returns `true` if the set changed.
    pub fn add(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            debug!(set = self.name, ?item, "Already registered");
            return false;
        }
        debug!(set = self.name, ?item, size = self.items.len() + 1, "Registered");
        self.items.push(item);
        true
    }

    /// Removes `item` if present, preserving the order of the remaining members.
    ///
    /// Returns `true` if the set changed.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.items.iter().position(|existing| existing == item) {
            Some(index) => {
                self.items.remove(index);
                debug!(set = self.name, ?item, size = self.items.len(), "Unregistered");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Snapshot of the members in insertion order.
    pub fn to_sequence(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq + Clone + Debug> Extend<T> for PreferenceSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a PreferenceSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
