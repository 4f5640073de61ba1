//! In-memory mirror of one remote collection
//!
//! A [`MirrorStore`] holds the full list of one entity kind in server return
//! order, plus a filtered projection derived from it. The full list mutates
//! only after confirmed server replies; the projection is recomputed from
//! the full list and a predicate, never edited independently.

pub mod debounce;
pub mod filter;

pub use debounce::Debounce;
pub use filter::{filter_books, filter_members, AvailabilityFilter};

use crate::models::Identified;

/// Full list + derived filtered view for one entity kind
///
/// Mutations (`insert`, `replace`, `remove`, `replace_all`) touch only the
/// full list. The caller re-runs [`MirrorStore::apply_filter`] afterwards;
/// filter parameters live in the owning view's controls, not here.
#[derive(Debug, Clone, Default)]
pub struct MirrorStore<T> {
    full: Vec<T>,
    filtered: Vec<T>,
}

impl<T: Identified + Clone> MirrorStore<T> {
    pub fn new() -> Self {
        Self {
            full: Vec::new(),
            filtered: Vec::new(),
        }
    }

    /// Replace the whole mirror from a fresh list fetch.
    /// The filtered view starts as a copy of the full list.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.full = items;
        self.filtered = self.full.clone();
    }

    /// Drop everything, e.g. after a failed load
    pub fn clear(&mut self) {
        self.full.clear();
        self.filtered.clear();
    }

    /// Append a confirmed created record
    pub fn insert(&mut self, item: T) {
        self.full.push(item);
    }

    /// Replace the record with the same id; returns false if absent
    pub fn replace(&mut self, item: T) -> bool {
        match self.full.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id; returns false if absent
    pub fn remove(&mut self, id: i32) -> bool {
        let before = self.full.len();
        self.full.retain(|item| item.id() != id);
        self.full.len() != before
    }

    /// Recompute the filtered projection from the full list
    pub fn apply_filter<P: Fn(&T) -> bool>(&mut self, predicate: P) {
        self.filtered = self.full.iter().filter(|item| predicate(item)).cloned().collect();
    }

    pub fn full(&self) -> &[T] {
        &self.full
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn find(&self, id: i32) -> Option<&T> {
        self.full.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    pub fn len(&self) -> usize {
        self.full.len()
    }
}
