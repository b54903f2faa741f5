use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;
use std::{fmt, mem};

use itertools::Itertools;

use crate::error::HeapError;

/// Comparator type used by the `Ord`-based convenience constructors.
pub type OrdCompare<V> = fn(&V, &V) -> Ordering;

/// A single `(key, value)` entry in the heap array.
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A binary heap over `(key, value)` pairs that also maintains a key-to-position
/// index, allowing removal and priority updates of arbitrary keys in O(log n).
///
/// The heap array is the source of truth for structure; the position map is a
/// derived index kept in lockstep with it. Every move of an entry updates both
/// in the same step, so the map always answers "where does this key live right
/// now" correctly.
///
/// Ordering is supplied as a comparator fixed at construction. The entry whose
/// value ranks `Greater` than all others sits at the root, so the same code
/// serves as a max-heap or min-heap depending on comparator direction.
/// [`max_heap`](IndexedHeap::max_heap) and [`min_heap`](IndexedHeap::min_heap)
/// cover the common `V: Ord` cases.
///
/// The structure is single-threaded; callers sharing it across threads must
/// supply their own locking.
pub struct IndexedHeap<K, V, C> {
    /// The array representation of the heap. Index 0 is the root.
    entries: Vec<Entry<K, V>>,
    /// Mapping from key to its current index in `entries`.
    positions: HashMap<K, usize>,
    /// Total order over values. `Greater` means "closer to the root".
    compare: C,
}

impl<K, V, C> IndexedHeap<K, V, C> {
    /// Creates an empty heap with the given comparator.
    pub fn new(compare: C) -> Self {
        Self::with_capacity(0, compare)
    }

    /// Creates an empty heap with room for `capacity` entries. The capacity is
    /// a hint only; the heap starts empty regardless.
    pub fn with_capacity(capacity: usize, compare: C) -> Self {
        IndexedHeap {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            compare,
        }
    }

    /// Returns the number of entries currently stored.
    pub fn len(&self) -> usize {
        debug_assert!(self.entries.len() == self.positions.len());
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries the heap array can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the highest-ranked entry without removing it.
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|e| (&e.key, &e.value))
    }

    /// Iterates over all entries in storage order: index 0 (the root) first,
    /// then level by level. Only the root position is meaningful; the rest is
    /// whatever layout the heap currently has.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    /// Removes all entries from the heap, keeping allocated storage.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }
}

impl<K, V, C> IndexedHeap<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Fn(&V, &V) -> Ordering,
{
    /// Checks whether an entry with the given key is present.
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the value stored under `key`, if present. O(1).
    pub fn get(&self, key: &K) -> Option<&V> {
        let &idx = self.positions.get(key)?;
        Some(&self.entries[idx].value)
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        self.positions.reserve(additional);
    }

    /// Inserts a new entry.
    ///
    /// Keys are unique: pushing a key that is already present fails with
    /// [`HeapError::DuplicateKey`] and leaves the heap untouched. Use
    /// [`update`](IndexedHeap::update) to change the value of a present key.
    pub fn push(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.positions.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }

        let idx = self.entries.len();
        self.positions.insert(key.clone(), idx);
        self.entries.push(Entry { key, value });
        self.sift_up(idx);
        Ok(())
    }

    /// Removes and returns the highest-ranked entry.
    ///
    /// Fails with [`HeapError::Empty`] on an empty heap; callers wanting a
    /// checked variant should use [`peek`](IndexedHeap::peek) first.
    pub fn pop(&mut self) -> Result<(K, V), HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.entries.len() - 1;
        self.swap_entries(0, last);
        let entry = self.entries.pop().unwrap();
        self.positions.remove(&entry.key);

        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        Ok((entry.key, entry.value))
    }

    /// Removes the entry with the given key, returning its value.
    ///
    /// An absent key is a normal outcome, not an error: the heap is left
    /// unchanged and `None` is returned.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let &idx = self.positions.get(key)?;

        let last = self.entries.len() - 1;
        self.swap_entries(idx, last);
        let entry = self.entries.pop().unwrap();
        self.positions.remove(&entry.key);

        if idx != last {
            // The former last entry now sits at `idx`. Whether it has to move
            // up or down depends on how it ranks against the value it replaced.
            match (self.compare)(&self.entries[idx].value, &entry.value) {
                Ordering::Greater => self.sift_up(idx),
                Ordering::Less => self.sift_down(idx),
                Ordering::Equal => {}
            }
        }

        Some(entry.value)
    }

    /// Replaces the value stored under `key` and repairs the heap, returning
    /// the old value.
    ///
    /// Fails with [`HeapError::KeyNotFound`] if the key is absent; callers
    /// wanting tolerant semantics should check
    /// [`contains`](IndexedHeap::contains) first.
    pub fn update(&mut self, key: &K, value: V) -> Result<V, HeapError> {
        let &idx = self.positions.get(key).ok_or(HeapError::KeyNotFound)?;

        let old = mem::replace(&mut self.entries[idx].value, value);
        match (self.compare)(&self.entries[idx].value, &old) {
            Ordering::Greater => self.sift_up(idx),
            Ordering::Less => self.sift_down(idx),
            Ordering::Equal => {}
        }

        Ok(old)
    }

    /// Drains the heap into a vector ordered from highest to lowest rank.
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted
    }

    /// Sifts the entry at `idx` up the heap until its parent outranks or ties it.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent_idx = Self::parent_of(idx);
            if self.rank(idx, parent_idx) != Ordering::Greater {
                break; // Heap property satisfied.
            }
            self.swap_entries(idx, parent_idx);
            idx = parent_idx;
        }
    }

    /// Sifts the entry at `idx` down the heap until no child outranks it.
    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = Self::left_child_of(idx);
            if left >= self.entries.len() {
                break; // No children.
            }
            let right = left + 1;

            // Pick the higher-ranked child; the right child wins exact ties.
            let mut best_child = left;
            if right < self.entries.len() && self.rank(right, left) != Ordering::Less {
                best_child = right;
            }

            if self.rank(best_child, idx) != Ordering::Greater {
                break; // Heap property satisfied.
            }

            self.swap_entries(idx, best_child);
            idx = best_child;
        }
    }

    /// Compares the values at two indices under the configured comparator.
    #[inline(always)]
    fn rank(&self, a: usize, b: usize) -> Ordering {
        (self.compare)(&self.entries[a].value, &self.entries[b].value)
    }

    /// Swaps two entries and rewrites both position-map slots in the same step,
    /// so the map never disagrees with the array.
    fn swap_entries(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.entries.len());
        debug_assert!(j < self.entries.len());

        self.entries.swap(i, j);
        self.set_position(i);
        self.set_position(j);
    }

    /// Points the position-map slot for the key stored at `idx` back at `idx`.
    #[inline(always)]
    fn set_position(&mut self, idx: usize) {
        let key = &self.entries[idx].key;
        // Every stored key has a map slot; `push` created it before the entry.
        *self.positions.get_mut(key).unwrap() = idx;
    }

    #[inline(always)]
    fn parent_of(idx: usize) -> usize {
        (idx - 1) >> 1
    }

    #[inline(always)]
    fn left_child_of(idx: usize) -> usize {
        (idx << 1) + 1
    }
}

impl<K: Eq + Hash + Clone, V: Ord> IndexedHeap<K, V, OrdCompare<V>> {
    /// Creates a max-heap over the natural order of `V`: `pop` yields the
    /// largest value first.
    pub fn max_heap() -> Self {
        Self::new(Ord::cmp)
    }

    /// Creates a min-heap over the natural order of `V`: `pop` yields the
    /// smallest value first.
    pub fn min_heap() -> Self {
        Self::new(|a: &V, b: &V| b.cmp(a))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for IndexedHeap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexedHeap [{}]",
            self.entries
                .iter()
                .map(|e| format!("{:?}: {:?}", e.key, e.value))
                .join(", ")
        )
    }
}
