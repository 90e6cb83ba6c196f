//! Addressable d-ary heap
//!
//! A priority queue stored as a flat vector of (element, priority) entries and
//! interpreted as a complete, left-filled tree with `d` children per node.
//! The node at index `i` has children at `d*i + 1 ..= d*i + d` and its parent
//! at `(i - 1) / d`.
//!
//! Elements are located by equality with a linear scan: there is no
//! element-to-index map, so [`contains`](DHeap::contains),
//! [`remove`](DHeap::remove) and [`update`](DHeap::update) are O(n). This
//! heap is a poor fit for search-heavy workloads.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity   |
//! |----------------|--------------|
//! | `insert`       | O(log_d n)   |
//! | `extract_top`  | O(d log_d n) |
//! | `peek`         | O(1)         |
//! | `contains`     | O(n)         |
//! | `remove`       | O(n)         |
//! | `update`       | O(n)         |
//! | `from_parts`   | O(n)         |
//!
//! # Ties
//!
//! When several children share the best priority, the leftmost one (lowest
//! index) is promoted during a downward walk. An entry never moves past a
//! neighbour with an equal priority.
//!
//! # Example
//!
//! ```rust
//! use rust_dary_heap::{DHeap, HeapOrder};
//!
//! let mut heap = DHeap::new(3, HeapOrder::Max).unwrap();
//! heap.insert("a", 5);
//! heap.insert("b", 9);
//! heap.insert("c", 1);
//!
//! assert_eq!(heap.peek(), Ok(&"b"));
//! heap.update(&"c", 10).unwrap();
//! assert_eq!(heap.extract_top(), Ok("c"));
//! assert_eq!(heap.extract_top(), Ok("b"));
//! assert_eq!(heap.len(), 1);
//! ```

use crate::config::HeapConfig;
use crate::error::{ConfigError, HeapError, HeapResult};
use crate::order::HeapOrder;
use std::mem;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<T, P> {
    element: T,
    priority: P,
}

impl<T, P> Entry<T, P> {
    fn into_pair(self) -> (T, P) {
        (self.element, self.priority)
    }
}

/// A d-ary heap with a configurable branching factor and ordering mode.
///
/// The root always holds an entry whose priority is at least as good as every
/// other priority in the heap, where "good" means largest for
/// [`HeapOrder::Max`] and smallest for [`HeapOrder::Min`].
///
/// References returned by [`peek`](DHeap::peek) and [`iter`](DHeap::iter)
/// borrow the heap, so they cannot be held across a mutation that relocates
/// entries.
#[derive(Debug, Clone)]
pub struct DHeap<T, P> {
    entries: Vec<Entry<T, P>>,
    d: usize,
    order: HeapOrder,
}

impl<T, P> DHeap<T, P> {
    /// Creates an empty heap.
    ///
    /// Fails with [`ConfigError::InvalidBranchingFactor`] if `branching_factor < 2`.
    pub fn new(branching_factor: usize, order: HeapOrder) -> HeapResult<Self> {
        Self::with_config(HeapConfig {
            branching_factor,
            order,
        })
    }

    /// Creates an empty heap from a validated config.
    pub fn with_config(config: HeapConfig) -> HeapResult<Self> {
        Self::with_capacity(config, 0)
    }

    /// Creates an empty heap with room for `capacity` entries.
    pub fn with_capacity(config: HeapConfig, capacity: usize) -> HeapResult<Self> {
        config.validate()?;
        Ok(DHeap {
            entries: Vec::with_capacity(capacity),
            d: config.branching_factor,
            order: config.order,
        })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn branching_factor(&self) -> usize {
        self.d
    }

    #[inline]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// The branching factor and ordering mode this heap was built with.
    pub fn config(&self) -> HeapConfig {
        HeapConfig {
            branching_factor: self.d,
            order: self.order,
        }
    }

    /// Returns the top element without removing it.
    pub fn peek(&self) -> HeapResult<&T> {
        self.peek_entry().map(|(element, _)| element)
    }

    /// Returns the top priority without removing it.
    pub fn peek_priority(&self) -> HeapResult<&P> {
        self.peek_entry().map(|(_, priority)| priority)
    }

    /// Returns the top element and its priority without removing them.
    pub fn peek_entry(&self) -> HeapResult<(&T, &P)> {
        self.entries
            .first()
            .map(|e| (&e.element, &e.priority))
            .ok_or(HeapError::EmptyQueue)
    }

    /// Iterates over `(element, priority)` pairs in storage order.
    ///
    /// Storage order is heap order, not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> + '_ {
        self.entries.iter().map(|e| (&e.element, &e.priority))
    }

    /// Removes every entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    fn parent_index(&self, idx: usize) -> usize {
        (idx - 1) / self.d
    }

    /// Index of the first node without children. Every index below it is an
    /// internal node.
    #[inline]
    fn first_leaf_index(&self) -> usize {
        let len = self.entries.len();
        if len < 2 {
            0
        } else {
            (len - 2) / self.d + 1
        }
    }
}

impl<T: PartialEq, P: Ord> DHeap<T, P> {
    /// Builds a heap from parallel sequences of elements and priorities.
    ///
    /// `elements[i]` is stored with `priorities[i]`. The entries are laid out
    /// in input order and then heapified bottom-up in O(n).
    ///
    /// # Errors
    ///
    /// [`ConfigError::LengthMismatch`] if the sequences differ in length, and
    /// [`ConfigError::InvalidBranchingFactor`] for `branching_factor < 2`.
    pub fn from_parts(
        branching_factor: usize,
        order: HeapOrder,
        elements: Vec<T>,
        priorities: Vec<P>,
    ) -> HeapResult<Self> {
        if elements.len() != priorities.len() {
            return Err(ConfigError::LengthMismatch {
                elements: elements.len(),
                priorities: priorities.len(),
            }
            .into());
        }
        let config = HeapConfig {
            branching_factor,
            order,
        };
        Self::from_entries(config, elements.into_iter().zip(priorities))
    }

    /// Builds a heap from `(element, priority)` pairs with a bulk heapify.
    pub fn from_entries<I>(config: HeapConfig, entries: I) -> HeapResult<Self>
    where
        I: IntoIterator<Item = (T, P)>,
    {
        config.validate()?;
        let mut heap = DHeap {
            entries: entries
                .into_iter()
                .map(|(element, priority)| Entry { element, priority })
                .collect(),
            d: config.branching_factor,
            order: config.order,
        };
        heap.heapify();
        Ok(heap)
    }

    /// Inserts an element with the given priority.
    ///
    /// # Time Complexity
    /// O(log_d n)
    pub fn insert(&mut self, element: T, priority: P) {
        self.entries.push(Entry { element, priority });
        self.sift_up(self.entries.len() - 1);
        debug_assert!(self.validate());
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if there is nothing to extract.
    pub fn extract_top(&mut self) -> HeapResult<T> {
        self.extract_top_entry().map(|(element, _)| element)
    }

    /// Removes and returns the top element together with its priority.
    pub fn extract_top_entry(&mut self) -> HeapResult<(T, P)> {
        let last = self.entries.pop().ok_or(HeapError::EmptyQueue)?;
        if self.entries.is_empty() {
            return Ok(last.into_pair());
        }

        let root = mem::replace(&mut self.entries[0], last);
        self.sift_down(0);
        debug_assert!(self.validate());
        Ok(root.into_pair())
    }

    /// Storage index of the first entry equal to `element`.
    ///
    /// This is a linear scan.
    pub fn find(&self, element: &T) -> Option<usize> {
        self.entries.iter().position(|e| e.element == *element)
    }

    /// Returns true if an entry equal to `element` is stored. O(n).
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    /// Priority currently stored for `element`. O(n).
    pub fn priority_of(&self, element: &T) -> Option<&P> {
        self.find(element).map(|idx| &self.entries[idx].priority)
    }

    /// Removes `element` and returns the stored entry.
    ///
    /// The vacated slot is refilled from the end of the storage and repaired
    /// upward if the moved entry outranks the removed one, downward otherwise.
    /// Removing the entry stored last needs no repair.
    ///
    /// # Errors
    /// [`HeapError::ElementNotFound`] if no entry equals `element`.
    pub fn remove(&mut self, element: &T) -> HeapResult<(T, P)> {
        let idx = self.find(element).ok_or(HeapError::ElementNotFound)?;
        let last = self.entries.pop().ok_or(HeapError::ElementNotFound)?;
        if idx == self.entries.len() {
            return Ok(last.into_pair());
        }

        let removed = mem::replace(&mut self.entries[idx], last);
        if self
            .order
            .better(&self.entries[idx].priority, &removed.priority)
        {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        debug_assert!(self.validate());
        Ok(removed.into_pair())
    }

    /// Replaces the priority of `element` and returns the old one.
    ///
    /// A strictly better priority walks the entry toward the root; an equal
    /// or worse one walks it toward the leaves. An unchanged priority leaves
    /// the storage untouched.
    ///
    /// # Errors
    /// [`HeapError::ElementNotFound`] if no entry equals `element`.
    pub fn update(&mut self, element: &T, new_priority: P) -> HeapResult<P> {
        let idx = self.find(element).ok_or(HeapError::ElementNotFound)?;
        let old_priority = mem::replace(&mut self.entries[idx].priority, new_priority);

        if self
            .order
            .better(&self.entries[idx].priority, &old_priority)
        {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        debug_assert!(self.validate());
        Ok(old_priority)
    }

    /// Drains the heap into `(element, priority)` pairs, best first.
    pub fn into_sorted_vec(mut self) -> Vec<(T, P)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(entry) = self.extract_top_entry() {
            sorted.push(entry);
        }
        sorted
    }

    /// Checks the heap property.
    ///
    /// Returns true if no child outranks its parent. Shape is guaranteed by
    /// construction and is not checked.
    pub fn validate(&self) -> bool {
        (0..self.first_leaf_index()).all(|idx| {
            self.children(idx).all(|child| {
                self.order
                    .better_or_equal(&self.entries[idx].priority, &self.entries[child].priority)
            })
        })
    }

    /// Children of an internal node, clamped to the current length.
    #[inline]
    fn children(&self, idx: usize) -> std::ops::Range<usize> {
        let first = self.d * idx + 1;
        let end = first.saturating_add(self.d).min(self.entries.len());
        first..end
    }

    /// Best child of the internal node at `idx`; ties go to the leftmost.
    fn best_child_index(&self, idx: usize) -> usize {
        let children = self.children(idx);
        let mut best = children.start;
        for child in children.skip(1) {
            if self
                .order
                .better(&self.entries[child].priority, &self.entries[best].priority)
            {
                best = child;
            }
        }
        best
    }

    /// Moves the entry at `idx` toward the root while it outranks its parent.
    /// Returns the entry's final index.
    fn sift_up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = self.parent_index(idx);
            if self
                .order
                .better(&self.entries[idx].priority, &self.entries[parent].priority)
            {
                self.entries.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
        idx
    }

    /// Moves the entry at `idx` toward the leaves while some child outranks it.
    /// Returns the entry's final index.
    fn sift_down(&mut self, mut idx: usize) -> usize {
        let first_leaf = self.first_leaf_index();
        while idx < first_leaf {
            let best = self.best_child_index(idx);
            if self
                .order
                .better(&self.entries[best].priority, &self.entries[idx].priority)
            {
                self.entries.swap(idx, best);
                idx = best;
            } else {
                break;
            }
        }
        idx
    }

    /// Repairs every internal node, last one first.
    fn heapify(&mut self) {
        let first_leaf = self.first_leaf_index();
        trace!(
            len = self.entries.len(),
            branching_factor = self.d,
            internal_nodes = first_leaf,
            "heapifying"
        );
        for idx in (0..first_leaf).rev() {
            self.sift_down(idx);
        }
        debug_assert!(self.validate());
    }
}

impl<T, P> Default for DHeap<T, P> {
    /// Empty binary max-heap.
    fn default() -> Self {
        DHeap {
            entries: Vec::new(),
            d: crate::config::MIN_BRANCHING_FACTOR,
            order: HeapOrder::Max,
        }
    }
}

impl<T: PartialEq, P: Ord> Extend<(T, P)> for DHeap<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (element, priority) in iter {
            self.insert(element, priority);
        }
    }
}

impl<T: PartialEq, P: Ord> FromIterator<(T, P)> for DHeap<T, P> {
    /// Bulk-builds a binary max-heap.
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut heap = DHeap {
            entries: iter
                .into_iter()
                .map(|(element, priority)| Entry { element, priority })
                .collect(),
            ..DHeap::default()
        };
        heap.heapify();
        heap
    }
}

/// Owning iterator over the entries of a [`DHeap`], in storage order.
#[derive(Debug)]
pub struct IntoIter<T, P> {
    inner: std::vec::IntoIter<Entry<T, P>>,
}

impl<T, P> Iterator for IntoIter<T, P> {
    type Item = (T, P);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, P> ExactSizeIterator for IntoIter<T, P> {}

impl<T, P> IntoIterator for DHeap<T, P> {
    type Item = (T, P);
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}
