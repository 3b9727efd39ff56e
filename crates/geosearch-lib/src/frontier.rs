//! Indexed binary min-heap used as the frontier of the informed searches.
//!
//! Heap layout follows the usual implicit tree over a vector:
//!
//! ```text
//!                 0
//!         1               2
//!     3       4       5       6
//! ```
//!
//! - parent: `(i - 1) / 2`
//! - left child: `2i + 1`
//! - right child: `2i + 2`
//!
//! A node -> slot map makes membership checks and decrease-key `O(log n)`.
//! Equal priorities pop in insertion order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::graph::LocationId;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    node: LocationId,
    priority: f64,
    sequence: u64,
}

impl HeapEntry {
    fn precedes(&self, other: &Self) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.sequence < other.sequence,
        }
    }
}

/// Result of [`IndexedMinHeap::push_or_decrease`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The node was not queued and has been inserted.
    Inserted,
    /// The node was queued with a higher priority and has been replaced.
    Decreased,
    /// The node was already queued with an equal or lower priority.
    Unchanged,
}

/// Min-heap of locations keyed by `f64` priority with decrease-key support.
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap {
    heap: Vec<HeapEntry>,
    slots: HashMap<LocationId, usize>,
    next_sequence: u64,
}

impl IndexedMinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: LocationId) -> bool {
        self.slots.contains_key(&node)
    }

    /// Current priority of a queued node.
    pub fn priority(&self, node: LocationId) -> Option<f64> {
        self.slots.get(&node).map(|&slot| self.heap[slot].priority)
    }

    /// Queue `node` unless it is already queued. Returns whether it was added.
    pub fn push(&mut self, node: LocationId, priority: f64) -> bool {
        if self.contains(node) {
            return false;
        }
        let entry = HeapEntry {
            node,
            priority,
            sequence: self.bump_sequence(),
        };
        let slot = self.heap.len();
        self.heap.push(entry);
        self.slots.insert(node, slot);
        self.sift_up(slot);
        true
    }

    /// Queue `node`, or lower its priority if it is queued with a higher one.
    ///
    /// A decreased entry counts as freshly inserted for tie-breaking.
    pub fn push_or_decrease(&mut self, node: LocationId, priority: f64) -> PushOutcome {
        let Some(&slot) = self.slots.get(&node) else {
            self.push(node, priority);
            return PushOutcome::Inserted;
        };
        if priority.total_cmp(&self.heap[slot].priority) != Ordering::Less {
            return PushOutcome::Unchanged;
        }
        let sequence = self.bump_sequence();
        let entry = &mut self.heap[slot];
        entry.priority = priority;
        entry.sequence = sequence;
        self.sift_up(slot);
        PushOutcome::Decreased
    }

    /// Remove and return the node with the lowest priority.
    pub fn pop(&mut self) -> Option<(LocationId, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.node);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.node, entry.priority))
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.heap[slot].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut best = slot;
            if left < len && self.heap[left].precedes(&self.heap[best]) {
                best = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[best]) {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].node, a);
        self.slots.insert(self.heap[b].node, b);
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        for (slot, entry) in self.heap.iter().enumerate() {
            assert_eq!(self.slots[&entry.node], slot);
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(!entry.precedes(&self.heap[parent]));
            }
        }
        assert_eq!(self.slots.len(), self.heap.len());
    }
}
