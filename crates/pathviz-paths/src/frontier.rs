//! Priority frontier for the shortest-path search.
//!
//! Entries are stored in a min-heap keyed by `(distance, insertion_order)`.
//! Smaller distances are popped first; ties are broken FIFO, which makes
//! the visitation order deterministic for a given grid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    dist: u32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
    idx: usize,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist
            .cmp(&other.dist)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Cells discovered but not yet settled.
///
/// The same cell may be pushed several times as its distance improves; the
/// search discards stale copies when they are popped.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, idx: usize, dist: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { dist, seq, idx }));
    }

    /// Pop the entry with the smallest distance (ties broken FIFO).
    pub(crate) fn pop(&mut self) -> Option<(usize, u32)> {
        self.heap.pop().map(|Reverse(e)| (e.idx, e.dist))
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
