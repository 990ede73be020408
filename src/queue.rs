//! the candidate priority queue (spec §4.4): a binary min-heap ordered by `f`, tie-broken
//! by lower `h`, then lower hop count, then earlier insertion. `std::collections::BinaryHeap`
//! is a max-heap, so [`Priority`]'s `Ord` is written to make "better" candidates compare
//! as greater.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::model::candidate::CandidateIndex;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Priority {
    f: OrderedFloat<f64>,
    h: OrderedFloat<f64>,
    hops: u32,
    insertion_seq: u64,
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    /// reversed so that `BinaryHeap::pop` returns the candidate spec §4.5 calls "min-`f`":
    /// lower `f` beats higher, then lower `h`, then lower hops, then earlier insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.insertion_seq.cmp(&self.insertion_seq))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    priority: Priority,
    index: CandidateIndex,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// the candidate frontier for one connection's search (spec §4.4). Holds arena indices,
/// not candidates themselves, so the heap stays cheap to clone-free mutate while the
/// candidates live in the connection's [`crate::model::candidate::CandidateArena`].
#[derive(Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<Entry>,
}

impl CandidateQueue {
    pub fn new() -> Self {
        CandidateQueue {
            heap: BinaryHeap::new(),
        }
    }

    pub fn enqueue(&mut self, index: CandidateIndex, f: f64, h: f64, hops: u32, insertion_seq: u64) {
        self.heap.push(Entry {
            priority: Priority {
                f: OrderedFloat(f),
                h: OrderedFloat(h),
                hops,
                insertion_seq,
            },
            index,
        });
    }

    pub fn dequeue(&mut self) -> Option<CandidateIndex> {
        self.heap.pop().map(|e| e.index)
    }

    /// the first `k` candidates in pop order, without removing them (spec §4.4). Drains
    /// and rebuilds the heap rather than mutating a peeked copy, since `BinaryHeap`
    /// exposes no non-destructive ranked iteration.
    pub fn peek_many(&self, k: usize) -> Vec<CandidateIndex> {
        let mut clone = self.heap.clone();
        let mut out = Vec::with_capacity(k.min(clone.len()));
        while out.len() < k {
            match clone.pop() {
                Some(entry) => out.push(entry.index),
                None => break,
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
