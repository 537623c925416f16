//! The worklists a search pops its next node from. Each solver picks one: a FIFO queue for
//! breadth-first search, a binary min-heap for Dijkstra and a linear-scan list for A* and
//! greedy best-first search.
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A set of discovered but not yet visited nodes, each with a priority key.
pub trait Frontier<N, K> {
    /// Adds `node`. Structures without an ordering ignore `priority`.
    fn push(&mut self, node: N, priority: K);
    /// Removes the next node according to the structure's policy.
    fn pop(&mut self) -> Option<N>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strict first-in-first-out queue.
#[derive(Clone, Debug)]
pub struct FifoQueue<N> {
    queue: VecDeque<N>,
}

impl<N> Default for FifoQueue<N> {
    fn default() -> Self {
        FifoQueue {
            queue: VecDeque::new(),
        }
    }
}

impl<N, K> Frontier<N, K> for FifoQueue<N> {
    fn push(&mut self, node: N, _priority: K) {
        self.queue.push_back(node);
    }
    fn pop(&mut self) -> Option<N> {
        self.queue.pop_front()
    }
    fn len(&self) -> usize {
        self.queue.len()
    }
}

struct SmallestKeyHolder<N, K> {
    key: K,
    seq: u64,
    node: N,
}

impl<N, K: PartialEq> Eq for SmallestKeyHolder<N, K> {}

impl<N, K: PartialEq> PartialEq for SmallestKeyHolder<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key.eq(&other.key) && self.seq == other.seq
    }
}

impl<N, K: Ord> PartialOrd for SmallestKeyHolder<N, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, K: Ord> Ord for SmallestKeyHolder<N, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse on the key, then prefer the earlier insertion
        match other.key.cmp(&self.key) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Binary min-heap on the key. Equal keys leave in insertion order, which keeps searches
/// deterministic. The same node may be inserted several times; stale entries are the
/// caller's to skip.
pub struct MinHeap<N, K> {
    heap: BinaryHeap<SmallestKeyHolder<N, K>>,
    next_seq: u64,
}

impl<N, K: Ord> Default for MinHeap<N, K> {
    fn default() -> Self {
        MinHeap {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<N, K: Ord> MinHeap<N, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: N, key: K) {
        self.heap.push(SmallestKeyHolder {
            key,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    /// Removes the entry with the smallest key, `None` once the heap is empty.
    pub fn extract_min(&mut self) -> Option<(N, K)> {
        self.heap.pop().map(|holder| (holder.node, holder.key))
    }

    pub fn peek_min(&self) -> Option<(&N, &K)> {
        self.heap.peek().map(|holder| (&holder.node, &holder.key))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<N, K: Ord> Frontier<N, K> for MinHeap<N, K> {
    fn push(&mut self, node: N, priority: K) {
        self.insert(node, priority);
    }
    fn pop(&mut self) -> Option<N> {
        self.extract_min().map(|(node, _)| node)
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Unordered list whose minimum is found by scanning every entry. The first of several
/// equal minima wins and removal keeps the order of the remaining entries. Pushing a node
/// that is already listed updates its key where it stands.
#[derive(Clone, Debug)]
pub struct LinearScanList<N, K> {
    entries: Vec<(N, K)>,
}

impl<N, K> Default for LinearScanList<N, K> {
    fn default() -> Self {
        LinearScanList {
            entries: Vec::new(),
        }
    }
}

impl<N: PartialEq, K: Ord + Copy> LinearScanList<N, K> {
    pub fn contains(&self, node: &N) -> bool {
        self.entries.iter().any(|(n, _)| n == node)
    }

    pub fn key(&self, node: &N) -> Option<K> {
        self.entries
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, key)| *key)
    }

    /// Removes the entry with the smallest key.
    pub fn pop_min(&mut self) -> Option<(N, K)> {
        let ix = self.entries.iter().position_min_by_key(|(_, key)| *key)?;
        Some(self.entries.remove(ix))
    }
}

impl<N: PartialEq, K: Ord + Copy> Frontier<N, K> for LinearScanList<N, K> {
    fn push(&mut self, node: N, priority: K) {
        match self.entries.iter_mut().find(|(n, _)| *n == node) {
            Some(entry) => entry.1 = priority,
            None => self.entries.push((node, priority)),
        }
    }
    fn pop(&mut self) -> Option<N> {
        self.pop_min().map(|(node, _)| node)
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
}
