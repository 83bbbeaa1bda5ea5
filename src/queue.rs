//! The priority queue ordering pending node updates by `min(value, rhs)`.
//!
//! Unlike the teacher's `BinaryHeap<MinScored<_, _>>` idiom (see
//! `petgraph`'s `scored.rs`), `requeue` needs to *replace* an arbitrary
//! entry's key in `O(log n)`, which a bare binary heap cannot do. This
//! keeps the ordered multiset as a `BTreeMap<OrderedKey, VecDeque<NodeId>>`
//! (a `VecDeque` per key preserves FIFO order among ties) plus a
//! `node -> key` reverse index for the removal side of a requeue.

use std::collections::{BTreeMap, VecDeque};

use hashbrown::HashMap;

use crate::graph::NodeId;
use crate::numeric::{approx_eq, INFINITY};

/// `f64` wrapper implementing a total order via [`f64::total_cmp`], so it
/// can key a `BTreeMap`. Queue keys are never `NaN` in practice (they are
/// always `min(value, rhs)` of two values seeded from `INFINITY` or a
/// kernel's arithmetic), but `total_cmp` keeps the queue panic-free even
/// if one ever were.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedKey(f64);

impl Eq for OrderedKey {}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The ordered multiset of `(key, node)` pairs described in §4.1.
#[derive(Debug, Clone, Default)]
pub(crate) struct PriorityQueue {
    by_key: BTreeMap<OrderedKey, VecDeque<NodeId>>,
    key_of: HashMap<NodeId, f64>,
}

impl PriorityQueue {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.key_of.is_empty()
    }

    #[must_use]
    pub(crate) fn contains(&self, node: NodeId) -> bool {
        self.key_of.contains_key(&node)
    }

    /// Smallest key currently queued, or `None` if the queue is empty.
    #[must_use]
    pub(crate) fn min_key(&self) -> Option<f64> {
        self.by_key.keys().next().map(|k| k.0)
    }

    /// Largest key currently queued, or `None` if the queue is empty.
    #[must_use]
    pub(crate) fn max_key(&self) -> Option<f64> {
        self.by_key.keys().next_back().map(|k| k.0)
    }

    /// Insert, move, or drop `node` so that its queue membership matches
    /// `min(value, rhs)`. Returns the node's on-queue state after the
    /// call, which the caller (the `Algorithm`) mirrors into its `flag`
    /// vector.
    pub(crate) fn requeue(&mut self, node: NodeId, value: f64, rhs: f64) -> bool {
        if approx_eq(value, rhs) {
            self.remove(node);
            return false;
        }

        let key = value.min(rhs);
        match self.key_of.get(&node).copied() {
            None => {
                self.insert(node, key);
                true
            }
            Some(existing) if approx_eq(existing, key) => true,
            Some(existing) => {
                self.remove_from_bucket(node, existing);
                self.insert(node, key);
                true
            }
        }
    }

    /// Remove the lowest-keyed node. Panics if the queue is empty: the
    /// caller (`Algorithm::compute_one`) must check [`Self::is_empty`] first.
    pub(crate) fn pop(&mut self) -> NodeId {
        let key = *self
            .by_key
            .keys()
            .next()
            .expect("pop on an empty PriorityQueue");
        let bucket = self.by_key.get_mut(&key).expect("bucket for known key");
        let node = bucket
            .pop_front()
            .expect("non-empty bucket contains at least one node");
        if bucket.is_empty() {
            self.by_key.remove(&key);
        }
        self.key_of.remove(&node);
        node
    }

    /// Drop everything, clearing all on-queue state.
    pub(crate) fn clear(&mut self) {
        self.by_key.clear();
        self.key_of.clear();
    }

    /// Testability hook (§4.1): force `node` to sort before everything
    /// else on the queue by giving it a key strictly below the current
    /// minimum. Returns `false` if `node` is not currently queued. The
    /// resulting key is not the mathematically correct `min(value,
    /// rhs)`, so invariant 1 is deliberately broken until the next `pop`.
    pub(crate) fn promote(&mut self, node: NodeId) -> bool {
        let Some(&existing) = self.key_of.get(&node) else {
            return false;
        };
        self.remove_from_bucket(node, existing);
        let new_key = self.min_key().map_or(-INFINITY, |min| min - 1.0);
        self.insert(node, new_key);
        true
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(key) = self.key_of.remove(&node) {
            self.remove_from_bucket(node, key);
        }
    }

    fn remove_from_bucket(&mut self, node: NodeId, key: f64) {
        if let Some(bucket) = self.by_key.get_mut(&OrderedKey(key)) {
            bucket.retain(|&n| n != node);
            if bucket.is_empty() {
                self.by_key.remove(&OrderedKey(key));
            }
        }
    }

    fn insert(&mut self, node: NodeId, key: f64) {
        self.by_key
            .entry(OrderedKey(key))
            .or_default()
            .push_back(node);
        self.key_of.insert(node, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> NodeId {
        // NodeId has no public constructor; round-trip through a tiny
        // CSpace to get real ids for these unit tests.
        let mut g = crate::graph::CSpace::new();
        let mut last = g.add_vertex();
        for _ in 0..i {
            last = g.add_vertex();
        }
        last
    }

    #[test]
    fn requeue_consistent_node_is_not_queued() {
        let mut q = PriorityQueue::new();
        let n = id(0);
        assert!(!q.requeue(n, 1.0, 1.0));
        assert!(q.is_empty());
    }

    #[test]
    fn requeue_inconsistent_node_is_queued_at_min() {
        let mut q = PriorityQueue::new();
        let n = id(0);
        assert!(q.requeue(n, 5.0, 2.0));
        assert_eq!(q.min_key(), Some(2.0));
        assert!(q.contains(n));
    }

    #[test]
    fn requeue_same_key_does_not_move_bucket() {
        let mut q = PriorityQueue::new();
        let n = id(0);
        q.requeue(n, 5.0, 2.0);
        q.requeue(n, 5.0, 2.0);
        assert_eq!(q.by_key.len(), 1);
    }

    #[test]
    fn pop_order_is_nondecreasing() {
        let mut q = PriorityQueue::new();
        let a = id(0);
        let b = id(1);
        let c = id(2);
        q.requeue(a, 10.0, 10.0 - 3.0);
        q.requeue(b, 10.0, 10.0 - 1.0);
        q.requeue(c, 10.0, 10.0 - 2.0);
        let popped = [q.pop(), q.pop(), q.pop()];
        assert_eq!(popped, [a, c, b]);
        assert!(q.is_empty());
    }

    #[test]
    fn promote_beats_current_minimum() {
        let mut q = PriorityQueue::new();
        let a = id(0);
        let b = id(1);
        q.requeue(a, 10.0, 5.0);
        q.requeue(b, 10.0, 6.0);
        assert!(q.promote(b));
        assert_eq!(q.pop(), b);
    }

    #[test]
    fn promote_unqueued_node_fails() {
        let mut q = PriorityQueue::new();
        let a = id(0);
        assert!(!q.promote(a));
    }
}
