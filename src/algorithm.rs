//! The LPA*-style driver tying the queue, the upwind registry, a kernel,
//! and the per-node flags together.
//!
//! `Algorithm` owns every node attribute (struct-of-arrays: `value`,
//! `rhs`, `meta`, `flag`, one `Vec` each indexed by [`NodeId`]) plus the
//! [`PriorityQueue`] and the [`Upwind`] registry. The C-space graph
//! itself only ever grows; attributes are appended alongside it.

use crate::flag::Flag;
use crate::graph::{CSpace, NodeId};
use crate::kernel::Kernel;
use crate::numeric::{approx_eq, INFINITY};
use crate::propagator::PropagatorFactory;
use crate::queue::PriorityQueue;
use crate::upwind::Upwind;

/// The incremental wavefront solver's core state.
#[derive(Debug, Clone, Default)]
pub struct Algorithm {
    graph: CSpace,
    value: Vec<f64>,
    rhs: Vec<f64>,
    meta: Vec<f64>,
    flag: Vec<Flag>,
    queue: PriorityQueue,
    upwind: Upwind,
    pending_reset: bool,
}

impl Algorithm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn graph(&self) -> &CSpace {
        &self.graph
    }

    #[must_use]
    pub fn value(&self, node: NodeId) -> f64 {
        self.value[node.index()]
    }

    #[must_use]
    pub fn rhs(&self, node: NodeId) -> f64 {
        self.rhs[node.index()]
    }

    #[must_use]
    pub fn meta(&self, node: NodeId) -> f64 {
        self.meta[node.index()]
    }

    #[must_use]
    pub fn flag(&self, node: NodeId) -> Flag {
        self.flag[node.index()]
    }

    #[must_use]
    pub fn min_queue_key(&self) -> Option<f64> {
        self.queue.min_key()
    }

    #[must_use]
    pub fn max_queue_key(&self) -> Option<f64> {
        self.queue.max_key()
    }

    #[must_use]
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Add a fresh vertex with `(value=+inf, rhs=+inf, flag=NONE)` and the
    /// given initial `meta`.
    pub fn add_vertex(&mut self, meta: f64) -> NodeId {
        let node = self.graph.add_vertex();
        self.value.push(INFINITY);
        self.rhs.push(INFINITY);
        self.meta.push(meta);
        self.flag.push(Flag::none());
        node
    }

    pub fn add_neighbor(&mut self, a: NodeId, b: NodeId) {
        self.graph.add_neighbor(a, b);
    }

    /// Record `node`'s 2-D grid coordinate, used by the LSM kernel's
    /// axis-orthogonality check and by [`crate::grid::Grid`]'s geometry.
    pub fn set_coord(&mut self, node: NodeId, ix: i64, iy: i64) {
        self.graph.set_coord(node, ix, iy);
    }

    #[must_use]
    pub fn coord(&self, node: NodeId) -> Option<(i64, i64)> {
        self.graph.coord(node)
    }

    /// Bulk initialization: set `meta` without queueing. Only meaningful
    /// before the first `compute_one`.
    pub fn init_meta(&mut self, node: NodeId, meta: f64) {
        self.meta[node.index()] = meta;
    }

    /// Bulk initialization over every node currently in the graph.
    pub fn init_all_meta(&mut self, meta: f64) {
        self.meta.fill(meta);
    }

    /// Change `node`'s `meta`; if it actually changed, recompute `rhs`
    /// through `kernel` and re-queue the node.
    pub fn set_meta<K: Kernel>(&mut self, node: NodeId, meta: f64, kernel: &K) {
        if approx_eq(self.meta[node.index()], meta) {
            return;
        }
        self.meta[node.index()] = meta;
        self.update_node(node, kernel);
    }

    /// Promote `node` to a goal with a-priori value `value`. A no-op if
    /// `node` is already a goal with the same value.
    pub fn add_goal(&mut self, node: NodeId, value: f64) {
        let already_goal = self.flag[node.index()].is_goal();
        let same_value = approx_eq(self.rhs[node.index()], value);
        if already_goal && same_value {
            return;
        }
        self.flag[node.index()] = self.flag[node.index()].with_is_goal(true);
        self.rhs[node.index()] = value;
        if !approx_eq(self.value[node.index()], value) {
            self.value[node.index()] = INFINITY;
        }
        self.requeue_node(node);
    }

    /// Demote `node` from goal status. The field is not repaired until
    /// the next `compute_one`, which performs a full deferred reset.
    pub fn remove_goal(&mut self, node: NodeId) {
        self.flag[node.index()] = self.flag[node.index()].with_is_goal(false);
        self.pending_reset = true;
    }

    /// Demote every goal. Same deferred-reset contract as `remove_goal`.
    pub fn remove_all_goals(&mut self) {
        for flag in &mut self.flag {
            *flag = flag.with_is_goal(false);
        }
        self.pending_reset = true;
    }

    /// True iff a reset is pending or the queue is non-empty: there is
    /// more work `compute_one` could do.
    #[must_use]
    pub fn have_work(&self) -> bool {
        self.pending_reset || !self.queue.is_empty()
    }

    /// Perform one unit of propagation work. A no-op if there is no work
    /// to do (after running a pending reset, if any).
    pub fn compute_one<K: Kernel>(&mut self, kernel: &K, slack: f64) {
        if self.pending_reset {
            self.reset();
            self.pending_reset = false;
        }
        if self.queue.is_empty() {
            return;
        }

        let v = self.queue.pop();
        self.flag[v.index()] = self.flag[v.index()].with_on_queue(false);

        let value = self.value[v.index()];
        let rhs = self.rhs[v.index()];
        if (value - rhs).abs() <= slack {
            return;
        }

        if value > rhs {
            self.value[v.index()] = rhs;
            let neighbors: Vec<NodeId> = self.graph.neighbors(v).to_vec();
            for n in neighbors {
                self.update_node(n, kernel);
            }
        } else {
            self.value[v.index()] = INFINITY;
            let downwind: Vec<NodeId> = self.upwind.downwind_of(v).to_vec();
            for n in downwind {
                self.update_node(n, kernel);
            }
            self.update_node(v, kernel);
        }
    }

    /// Clear the queue, reset every non-goal node to `(value=+inf,
    /// rhs=+inf, flag=NONE)`, and requeue every goal so its a-priori
    /// value propagates outward again.
    fn reset(&mut self) {
        self.queue.clear();
        let ids: Vec<NodeId> = self.graph.ids().collect();
        for node in &ids {
            let idx = node.index();
            self.value[idx] = INFINITY;
            if !self.flag[idx].is_goal() {
                self.rhs[idx] = INFINITY;
                self.flag[idx] = Flag::none();
            }
        }
        for node in ids {
            if self.flag[node.index()].is_goal() {
                self.requeue_node(node);
            }
        }
    }

    fn update_node<K: Kernel>(&mut self, node: NodeId, kernel: &K) {
        if self.flag[node.index()].is_goal() {
            return;
        }
        let meta = self.meta[node.index()];
        let mut propagator = PropagatorFactory::new().build(
            node,
            &self.graph,
            &self.upwind,
            &self.value,
            &self.rhs,
            meta,
            &self.queue,
        );
        let new_rhs = kernel.compute(&mut propagator);
        let backpointers = propagator.into_backpointers();

        self.upwind.remove_incoming(node);
        for upwind_node in backpointers {
            self.upwind.add_edge(upwind_node, node);
        }

        self.rhs[node.index()] = new_rhs;
        self.requeue_node(node);
    }

    fn requeue_node(&mut self, node: NodeId) {
        let on_queue = self
            .queue
            .requeue(node, self.value[node.index()], self.rhs[node.index()]);
        self.flag[node.index()] = self.flag[node.index()].with_on_queue(on_queue);
    }
}
