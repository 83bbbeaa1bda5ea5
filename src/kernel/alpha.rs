//! Alpha: graph-agnostic isotropic interpolation (α = 2).

use crate::numeric::INFINITY;
use crate::propagator::Propagator;

use super::Kernel;

const ALPHA: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
pub struct AlphaKernel {
    scale: f64,
}

impl AlphaKernel {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Kernel for AlphaKernel {
    fn freespace_meta(&self) -> f64 {
        1.0
    }

    fn obstacle_meta(&self) -> f64 {
        INFINITY
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn compute(&self, propagator: &mut Propagator) -> f64 {
        let meta = propagator.meta();
        if meta >= INFINITY {
            return INFINITY;
        }
        let h = self.scale;
        let neighbors = propagator.neighbors();
        let Some(primary) = neighbors.first().copied() else {
            return INFINITY;
        };
        let v1 = primary.value;
        let t_max = v1 + ALPHA * h * meta;

        let Some(secondary) = neighbors.get(1).copied() else {
            propagator.add_backpointer(primary.node);
            return t_max;
        };
        let v2 = secondary.value;
        let t_nonfb = v1 + meta * meta * (2.0 * h + v2 - v1) / (1.0 + meta);

        propagator.add_backpointer(primary.node);
        if t_nonfb > t_max {
            t_max
        } else {
            propagator.add_backpointer(secondary.node);
            t_nonfb
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CSpace;
    use crate::queue::PriorityQueue;
    use crate::upwind::Upwind;

    fn build_propagator<'a>(
        target: crate::graph::NodeId,
        g: &'a CSpace,
        upwind: &'a Upwind,
        value: &'a [f64],
        rhs: &'a [f64],
        meta: f64,
        queue: &'a PriorityQueue,
    ) -> crate::propagator::Propagator {
        crate::propagator::PropagatorFactory::new().build(target, g, upwind, value, rhs, meta, queue)
    }

    #[test]
    fn obstacle_meta_yields_infinity() {
        let mut g = CSpace::new();
        let target = g.add_vertex();
        let upwind = Upwind::new();
        let queue = PriorityQueue::new();
        let value = vec![0.0];
        let rhs = vec![0.0];
        let mut prop = build_propagator(target, &g, &upwind, &value, &rhs, INFINITY, &queue);
        let kernel = AlphaKernel::new(1.0);
        assert_eq!(kernel.compute(&mut prop), INFINITY);
    }

    #[test]
    fn single_neighbor_uses_fallback() {
        let mut g = CSpace::new();
        let target = g.add_vertex();
        let other = g.add_vertex();
        g.add_neighbor(target, other);
        let upwind = Upwind::new();
        let queue = PriorityQueue::new();
        let value = vec![0.0, 0.0];
        let rhs = vec![0.0, 0.0];
        let mut prop = build_propagator(target, &g, &upwind, &value, &rhs, 1.0, &queue);
        let kernel = AlphaKernel::new(1.0);
        assert_eq!(kernel.compute(&mut prop), 2.0);
    }

    #[test]
    fn two_equal_neighbors_interpolate_between_fallback_and_nonfallback() {
        let mut g = CSpace::new();
        let target = g.add_vertex();
        let a = g.add_vertex();
        let b = g.add_vertex();
        g.add_neighbor(target, a);
        g.add_neighbor(target, b);
        let upwind = Upwind::new();
        let queue = PriorityQueue::new();
        let value = vec![0.0, 0.0, 0.0];
        let rhs = vec![0.0, 0.0, 0.0];
        let mut prop = build_propagator(target, &g, &upwind, &value, &rhs, 1.0, &queue);
        let kernel = AlphaKernel::new(1.0);
        let rhs_value = kernel.compute(&mut prop);
        // v1=v2=0, m=1, h=1: t_max = 2, t_nonfb = 0 + 1*(2+0)/2 = 1.
        assert_eq!(rhs_value, 1.0);
        assert_eq!(prop.into_backpointers(), vec![a, b]);
    }
}
