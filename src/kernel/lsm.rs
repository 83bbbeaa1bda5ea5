//! LSM: Level-Set-Method interpolation on a 4-connected grid.
//!
//! Needs the C-space's 2-D coordinates (via [`crate::propagator::Axis`])
//! to tell whether a candidate secondary neighbor lies on an axis
//! orthogonal to the primary's.

use crate::numeric::{EPSILON, INFINITY};
use crate::propagator::Propagator;

use super::Kernel;

#[derive(Debug, Clone, Copy)]
pub struct LsmKernel {
    scale: f64,
}

impl LsmKernel {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Kernel for LsmKernel {
    fn freespace_meta(&self) -> f64 {
        1.0
    }

    fn obstacle_meta(&self) -> f64 {
        0.0
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn compute(&self, propagator: &mut Propagator) -> f64 {
        let meta = propagator.meta();
        if meta <= EPSILON {
            return INFINITY;
        }
        let h = self.scale;
        let r = h / meta;

        let neighbors = propagator.neighbors();
        let Some(primary) = neighbors.first().copied() else {
            return INFINITY;
        };
        let v1 = primary.value;
        propagator.add_backpointer(primary.node);

        let secondary = neighbors
            .iter()
            .skip(1)
            .find(|n| n.axis.is_some() && n.axis != primary.axis)
            .copied();

        let Some(secondary) = secondary else {
            return v1 + r;
        };
        let v2 = secondary.value;

        if r <= v2 - v1 {
            return v1 + r;
        }

        propagator.add_backpointer(secondary.node);
        let b = v1 + v2;
        let c = (v1 * v1 + v2 * v2 - r * r) / 2.0;
        let discriminant = (b * b - 4.0 * c).max(0.0);
        (b + discriminant.sqrt()) / 2.0
    }
}
