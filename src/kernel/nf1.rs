//! NF1: the non-interpolating kernel, `rhs = value(primary) + meta(target)`.

use crate::numeric::INFINITY;
use crate::propagator::Propagator;

use super::Kernel;

#[derive(Debug, Clone, Copy)]
pub struct Nf1Kernel {
    scale: f64,
}

impl Nf1Kernel {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Kernel for Nf1Kernel {
    fn freespace_meta(&self) -> f64 {
        0.0
    }

    fn obstacle_meta(&self) -> f64 {
        INFINITY
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn compute(&self, propagator: &mut Propagator) -> f64 {
        let meta = propagator.meta();
        let Some(primary) = propagator.neighbors().first().copied() else {
            return INFINITY;
        };
        propagator.add_backpointer(primary.node);
        primary.value + meta
    }
}
