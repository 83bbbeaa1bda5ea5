//! `navfield` computes interpolated navigation functions on a 2-D grid:
//! for every cell, a smooth scalar field equal to the shortest
//! traversal cost to the nearest goal, weighted by a per-cell
//! traversability metric.
//!
//! The field is produced by a wavefront solver patterned after LPA*:
//! goals seed the wavefront, costs propagate outward through a
//! pluggable interpolation kernel ([`kernel::Nf1Kernel`],
//! [`kernel::AlphaKernel`], or [`kernel::LsmKernel`]), and the solver
//! repairs the field incrementally when traversability or goal sets
//! change, without recomputing from scratch.
//!
//! [`facade::Facade`] is the entry point most callers want: it bundles
//! a [`grid::Grid`], an [`algorithm::Algorithm`], and a chosen kernel
//! behind a single `(ix, iy)`-addressed API. [`risk`] builds a
//! probabilistic navigation function on top of several cooperating
//! facades.

pub mod algorithm;
pub mod dump;
pub mod error;
pub mod facade;
pub mod flag;
pub mod flexgrid;
pub mod graph;
pub mod grid;
pub mod kernel;
pub mod neighborhood;
pub mod numeric;
pub mod propagator;
pub mod risk;

mod sdeque;
mod upwind;
mod queue;

pub use algorithm::Algorithm;
pub use error::NavFieldError;
pub use facade::{CarrotTrace, Facade, Status, TraceEntry};
pub use flag::{Flag, FlagKind};
pub use graph::{CSpace, NodeId};
pub use grid::{BBox, Grid, Gradient, GradientStatus, ScaledGradient, ScaledGradientStatus};
pub use kernel::{AlphaKernel, Kernel, KernelKind, LsmKernel, Nf1Kernel};
pub use neighborhood::{HexTransform, Neighborhood};
pub use numeric::{approx_eq, bound, quadratic_roots, EPSILON, INFINITY};
pub use propagator::{Axis, Propagator, PropagatorFactory, PropagatorNeighbor};
