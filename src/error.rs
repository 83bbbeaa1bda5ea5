//! Error type for the handful of fallible constructors in this crate.
//!
//! Almost everything else reports domain errors as `bool`/`Option` per
//! §7 of the design: a missing node, an out-of-grid index, or a numeric
//! edge case is not exceptional here, it is an expected outcome the
//! caller already has to handle. Only construction-time preconditions
//! (an unrecognized kernel name, a non-positive scale) get a real error
//! type, because those are the only places a caller needs a diagnosable
//! reason a value could not be built at all.

use std::fmt::{self, Display, Formatter};

use error_stack::Context;

/// Errors returned by this crate's fallible constructors.
#[derive(Debug)]
#[non_exhaustive]
pub enum NavFieldError {
    /// A kernel's `scale` must be strictly positive; see §9's note on the
    /// legacy `scale=0` code paths that silently produced `NaN`.
    InvalidScale { scale: f64 },
    /// [`crate::facade::Facade::new`] was asked for a kernel name other
    /// than `"nf1"`, `"alpha"`, or `"lsm"`.
    UnknownKernel(String),
    /// A risk-map family name other than `"spike"`, `"blunt"`, or `"sigma"`.
    UnknownRiskMap(String),
    /// A risk-map `cutoff` must lie in `(0, 1]`.
    InvalidCutoff { cutoff: f64 },
}

impl Display for NavFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale { scale } => {
                write!(f, "kernel scale must be > 0, got {scale}")
            }
            Self::UnknownKernel(name) => {
                write!(f, "unknown kernel name {name:?}, expected nf1/alpha/lsm")
            }
            Self::UnknownRiskMap(name) => {
                write!(f, "unknown risk map name {name:?}, expected spike/blunt/sigma")
            }
            Self::InvalidCutoff { cutoff } => {
                write!(f, "risk map cutoff must be in (0, 1], got {cutoff}")
            }
        }
    }
}

impl Context for NavFieldError {}
