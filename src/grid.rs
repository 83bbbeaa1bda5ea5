//! The geometric layer connecting the graph-generic solver to 2-D
//! navigation: a `(ix, iy)`-indexed node table, a chosen neighborhood,
//! gradient extraction, and world-space bounding boxes.

use crate::algorithm::Algorithm;
use crate::flexgrid::FlexGrid;
use crate::graph::NodeId;
use crate::kernel::Kernel;
use crate::neighborhood::{HexTransform, Neighborhood};
use crate::numeric::EPSILON;

/// Whether [`Grid::compute_gradient`] found contributions on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStatus {
    Ok,
    Incomplete,
}

/// A raw, unscaled gradient estimate.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    pub dx: f64,
    pub dy: f64,
    pub status: GradientStatus,
}

/// Outcome of [`Grid::compute_stable_scaled_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaledGradientStatus {
    /// The raw gradient was well-formed and strong enough to scale directly.
    Ok,
    /// No node at the requested cell at all; the zero vector is returned.
    Incomplete,
    /// The raw gradient was missing an axis or too small to scale
    /// reliably; a heuristic `±stepsize/2` step was substituted.
    Heuristic,
}

/// A gradient scaled to approximately `stepsize` in magnitude (or a
/// heuristic substitute), plus the status that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ScaledGradient {
    pub dx: f64,
    pub dy: f64,
    pub status: ScaledGradientStatus,
}

/// World-space bounding box of the currently allocated grid region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// The 2-D geometric layer: a node table over `(ix, iy)` plus the
/// neighborhood pattern used to connect newly added cells.
#[derive(Debug, Clone)]
pub struct Grid {
    table: FlexGrid<NodeId>,
    neighborhood: Neighborhood,
}

impl Grid {
    #[must_use]
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self {
            table: FlexGrid::new(),
            neighborhood,
        }
    }

    #[must_use]
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    #[must_use]
    pub fn get_node(&self, ix: i64, iy: i64) -> Option<NodeId> {
        self.table.get(ix, iy).copied()
    }

    /// Snap a continuous world-space position to the nearest grid index,
    /// inverting the hex shear when the neighborhood calls for it.
    #[must_use]
    pub fn nearest_index(&self, x: f64, y: f64) -> (i64, i64) {
        if self.neighborhood.is_hex() {
            let iy = (y / (3.0_f64.sqrt() / 2.0)).round() as i64;
            let offset = if iy.rem_euclid(2) != 0 { 0.5 } else { 0.0 };
            ((x - offset).round() as i64, iy)
        } else {
            (x.round() as i64, y.round() as i64)
        }
    }

    /// Add cell `(ix, iy)` with the given `meta`, wiring it to whichever
    /// of its neighborhood offsets already exist. If the cell already
    /// exists, this instead re-sets its meta through `Algorithm::set_meta`
    /// (so the field repairs itself) and returns `false`.
    pub fn add_node<K: Kernel>(
        &mut self,
        algo: &mut Algorithm,
        kernel: &K,
        ix: i64,
        iy: i64,
        meta: f64,
    ) -> bool {
        if let Some(existing) = self.table.get(ix, iy).copied() {
            algo.set_meta(existing, meta, kernel);
            return false;
        }

        let node = algo.add_vertex(meta);
        algo.set_coord(node, ix, iy);
        self.table.set(ix, iy, node);
        for &(dx, dy) in self.neighborhood.offsets(iy) {
            if let Some(neighbor) = self.table.get(ix + dx, iy + dy).copied() {
                algo.add_neighbor(node, neighbor);
            }
        }
        true
    }

    /// Add every cell in `[x_begin, x_end) x [y_begin, y_end)` with `meta`.
    pub fn add_range<K: Kernel>(
        &mut self,
        algo: &mut Algorithm,
        kernel: &K,
        x_begin: i64,
        x_end: i64,
        y_begin: i64,
        y_end: i64,
        meta: f64,
    ) {
        for iy in y_begin..y_end {
            for ix in x_begin..x_end {
                self.add_node(algo, kernel, ix, iy, meta);
            }
        }
    }

    /// Estimate `(∂value/∂x, ∂value/∂y)` at `(ix, iy)` from the
    /// axis-aligned 4-neighborhood. Always incomplete on hex grids,
    /// which have no well-defined orthogonal axis pair.
    #[must_use]
    pub fn compute_gradient(&self, algo: &Algorithm, ix: i64, iy: i64) -> Gradient {
        if self.neighborhood.is_hex() {
            return Gradient {
                dx: 0.0,
                dy: 0.0,
                status: GradientStatus::Incomplete,
            };
        }
        let Some(center) = self.get_node(ix, iy) else {
            return Gradient {
                dx: 0.0,
                dy: 0.0,
                status: GradientStatus::Incomplete,
            };
        };
        let center_value = algo.value(center);

        let x_fwd = self.get_node(ix + 1, iy).map(|n| algo.value(n));
        let x_bwd = self.get_node(ix - 1, iy).map(|n| algo.value(n));
        let y_fwd = self.get_node(ix, iy + 1).map(|n| algo.value(n));
        let y_bwd = self.get_node(ix, iy - 1).map(|n| algo.value(n));

        let (dx, x_count) = axis_component(center_value, x_fwd, x_bwd);
        let (dy, y_count) = axis_component(center_value, y_fwd, y_bwd);

        let status = if x_count > 0 && y_count > 0 {
            GradientStatus::Ok
        } else {
            GradientStatus::Incomplete
        };
        Gradient { dx, dy, status }
    }

    /// Scale the raw gradient at `(ix, iy)` to approximate norm
    /// `stepsize`, falling back to a heuristic `±stepsize/2` axial step
    /// when the raw gradient is incomplete or too small to normalize.
    #[must_use]
    pub fn compute_stable_scaled_gradient(
        &self,
        algo: &Algorithm,
        ix: i64,
        iy: i64,
        stepsize: f64,
    ) -> ScaledGradient {
        if self.get_node(ix, iy).is_none() {
            return ScaledGradient {
                dx: 0.0,
                dy: 0.0,
                status: ScaledGradientStatus::Incomplete,
            };
        }

        let gradient = self.compute_gradient(algo, ix, iy);
        let norm = (gradient.dx * gradient.dx + gradient.dy * gradient.dy).sqrt();

        if gradient.status == GradientStatus::Ok && norm > EPSILON {
            let scale = stepsize / norm;
            return ScaledGradient {
                dx: gradient.dx * scale,
                dy: gradient.dy * scale,
                status: ScaledGradientStatus::Ok,
            };
        }

        let half = stepsize / 2.0;
        ScaledGradient {
            dx: sign(gradient.dx) * half,
            dy: sign(gradient.dy) * half,
            status: ScaledGradientStatus::Heuristic,
        }
    }

    /// World-space bounding box of the currently allocated region.
    /// Hex grids apply the `√3/2` y-shear and half-cell x-offset.
    #[must_use]
    pub fn compute_bbox(&self) -> Option<BBox> {
        let (iy_begin, iy_end) = self.table.row_range();
        if iy_begin >= iy_end {
            return None;
        }

        let mut ix_min = i64::MAX;
        let mut ix_max = i64::MIN;
        for iy in iy_begin..iy_end {
            if let Some((begin, end)) = self.table.col_range_at(iy) {
                if begin < end {
                    ix_min = ix_min.min(begin);
                    ix_max = ix_max.max(end - 1);
                }
            }
        }
        if ix_min > ix_max {
            return None;
        }

        let corners = [
            (ix_min, iy_begin),
            (ix_max, iy_begin),
            (ix_min, iy_end - 1),
            (ix_max, iy_end - 1),
        ];
        let transformed: Vec<(f64, f64)> = corners
            .into_iter()
            .map(|(ix, iy)| {
                if self.neighborhood.is_hex() {
                    HexTransform::world_xy(ix, iy)
                } else {
                    (ix as f64, iy as f64)
                }
            })
            .collect();

        let x0 = transformed.iter().map(|&(x, _)| x).fold(f64::MAX, f64::min);
        let x1 = transformed.iter().map(|&(x, _)| x).fold(f64::MIN, f64::max);
        let y0 = transformed.iter().map(|&(_, y)| y).fold(f64::MAX, f64::min);
        let y1 = transformed.iter().map(|&(_, y)| y).fold(f64::MIN, f64::max);
        Some(BBox { x0, y0, x1, y1 })
    }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// One axis's averaged one-sided difference, in the direction of
/// increasing index. The forward neighbor only contributes when its
/// value is lower than the center's (the field descends going
/// forward); the backward neighbor only contributes when the center's
/// value is higher than its own (the field descends going backward,
/// i.e. it ascended getting here). Both conditions pick out estimates
/// consistent with one specific slope sign, so they can be averaged
/// together; a neighbor on the "wrong" side of a local extremum is
/// dropped rather than allowed to cancel a real estimate.
fn axis_component(center: f64, forward: Option<f64>, backward: Option<f64>) -> (f64, usize) {
    let mut sum = 0.0;
    let mut count = 0;
    if let Some(fwd) = forward {
        let diff = fwd - center;
        if diff < 0.0 {
            sum += diff;
            count += 1;
        }
    }
    if let Some(bwd) = backward {
        let diff = center - bwd;
        if diff > 0.0 {
            sum += diff;
            count += 1;
        }
    }
    if count == 0 {
        (0.0, 0)
    } else {
        (sum / count as f64, count)
    }
}
