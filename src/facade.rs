//! The user-facing bundle of a [`Grid`], an [`Algorithm`], and a chosen
//! [`KernelKind`]: everything a caller needs, addressed by `(ix, iy)`.

use error_stack::Result;

use crate::algorithm::Algorithm;
use crate::error::NavFieldError;
use crate::grid::{Grid, ScaledGradientStatus};
use crate::kernel::{Kernel, KernelKind};
use crate::neighborhood::Neighborhood;
use crate::numeric::approx_eq;

/// A cell's classification, as reported by [`Facade::get_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    OutOfGrid,
    Upwind,
    Downwind,
    Wavefront,
    Goal,
    Obstacle,
}

/// One recorded step of a [`Facade::trace_carrot`] run.
#[derive(Debug, Clone, Copy)]
pub struct TraceEntry {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub value: f64,
    pub heuristic: bool,
}

/// The outcome of [`Facade::trace_carrot`]: the recorded path plus a
/// status code mirroring the reference implementation's five outcomes.
#[derive(Debug, Clone)]
pub struct CarrotTrace {
    pub entries: Vec<TraceEntry>,
    pub code: i32,
}

/// Bundles a [`Grid`], an [`Algorithm`], and a [`KernelKind`] behind a
/// single `(ix, iy)`-addressed API.
#[derive(Debug, Clone)]
pub struct Facade {
    grid: Grid,
    algorithm: Algorithm,
    kernel: KernelKind,
}

impl Facade {
    /// Build a facade for `kernel_name` (`"nf1"`, `"alpha"`, or `"lsm"`)
    /// with the given `neighborhood` and `scale`.
    pub fn new(
        neighborhood: Neighborhood,
        kernel_name: &str,
        scale: f64,
    ) -> Result<Self, NavFieldError> {
        let kernel = KernelKind::by_name(kernel_name, scale)?;
        Ok(Self {
            grid: Grid::new(neighborhood),
            algorithm: Algorithm::new(),
            kernel,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    #[must_use]
    pub fn kernel(&self) -> &KernelKind {
        &self.kernel
    }

    pub fn add_node(&mut self, ix: i64, iy: i64, meta: f64) -> bool {
        self.grid.add_node(&mut self.algorithm, &self.kernel, ix, iy, meta)
    }

    pub fn add_range(&mut self, x_begin: i64, x_end: i64, y_begin: i64, y_end: i64, meta: f64) {
        self.grid
            .add_range(&mut self.algorithm, &self.kernel, x_begin, x_end, y_begin, y_end, meta);
    }

    /// Returns `false` if `(ix, iy)` is outside the grid.
    pub fn set_meta(&mut self, ix: i64, iy: i64, meta: f64) -> bool {
        let Some(node) = self.grid.get_node(ix, iy) else {
            return false;
        };
        self.algorithm.set_meta(node, meta, &self.kernel);
        true
    }

    /// Returns `false` if `(ix, iy)` is outside the grid.
    pub fn add_goal(&mut self, ix: i64, iy: i64, value: f64) -> bool {
        let Some(node) = self.grid.get_node(ix, iy) else {
            return false;
        };
        self.algorithm.add_goal(node, value);
        true
    }

    /// Returns `false` if `(ix, iy)` is outside the grid.
    pub fn remove_goal(&mut self, ix: i64, iy: i64) -> bool {
        let Some(node) = self.grid.get_node(ix, iy) else {
            return false;
        };
        self.algorithm.remove_goal(node);
        true
    }

    pub fn remove_all_goals(&mut self) {
        self.algorithm.remove_all_goals();
    }

    pub fn compute_one(&mut self, slack: f64) {
        self.algorithm.compute_one(&self.kernel, slack);
    }

    #[must_use]
    pub fn have_work(&self) -> bool {
        self.algorithm.have_work()
    }

    #[must_use]
    pub fn get_value(&self, ix: i64, iy: i64) -> Option<f64> {
        self.grid.get_node(ix, iy).map(|node| self.algorithm.value(node))
    }

    #[must_use]
    pub fn get_lowest_inconsistent_value(&self) -> Option<f64> {
        self.algorithm.min_queue_key()
    }

    /// Classify `(ix, iy)` per the rules in §4.7: out-of-grid and goal
    /// status are checked first, then obstacle meta, then position
    /// relative to the current queue's key range.
    #[must_use]
    pub fn get_status(&self, ix: i64, iy: i64) -> Status {
        let Some(node) = self.grid.get_node(ix, iy) else {
            return Status::OutOfGrid;
        };
        let flag = self.algorithm.flag(node);
        if flag.is_goal() {
            return Status::Goal;
        }
        if flag.on_queue() {
            return Status::Wavefront;
        }
        if approx_eq(self.algorithm.meta(node), self.kernel.obstacle_meta()) {
            return Status::Obstacle;
        }

        let value = self.algorithm.value(node);
        match (self.algorithm.min_queue_key(), self.algorithm.max_queue_key()) {
            (Some(min_key), _) if value < min_key => Status::Upwind,
            (_, Some(max_key)) if value >= max_key => Status::Downwind,
            (None, None) => Status::Upwind,
            _ => Status::Wavefront,
        }
    }

    /// Trace the carrot from world-space `(x, y)` against the scaled
    /// gradient until `distance` has been travelled or the value drops
    /// below `stepsize`, bounded by `max_steps`. Return codes: `0`
    /// target reached, `1` step/distance budget exhausted, `-1` starting
    /// cell outside the grid, `-2` gradient failure at the start, `-3` a
    /// step left the grid, `-4` gradient failure at the final point.
    #[must_use]
    pub fn trace_carrot(
        &self,
        x: f64,
        y: f64,
        distance: f64,
        stepsize: f64,
        max_steps: u32,
    ) -> CarrotTrace {
        let mut entries = Vec::new();
        let (start_ix, start_iy) = self.grid.nearest_index(x, y);
        if self.grid.get_node(start_ix, start_iy).is_none() {
            return CarrotTrace { entries, code: -1 };
        }

        let mut cur_x = x;
        let mut cur_y = y;
        let mut travelled = 0.0;

        for step in 0..max_steps {
            let (ix, iy) = self.grid.nearest_index(cur_x, cur_y);
            let Some(node) = self.grid.get_node(ix, iy) else {
                return CarrotTrace { entries, code: -3 };
            };
            let value = self.algorithm.value(node);
            if value < stepsize {
                return CarrotTrace { entries, code: 0 };
            }

            let scaled = self
                .grid
                .compute_stable_scaled_gradient(&self.algorithm, ix, iy, stepsize);
            if scaled.status == ScaledGradientStatus::Incomplete {
                let code = if step == 0 { -2 } else { -4 };
                return CarrotTrace { entries, code };
            }

            entries.push(TraceEntry {
                x: cur_x,
                y: cur_y,
                dx: scaled.dx,
                dy: scaled.dy,
                value,
                heuristic: scaled.status == ScaledGradientStatus::Heuristic,
            });

            cur_x -= scaled.dx;
            cur_y -= scaled.dy;
            travelled += stepsize;
            if travelled >= distance {
                return CarrotTrace { entries, code: 1 };
            }
        }

        CarrotTrace { entries, code: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_facade(kernel: &str) -> Facade {
        let mut facade = Facade::new(Neighborhood::Four, kernel, 1.0).unwrap();
        facade.add_range(0, 5, 0, 3, 1.0);
        facade.add_goal(0, 0, 0.0);
        while facade.have_work() {
            facade.compute_one(0.0);
        }
        facade
    }

    #[test]
    fn nf1_scenario_matches_hop_distance() {
        let facade = uniform_facade("nf1");
        for ix in 0..5 {
            for iy in 0..3 {
                assert_eq!(facade.get_value(ix, iy), Some((ix + iy) as f64));
            }
        }
    }

    #[test]
    fn status_reports_goal() {
        let mut facade = Facade::new(Neighborhood::Four, "nf1", 1.0).unwrap();
        facade.add_range(0, 5, 0, 3, 1.0);
        facade.add_goal(0, 0, 0.0);
        facade.compute_one(0.0);
        assert_eq!(facade.get_status(0, 0), Status::Goal);
    }

    #[test]
    fn out_of_grid_status() {
        let facade = Facade::new(Neighborhood::Four, "nf1", 1.0).unwrap();
        assert_eq!(facade.get_status(0, 0), Status::OutOfGrid);
    }

    #[test]
    fn carrot_reaches_goal_region() {
        let facade = uniform_facade("lsm");
        let trace = facade.trace_carrot(4.0, 2.0, 10.0, 0.5, 40);
        assert!(trace.code == 0 || trace.code == 1);
        assert!(trace.entries.iter().all(|e| !e.heuristic) || trace.code == 1);
    }
}
