//! Textual diagnostics: unstable, debugging-only ASCII dumps of solver
//! state. Used by tests and by any caller that wants to eyeball a grid
//! without standing up a renderer.

use std::fmt::Write as _;

use crate::facade::Facade;

/// Dump every cell in `[x_begin, x_end) x [y_begin, y_end)` as a block of
/// `(meta, value, rhs, flag, vertex-id, (ix,iy))`, one line per cell, row
/// by row with `iy` ascending.
#[must_use]
pub fn dump_cells(facade: &Facade, x_begin: i64, x_end: i64, y_begin: i64, y_end: i64) -> String {
    let mut out = String::new();
    for iy in y_begin..y_end {
        for ix in x_begin..x_end {
            match facade.grid().get_node(ix, iy) {
                None => {
                    let _ = writeln!(out, "({ix},{iy}) <empty>");
                }
                Some(node) => {
                    let algo = facade.algorithm();
                    let _ = writeln!(
                        out,
                        "({ix},{iy}) {node} meta={:.3} value={:.3} rhs={:.3} flag={:?}",
                        algo.meta(node),
                        algo.value(node),
                        algo.rhs(node),
                        algo.flag(node).kind(),
                    );
                }
            }
        }
    }
    out
}

/// A one-line summary of the priority queue's current key range.
#[must_use]
pub fn dump_queue_summary(facade: &Facade) -> String {
    match (
        facade.algorithm().min_queue_key(),
        facade.algorithm().max_queue_key(),
    ) {
        (Some(min), Some(max)) => format!("queue: min={min:.3} max={max:.3}"),
        _ => "queue: empty".to_string(),
    }
}

/// Raw three-column `(x, y, value)` gradient-plot format, grouped by
/// `x`-index with a blank line between groups, as `gnuplot`'s `splot`
/// expects for a grid of curves.
#[must_use]
pub fn dump_gradient_plot(facade: &Facade, x_begin: i64, x_end: i64, y_begin: i64, y_end: i64) -> String {
    let mut out = String::new();
    for ix in x_begin..x_end {
        for iy in y_begin..y_end {
            if let Some(value) = facade.get_value(ix, iy) {
                let _ = writeln!(out, "{ix} {iy} {value:.6}");
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::Neighborhood;

    #[test]
    fn dump_cells_reports_empty_and_populated_cells() {
        let mut facade = Facade::new(Neighborhood::Four, "nf1", 1.0).unwrap();
        facade.add_node(0, 0, 0.0);
        facade.add_goal(0, 0, 0.0);
        let text = dump_cells(&facade, 0, 2, 0, 1);
        assert!(text.contains("(0,0)"));
        assert!(text.contains("(1,0) <empty>"));
    }

    #[test]
    fn gradient_plot_groups_have_blank_separators() {
        let mut facade = Facade::new(Neighborhood::Four, "nf1", 1.0).unwrap();
        facade.add_range(0, 2, 0, 2, 0.0);
        let text = dump_gradient_plot(&facade, 0, 2, 0, 2);
        assert!(text.contains("\n\n"));
    }
}
