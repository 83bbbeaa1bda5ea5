//! Grid connectivity as a finite, chosen-at-construction list of integer
//! offsets, plus the small pluggable coordinate transform hex grids need
//! for world-space geometry.

/// The connectivity pattern a [`crate::grid::Grid`] induces between
/// adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Axis-aligned 4-connectivity.
    Four,
    /// 4-connectivity plus the four diagonals.
    Eight,
    /// Hexagonal 6-connectivity on a row-offset (odd-q) hex grid.
    Six,
}

impl Neighborhood {
    /// `(dx, dy)` offsets to this cell's neighbors. For [`Self::Six`]
    /// the pattern depends on whether `iy` is even or odd, since
    /// alternating rows are horizontally offset by half a cell.
    #[must_use]
    pub fn offsets(self, iy: i64) -> &'static [(i64, i64)] {
        const FOUR: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        const EIGHT: [(i64, i64); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        const SIX_EVEN: [(i64, i64); 6] = [(1, 0), (-1, 0), (0, 1), (-1, 1), (0, -1), (-1, -1)];
        const SIX_ODD: [(i64, i64); 6] = [(1, 0), (-1, 0), (0, 1), (1, 1), (0, -1), (1, -1)];

        match self {
            Self::Four => &FOUR,
            Self::Eight => &EIGHT,
            Self::Six if iy.rem_euclid(2) == 0 => &SIX_EVEN,
            Self::Six => &SIX_ODD,
        }
    }

    #[must_use]
    pub fn is_hex(self) -> bool {
        matches!(self, Self::Six)
    }
}

/// World-space coordinate transform for hex grids: odd rows get a
/// half-cell x-offset and rows are spaced `√3/2` apart vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexTransform;

impl HexTransform {
    #[must_use]
    pub fn world_xy(ix: i64, iy: i64) -> (f64, f64) {
        let y = iy as f64 * (3.0_f64.sqrt() / 2.0);
        let x = ix as f64 + if iy.rem_euclid(2) != 0 { 0.5 } else { 0.0 };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_neighborhood_has_four_offsets_regardless_of_row() {
        assert_eq!(Neighborhood::Four.offsets(0).len(), 4);
        assert_eq!(Neighborhood::Four.offsets(1).len(), 4);
    }

    #[test]
    fn six_neighborhood_alternates_by_row_parity() {
        assert_ne!(
            Neighborhood::Six.offsets(0),
            Neighborhood::Six.offsets(1)
        );
    }

    #[test]
    fn hex_transform_shears_odd_rows() {
        let (x_even, _) = HexTransform::world_xy(0, 0);
        let (x_odd, _) = HexTransform::world_xy(0, 1);
        assert_eq!(x_even, 0.0);
        assert_eq!(x_odd, 0.5);
    }
}
