//! Footprint shapes: a [`Sprite`] is a fixed `(dx, dy)` offset list
//! (the same idea as a grid's neighborhood offsets), and a [`Region`] is
//! a `Sprite` anchored at a cell.

/// A fixed footprint shape, relative to an unspecified reference cell.
/// Immutable after construction and freely `Clone`able; this crate is
/// single-threaded throughout so `Rc`/`Arc` would be unwarranted.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    offsets: Vec<(i64, i64)>,
}

impl Sprite {
    #[must_use]
    pub fn new(offsets: Vec<(i64, i64)>) -> Self {
        Self { offsets }
    }

    /// A filled disk of the given `radius` in grid cells.
    #[must_use]
    pub fn disk(radius: i64) -> Self {
        let mut offsets = Vec::new();
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    offsets.push((dx, dy));
                }
            }
        }
        Self { offsets }
    }

    #[must_use]
    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }
}

/// A [`Sprite`] anchored at a specific `(ix, iy)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    anchor: (i64, i64),
    sprite: Sprite,
}

impl Region {
    #[must_use]
    pub fn new(anchor: (i64, i64), sprite: Sprite) -> Self {
        Self { anchor, sprite }
    }

    #[must_use]
    pub fn anchor(&self) -> (i64, i64) {
        self.anchor
    }

    #[must_use]
    pub fn offsets(&self) -> &[(i64, i64)] {
        self.sprite.offsets()
    }

    /// The absolute `(ix, iy)` cells covered by this region.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let (ax, ay) = self.anchor;
        self.sprite.offsets().iter().map(move |&(dx, dy)| (ax + dx, ay + dy))
    }
}
