use super::Patch;
use grid_common::Grid;

/// A line over [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub intercept: f64,
    pub rise: f64,
}

impl Line {
    /// The line from `start` at 0 to `end` at 1.
    pub fn through(start: f64, end: f64) -> Self {
        Self {
            intercept: start,
            rise: end - start,
        }
    }

    #[inline]
    pub fn at(&self, fraction: f64) -> f64 {
        self.intercept + self.rise * fraction
    }
}

/// Lines down the left and right edges of the 2×2 box east and south of
/// `(gx, gy)`. Cells past the grid read 0, on every side.
pub(super) fn patch(grid: &Grid, gx: i64, gy: i64) -> Patch {
    let (x1, y1) = (gx + 1, gy + 1);

    Patch::Bilinear {
        left: Line::through(grid.value(gx, gy), grid.value(gx, y1)),
        right: Line::through(grid.value(x1, gy), grid.value(x1, y1)),
    }
}
