//! Resampling a coarse grid at fractional positions inside a cell.
//!
//! An interpolator builds a [`Patch`] for one grid cell. The patch is asked
//! for a [`Row`] at a fractional y, and the row for a value at a fractional
//! x, so the work shared by a row of tile pixels is done once per row.
//!
//! All interpolators except nearest neighbor treat a cell's value as sitting
//! at the cell's center, declared through [`Interpolator::grid_offset`]; the
//! patch for cell `(gx, gy)` then spans from its center to the center of
//! `(gx + 1, gy + 1)`.

mod bicubic;
mod bilinear;
mod spline;

pub use bicubic::Cubic;
pub use bilinear::Line;

use grid_common::{Grid, InterpolatorKind};

/// Interpolation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interpolator {
    #[default]
    Nearest,
    Bilinear,
    /// Cubic Hermite through a 4×4 neighborhood
    Bicubic,
    /// Constrained cubic spline through a 4×4 neighborhood; never overshoots
    Spline,
}

impl Interpolator {
    /// Cells of margin needed around a tile footprint: 0.5 for
    /// center-sampled interpolators, 0 for nearest neighbor.
    pub fn grid_offset(self) -> f64 {
        match self {
            Interpolator::Nearest => 0.0,
            _ => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Interpolator::Nearest => "nearest",
            Interpolator::Bilinear => "bilinear",
            Interpolator::Bicubic => "bicubic",
            Interpolator::Spline => "spline",
        }
    }

    /// Fit a patch for cell `(gx, gy)`. Any cell index is accepted; cells off
    /// the grid read as 0.
    pub fn patch(self, grid: &Grid, gx: i64, gy: i64) -> Patch {
        match self {
            Interpolator::Nearest => Patch::Constant(grid.value(gx, gy)),
            Interpolator::Bilinear => bilinear::patch(grid, gx, gy),
            Interpolator::Bicubic => Patch::Bicubic(fit_columns(grid, gx, gy, Cubic::hermite)),
            Interpolator::Spline => Patch::Spline(fit_columns(grid, gx, gy, Cubic::constrained)),
        }
    }

    /// One-off evaluation; prefer [`patch`](Self::patch) in loops.
    pub fn interpolate(self, grid: &Grid, gx: i64, gy: i64, y_fraction: f64, x_fraction: f64) -> f64 {
        self.patch(grid, gx, gy).row(y_fraction).value(x_fraction)
    }
}

impl From<InterpolatorKind> for Interpolator {
    fn from(kind: InterpolatorKind) -> Self {
        match kind {
            InterpolatorKind::Nearest => Interpolator::Nearest,
            InterpolatorKind::Bilinear => Interpolator::Bilinear,
            InterpolatorKind::Bicubic => Interpolator::Bicubic,
            InterpolatorKind::Spline => Interpolator::Spline,
        }
    }
}

/// Curves pre-fit through the columns of one cell's neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Patch {
    Constant(f64),
    Bilinear { left: Line, right: Line },
    Bicubic([Cubic; 4]),
    Spline([Cubic; 4]),
}

impl Patch {
    /// The curve along the row at `y_fraction` within the patch.
    pub fn row(&self, y_fraction: f64) -> Row {
        match self {
            Patch::Constant(z) => Row::Constant(*z),
            Patch::Bilinear { left, right } => {
                Row::Linear(Line::through(left.at(y_fraction), right.at(y_fraction)))
            }
            Patch::Bicubic(columns) => {
                let [a, b, c, d] = columns.map(|col| col.at(y_fraction));
                Row::Cubic(Cubic::hermite(a, b, c, d))
            }
            Patch::Spline(columns) => {
                let [a, b, c, d] = columns.map(|col| col.at(y_fraction));
                Row::Cubic(Cubic::constrained(a, b, c, d))
            }
        }
    }
}

/// One row of a patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Row {
    Constant(f64),
    Linear(Line),
    Cubic(Cubic),
}

impl Row {
    #[inline]
    pub fn value(&self, x_fraction: f64) -> f64 {
        match self {
            Row::Constant(z) => *z,
            Row::Linear(line) => line.at(x_fraction),
            Row::Cubic(cubic) => cubic.at(x_fraction),
        }
    }
}

/// Indices of the four samples `[i - 1, i, i + 1, i + 2]` along an axis of
/// `len` cells.
///
/// The inner pair is never moved, so off-grid samples read 0 and adjacent
/// patches meet at the same values on every side of the grid. An outer
/// sample that falls off the grid next to an on-grid inner sample repeats
/// that edge cell, flattening the slope at the edge instead of pulling it
/// toward 0.
fn axis_samples(i: i64, len: usize) -> [i64; 4] {
    let on_grid = |j: i64| (0..len as i64).contains(&j);
    let before = if !on_grid(i - 1) && on_grid(i) { i } else { i - 1 };
    let after = if !on_grid(i + 2) && on_grid(i + 1) { i + 1 } else { i + 2 };
    [before, i, i + 1, after]
}

/// Values of the 4×4 neighborhood around `(gx, gy)`, indexed `[x][y]`,
/// spanning one cell before to two cells after.
fn neighborhood(grid: &Grid, gx: i64, gy: i64) -> [[f64; 4]; 4] {
    let xs = axis_samples(gx, grid.width);
    let ys = axis_samples(gy, grid.height);
    xs.map(|x| ys.map(|y| grid.value(x, y)))
}

fn fit_columns(grid: &Grid, gx: i64, gy: i64, fit: fn(f64, f64, f64, f64) -> Cubic) -> [Cubic; 4] {
    neighborhood(grid, gx, gy).map(|[a, b, c, d]| fit(a, b, c, d))
}
