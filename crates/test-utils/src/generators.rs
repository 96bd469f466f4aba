//! Synthetic count grids.
//!
//! Each generator produces a [`Grid`] with a predictable distribution so
//! classifier breaks and rendered colors can be checked by hand.

use grid_common::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Zoom level of generated grids unless stated otherwise.
pub const MOCK_ZOOM: u32 = 9;

fn build(west: i64, north: i64, width: usize, height: usize, data: Vec<i32>) -> Grid {
    Grid::new(west, north, width, height, MOCK_ZOOM, data)
        .expect("generated data matches grid dimensions")
}

/// One row holding `0..=1000`, min 0 and max 1000.
///
/// # Example
///
/// ```
/// use test_utils::uniform_mock_grid;
///
/// let grid = uniform_mock_grid();
/// assert_eq!(grid.len(), 1001);
/// assert_eq!(grid.max, 1000.0);
/// ```
pub fn uniform_mock_grid() -> Grid {
    build(0, 0, 1001, 1, (0..=1000).collect())
}

/// A grid built from explicit values, laid out as a single row.
pub fn row_grid(values: &[i32]) -> Grid {
    build(0, 0, values.len(), 1, values.to_vec())
}

/// Values increasing by one in row-major order, starting at `start`.
///
/// Cell `(x, y)` holds `start + y * width + x`.
pub fn ramp_grid(width: usize, height: usize, start: i32) -> Grid {
    let data = (0..(width * height) as i32).map(|i| start + i).collect();
    build(0, 0, width, height, data)
}

/// `len` cells in one row, cell `i` holding `i % modulus + offset`.
///
/// `modulo_grid(10_000, 10, 0)` yields exactly 1000 copies of each of
/// `0..=9`.
pub fn modulo_grid(len: usize, modulus: i32, offset: i32) -> Grid {
    let data = (0..len as i32).map(|i| i % modulus + offset).collect();
    build(0, 0, len, 1, data)
}

/// Alternating `low`/`high` cells like a checkerboard.
pub fn checker_grid(width: usize, height: usize, low: i32, high: i32) -> Grid {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(if (x + y) % 2 == 0 { low } else { high });
        }
    }
    build(0, 0, width, height, data)
}

/// Every cell holds `value`.
pub fn constant_grid(width: usize, height: usize, value: i32) -> Grid {
    build(0, 0, width, height, vec![value; width * height])
}

/// A single density peak of height `peak` centered on the grid.
///
/// Most cells far from the center round down to zero, like counts of
/// people or jobs around a city center.
pub fn gaussian_density_grid(width: usize, height: usize, peak: f64) -> Grid {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let sigma = (width.min(height) as f64 / 6.0).max(1.0);

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let density = peak * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
            data.push(density.floor() as i32);
        }
    }
    build(0, 0, width, height, data)
}

/// Sparse random counts, reproducible for a given seed.
///
/// Roughly a quarter of the cells are non-zero, drawn uniformly from
/// `1..=max_count`.
pub fn random_count_grid(width: usize, height: usize, max_count: i32, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| {
            if rng.gen_ratio(1, 4) {
                rng.gen_range(1..=max_count.max(1))
            } else {
                0
            }
        })
        .collect();
    build(0, 0, width, height, data)
}

/// Move a generated grid to another position and zoom level.
pub fn positioned(grid: Grid, west: i64, north: i64, zoom: u32) -> Grid {
    Grid::new(west, north, grid.width, grid.height, zoom, grid.data)
        .expect("dimensions are unchanged")
}
