//! Reproducible sampling of grid values.

use grid_common::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest number of values any classifier looks at.
pub const SAMPLE_SIZE: usize = 10_000;

/// Generator seeded from the grid's west, north, width and height.
pub fn sampling_rng(grid: &Grid) -> StdRng {
    StdRng::seed_from_u64(grid.sampling_seed())
}

/// Copy of `values` when shorter than [`SAMPLE_SIZE`], otherwise
/// `SAMPLE_SIZE` values drawn uniformly with replacement.
pub fn sample_values<R: Rng + ?Sized>(values: &[i32], rng: &mut R) -> Vec<i32> {
    if values.len() < SAMPLE_SIZE {
        return values.to_vec();
    }
    (0..SAMPLE_SIZE)
        .map(|_| values[rng.gen_range(0..values.len())])
        .collect()
}
