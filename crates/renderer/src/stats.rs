//! Summary statistics over grid values.

use crate::classify::sample::sample_values;
use grid_common::Grid;
use rand::Rng;

/// Percentile of the distinct values used as the trimmed maximum.
pub const TRIM_PERCENTILE: f64 = 0.99;

/// The 99th percentile of the grid's distinct values, or 0 for an empty grid.
///
/// Density grids hold huge numbers of small counts. Taking the percentile
/// over distinct values rather than all cells keeps the result near the top
/// of the real range while dropping a handful of outliers.
pub fn trimmed_max(grid: &Grid) -> f64 {
    let mut distinct = grid.data.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let idx = (distinct.len() as f64 * TRIM_PERCENTILE) as usize;
    distinct.get(idx).map_or(0.0, |v| *v as f64)
}

/// Percentiles 0 through 100 of the positive values, sampled the same way
/// classifiers sample. Empty when the grid has no positive values.
pub fn percentiles<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Vec<f64> {
    let positive: Vec<i32> = grid.data.iter().copied().filter(|v| *v > 0).collect();
    let mut sample = sample_values(&positive, rng);
    if sample.is_empty() {
        return Vec::new();
    }
    sample.sort_unstable();

    let step = sample.len() as f64 / 100.0;
    let last = sample.len() - 1;
    (0..=100)
        .map(|p| sample[((step * p as f64) as usize).min(last)] as f64)
        .collect()
}
