use super::sample::sample_values;
use grid_common::Grid;
use rand::Rng;

/// Every `len / n_breaks`-th value of the sorted sample. The final break is
/// always `grid.max` so the top value is never cut off.
pub(super) fn classify<R: Rng + ?Sized>(
    grid: &Grid,
    n_breaks: usize,
    no_data: Option<i32>,
    rng: &mut R,
) -> Vec<f64> {
    let mut sample = sample_values(&grid.data, rng);
    if let Some(no_data) = no_data {
        sample.retain(|v| *v != no_data);
    }
    sample.sort_unstable();

    let step = sample.len() / n_breaks;
    let mut breaks: Vec<f64> = (1..n_breaks)
        .map(|i| sample.get(step * i).map_or(grid.max, |v| *v as f64))
        .collect();
    breaks.push(grid.max);
    breaks
}
