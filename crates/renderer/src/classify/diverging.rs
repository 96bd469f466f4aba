use super::Classifier;
use grid_common::{Grid, VizResult};
use rand::Rng;

/// Classify the values below and above `center` separately with `scheme`.
///
/// An even class count is reduced by one so the middle class straddles the
/// center. Each side gets `(n + 1) / 2` classes; the lower side drops its
/// top break, which would otherwise sit at the center.
pub(super) fn classify<R: Rng + ?Sized>(
    grid: &Grid,
    n_breaks: usize,
    scheme: &Classifier,
    center: f64,
    rng: &mut R,
) -> VizResult<Vec<f64>> {
    let n_breaks = if n_breaks % 2 == 0 { n_breaks - 1 } else { n_breaks };
    let per_side = (n_breaks + 1) / 2;

    let below = subset(grid, |v| v < center, grid.min, grid.max.min(center));
    let above = subset(grid, |v| v > center, grid.min.max(center), grid.max);

    let mut breaks = match below {
        Some(below) => {
            let mut lower = scheme.classify_with_rng(&below, per_side, rng)?;
            lower.truncate(per_side - 1);
            lower
        }
        None => vec![center; per_side - 1],
    };

    match above {
        Some(above) => breaks.extend(scheme.classify_with_rng(&above, per_side, rng)?),
        None => breaks.extend(std::iter::repeat(center).take(per_side)),
    }

    Ok(breaks)
}

/// Copy of the matching values as a one-row grid, or `None` if nothing matches.
fn subset(grid: &Grid, keep: impl Fn(f64) -> bool, min: f64, max: f64) -> Option<Grid> {
    let data: Vec<i32> = grid
        .data
        .iter()
        .copied()
        .filter(|v| keep(*v as f64))
        .collect();
    if data.is_empty() {
        return None;
    }

    let width = data.len();
    Grid::new(grid.west, grid.north, width, 1, grid.zoom, data)
        .ok()
        .map(|subset| subset.with_extrema(min, max))
}
