use super::ContinuousScale;
use grid_common::{Grid, VizError, VizResult};

/// `n_breaks` breaks evenly spaced in the scale's transformed space; the last
/// break is the top of the domain.
pub(super) fn classify(
    grid: &Grid,
    n_breaks: usize,
    scale: &ContinuousScale,
) -> VizResult<Vec<f64>> {
    let (lo, hi) = scale.domain.unwrap_or((grid.min, grid.max));
    let (t0, t1) = (scale.transform(lo), scale.transform(hi));

    if !(t0.is_finite() && t1.is_finite() && t1 > t0) {
        return Err(VizError::DegenerateDomain { min: lo, max: hi });
    }

    let span = t1 - t0;
    Ok((1..=n_breaks)
        .map(|b| scale.untransform(t0 + span * b as f64 / n_breaks as f64))
        .collect())
}
