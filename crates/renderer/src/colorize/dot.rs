use grid_common::{Rgba, TRANSPARENT};
use rand::Rng;

pub const DOT_COLOR: Rgba = [0, 0, 0, 200];

/// Densities above 2 are almost certainly bad input.
pub const DOT_WARNING_COLOR: Rgba = [255, 0, 0, 200];

/// Light the pixel with probability `density`.
pub(super) fn color<R: Rng + ?Sized>(density: f64, rng: &mut R) -> Rgba {
    if density > 2.0 {
        return DOT_WARNING_COLOR;
    }
    if rng.gen::<f64>() < density {
        DOT_COLOR
    } else {
        TRANSPARENT
    }
}
