use super::class_color;
use grid_common::color::lerp;
use grid_common::{Rgba, WARNING_COLOR};

/// Blend from the previous class's color at `breaks[i - 1]` to this class's
/// color at `breaks[i]`. The first class is flat.
pub(super) fn color(breaks: &[f64], colors: &[Rgba], value: f64) -> Rgba {
    let Some((idx, value, upper)) = class_color(breaks, colors, value) else {
        return WARNING_COLOR;
    };
    if idx == 0 {
        return upper;
    }

    let (z0, z1) = (breaks[idx - 1], breaks[idx]);
    if z1 <= z0 {
        return upper;
    }
    lerp(colors[idx - 1], upper, (value - z0) / (z1 - z0))
}
