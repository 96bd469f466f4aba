use super::{class_color, or_warning};
use grid_common::Rgba;

pub(super) fn color(breaks: &[f64], colors: &[Rgba], value: f64) -> Rgba {
    or_warning(class_color(breaks, colors, value).map(|(_, _, c)| c))
}
