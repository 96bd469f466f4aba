//! Mapping interpolated values to RGBA colors.
//!
//! Colors are normalized once when a [`Colorizer`] is built. Per-pixel
//! lookups never fail: a value above the last break lands in the last class,
//! and a class with no color (or an empty break list) yields
//! [`WARNING_COLOR`].

mod dither;
mod dot;
mod gradient;
mod stepped;

pub use dot::{DOT_COLOR, DOT_WARNING_COLOR};

use grid_common::color::normalize_colors;
use grid_common::{ColorParser, ColorSpec, ColorizerKind, Rgba, VizError, VizResult, WARNING_COLOR};
use rand::Rng;
use tracing::warn;

/// Index of the class containing `value`.
///
/// `breaks[i]` is the inclusive upper bound of class `i`; values above the
/// last break belong to the last class. Returns 0 for an empty break list.
#[inline]
pub fn class_index(value: f64, breaks: &[f64]) -> usize {
    let mut idx = 0;
    while idx + 1 < breaks.len() && breaks[idx] < value {
        idx += 1;
    }
    idx
}

/// A value-to-color function.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorizer {
    kind: ColorizerKind,
    breaks: Vec<f64>,
    colors: Vec<Rgba>,
}

impl Colorizer {
    /// Build from normalized colors.
    ///
    /// Every kind except [`ColorizerKind::Dot`] needs at least one color.
    pub fn new(kind: ColorizerKind, breaks: Vec<f64>, colors: Vec<Rgba>) -> VizResult<Self> {
        if kind != ColorizerKind::Dot {
            if colors.is_empty() {
                return Err(VizError::EmptyColors);
            }
            if colors.len() < breaks.len() {
                warn!(
                    colors = colors.len(),
                    classes = breaks.len(),
                    "Fewer colors than classes, upper classes will use the warning color"
                );
            }
        }
        Ok(Self {
            kind,
            breaks,
            colors,
        })
    }

    /// Build from color specifications, normalizing each once.
    pub fn from_specs(
        kind: ColorizerKind,
        breaks: Vec<f64>,
        specs: &[ColorSpec],
        parser: &dyn ColorParser,
    ) -> VizResult<Self> {
        Self::new(kind, breaks, normalize_colors(specs, parser)?)
    }

    pub fn stepped(breaks: Vec<f64>, colors: Vec<Rgba>) -> VizResult<Self> {
        Self::new(ColorizerKind::Stepped, breaks, colors)
    }

    pub fn gradient(breaks: Vec<f64>, colors: Vec<Rgba>) -> VizResult<Self> {
        Self::new(ColorizerKind::Gradient, breaks, colors)
    }

    pub fn dithered(breaks: Vec<f64>, colors: Vec<Rgba>) -> VizResult<Self> {
        Self::new(ColorizerKind::Dithered, breaks, colors)
    }

    pub fn dot() -> Self {
        Self {
            kind: ColorizerKind::Dot,
            breaks: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn kind(&self) -> ColorizerKind {
        self.kind
    }

    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Whether input must be divided by the renderer's dilution factor to
    /// land in [0, 1].
    pub fn normalize(&self) -> bool {
        self.kind == ColorizerKind::Dot
    }

    /// Color for `value`. Randomized kinds draw from `rng`.
    #[inline]
    pub fn color<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> Rgba {
        match self.kind {
            ColorizerKind::Stepped => stepped::color(&self.breaks, &self.colors, value),
            ColorizerKind::Gradient => gradient::color(&self.breaks, &self.colors, value),
            ColorizerKind::Dot => dot::color(value, rng),
            ColorizerKind::Dithered => dither::color(&self.breaks, &self.colors, value, rng),
        }
    }
}

/// Color of the class containing `value`, clamping to the last break.
fn class_color(breaks: &[f64], colors: &[Rgba], value: f64) -> Option<(usize, f64, Rgba)> {
    let top = *breaks.last()?;
    // `min` also maps NaN to the last break.
    let value = value.min(top);
    let idx = class_index(value, breaks);
    colors.get(idx).map(|c| (idx, value, *c))
}

fn or_warning(color: Option<Rgba>) -> Rgba {
    color.unwrap_or(WARNING_COLOR)
}
