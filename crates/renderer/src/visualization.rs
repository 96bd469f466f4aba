//! Building renderers from a [`VisualizationConfig`].

use crate::choropleth::ChoroplethRenderer;
use crate::classify::Classifier;
use crate::colorize::Colorizer;
use crate::interpolate::Interpolator;
use crate::tile::TileRenderer;
use grid_common::color::normalize_colors;
use grid_common::{ColorParser, ColorizerKind, Grid, VisualizationConfig, VizResult};
use tracing::debug;

/// Validate `config`, classify `grid` and bind the result to a tile renderer.
///
/// The dot colorizer works on normalized density and skips classification.
pub fn build_tile_renderer<'g>(
    grid: &'g Grid,
    config: &VisualizationConfig,
    parser: &dyn ColorParser,
) -> VizResult<TileRenderer<'g>> {
    config.validate()?;

    let colorizer = if config.colorizer == ColorizerKind::Dot {
        Colorizer::dot()
    } else {
        let classifier = Classifier::from_config(&config.classifier)?;
        let breaks = classifier.classify(grid, config.class_count())?;
        Colorizer::from_specs(config.colorizer, breaks, &config.colors, parser)?
    };
    let interpolator = config.interpolator.map(Interpolator::from);

    debug!(
        colorizer = ?config.colorizer,
        interpolator = ?interpolator,
        "Built tile renderer"
    );
    Ok(TileRenderer::new(grid, interpolator, colorizer))
}

/// Validate `config` and build a choropleth renderer for `grid`.
pub fn build_choropleth<'g>(
    grid: &'g Grid,
    config: &VisualizationConfig,
    parser: &dyn ColorParser,
) -> VizResult<ChoroplethRenderer<'g>> {
    config.validate()?;

    let classifier = Classifier::from_config(&config.classifier)?;
    let breaks = classifier.classify(grid, config.class_count())?;
    let colors = normalize_colors(&config.colors, parser)?;
    let renderer = ChoroplethRenderer::new(grid, breaks, colors)?;

    Ok(match config.label_zoom {
        Some(zoom) => renderer.with_labels(zoom),
        None => renderer,
    })
}
