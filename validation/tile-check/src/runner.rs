//! Scenario execution: build the grid and renderer, draw every selected
//! tile, encode it and collect timings.

use crate::config::{RendererKind, ScenarioConfig};
use crate::generator::TileGenerator;
use crate::metrics::{CheckResults, MetricsCollector};
use anyhow::Context;
use grid_common::{HexColorParser, TileCoord, TILE_SIZE};
use rayon::prelude::*;
use renderer::{
    build_choropleth, build_tile_renderer, load_font, png, ChoroplethRenderer, ImageSink,
    TileRenderer, TileSink,
};
use rusttype::Font;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Measurements for one tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    pub coord: TileCoord,
    /// One entry per repetition
    pub latencies_us: Vec<u64>,
    /// Encoded PNG size
    pub bytes: usize,
    pub opaque_pixels: usize,
    pub labels: usize,
}

enum Built<'g> {
    Tile(TileRenderer<'g>),
    Choropleth(ChoroplethRenderer<'g>),
}

impl Built<'_> {
    fn breaks(&self) -> Vec<f64> {
        match self {
            Built::Tile(r) => r.colorizer().breaks().to_vec(),
            Built::Choropleth(r) => r.breaks().to_vec(),
        }
    }

    fn draw<S: TileSink + ?Sized>(&self, sink: &mut S, coord: TileCoord) {
        match self {
            Built::Tile(r) => r.render_tile(sink, coord, &mut rand::thread_rng()),
            Built::Choropleth(r) => r.render_tile(sink, coord),
        }
    }
}

/// Runs one scenario.
pub struct TileRunner {
    config: ScenarioConfig,
}

impl TileRunner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Render every selected tile `repeat` times, writing the last render of
    /// each as `{z}_{x}_{y}.png` under `output` when given.
    pub fn run(&self, output: Option<&Path>) -> anyhow::Result<CheckResults> {
        let config = &self.config;
        let grid = config.grid.build()?;
        info!(
            scenario = %config.name,
            width = grid.width,
            height = grid.height,
            zoom = grid.zoom,
            min = grid.min,
            max = grid.max,
            "Built grid"
        );

        let built = match config.renderer {
            RendererKind::Tile => Built::Tile(
                build_tile_renderer(&grid, &config.visualization, &HexColorParser)
                    .context("failed to build tile renderer")?,
            ),
            RendererKind::Choropleth => Built::Choropleth(
                build_choropleth(&grid, &config.visualization, &HexColorParser)
                    .context("failed to build choropleth renderer")?,
            ),
        };
        let breaks = built.breaks();
        info!(renderer = %config.renderer, breaks = ?breaks, "Built renderer");

        let font = match &config.font {
            Some(path) => Some(
                load_font(path)
                    .with_context(|| format!("failed to load font {}", path.display()))?,
            ),
            None => None,
        };

        if let Some(dir) = output {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let tiles = TileGenerator::new(config).tiles(&grid);
        info!(tiles = tiles.len(), repeat = config.repeat, "Rendering tiles");

        let start = Instant::now();
        let results = tiles
            .par_iter()
            .map(|coord| self.render_one(&built, *coord, font.as_ref(), output))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let elapsed = start.elapsed();

        let mut metrics = MetricsCollector::new()?;
        for result in &results {
            metrics.record(result);
        }
        Ok(metrics.results(config.name.clone(), breaks, elapsed))
    }

    fn render_one(
        &self,
        built: &Built<'_>,
        coord: TileCoord,
        font: Option<&Font<'static>>,
        output: Option<&Path>,
    ) -> anyhow::Result<TileResult> {
        let mut latencies_us = Vec::with_capacity(self.config.repeat as usize);
        let mut last = None;

        for _ in 0..self.config.repeat {
            let mut sink = match font {
                Some(font) => ImageSink::new().with_font(font.clone()),
                None => ImageSink::new(),
            };
            let start = Instant::now();
            built.draw(&mut sink, coord);
            latencies_us.push(start.elapsed().as_micros() as u64);
            last = Some(sink);
        }
        let sink = last.context("repeat must be > 0")?;

        let image = sink.image();
        let encoded = png::encode_auto(image.as_raw(), TILE_SIZE, TILE_SIZE)
            .with_context(|| format!("failed to encode tile {}", coord.cache_key()))?;
        let opaque_pixels = image.pixels().filter(|px| px.0[3] != 0).count();

        if let Some(dir) = output {
            let path = dir.join(format!("{}_{}_{}.png", coord.z, coord.x, coord.y));
            std::fs::write(&path, &encoded)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        debug!(tile = %coord.cache_key(), bytes = encoded.len(), "Rendered tile");

        Ok(TileResult {
            coord,
            latencies_us,
            bytes: encoded.len(),
            opaque_pixels,
            labels: sink.labels().len(),
        })
    }
}
