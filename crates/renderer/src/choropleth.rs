//! Discrete choropleth tiles.
//!
//! Each tile pixel is floored to the single grid cell under it and painted
//! with that cell's class color; there is no interpolation or blending.
//! Zoomed far enough in, each cell can also be labeled with its value and
//! grid coordinates.

use crate::classify::Classifier;
use crate::colorize::class_index;
use crate::sink::{CellLabel, PixelBuffer, TileSink};
use grid_common::color::normalize_colors;
use grid_common::{
    ColorSpec, Grid, HexColorParser, Rgba, TileCoord, VizError, VizResult, TILE_SIZE,
    WARNING_COLOR,
};

/// Five-class ColorBrewer blues.
pub const DEFAULT_COLORS: [&str; 5] = ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"];

/// Choropleth renderer for one grid.
#[derive(Debug, Clone)]
pub struct ChoroplethRenderer<'g> {
    grid: &'g Grid,
    breaks: Vec<f64>,
    colors: Vec<Rgba>,
    label_zoom: Option<u32>,
}

impl<'g> ChoroplethRenderer<'g> {
    /// Use explicit breaks, one color per class.
    pub fn new(grid: &'g Grid, breaks: Vec<f64>, colors: Vec<Rgba>) -> VizResult<Self> {
        if colors.is_empty() {
            return Err(VizError::EmptyColors);
        }
        Ok(Self {
            grid,
            breaks,
            colors,
            label_zoom: None,
        })
    }

    /// Classify the grid into one class per color.
    pub fn classified(
        grid: &'g Grid,
        classifier: &Classifier,
        colors: Vec<Rgba>,
    ) -> VizResult<Self> {
        let breaks = classifier.classify(grid, colors.len().max(1))?;
        Self::new(grid, breaks, colors)
    }

    /// Classify into the default five blues.
    pub fn with_default_colors(grid: &'g Grid, classifier: &Classifier) -> VizResult<Self> {
        let specs: Vec<ColorSpec> = DEFAULT_COLORS.iter().map(|c| ColorSpec::from(*c)).collect();
        Self::classified(grid, classifier, normalize_colors(&specs, &HexColorParser)?)
    }

    /// Label cells on tiles zoomed beyond `zoom`.
    pub fn with_labels(mut self, zoom: u32) -> Self {
        self.label_zoom = Some(zoom);
        self
    }

    /// Replace every color's alpha.
    pub fn with_opacity(mut self, alpha: u8) -> Self {
        for color in &mut self.colors {
            color[3] = alpha;
        }
        self
    }

    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    fn class_color(&self, value: f64) -> Rgba {
        if self.breaks.is_empty() {
            return WARNING_COLOR;
        }
        self.colors
            .get(class_index(value, &self.breaks))
            .copied()
            .unwrap_or(WARNING_COLOR)
    }

    /// Paint every pixel of the tile with its cell's class color.
    pub fn render(&self, coord: TileCoord) -> PixelBuffer {
        let mut buffer = PixelBuffer::new();
        let (pixel_x, pixel_y) = coord.pixel_origin();
        let zoom_factor = 2f64.powi(coord.z as i32 - self.grid.zoom as i32);

        let to_cell = |world: i64, origin: i64| (world as f64 / zoom_factor).floor() as i64 - origin;
        let gxs: Vec<i64> = (0..TILE_SIZE as i64)
            .map(|tx| to_cell(pixel_x + tx, self.grid.west))
            .collect();

        for ty in 0..TILE_SIZE {
            let gy = to_cell(pixel_y + ty as i64, self.grid.north);
            for (tx, gx) in gxs.iter().enumerate() {
                buffer.put(tx, ty, self.class_color(self.grid.value(*gx, gy)));
            }
        }
        buffer
    }

    /// Labels for the cells whose top-left corner falls inside this tile.
    ///
    /// Every cell's corner lies in exactly one tile, so across a zoom level
    /// each cell is labeled once. No labels are produced when cells are
    /// smaller than a pixel.
    pub fn labels(&self, coord: TileCoord) -> Vec<CellLabel> {
        match self.label_zoom {
            Some(zoom) if coord.z > zoom => {}
            _ => return Vec::new(),
        }
        let zoom_diff = coord.z as i64 - self.grid.zoom as i64;
        if !(0..=62 - 9).contains(&zoom_diff) {
            return Vec::new();
        }

        let cell_px = 1i64 << zoom_diff;
        let size = TILE_SIZE as i64;
        let (pixel_x, pixel_y) = coord.pixel_origin();
        let grid = self.grid;

        // Cells with a corner at world pixel c * cell_px inside [start, start + size).
        let cells = |start: i64, origin: i64, len: usize| {
            let first = ceil_div(start, cell_px) - origin;
            let last = ceil_div(start + size, cell_px) - origin;
            first.max(0)..last.min(len as i64)
        };

        let mut labels = Vec::new();
        for gy in cells(pixel_y, grid.north, grid.height) {
            for gx in cells(pixel_x, grid.west, grid.width) {
                let value = grid.value(gx, gy) as i32;
                labels.push(CellLabel {
                    text: format!("{}\n({}, {})", value, gx, gy),
                    value,
                    gx,
                    gy,
                    x: (gx + grid.west) * cell_px - pixel_x,
                    y: (gy + grid.north) * cell_px - pixel_y,
                });
            }
        }
        labels
    }

    /// Paint the tile into `sink`, then draw its labels.
    pub fn render_tile<S: TileSink + ?Sized>(&self, sink: &mut S, coord: TileCoord) {
        sink.put_pixels(&self.render(coord));
        for label in self.labels(coord) {
            sink.draw_label(&label);
        }
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}
