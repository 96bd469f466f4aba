//! Interpolated tile rendering.
//!
//! For one 256×256 map tile, every grid cell overlapping the tile (plus the
//! interpolator's margin) gets one [`Patch`](crate::interpolate::Patch).
//! The patch is evaluated for each tile pixel under the cell and the value
//! is colorized straight into the pixel buffer.

use crate::colorize::Colorizer;
use crate::interpolate::Interpolator;
use crate::sink::{PixelBuffer, TileSink};
use crate::stats::trimmed_max;
use grid_common::{Grid, TileCoord, TILE_SIZE};
use rand::Rng;
use tracing::debug;

/// At or below this zoom difference a cell covers at most 2×2 pixels and
/// nearest neighbor is used.
pub const MIN_INTERPOLATION_ZOOM_DIFF: i32 = 1;

/// Above this zoom difference a cell spans whole tiles and nearest neighbor
/// is used.
pub const MAX_INTERPOLATION_ZOOM_DIFF: i32 = 8;

/// The interpolator actually applied at `zoom_diff`.
pub fn effective_interpolator(configured: Option<Interpolator>, zoom_diff: i32) -> Interpolator {
    match configured {
        Some(interpolator)
            if zoom_diff > MIN_INTERPOLATION_ZOOM_DIFF
                && zoom_diff <= MAX_INTERPOLATION_ZOOM_DIFF =>
        {
            interpolator
        }
        _ => Interpolator::Nearest,
    }
}

/// Divisor applied to values before a normalizing colorizer.
///
/// Never below the number of tile pixels per grid cell, so one lit pixel
/// always stands for at least one counted object.
pub fn dilution_factor(trimmed_max: f64, zoom_diff: i32) -> f64 {
    let cell_px = 2f64.powi(zoom_diff);
    trimmed_max.max(cell_px * cell_px)
}

/// A grid bound to an interpolator and a colorizer, ready to draw tiles.
#[derive(Debug, Clone)]
pub struct TileRenderer<'g> {
    grid: &'g Grid,
    interpolator: Option<Interpolator>,
    colorizer: Colorizer,
    trimmed_max: f64,
}

impl<'g> TileRenderer<'g> {
    /// Bind a grid. The trimmed maximum is only computed when the colorizer
    /// needs normalized input.
    pub fn new(grid: &'g Grid, interpolator: Option<Interpolator>, colorizer: Colorizer) -> Self {
        let trimmed_max = if colorizer.normalize() {
            trimmed_max(grid)
        } else {
            0.0
        };
        Self {
            grid,
            interpolator,
            colorizer,
            trimmed_max,
        }
    }

    /// Override the dilution base, e.g. to share one across several grids.
    pub fn with_trimmed_max(mut self, trimmed_max: f64) -> Self {
        self.trimmed_max = trimmed_max;
        self
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn interpolator(&self) -> Option<Interpolator> {
        self.interpolator
    }

    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    pub fn trimmed_max(&self) -> f64 {
        self.trimmed_max
    }

    /// Draw one tile into a fresh buffer.
    pub fn render<R: Rng + ?Sized>(&self, coord: TileCoord, rng: &mut R) -> PixelBuffer {
        draw(
            self.grid,
            self.interpolator,
            &self.colorizer,
            self.trimmed_max,
            coord,
            rng,
        )
    }

    /// Draw one tile and hand it to `sink`.
    pub fn render_tile<S, R>(&self, sink: &mut S, coord: TileCoord, rng: &mut R)
    where
        S: TileSink + ?Sized,
        R: Rng + ?Sized,
    {
        sink.put_pixels(&self.render(coord, rng));
    }
}

/// Draw one tile of `grid` at `coord` into `sink`.
///
/// Computes the trimmed maximum on every call when the colorizer normalizes;
/// use [`TileRenderer`] to draw many tiles of the same grid.
pub fn render_tile<S, R>(
    sink: &mut S,
    grid: &Grid,
    interpolator: Option<Interpolator>,
    colorizer: &Colorizer,
    coord: TileCoord,
    rng: &mut R,
) where
    S: TileSink + ?Sized,
    R: Rng + ?Sized,
{
    let trimmed = if colorizer.normalize() {
        trimmed_max(grid)
    } else {
        0.0
    };
    sink.put_pixels(&draw(grid, interpolator, colorizer, trimmed, coord, rng));
}

fn draw<R: Rng + ?Sized>(
    grid: &Grid,
    interpolator: Option<Interpolator>,
    colorizer: &Colorizer,
    trimmed_max: f64,
    coord: TileCoord,
    rng: &mut R,
) -> PixelBuffer {
    let mut buffer = PixelBuffer::new();
    let size = TILE_SIZE as i64;

    let (pixel_x, pixel_y) = coord.pixel_origin();
    let zoom_diff = coord.z as i32 - grid.zoom as i32;
    let cell_px = 2f64.powi(zoom_diff);
    let tile_cells = TILE_SIZE as f64 / cell_px;

    let interpolator = effective_interpolator(interpolator, zoom_diff);
    let offset = interpolator.grid_offset();
    let normalize = colorizer.normalize();
    let dilution = dilution_factor(trimmed_max, zoom_diff);

    debug!(
        tile = %coord.cache_key(),
        interpolator = interpolator.name(),
        zoom_diff,
        dilution,
        "Rendering tile"
    );

    // Cells overlapping the tile, widened by the interpolator margin.
    let gx_min = (pixel_x as f64 / cell_px - grid.west as f64 - offset).floor();
    let gy_min = (pixel_y as f64 / cell_px - grid.north as f64 - offset).floor();
    let gx_max = (gx_min + tile_cells + offset).ceil() as i64;
    let gy_max = (gy_min + tile_cells + offset).ceil() as i64;
    let (gx_min, gy_min) = (gx_min as i64, gy_min as i64);

    // Zoomed out, several cells share a pixel; visit one per pixel.
    let step = if zoom_diff < 0 {
        2f64.powi(-zoom_diff).min(i64::MAX as f64) as usize
    } else {
        1
    };

    // Tile pixel span of the cell `g - g_min` cells into the visited range.
    let span = |g: i64, g_min: i64| {
        let start = (((g - g_min) as f64 - offset) * cell_px) as i64;
        let end = (start as f64 + cell_px).ceil() as i64;
        (start, start.max(0)..end.min(size))
    };

    for gx in (gx_min..gx_max).step_by(step) {
        let (tx_min, xs) = span(gx, gx_min);
        if xs.is_empty() {
            continue;
        }
        for gy in (gy_min..gy_max).step_by(step) {
            let (ty_min, ys) = span(gy, gy_min);
            if ys.is_empty() {
                continue;
            }

            let patch = interpolator.patch(grid, gx, gy);
            for ty in ys {
                let row = patch.row((ty - ty_min) as f64 / cell_px);
                for tx in xs.clone() {
                    let mut value = row.value((tx - tx_min) as f64 / cell_px);
                    if normalize {
                        value /= dilution;
                    }
                    let color = colorizer.color(value, rng);
                    if color[3] != 0 {
                        buffer.put(tx as usize, ty as usize, color);
                    }
                }
            }
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_interpolator_thresholds() {
        let bicubic = Some(Interpolator::Bicubic);
        assert_eq!(effective_interpolator(None, 4), Interpolator::Nearest);
        assert_eq!(effective_interpolator(bicubic, 1), Interpolator::Nearest);
        assert_eq!(effective_interpolator(bicubic, 2), Interpolator::Bicubic);
        assert_eq!(effective_interpolator(bicubic, 8), Interpolator::Bicubic);
        assert_eq!(effective_interpolator(bicubic, 9), Interpolator::Nearest);
        assert_eq!(effective_interpolator(bicubic, -3), Interpolator::Nearest);
    }

    #[test]
    fn test_dilution_floor() {
        assert_eq!(dilution_factor(500.0, 2), 500.0);
        // 2^5 pixels per cell side
        assert_eq!(dilution_factor(500.0, 5), 1024.0);
        assert_eq!(dilution_factor(0.0, -1), 0.25);
    }
}
