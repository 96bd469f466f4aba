//! Slippy-map tile coordinates.

use crate::Grid;
use serde::{Deserialize, Serialize};

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: usize = 256;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Generate a cache key string.
    pub fn cache_key(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// World pixel of the tile's top-left corner at zoom `z`.
    pub fn pixel_origin(&self) -> (i64, i64) {
        (
            self.x as i64 * TILE_SIZE as i64,
            self.y as i64 * TILE_SIZE as i64,
        )
    }

    /// All tiles at zoom `z` that overlap `grid`, row by row.
    pub fn covering(grid: &Grid, z: u32) -> Vec<TileCoord> {
        let scale = 2f64.powi(z as i32 - grid.zoom as i32);
        let tile = TILE_SIZE as f64;
        let span = |start: i64, len: usize| {
            let first = (start as f64 * scale / tile).floor().max(0.0) as u32;
            let last = ((start + len as i64) as f64 * scale / tile).ceil().max(0.0) as u32;
            first..last
        };

        let xs = span(grid.west, grid.width);
        span(grid.north, grid.height)
            .flat_map(|y| xs.clone().map(move |x| TileCoord { z, x, y }))
            .collect()
    }
}
