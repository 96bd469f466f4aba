//! Source grids: rectangular integer counts anchored in Mercator pixel space.

use crate::error::{VizError, VizResult};
use serde::{Deserialize, Serialize};

/// A rectangular grid of integer counts at a native zoom level.
///
/// `west`/`north` are the grid origin in Mercator tile-pixel units at
/// `zoom`, so cell `(x, y)` covers world pixel `(west + x, north + y)` at the
/// native zoom. The renderer only ever borrows a grid; it is never mutated
/// during a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// West edge in world pixels at the native zoom
    pub west: i64,
    /// North edge in world pixels at the native zoom
    pub north: i64,
    /// Number of cells in X
    pub width: usize,
    /// Number of cells in Y
    pub height: usize,
    /// Native zoom level
    pub zoom: u32,
    /// Smallest value in `data`
    pub min: f64,
    /// Largest value in `data`
    pub max: f64,
    /// Row-major cell values, `width * height` long
    pub data: Vec<i32>,
}

impl Grid {
    /// Create a grid, computing `min`/`max` from the data.
    pub fn new(
        west: i64,
        north: i64,
        width: usize,
        height: usize,
        zoom: u32,
        data: Vec<i32>,
    ) -> VizResult<Self> {
        if data.len() != width * height {
            return Err(VizError::invalid_grid(format!(
                "expected {}x{} = {} values, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }

        let (min, max) = match (data.iter().min(), data.iter().max()) {
            (Some(min), Some(max)) => (*min as f64, *max as f64),
            _ => (0.0, 0.0),
        };

        Ok(Self {
            west,
            north,
            width,
            height,
            zoom,
            min,
            max,
            data,
        })
    }

    /// Replace the precomputed extrema.
    pub fn with_extrema(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `(x, y)` is a cell of this grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Value of cell `(x, y)`, or 0 for any coordinate outside the grid.
    #[inline]
    pub fn value(&self, x: i64, y: i64) -> f64 {
        if !self.contains(x, y) {
            return 0.0;
        }
        let idx = y as usize * self.width + x as usize;
        self.data.get(idx).map_or(0.0, |v| *v as f64)
    }

    /// Seed for reproducible sampling, derived from the grid's spatial
    /// identity (west, north, width, height).
    pub fn sampling_seed(&self) -> u64 {
        [
            self.west as u64,
            self.north as u64,
            self.width as u64,
            self.height as u64,
        ]
        .iter()
        .fold(0xcbf2_9ce4_8422_2325, |hash, part| {
            (hash ^ part).wrapping_mul(0x0000_0100_0000_01b3)
        })
    }
}
