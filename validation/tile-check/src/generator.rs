//! Tile coordinate selection.

use crate::config::{ScenarioConfig, TileSelection};
use grid_common::{Grid, TileCoord};
use rand::prelude::*;

/// Expands a scenario's tile selection into concrete coordinates.
pub struct TileGenerator {
    selection: TileSelection,
    rng: StdRng,
    max_tiles: usize,
}

impl TileGenerator {
    pub fn new(config: &ScenarioConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            selection: config.tiles.clone(),
            rng,
            max_tiles: config.max_tiles,
        }
    }

    /// Tiles to render for `grid`, at most `max_tiles` of them.
    pub fn tiles(&mut self, grid: &Grid) -> Vec<TileCoord> {
        let mut tiles = match &self.selection {
            TileSelection::Covering { zoom_diffs } => zoom_diffs
                .iter()
                .flat_map(|zd| TileCoord::covering(grid, zoom_at(grid, *zd)))
                .collect(),
            TileSelection::Random { zoom_diffs, count } => {
                let mut picked = Vec::new();
                for zd in zoom_diffs {
                    let candidates = TileCoord::covering(grid, zoom_at(grid, *zd));
                    picked.extend(candidates.choose_multiple(&mut self.rng, *count).copied());
                }
                picked
            }
            TileSelection::Fixed { tiles } => tiles
                .iter()
                .map(|(z, x, y)| TileCoord::new(*z, *x, *y))
                .collect(),
        };

        if tiles.len() > self.max_tiles {
            tracing::warn!(
                selected = tiles.len(),
                max_tiles = self.max_tiles,
                "Tile selection truncated"
            );
            tiles.truncate(self.max_tiles);
        }
        tiles
    }
}

fn zoom_at(grid: &Grid, zoom_diff: i32) -> u32 {
    (grid.zoom as i32 + zoom_diff).max(0) as u32
}
