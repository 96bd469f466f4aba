//! Tile rendering for gridded count data.
//!
//! A [`Grid`](grid_common::Grid) of integer counts is turned into 256×256
//! map tiles in three steps:
//! - classification into break values ([`classify`])
//! - resampling onto tile pixels ([`interpolate`])
//! - mapping values to colors ([`colorize`])
//!
//! [`tile::TileRenderer`] combines the three. [`choropleth::ChoroplethRenderer`]
//! draws flat per-cell tiles with optional labels instead.

pub mod choropleth;
pub mod classify;
pub mod colorize;
pub mod interpolate;
pub mod png;
pub mod sink;
pub mod stats;
pub mod tile;
pub mod visualization;

pub use choropleth::ChoroplethRenderer;
pub use classify::Classifier;
pub use colorize::Colorizer;
pub use interpolate::Interpolator;
pub use sink::{load_font, parse_font, CellLabel, ImageSink, PixelBuffer, TileSink};
pub use tile::{render_tile, TileRenderer};
pub use visualization::{build_choropleth, build_tile_renderer};
