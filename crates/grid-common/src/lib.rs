//! Common types shared by the gridtile crates: source grids, tile
//! coordinates, colors, errors, and the serde visualization config.

pub mod color;
pub mod error;
pub mod grid;
pub mod style;
pub mod tile;

pub use color::{ColorParser, ColorSpec, HexColorParser, Rgba, TRANSPARENT, WARNING_COLOR};
pub use error::{VizError, VizResult};
pub use grid::Grid;
pub use style::{
    ClassifierConfig, ColorizerKind, InterpolatorKind, ScaleConfig, ScaleKind,
    VisualizationConfig,
};
pub use tile::{TileCoord, TILE_SIZE};
