//! Rendering checks for the tile renderer.
//!
//! This crate provides tools to:
//! - Build synthetic grids from named patterns
//! - Render tile sets for a visualization in parallel
//! - Collect render timing statistics
//! - Output results as a console table or JSON

pub mod config;
pub mod generator;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{GridSpec, Pattern, RendererKind, ScenarioConfig, TileSelection};
pub use generator::TileGenerator;
pub use metrics::{CheckResults, MetricsCollector};
pub use report::ResultsReport;
pub use runner::{TileResult, TileRunner};
