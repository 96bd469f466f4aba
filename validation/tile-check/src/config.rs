//! Scenario loading and validation.

use anyhow::Context;
use grid_common::{
    ClassifierConfig, ColorSpec, ColorizerKind, Grid, InterpolatorKind, VisualizationConfig,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use test_utils::{checker_grid, gaussian_density_grid, modulo_grid, ramp_grid, random_count_grid};

/// Upper bound on tiles a scenario may render.
pub const DEFAULT_MAX_TILES: usize = 4096;

/// One rendering scenario loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub grid: GridSpec,
    pub visualization: VisualizationConfig,
    #[serde(default)]
    pub renderer: RendererKind,
    pub tiles: TileSelection,
    /// Renders per tile; timings cover every repetition
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Seed for random tile selection
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_tiles")]
    pub max_tiles: usize,
    /// TrueType font for choropleth labels
    #[serde(default)]
    pub font: Option<PathBuf>,
}

fn default_repeat() -> u32 {
    1
}

fn default_max_tiles() -> usize {
    DEFAULT_MAX_TILES
}

/// Synthetic grid description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    pub pattern: Pattern,
    #[serde(default = "default_grid_size")]
    pub width: usize,
    #[serde(default = "default_grid_size")]
    pub height: usize,
    #[serde(default = "default_zoom")]
    pub zoom: u32,
    #[serde(default)]
    pub west: i64,
    #[serde(default)]
    pub north: i64,
    /// Peak for gaussian, largest count for random, modulus for modulo
    #[serde(default = "default_peak")]
    pub peak: f64,
    #[serde(default)]
    pub seed: u64,
}

fn default_grid_size() -> usize {
    128
}

fn default_zoom() -> u32 {
    9
}

fn default_peak() -> f64 {
    1000.0
}

/// Named grid generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Ramp,
    Modulo,
    Checker,
    Gaussian,
    Random,
}

impl Pattern {
    pub const NAMES: &'static [&'static str] = &["ramp", "modulo", "checker", "gaussian", "random"];
}

impl FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ramp" => Ok(Pattern::Ramp),
            "modulo" => Ok(Pattern::Modulo),
            "checker" => Ok(Pattern::Checker),
            "gaussian" => Ok(Pattern::Gaussian),
            "random" => Ok(Pattern::Random),
            other => anyhow::bail!(
                "unknown pattern '{}', expected one of {}",
                other,
                Pattern::NAMES.join(", ")
            ),
        }
    }
}

/// Which renderer draws the tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    #[default]
    Tile,
    Choropleth,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Tile => write!(f, "tile"),
            RendererKind::Choropleth => write!(f, "choropleth"),
        }
    }
}

/// How to select tiles for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileSelection {
    /// Every tile overlapping the grid at each zoom difference
    Covering { zoom_diffs: Vec<i32> },
    /// `count` tiles drawn from the covering set at each zoom difference
    Random { zoom_diffs: Vec<i32>, count: usize },
    /// Explicit (z, x, y) tiles
    Fixed { tiles: Vec<(u32, u32, u32)> },
}

impl GridSpec {
    /// Generate the grid.
    pub fn build(&self) -> anyhow::Result<Grid> {
        let (w, h) = (self.width, self.height);
        let generated = match self.pattern {
            Pattern::Ramp => ramp_grid(w, h, 0),
            Pattern::Modulo => modulo_grid(w * h, (self.peak as i32).max(1), 0),
            Pattern::Checker => checker_grid(w, h, 0, self.peak as i32),
            Pattern::Gaussian => gaussian_density_grid(w, h, self.peak),
            Pattern::Random => random_count_grid(w, h, self.peak as i32, self.seed),
        };
        Grid::new(self.west, self.north, w, h, self.zoom, generated.data)
            .context("generated grid does not match its dimensions")
    }
}

impl ScenarioConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// A one-off scenario for the `quick` command.
    pub fn quick(
        pattern: Pattern,
        zoom_diff: i32,
        interpolator: InterpolatorKind,
        colorizer: ColorizerKind,
        classes: usize,
    ) -> Self {
        let colors = ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"]
            .iter()
            .map(|c| ColorSpec::from(*c))
            .collect();

        Self {
            name: "quick".to_string(),
            description: format!("{:?} pattern at zoom diff {}", pattern, zoom_diff),
            grid: GridSpec {
                pattern,
                width: default_grid_size(),
                height: default_grid_size(),
                zoom: default_zoom(),
                west: 0,
                north: 0,
                peak: default_peak(),
                seed: 0,
            },
            visualization: VisualizationConfig {
                classifier: ClassifierConfig::Quantile {
                    no_data_value: Some(0),
                },
                classes: Some(classes),
                colors,
                interpolator: Some(interpolator),
                colorizer,
                label_zoom: None,
            },
            renderer: RendererKind::Tile,
            tiles: TileSelection::Random {
                zoom_diffs: vec![zoom_diff],
                count: 16,
            },
            repeat: 3,
            seed: Some(0),
            max_tiles: DEFAULT_MAX_TILES,
            font: None,
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!("grid width and height must be > 0");
        }
        if self.repeat == 0 {
            anyhow::bail!("repeat must be > 0");
        }
        match &self.tiles {
            TileSelection::Covering { zoom_diffs } | TileSelection::Random { zoom_diffs, .. } => {
                if zoom_diffs.is_empty() {
                    anyhow::bail!("at least one zoom difference must be specified");
                }
                for zd in zoom_diffs {
                    if self.grid.zoom as i32 + zd < 0 {
                        anyhow::bail!(
                            "zoom difference {} goes below zoom 0 for a grid at zoom {}",
                            zd,
                            self.grid.zoom
                        );
                    }
                }
            }
            TileSelection::Fixed { tiles } => {
                if tiles.is_empty() {
                    anyhow::bail!("at least one tile must be specified");
                }
            }
        }
        if self.renderer == RendererKind::Choropleth
            && self.visualization.colorizer == ColorizerKind::Dot
        {
            anyhow::bail!("the choropleth renderer needs a color ramp, not the dot colorizer");
        }
        self.visualization
            .validate()
            .context("invalid visualization")?;
        Ok(())
    }
}
