//! Visualization configuration.
//!
//! A visualization picks one classifier, one interpolator and one colorizer
//! by name, plus the color ramp. The renderer crate turns this description
//! into concrete strategies.

use crate::color::ColorSpec;
use crate::error::{VizError, VizResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Complete visualization definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationConfig {
    /// How break values are chosen
    pub classifier: ClassifierConfig,

    /// Number of classes; defaults to the number of colors
    #[serde(default)]
    pub classes: Option<usize>,

    /// Color ramp, one color per class
    #[serde(default)]
    pub colors: Vec<ColorSpec>,

    /// Resampling strategy; nearest neighbor when absent
    #[serde(default)]
    pub interpolator: Option<InterpolatorKind>,

    /// Value to color mapping
    #[serde(default)]
    pub colorizer: ColorizerKind,

    /// Zoom above which the choropleth renderer labels cells
    #[serde(default)]
    pub label_zoom: Option<u32>,
}

impl VisualizationConfig {
    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of classes to request from the classifier.
    pub fn class_count(&self) -> usize {
        self.classes.unwrap_or(self.colors.len())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> VizResult<()> {
        if self.colors.is_empty() && self.colorizer != ColorizerKind::Dot {
            return Err(VizError::EmptyColors);
        }
        if self.class_count() == 0 {
            return Err(VizError::InvalidClassCount(0));
        }
        self.classifier.validate()
    }
}

/// Classifier selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierConfig {
    EqualInterval {
        #[serde(default)]
        scale: Option<ScaleConfig>,
    },
    Quantile {
        #[serde(default)]
        no_data_value: Option<i32>,
    },
    Ckmeans {
        #[serde(default)]
        no_data_value: Option<i32>,
    },
    Diverging {
        scheme: Box<ClassifierConfig>,
        #[serde(default)]
        center: f64,
    },
    Fixed {
        breaks: Vec<f64>,
    },
}

impl ClassifierConfig {
    pub const NAMES: &'static [&'static str] =
        &["equal_interval", "quantile", "ckmeans", "diverging", "fixed"];

    pub fn validate(&self) -> VizResult<()> {
        match self {
            ClassifierConfig::EqualInterval { scale: Some(scale) } => scale.validate(),
            ClassifierConfig::Diverging { scheme, center } => {
                if !center.is_finite() {
                    return Err(VizError::config("diverging center must be finite"));
                }
                scheme.validate()
            }
            ClassifierConfig::Fixed { breaks } => {
                if breaks.is_empty() {
                    return Err(VizError::config("fixed classifier needs at least one break"));
                }
                if breaks.iter().any(|b| !b.is_finite()) {
                    return Err(VizError::config("fixed breaks must be finite"));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Continuous scale used by equal-interval classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    #[serde(default)]
    pub kind: ScaleKind,

    /// Exponent for `pow` scales
    #[serde(default)]
    pub exponent: Option<f64>,

    /// Explicit domain; the grid's [min, max] when absent
    #[serde(default)]
    pub domain: Option<[f64; 2]>,
}

impl ScaleConfig {
    pub fn validate(&self) -> VizResult<()> {
        if self.kind == ScaleKind::Pow && self.exponent.map_or(true, |e| e == 0.0) {
            return Err(VizError::config("pow scale needs a non-zero exponent"));
        }
        if let Some([lo, hi]) = self.domain {
            if !(lo < hi) {
                return Err(VizError::DegenerateDomain { min: lo, max: hi });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Sqrt,
    Pow,
}

/// Interpolator selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolatorKind {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
    Spline,
}

impl InterpolatorKind {
    pub const NAMES: &'static [&'static str] = &["nearest", "bilinear", "bicubic", "spline"];
}

impl FromStr for InterpolatorKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "bicubic" => Ok(Self::Bicubic),
            "spline" => Ok(Self::Spline),
            other => Err(VizError::config(format!("unknown interpolator '{}'", other))),
        }
    }
}

/// Colorizer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorizerKind {
    #[default]
    Stepped,
    Gradient,
    Dot,
    Dithered,
}

impl ColorizerKind {
    pub const NAMES: &'static [&'static str] = &["stepped", "gradient", "dot", "dithered"];
}

impl FromStr for ColorizerKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stepped" => Ok(Self::Stepped),
            "gradient" => Ok(Self::Gradient),
            "dot" => Ok(Self::Dot),
            "dithered" => Ok(Self::Dithered),
            other => Err(VizError::config(format!("unknown colorizer '{}'", other))),
        }
    }
}
