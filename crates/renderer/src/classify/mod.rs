//! Break-value classification.
//!
//! A classifier turns a grid and a desired class count into an ordered,
//! non-decreasing list of break values. `breaks[i]` is the inclusive upper
//! bound of class `i`. Breaks may repeat when the grid has fewer distinct
//! values than classes.
//!
//! Classifiers that sample the data draw from an explicitly injected random
//! generator. [`Classifier::classify`] seeds one from the grid's spatial
//! identity so that repeated classification of the same grid is
//! reproducible.

mod ckmeans;
mod diverging;
mod equal_interval;
mod quantile;
pub mod sample;
mod scale;

pub use ckmeans::ckmeans;
pub use scale::ContinuousScale;

use grid_common::{ClassifierConfig, Grid, VizError, VizResult};
use rand::Rng;
use tracing::debug;

/// Classification strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Classifier {
    /// Equal segments of the scale's domain, in the scale's transformed space
    EqualInterval(ContinuousScale),
    /// Sampled quantiles, ignoring an optional no-data sentinel
    Quantile { no_data: Option<i32> },
    /// Optimal 1-D k-means over non-zero values
    Ckmeans { no_data: Option<i32> },
    /// Base scheme applied separately below and above `center`
    Diverging { scheme: Box<Classifier>, center: f64 },
    /// Caller-supplied breaks
    Fixed(Vec<f64>),
}

impl Classifier {
    pub fn equal_interval() -> Self {
        Classifier::EqualInterval(ContinuousScale::linear())
    }

    pub fn quantile() -> Self {
        Classifier::Quantile { no_data: None }
    }

    pub fn ckmeans() -> Self {
        Classifier::Ckmeans { no_data: None }
    }

    pub fn diverging(scheme: Classifier, center: f64) -> Self {
        Classifier::Diverging {
            scheme: Box::new(scheme),
            center,
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &ClassifierConfig) -> VizResult<Self> {
        config.validate()?;
        Ok(match config {
            ClassifierConfig::EqualInterval { scale } => Classifier::EqualInterval(
                scale
                    .as_ref()
                    .map(ContinuousScale::from_config)
                    .unwrap_or_else(ContinuousScale::linear),
            ),
            ClassifierConfig::Quantile { no_data_value } => Classifier::Quantile {
                no_data: *no_data_value,
            },
            ClassifierConfig::Ckmeans { no_data_value } => Classifier::Ckmeans {
                no_data: *no_data_value,
            },
            ClassifierConfig::Diverging { scheme, center } => {
                Classifier::diverging(Classifier::from_config(scheme)?, *center)
            }
            ClassifierConfig::Fixed { breaks } => Classifier::Fixed(breaks.clone()),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Classifier::EqualInterval(_) => "equal_interval",
            Classifier::Quantile { .. } => "quantile",
            Classifier::Ckmeans { .. } => "ckmeans",
            Classifier::Diverging { .. } => "diverging",
            Classifier::Fixed(_) => "fixed",
        }
    }

    /// Classify with a generator seeded from the grid's spatial identity.
    pub fn classify(&self, grid: &Grid, n_breaks: usize) -> VizResult<Vec<f64>> {
        let mut rng = sample::sampling_rng(grid);
        self.classify_with_rng(grid, n_breaks, &mut rng)
    }

    /// Classify, drawing any samples from `rng`.
    pub fn classify_with_rng<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        n_breaks: usize,
        rng: &mut R,
    ) -> VizResult<Vec<f64>> {
        if n_breaks == 0 {
            return Err(VizError::InvalidClassCount(n_breaks));
        }

        let breaks = match self {
            Classifier::EqualInterval(scale) => equal_interval::classify(grid, n_breaks, scale)?,
            Classifier::Quantile { no_data } => quantile::classify(grid, n_breaks, *no_data, rng),
            Classifier::Ckmeans { no_data } => {
                ckmeans::classify(grid, n_breaks, *no_data, rng)
            }
            Classifier::Diverging { scheme, center } => {
                diverging::classify(grid, n_breaks, scheme, *center, rng)?
            }
            Classifier::Fixed(breaks) => fixed(breaks, n_breaks),
        };

        debug!(
            classifier = self.name(),
            n_breaks,
            breaks = ?breaks,
            "Classified grid"
        );
        Ok(breaks)
    }
}

/// Sorted copy of `breaks`, truncated or padded with its last value.
fn fixed(breaks: &[f64], n_breaks: usize) -> Vec<f64> {
    let mut sorted = breaks.to_vec();
    sorted.sort_by(f64::total_cmp);
    let last = sorted.last().copied().unwrap_or(0.0);
    sorted.resize(n_breaks, last);
    sorted
}
