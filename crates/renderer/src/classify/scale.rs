use grid_common::{ScaleConfig, ScaleKind};

/// An invertible continuous mapping from values to a linear "range space".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScale {
    pub kind: ScaleKind,
    pub exponent: f64,
    /// Explicit domain; the grid's [min, max] when `None`
    pub domain: Option<(f64, f64)>,
}

impl ContinuousScale {
    pub fn linear() -> Self {
        Self {
            kind: ScaleKind::Linear,
            exponent: 1.0,
            domain: None,
        }
    }

    /// Logarithmic scale. The domain must be strictly positive.
    pub fn log(lo: f64, hi: f64) -> Self {
        Self {
            kind: ScaleKind::Log,
            exponent: 1.0,
            domain: Some((lo, hi)),
        }
    }

    pub fn sqrt() -> Self {
        Self {
            kind: ScaleKind::Sqrt,
            exponent: 0.5,
            domain: None,
        }
    }

    pub fn pow(exponent: f64) -> Self {
        Self {
            kind: ScaleKind::Pow,
            exponent,
            domain: None,
        }
    }

    pub fn with_domain(mut self, lo: f64, hi: f64) -> Self {
        self.domain = Some((lo, hi));
        self
    }

    pub fn from_config(config: &ScaleConfig) -> Self {
        let scale = match config.kind {
            ScaleKind::Linear => Self::linear(),
            ScaleKind::Log => Self {
                kind: ScaleKind::Log,
                exponent: 1.0,
                domain: None,
            },
            ScaleKind::Sqrt => Self::sqrt(),
            ScaleKind::Pow => Self::pow(config.exponent.unwrap_or(1.0)),
        };
        match config.domain {
            Some([lo, hi]) => scale.with_domain(lo, hi),
            None => scale,
        }
    }

    /// Map a domain value into transformed space.
    pub fn transform(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => v,
            ScaleKind::Log => v.ln(),
            ScaleKind::Sqrt | ScaleKind::Pow => v.signum() * v.abs().powf(self.exponent),
        }
    }

    /// Inverse of [`transform`](Self::transform).
    pub fn untransform(&self, t: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => t,
            ScaleKind::Log => t.exp(),
            ScaleKind::Sqrt | ScaleKind::Pow => t.signum() * t.abs().powf(1.0 / self.exponent),
        }
    }
}

impl Default for ContinuousScale {
    fn default() -> Self {
        Self::linear()
    }
}
