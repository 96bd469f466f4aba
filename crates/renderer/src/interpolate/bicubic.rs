/// A cubic polynomial over [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl Cubic {
    pub fn constant(z: f64) -> Self {
        Self {
            c0: z,
            c1: 0.0,
            c2: 0.0,
            c3: 0.0,
        }
    }

    /// Cubic Hermite (Catmull-Rom) curve from `b` at 0 to `c` at 1, with
    /// the end slopes set by the outer samples `a` and `d`.
    pub fn hermite(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            c3: -a / 2.0 + (3.0 * b) / 2.0 - (3.0 * c) / 2.0 + d / 2.0,
            c2: a - (5.0 * b) / 2.0 + 2.0 * c - d / 2.0,
            c1: -a / 2.0 + c / 2.0,
            c0: b,
        }
    }

    #[inline]
    pub fn at(&self, f: f64) -> f64 {
        ((self.c3 * f + self.c2) * f + self.c1) * f + self.c0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hermite_hits_inner_samples() {
        let curve = Cubic::hermite(3.0, -1.0, 8.0, 2.0);
        assert_eq!(curve.at(0.0), -1.0);
        assert!((curve.at(1.0) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_hermite_reproduces_lines() {
        let curve = Cubic::hermite(0.0, 1.0, 2.0, 3.0);
        for i in 0..=10 {
            let f = i as f64 / 10.0;
            assert!((curve.at(f) - (1.0 + f)).abs() < 1e-12);
        }
    }
}
