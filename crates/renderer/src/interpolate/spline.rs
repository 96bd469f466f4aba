//! Constrained cubic spline (Kruger): end slopes are forced to zero at local
//! extrema, so the curve never overshoots its samples.

use super::Cubic;

impl Cubic {
    /// Constrained spline from `b` at 0 to `c` at 1 for four evenly spaced
    /// samples at x = -1, 0, 1, 2.
    pub fn constrained(a: f64, b: f64, c: f64, d: f64) -> Self {
        if b == c {
            return Cubic::constant(b);
        }

        let b_slope = slope(a, b, c);
        let c_slope = slope(b, c, d);
        let rise = c - b;

        // Second derivatives at either end of the interval.
        let b_curve = -2.0 * c_slope - 4.0 * b_slope + 6.0 * rise;
        let c_curve = 4.0 * c_slope + 2.0 * b_slope - 6.0 * rise;

        let c3 = (c_curve - b_curve) / 6.0;
        let c2 = b_curve / 2.0;
        Self {
            c0: b,
            c1: rise - c2 - c3,
            c2,
            c3,
        }
    }
}

/// Slope at `q` given its neighbors one unit away on either side.
fn slope(p: f64, q: f64, r: f64) -> f64 {
    let before = q - p;
    let after = r - q;
    if before == 0.0 || after == 0.0 || before.signum() != after.signum() {
        return 0.0;
    }
    2.0 / (1.0 / after + 1.0 / before)
}
