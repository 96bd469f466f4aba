use super::stepped;
use grid_common::Rgba;
use rand::Rng;

/// Stepped color of `value` scaled by a random factor around 1, so values
/// near a break flicker between the two classes instead of banding.
pub(super) fn color<R: Rng + ?Sized>(breaks: &[f64], colors: &[Rgba], value: f64, rng: &mut R) -> Rgba {
    stepped::color(breaks, colors, value * noise_factor(rng))
}

/// Bates(2) draw rescaled to mean 1 and width 2, in [0, 2).
fn noise_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mean = (rng.gen::<f64>() + rng.gen::<f64>()) / 2.0;
    (mean - 0.5) * 2.0 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_factor_range_and_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..10_000).map(|_| noise_factor(&mut rng)).collect();
        assert!(draws.iter().all(|f| (0.0..2.0).contains(f)));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 1.0).abs() < 0.02);
    }
}
