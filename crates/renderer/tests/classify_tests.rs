//! Tests for break classification.

use grid_common::{ClassifierConfig, Grid, ScaleConfig, ScaleKind, VizError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::classify::{ckmeans, Classifier, ContinuousScale};
use test_utils::{
    assert_approx_eq, assert_breaks_approx_eq, constant_grid, modulo_grid, random_count_grid,
    row_grid, uniform_mock_grid,
};

fn assert_non_decreasing(breaks: &[f64]) {
    for pair in breaks.windows(2) {
        assert!(pair[0] <= pair[1], "breaks not sorted: {:?}", breaks);
    }
}

// ============================================================================
// Quantile
// ============================================================================

#[test]
fn test_quantile_even_spread() {
    let grid = modulo_grid(1000, 10, 0);
    let breaks = Classifier::quantile().classify(&grid, 5).unwrap();
    assert_eq!(breaks, vec![2.0, 4.0, 6.0, 8.0, 9.0]);
}

#[test]
fn test_quantile_excludes_no_data() {
    let grid = modulo_grid(1000, 5, 0);
    let classifier = Classifier::Quantile { no_data: Some(2) };
    let breaks = classifier.classify(&grid, 2).unwrap();
    assert_eq!(breaks, vec![3.0, 4.0]);
}

#[test]
fn test_quantile_last_break_is_max() {
    let grid = random_count_grid(200, 200, 500, 3);
    let breaks = Classifier::quantile().classify(&grid, 7).unwrap();
    assert_eq!(breaks.len(), 7);
    assert_eq!(*breaks.last().unwrap(), grid.max);
    assert_non_decreasing(&breaks);
}

#[test]
fn test_quantile_does_not_modify_grid() {
    let grid = row_grid(&[9, 3, 7, 1, 5]);
    let before = grid.data.clone();
    Classifier::quantile().classify(&grid, 2).unwrap();
    assert_eq!(grid.data, before);
}

// ============================================================================
// Equal interval
// ============================================================================

#[test]
fn test_equal_interval_linear() {
    let grid = uniform_mock_grid();
    let breaks = Classifier::equal_interval().classify(&grid, 5).unwrap();
    assert_breaks_approx_eq!(breaks, [200.0, 400.0, 600.0, 800.0, 1000.0], 1e-9);
}

#[test]
fn test_equal_interval_log_scale() {
    let grid = uniform_mock_grid();
    let classifier = Classifier::EqualInterval(ContinuousScale::log(1.0, 1000.0));
    let breaks = classifier.classify(&grid, 3).unwrap();
    assert_breaks_approx_eq!(breaks, [10.0, 100.0, 1000.0], 1e-6);

    // Evenly spaced once transformed back
    let logs: Vec<f64> = breaks.iter().map(|b| b.ln()).collect();
    assert_approx_eq!(logs[1] - logs[0], logs[2] - logs[1], 1e-9);
}

#[test]
fn test_equal_interval_sqrt_scale() {
    let grid = row_grid(&[0, 100]);
    let classifier = Classifier::EqualInterval(ContinuousScale::sqrt());
    let breaks = classifier.classify(&grid, 2).unwrap();
    assert_breaks_approx_eq!(breaks, [25.0, 100.0], 1e-9);
}

#[test]
fn test_equal_interval_degenerate_grid() {
    let grid = constant_grid(4, 4, 12);
    let result = Classifier::equal_interval().classify(&grid, 3);
    assert!(matches!(
        result,
        Err(VizError::DegenerateDomain { min, max }) if min == 12.0 && max == 12.0
    ));
}

#[test]
fn test_equal_interval_log_of_zero_fails() {
    // Log of the grid minimum (0) is not finite
    let grid = uniform_mock_grid();
    let scale = ContinuousScale {
        domain: None,
        ..ContinuousScale::log(1.0, 1.0)
    };
    let result = Classifier::EqualInterval(scale).classify(&grid, 3);
    assert!(matches!(result, Err(VizError::DegenerateDomain { .. })));
}

// ============================================================================
// Diverging
// ============================================================================

#[test]
fn test_diverging_around_zero() {
    let grid = modulo_grid(900, 9, -4);
    assert_eq!(grid.min, -4.0);
    assert_eq!(grid.max, 4.0);

    let classifier = Classifier::diverging(Classifier::equal_interval(), 0.0);
    let breaks = classifier.classify(&grid, 3).unwrap();
    assert_breaks_approx_eq!(breaks, [-2.0, 2.0, 4.0], 1e-9);
}

#[test]
fn test_diverging_even_count_is_reduced() {
    let grid = modulo_grid(900, 9, -4);
    let classifier = Classifier::diverging(Classifier::equal_interval(), 0.0);
    let breaks = classifier.classify(&grid, 4).unwrap();
    assert_eq!(breaks.len(), 3);
}

#[test]
fn test_diverging_one_sided_data() {
    let grid = row_grid(&[1, 2, 3, 4]);
    let classifier = Classifier::diverging(Classifier::equal_interval(), 0.0);
    let breaks = classifier.classify(&grid, 3).unwrap();
    assert_eq!(breaks.len(), 3);
    assert_eq!(breaks[0], 0.0);
    assert_non_decreasing(&breaks);
}

// ============================================================================
// Ckmeans
// ============================================================================

#[test]
fn test_ckmeans_clusters() {
    let clusters = ckmeans(&[-1.0, 2.0, -1.0, 2.0, 4.0, 5.0, 6.0, -1.0, 2.0, -1.0], 3);
    assert_eq!(
        clusters,
        vec![
            vec![-1.0, -1.0, -1.0, -1.0],
            vec![2.0, 2.0, 2.0],
            vec![4.0, 5.0, 6.0],
        ]
    );
}

#[test]
fn test_ckmeans_fewer_distinct_values_than_classes() {
    let clusters = ckmeans(&[3.0, 3.0, 7.0], 5);
    assert_eq!(clusters, vec![vec![3.0, 3.0], vec![7.0]]);
}

#[test]
fn test_ckmeans_classifier_ignores_zeros() {
    let grid = row_grid(&[0, 0, 0, 0, 0, 0, 1, 1, 2, 50, 51, 52]);
    let breaks = Classifier::ckmeans().classify(&grid, 2).unwrap();
    assert_eq!(breaks, vec![2.0, 52.0]);
}

#[test]
fn test_ckmeans_pads_to_requested_count() {
    let grid = row_grid(&[5, 5, 9]);
    let breaks = Classifier::ckmeans().classify(&grid, 4).unwrap();
    assert_eq!(breaks, vec![5.0, 9.0, 9.0, 9.0]);
}

// ============================================================================
// Configuration and reproducibility
// ============================================================================

#[test]
fn test_from_config() {
    let config = ClassifierConfig::EqualInterval {
        scale: Some(ScaleConfig {
            kind: ScaleKind::Log,
            exponent: None,
            domain: Some([1.0, 1000.0]),
        }),
    };
    let classifier = Classifier::from_config(&config).unwrap();
    assert_eq!(classifier.name(), "equal_interval");

    let breaks = classifier.classify(&uniform_mock_grid(), 3).unwrap();
    assert_breaks_approx_eq!(breaks, [10.0, 100.0, 1000.0], 1e-6);
}

#[test]
fn test_from_config_rejects_bad_domain() {
    let config = ClassifierConfig::EqualInterval {
        scale: Some(ScaleConfig {
            kind: ScaleKind::Linear,
            exponent: None,
            domain: Some([5.0, 5.0]),
        }),
    };
    assert!(Classifier::from_config(&config).is_err());
}

#[test]
fn test_fixed_breaks() {
    let classifier = Classifier::Fixed(vec![100.0, 10.0]);
    let grid = uniform_mock_grid();
    assert_eq!(classifier.classify(&grid, 2).unwrap(), vec![10.0, 100.0]);
}

#[test]
fn test_sampled_classification_is_reproducible() {
    // Large enough to trigger sampling
    let grid = random_count_grid(300, 300, 1000, 11);
    for classifier in [Classifier::quantile(), Classifier::ckmeans()] {
        let a = classifier.classify(&grid, 5).unwrap();
        let b = classifier.classify(&grid, 5).unwrap();
        assert_eq!(a, b, "{} not reproducible", classifier.name());
    }
}

#[test]
fn test_injected_rng_is_used() {
    let grid = random_count_grid(300, 300, 1000, 11);
    let classifier = Classifier::quantile();
    let a = classifier
        .classify_with_rng(&grid, 5, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let b = classifier
        .classify_with_rng(&grid, 5, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_zero_classes_rejected() {
    let grid: Grid = uniform_mock_grid();
    assert!(matches!(
        Classifier::equal_interval().classify(&grid, 0),
        Err(VizError::InvalidClassCount(0))
    ));
}
