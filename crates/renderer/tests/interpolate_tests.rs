//! Tests for interpolation patches.

use grid_common::Grid;
use renderer::interpolate::{Cubic, Interpolator};
use test_utils::{assert_approx_eq, checker_grid, constant_grid, ramp_grid};

const ALL: [Interpolator; 4] = [
    Interpolator::Nearest,
    Interpolator::Bilinear,
    Interpolator::Bicubic,
    Interpolator::Spline,
];

const FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ============================================================================
// Sample points
// ============================================================================

#[test]
fn test_exact_corner_reproduces_cell() {
    let grid = ramp_grid(6, 6, 3);
    for interpolator in ALL {
        for gy in 0..6 {
            for gx in 0..6 {
                let value = interpolator.interpolate(&grid, gx, gy, 0.0, 0.0);
                assert_approx_eq!(value, grid.value(gx, gy), 1e-9);
            }
        }
    }
}

#[test]
fn test_constant_grid_stays_constant() {
    let grid = constant_grid(5, 5, 42);
    for interpolator in ALL {
        let patch = interpolator.patch(&grid, 2, 2);
        for yf in FRACTIONS {
            let row = patch.row(yf);
            for xf in FRACTIONS {
                assert_approx_eq!(row.value(xf), 42.0, 1e-9);
            }
        }
    }
}

#[test]
fn test_nearest_ignores_fractions() {
    let grid = ramp_grid(4, 4, 0);
    let patch = Interpolator::Nearest.patch(&grid, 1, 2);
    assert_eq!(patch.row(0.9).value(0.9), grid.value(1, 2));
}

// ============================================================================
// Bilinear
// ============================================================================

#[test]
fn test_bilinear_midpoint() {
    // 0 1 2 3
    // 4 5 6 7 ...
    let grid = ramp_grid(4, 4, 0);
    let value = Interpolator::Bilinear.interpolate(&grid, 0, 0, 0.5, 0.5);
    assert_approx_eq!(value, 2.5, 1e-12);
}

#[test]
fn test_bilinear_fades_past_east_edge() {
    let grid = ramp_grid(4, 4, 0);
    // East of the last column reads 0
    assert_approx_eq!(Interpolator::Bilinear.interpolate(&grid, 3, 0, 0.0, 0.5), 1.5, 1e-12);
    assert_approx_eq!(Interpolator::Bilinear.interpolate(&grid, 3, 0, 0.0, 1.0), 0.0, 1e-12);
}

#[test]
fn test_bilinear_off_grid_fades_to_zero() {
    let grid = constant_grid(4, 4, 8);
    let value = Interpolator::Bilinear.interpolate(&grid, -1, 0, 0.0, 0.5);
    assert_approx_eq!(value, 4.0, 1e-12);
}

// ============================================================================
// Grid edges
// ============================================================================

const SMOOTH: [Interpolator; 3] = [
    Interpolator::Bilinear,
    Interpolator::Bicubic,
    Interpolator::Spline,
];

/// Where the patch at `(gx, gy)` ends along x, and where its east neighbor starts.
fn east_seam(interpolator: Interpolator, grid: &Grid, gx: i64, gy: i64, yf: f64) -> (f64, f64) {
    let end = interpolator.interpolate(grid, gx, gy, yf, 1.0);
    let start = interpolator.interpolate(grid, gx + 1, gy, yf, 0.0);
    (end, start)
}

/// Where the patch at `(gx, gy)` ends along y, and where its south neighbor starts.
fn south_seam(interpolator: Interpolator, grid: &Grid, gx: i64, gy: i64, xf: f64) -> (f64, f64) {
    let end = interpolator.interpolate(grid, gx, gy, 1.0, xf);
    let start = interpolator.interpolate(grid, gx, gy + 1, 0.0, xf);
    (end, start)
}

#[test]
fn test_patches_meet_across_every_edge() {
    let grid = ramp_grid(4, 4, 10);
    for interpolator in SMOOTH {
        for g in -2..=4 {
            for across in [-1, 0, 2, 3, 4] {
                for f in FRACTIONS {
                    let (end, start) = east_seam(interpolator, &grid, g, across, f);
                    assert_approx_eq!(end, start, 1e-9);
                    let (end, start) = south_seam(interpolator, &grid, across, g, f);
                    assert_approx_eq!(end, start, 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_constant_grid_fades_alike_on_opposite_edges() {
    let grid = constant_grid(4, 4, 100);
    for interpolator in SMOOTH {
        // West: from cell -1 into cell 0; east: from cell 3 into cell 4
        let (west_end, west_start) = east_seam(interpolator, &grid, -1, 1, 0.0);
        let (east_end, east_start) = east_seam(interpolator, &grid, 3, 1, 0.0);
        assert_approx_eq!(west_end, 100.0, 1e-9);
        assert_approx_eq!(west_start, 100.0, 1e-9);
        assert_approx_eq!(east_end, 0.0, 1e-9);
        assert_approx_eq!(east_start, 0.0, 1e-9);

        // Halfway past either edge the field is at the same level
        let west = interpolator.interpolate(&grid, -1, 1, 0.0, 0.5);
        let east = interpolator.interpolate(&grid, 3, 1, 0.0, 0.5);
        assert_approx_eq!(west, east, 1e-9);
        let north = interpolator.interpolate(&grid, 1, -1, 0.5, 0.0);
        let south = interpolator.interpolate(&grid, 1, 3, 0.5, 0.0);
        assert_approx_eq!(north, south, 1e-9);
        assert_approx_eq!(north, west, 1e-9);
    }
}

// ============================================================================
// Cubic
// ============================================================================

#[test]
fn test_bicubic_reproduces_linear_ramp() {
    let grid = ramp_grid(8, 8, 0);
    // Away from the clamped edges a ramp is a plane
    let value = Interpolator::Bicubic.interpolate(&grid, 3, 3, 0.5, 0.25);
    let expected = 3.5 * 8.0 + 3.25;
    assert_approx_eq!(value, expected, 1e-9);
}

#[test]
fn test_spline_flat_center_is_constant() {
    let cubic = Cubic::constrained(0.0, 5.0, 5.0, 100.0);
    for f in FRACTIONS {
        assert_approx_eq!(cubic.at(f), 5.0, 1e-12);
    }
}

#[test]
fn test_spline_never_overshoots_checkerboard() {
    let grid = checker_grid(8, 8, 0, 100);
    let patch = Interpolator::Spline.patch(&grid, 3, 3);
    for yf in FRACTIONS {
        let row = patch.row(yf);
        for xf in FRACTIONS {
            let v = row.value(xf);
            assert!((-1e-9..=100.0 + 1e-9).contains(&v), "overshoot: {}", v);
        }
    }
}

#[test]
fn test_bicubic_overshoots_where_spline_does_not() {
    let hermite = Cubic::hermite(0.0, 10.0, 11.0, 0.0);
    let spline = Cubic::constrained(0.0, 10.0, 11.0, 0.0);

    let steps = (0..=100).map(|i| i as f64 / 100.0);
    let hermite_max = steps.clone().map(|f| hermite.at(f)).fold(f64::MIN, f64::max);
    let spline_max = steps.map(|f| spline.at(f)).fold(f64::MIN, f64::max);

    assert!(hermite_max > 11.5, "hermite peak {}", hermite_max);
    assert!(spline_max <= 11.0 + 1e-9, "spline peak {}", spline_max);
    assert_approx_eq!(spline.at(1.0), 11.0, 1e-9);
}

#[test]
fn test_grid_offsets() {
    assert_eq!(Interpolator::Nearest.grid_offset(), 0.0);
    assert_eq!(Interpolator::Bilinear.grid_offset(), 0.5);
    assert_eq!(Interpolator::Bicubic.grid_offset(), 0.5);
    assert_eq!(Interpolator::Spline.grid_offset(), 0.5);
}
