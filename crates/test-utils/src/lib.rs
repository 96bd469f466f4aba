//! Shared test utilities for the grid-tiles workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic count grids with known distributions
//! - Color ramps and break fixtures
//! - Approximate equality assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{ramp_grid, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Element-wise approximate equality of two break lists.
///
/// ```ignore
/// use test_utils::assert_breaks_approx_eq;
///
/// assert_breaks_approx_eq!(breaks, [250.0, 500.0, 750.0, 1000.0], 1e-9);
/// ```
#[macro_export]
macro_rules! assert_breaks_approx_eq {
    ($actual:expr, $expected:expr, $epsilon:expr) => {{
        let actual: &[f64] = &$actual;
        let expected: &[f64] = &$expected;
        assert_eq!(
            actual.len(),
            expected.len(),
            "break count mismatch: {:?} vs {:?}",
            actual,
            expected
        );
        for (a, e) in actual.iter().zip(expected.iter()) {
            $crate::assert_approx_eq!(*a, *e, $epsilon);
        }
    }};
}
