//! Ckmeans: optimal univariate k-means clustering by dynamic programming,
//! using the O(k·n·log n) divide-and-conquer fill of the cost matrix.

use super::sample::sample_values;
use grid_common::Grid;
use rand::Rng;

/// Breaks at the top of each cluster of the non-zero, non-sentinel values.
pub(super) fn classify<R: Rng + ?Sized>(
    grid: &Grid,
    n_breaks: usize,
    no_data: Option<i32>,
    rng: &mut R,
) -> Vec<f64> {
    // Zeros dominate density grids and flatten the lower clusters.
    let filtered: Vec<i32> = grid
        .data
        .iter()
        .copied()
        .filter(|v| *v != 0 && Some(*v) != no_data)
        .collect();
    let values: Vec<f64> = sample_values(&filtered, rng)
        .into_iter()
        .map(f64::from)
        .collect();

    let mut breaks: Vec<f64> = ckmeans(&values, n_breaks)
        .iter()
        .filter_map(|cluster| cluster.last().copied())
        .collect();
    let top = breaks.last().copied().unwrap_or(grid.max);
    breaks.resize(n_breaks, top);
    breaks
}

/// Partition `values` into at most `k` clusters of sorted values.
///
/// Fewer than `k` clusters come back when there are fewer than `k` distinct
/// values; an empty input gives no clusters.
pub fn ckmeans(values: &[f64], k: usize) -> Vec<Vec<f64>> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let distinct = sorted.windows(2).filter(|w| w[0] != w[1]).count() + 1;
    if sorted.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(distinct);
    if k == 1 {
        return vec![sorted];
    }

    let n = sorted.len();
    let mut cost = vec![vec![0.0; n]; k];
    let mut backtrack = vec![vec![0usize; n]; k];
    fill_matrices(&sorted, &mut cost, &mut backtrack);

    let mut clusters = vec![Vec::new(); k];
    let mut right = n - 1;
    for cluster in (0..k).rev() {
        let left = backtrack[cluster][right];
        clusters[cluster] = sorted[left..=right].to_vec();
        if cluster > 0 {
            right = left.saturating_sub(1);
        }
    }
    clusters
}

struct PrefixSums {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl PrefixSums {
    /// Within-cluster sum of squared deviations for `sorted[j..=i]`.
    fn ssq(&self, j: usize, i: usize) -> f64 {
        let sji = if j > 0 {
            let count = (i - j + 1) as f64;
            let mean = (self.sum[i] - self.sum[j - 1]) / count;
            self.sum_sq[i] - self.sum_sq[j - 1] - count * mean * mean
        } else {
            self.sum_sq[i] - self.sum[i] * self.sum[i] / (i + 1) as f64
        };
        sji.max(0.0)
    }
}

fn fill_matrices(sorted: &[f64], cost: &mut [Vec<f64>], backtrack: &mut [Vec<usize>]) {
    let n = sorted.len();
    let k = cost.len();

    // Shift by the median for numerical stability of the running sums.
    let shift = sorted[n / 2];
    let mut sums = PrefixSums {
        sum: Vec::with_capacity(n),
        sum_sq: Vec::with_capacity(n),
    };
    let (mut sum, mut sum_sq) = (0.0, 0.0);
    for (i, v) in sorted.iter().enumerate() {
        let shifted = v - shift;
        sum += shifted;
        sum_sq += shifted * shifted;
        sums.sum.push(sum);
        sums.sum_sq.push(sum_sq);
        cost[0][i] = sums.ssq(0, i);
        backtrack[0][i] = 0;
    }

    for cluster in 1..k {
        // Only the last column matters for the final cluster.
        let i_min = if cluster < k - 1 { cluster } else { n - 1 };
        fill_column(i_min, n - 1, cluster, cost, backtrack, &sums);
    }
}

fn fill_column(
    i_min: usize,
    i_max: usize,
    cluster: usize,
    cost: &mut [Vec<f64>],
    backtrack: &mut [Vec<usize>],
    sums: &PrefixSums,
) {
    if i_min > i_max {
        return;
    }
    let n = cost[0].len();
    let i = (i_min + i_max) / 2;

    cost[cluster][i] = cost[cluster - 1][i - 1];
    backtrack[cluster][i] = i;

    let mut j_low = cluster;
    if i_min > cluster {
        j_low = j_low.max(backtrack[cluster][i_min - 1]);
    }
    j_low = j_low.max(backtrack[cluster - 1][i]);

    let mut j_high = i - 1;
    if i_max < n - 1 {
        j_high = j_high.min(backtrack[cluster][i_max + 1]);
    }

    let mut j = j_high;
    while j >= j_low {
        let sji = sums.ssq(j, i);
        if sji + cost[cluster - 1][j_low - 1] >= cost[cluster][i] {
            break;
        }

        let low = sums.ssq(j_low, i) + cost[cluster - 1][j_low - 1];
        if low < cost[cluster][i] {
            cost[cluster][i] = low;
            backtrack[cluster][i] = j_low;
        }
        j_low += 1;

        let here = sji + cost[cluster - 1][j - 1];
        if here < cost[cluster][i] {
            cost[cluster][i] = here;
            backtrack[cluster][i] = j;
        }
        j -= 1;
    }

    if i > i_min {
        fill_column(i_min, i - 1, cluster, cost, backtrack, sums);
    }
    fill_column(i + 1, i_max, cluster, cost, backtrack, sums);
}
