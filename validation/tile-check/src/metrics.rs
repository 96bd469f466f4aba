//! Metrics collection and statistics.

use crate::runner::TileResult;
use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Collects per-tile measurements for one scenario run.
pub struct MetricsCollector {
    histogram: Histogram<u64>,
    tiles_total: u64,
    renders_total: u64,
    empty_tiles: u64,
    labels_total: u64,
    bytes_total: u64,
    opaque_pixels: u64,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            histogram: Histogram::new(3)?,
            tiles_total: 0,
            renders_total: 0,
            empty_tiles: 0,
            labels_total: 0,
            bytes_total: 0,
            opaque_pixels: 0,
        })
    }

    /// Record one rendered tile.
    pub fn record(&mut self, result: &TileResult) {
        self.tiles_total += 1;
        self.renders_total += result.latencies_us.len() as u64;
        self.bytes_total += result.bytes as u64;
        self.labels_total += result.labels as u64;
        self.opaque_pixels += result.opaque_pixels as u64;
        if result.opaque_pixels == 0 {
            self.empty_tiles += 1;
        }
        for latency in &result.latencies_us {
            self.histogram.record((*latency).max(1)).ok();
        }
    }

    /// Generate final results.
    pub fn results(&self, scenario_name: String, breaks: Vec<f64>, elapsed: Duration) -> CheckResults {
        let duration_secs = elapsed.as_secs_f64();
        let per_second = |n: u64| {
            if duration_secs > 0.0 {
                n as f64 / duration_secs
            } else {
                0.0
            }
        };
        let ms = |us: u64| us as f64 / 1000.0;

        CheckResults {
            scenario_name,
            duration_secs,
            tiles: self.tiles_total,
            renders: self.renders_total,
            empty_tiles: self.empty_tiles,
            labels: self.labels_total,
            renders_per_second: per_second(self.renders_total),
            latency_p50: ms(self.histogram.value_at_percentile(50.0)),
            latency_p90: ms(self.histogram.value_at_percentile(90.0)),
            latency_p99: ms(self.histogram.value_at_percentile(99.0)),
            latency_min: ms(self.histogram.min()),
            latency_max: ms(self.histogram.max()),
            latency_avg: self.histogram.mean() / 1000.0,
            avg_png_bytes: if self.tiles_total > 0 {
                self.bytes_total as f64 / self.tiles_total as f64
            } else {
                0.0
            },
            opaque_pixels: self.opaque_pixels,
            breaks,
        }
    }
}

/// Final results of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResults {
    pub scenario_name: String,
    pub duration_secs: f64,
    pub tiles: u64,
    pub renders: u64,
    /// Tiles with no opaque pixel
    pub empty_tiles: u64,
    pub labels: u64,
    pub renders_per_second: f64,

    // Render latency percentiles (ms)
    pub latency_p50: f64,
    pub latency_p90: f64,
    pub latency_p99: f64,
    pub latency_min: f64,
    pub latency_max: f64,
    pub latency_avg: f64,

    pub avg_png_bytes: f64,
    pub opaque_pixels: u64,

    /// Class breaks the renderer was built with
    pub breaks: Vec<f64>,
}
