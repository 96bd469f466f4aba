//! Results reporting and formatting.

use crate::metrics::CheckResults;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

/// Formats check results for output.
pub struct ResultsReport;

impl ResultsReport {
    /// Format results as a console table.
    pub fn format_table(results: &CheckResults) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Tile Check: {}", results.scenario_name)]);

        table.add_row(vec!["Duration:", &format!("{:.2}s", results.duration_secs)]);
        table.add_row(vec!["Tiles:", &format!("{}", results.tiles)]);
        table.add_row(vec!["Renders:", &format!("{}", results.renders)]);
        table.add_row(vec![
            "Renders/sec:",
            &format!("{:.1}", results.renders_per_second),
        ]);

        table.add_row(vec!["", ""]);
        table.add_row(vec!["Latency (ms)", "p50 / p90 / p99 / max"]);
        table.add_row(vec![
            "",
            &format!(
                "{:.2} / {:.2} / {:.2} / {:.2}",
                results.latency_p50, results.latency_p90, results.latency_p99, results.latency_max
            ),
        ]);

        table.add_row(vec!["", ""]);
        table.add_row(vec!["Empty Tiles:", &format!("{}", results.empty_tiles)]);
        table.add_row(vec!["Labels:", &format!("{}", results.labels)]);
        table.add_row(vec![
            "Avg PNG Size:",
            &format!("{:.1} KB", results.avg_png_bytes / 1024.0),
        ]);
        table.add_row(vec!["Breaks:", &format_breaks(&results.breaks)]);

        table.to_string()
    }

    /// Format results as JSON.
    pub fn format_json(results: &CheckResults) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}

fn format_breaks(breaks: &[f64]) -> String {
    if breaks.is_empty() {
        return "-".to_string();
    }
    breaks
        .iter()
        .map(|b| format!("{}", (b * 100.0).round() / 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}
