//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DailyDeviation, RunConfig, SeriesStats, TempUnit, TrendSegment};
use crate::io::ingest::IngestedData;
use crate::report::Anomalies;

/// Format the full run summary (dataset stats + trend diagnostics).
pub fn format_run_summary(
    ingest: &IngestedData,
    stats: &SeriesStats,
    trend: Option<&TrendSegment>,
    trend_note: Option<&str>,
    config: &RunConfig,
) -> String {
    let mut out = String::new();
    let unit = config.unit.symbol();

    out.push_str("=== ttrend - Daily Temperature Trend ===\n");
    out.push_str(&format!("File: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={} (column: {})\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len(),
        ingest.temp_column,
    ));
    out.push_str(&format!(
        "Days: n={} | dates=[{}, {}] | temp=[{:.1}, {:.1}]{unit}\n",
        stats.n_days, stats.date_min, stats.date_max, stats.temp_min, stats.temp_max,
    ));

    out.push_str("\nTrendline:\n");
    match trend {
        Some(seg) => {
            out.push_str(&format!(
                "- slope: {:+.4}{unit}/day ({:+.2}{unit}/year)\n",
                seg.line.slope_per_day(),
                seg.line.slope_per_year(),
            ));
            out.push_str(&format!(
                "- segment: ({}, {:.2}{unit}) -> ({}, {:.2}{unit})\n",
                seg.start.date, seg.start.avg_temp, seg.end.date, seg.end.avg_temp,
            ));
        }
        None => {
            let reason = trend_note.unwrap_or("not available");
            out.push_str(&format!("- none: {reason}\n"));
        }
    }
    out.push('\n');

    out
}

/// Format the warm/cold anomaly tables.
pub fn format_anomalies(anomalies: &Anomalies, unit: TempUnit) -> String {
    let mut out = String::new();

    out.push_str("Top warm days (above trend):\n");
    out.push_str(&format_table(&anomalies.warm, unit));
    out.push('\n');

    out.push_str("Top cold days (below trend):\n");
    out.push_str(&format_table(&anomalies.cold, unit));

    out
}

fn format_table(rows: &[DailyDeviation], unit: TempUnit) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:>12} {:>12} {:>12}\n",
            "date",
            format!("avg ({})", unit.symbol()),
            "trend",
            "deviation"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<12} {:>12.2} {:>12.2} {:>+12.2}\n",
                r.point.date.to_string(),
                r.point.avg_temp,
                r.trend_temp,
                r.deviation,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}
