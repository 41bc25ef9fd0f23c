//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> daily aggregation -> trend fit -> deviations -> anomalies
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{DailyDeviation, DailyPoint, RunConfig, SeriesStats, TrendSegment};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedData};
use crate::report::{self, Anomalies};
use crate::series::aggregate;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    /// Aggregated daily series, sorted ascending by date.
    pub daily: Vec<DailyPoint>,
    pub stats: SeriesStats,
    /// Fitted trend, or `None` with a note when the fit is degenerate.
    pub trend: Option<TrendSegment>,
    pub trend_note: Option<String>,
    /// Per-day deviations from the trend (empty without a trend).
    pub deviations: Vec<DailyDeviation>,
    pub anomalies: Option<Anomalies>,
}

/// Execute the full pipeline from the configured CSV file.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let ingest = ingest::load_observations(config)?;
    run_fit_with_ingest(config, ingest)
}

/// Execute the pipeline with pre-ingested observations.
///
/// This is useful for the TUI (refit without re-reading the file) and for tests.
pub fn run_fit_with_ingest(config: &RunConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let daily = aggregate(&ingest.observations);
    let stats = SeriesStats::from_daily(&daily)
        .ok_or_else(|| AppError::new(3, "Aggregated series is empty or non-finite."))?;

    // A degenerate trend input is not fatal: the report/renderers simply show
    // "no trendline" and keep going.
    let (trend, trend_note) = match crate::fit::fit(&daily) {
        Ok(seg) => (Some(seg), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let deviations = match &trend {
        Some(seg) => report::compute_deviations(&daily, seg)?,
        None => Vec::new(),
    };
    let anomalies = if deviations.is_empty() {
        None
    } else {
        Some(report::rank_anomalies(&deviations, config.top_n))
    };

    Ok(RunOutput {
        ingest,
        daily,
        stats,
        trend,
        trend_note,
        deviations,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TempUnit;
    use std::path::PathBuf;

    fn config() -> RunConfig {
        RunConfig {
            csv_path: PathBuf::from("unused.csv"),
            unit: TempUnit::Fahrenheit,
            date_from: None,
            date_to: None,
            top_n: 3,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_series: None,
        }
    }

    #[test]
    fn pipeline_end_to_end_from_csv_bytes() {
        let csv = "date,actual_mean_temp\n\
                   2024-06-01,10\n\
                   2024-06-01,20\n\
                   2024-06-02,30\n";
        let cfg = config();
        let ingest = crate::io::ingest::read_observations(csv.as_bytes(), &cfg).unwrap();
        let run = run_fit_with_ingest(&cfg, ingest).unwrap();

        assert_eq!(run.daily.len(), 2);
        assert!((run.daily[0].avg_temp - 15.0).abs() < 1e-12);
        assert!((run.daily[1].avg_temp - 30.0).abs() < 1e-12);
        assert!(run.trend.is_some());
        assert_eq!(run.deviations.len(), 2);
        assert!(run.anomalies.is_some());
    }

    #[test]
    fn single_day_yields_no_trend_but_succeeds() {
        let csv = "date,temperature\n2024-06-01,70\n2024-06-01,72\n";
        let cfg = config();
        let ingest = crate::io::ingest::read_observations(csv.as_bytes(), &cfg).unwrap();
        let run = run_fit_with_ingest(&cfg, ingest).unwrap();

        assert_eq!(run.daily.len(), 1);
        assert!(run.trend.is_none());
        assert!(run.trend_note.is_some());
        assert!(run.deviations.is_empty());
        assert!(run.anomalies.is_none());
    }
}
