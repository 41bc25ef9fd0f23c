//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and trend fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Temperature unit of the input data (and of the terminal display).
///
/// The unit never affects aggregation or fitting; it only controls how values
/// are labeled and, in the TUI, how they are converted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    Fahrenheit,
    Celsius,
}

impl TempUnit {
    /// Short label for axis/table output.
    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Fahrenheit => "°F",
            TempUnit::Celsius => "°C",
        }
    }

    /// Convert a value expressed in `source` into this unit.
    pub fn convert_from(self, value: f64, source: TempUnit) -> f64 {
        match (source, self) {
            (TempUnit::Fahrenheit, TempUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
            (TempUnit::Celsius, TempUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
            _ => value,
        }
    }

    pub fn toggled(self) -> TempUnit {
        match self {
            TempUnit::Fahrenheit => TempUnit::Celsius,
            TempUnit::Celsius => TempUnit::Fahrenheit,
        }
    }
}

/// One raw date/temperature reading, immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// One calendar day paired with the mean temperature for that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub avg_temp: f64,
}

/// OLS coefficients over epoch-millisecond x.
///
/// `y = slope * epoch_ms + intercept`. The raw slope is tiny (degrees per
/// millisecond); use [`TrendLine::slope_per_day`] for human-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Milliseconds per day, for converting the raw slope into degrees/day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

impl TrendLine {
    /// Fitted value at an epoch-millisecond x.
    pub fn value_at(&self, epoch_ms: f64) -> f64 {
        self.slope * epoch_ms + self.intercept
    }

    pub fn slope_per_day(&self) -> f64 {
        self.slope * MS_PER_DAY
    }

    pub fn slope_per_year(&self) -> f64 {
        self.slope_per_day() * 365.25
    }
}

/// Two-point representation of the fitted line at the series' date extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSegment {
    pub start: DailyPoint,
    pub end: DailyPoint,
    pub line: TrendLine,
}

/// A per-day deviation from the fitted trendline (used for rankings/exports).
#[derive(Debug, Clone, Copy)]
pub struct DailyDeviation {
    pub point: DailyPoint,
    pub trend_temp: f64,
    pub deviation: f64,
}

/// Summary stats over the aggregated daily series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesStats {
    pub n_days: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl SeriesStats {
    /// Compute stats over a daily series. `None` when the series is empty or
    /// contains non-finite temperatures.
    pub fn from_daily(daily: &[DailyPoint]) -> Option<SeriesStats> {
        let mut date_min = None;
        let mut date_max = None;
        let mut temp_min = f64::INFINITY;
        let mut temp_max = f64::NEG_INFINITY;

        for p in daily {
            date_min = Some(date_min.map_or(p.date, |d: NaiveDate| d.min(p.date)));
            date_max = Some(date_max.map_or(p.date, |d: NaiveDate| d.max(p.date)));
            temp_min = temp_min.min(p.avg_temp);
            temp_max = temp_max.max(p.avg_temp);
        }

        if !temp_min.is_finite() || !temp_max.is_finite() {
            return None;
        }

        Some(SeriesStats {
            n_days: daily.len(),
            date_min: date_min?,
            date_max: date_max?,
            temp_min,
            temp_max,
        })
    }
}

/// A saved series file (JSON).
///
/// The "portable" representation of one processed dataset: the aggregated
/// daily grid plus the fitted trend (if any), enough to re-plot without the
/// raw CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub tool: String,
    pub unit: TempUnit,
    pub stats: SeriesStats,
    pub daily: Vec<DailyPoint>,
    pub trend: Option<TrendSegment>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    /// Unit the input data is expressed in.
    pub unit: TempUnit,

    /// Optional observation window (inclusive).
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    /// Show top-N warm and cold anomalies.
    pub top_n: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_series: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_round_trips() {
        let f = 68.0;
        let c = TempUnit::Celsius.convert_from(f, TempUnit::Fahrenheit);
        assert!((c - 20.0).abs() < 1e-12);
        let back = TempUnit::Fahrenheit.convert_from(c, TempUnit::Celsius);
        assert!((back - f).abs() < 1e-12);
    }

    #[test]
    fn same_unit_is_identity() {
        let v = 42.5;
        assert_eq!(TempUnit::Fahrenheit.convert_from(v, TempUnit::Fahrenheit), v);
    }

    #[test]
    fn stats_from_daily_scans_extremes() {
        let daily = vec![
            DailyPoint {
                date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                avg_temp: 70.0,
            },
            DailyPoint {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                avg_temp: 65.0,
            },
        ];
        let stats = SeriesStats::from_daily(&daily).unwrap();
        assert_eq!(stats.n_days, 2);
        assert_eq!(stats.date_min, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(stats.date_max, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(stats.temp_min, 65.0);
        assert_eq!(stats.temp_max, 70.0);
    }

    #[test]
    fn stats_empty_is_none() {
        assert!(SeriesStats::from_daily(&[]).is_none());
    }
}
