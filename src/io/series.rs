//! Read/write series JSON files.
//!
//! Series JSON is the "portable" representation of one processed dataset:
//! - the aggregated daily grid (sorted ascending by date)
//! - the fitted trend segment, when one was available
//! - run metadata (tool tag, unit, stats)
//!
//! The schema is defined by `domain::SeriesFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{DailyPoint, SeriesFile, SeriesStats, TempUnit, TrendSegment};
use crate::error::AppError;

/// Write a series JSON file.
pub fn write_series_json(
    path: &Path,
    daily: &[DailyPoint],
    trend: Option<&TrendSegment>,
    unit: TempUnit,
) -> Result<(), AppError> {
    let stats = SeriesStats::from_daily(daily)
        .ok_or_else(|| AppError::new(3, "Cannot export an empty series."))?;

    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create series JSON '{}': {e}", path.display()),
        )
    })?;

    let series = SeriesFile {
        tool: "ttrend".to_string(),
        unit,
        stats,
        daily: daily.to_vec(),
        trend: trend.copied(),
    };

    serde_json::to_writer_pretty(file, &series)
        .map_err(|e| AppError::new(2, format!("Failed to write series JSON: {e}")))?;

    Ok(())
}

/// Read a series JSON file.
pub fn read_series_json(path: &Path) -> Result<SeriesFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open series JSON '{}': {e}", path.display()),
        )
    })?;
    let series: SeriesFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid series JSON: {e}")))?;
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn series_json_round_trips() {
        let daily = vec![
            DailyPoint {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                avg_temp: 70.0,
            },
            DailyPoint {
                date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                avg_temp: 72.0,
            },
        ];
        let trend = crate::fit::fit(&daily).unwrap();

        let dir = std::env::temp_dir().join(format!("ttrend-series-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("series.json");

        write_series_json(&path, &daily, Some(&trend), TempUnit::Fahrenheit).unwrap();
        let loaded = read_series_json(&path).unwrap();

        assert_eq!(loaded.tool, "ttrend");
        assert_eq!(loaded.unit, TempUnit::Fahrenheit);
        assert_eq!(loaded.daily.len(), 2);
        assert_eq!(loaded.stats.n_days, 2);
        let loaded_trend = loaded.trend.unwrap();
        assert!((loaded_trend.line.slope - trend.line.slope).abs() < 1e-15);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_series_is_rejected() {
        let path = std::env::temp_dir().join("ttrend-empty-series.json");
        let err = write_series_json(&path, &[], None, TempUnit::Celsius).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
