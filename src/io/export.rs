//! Export per-day results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{DailyDeviation, DailyPoint, TempUnit};
use crate::error::AppError;

/// Write per-day results to a CSV file.
///
/// When no trend fit is available, `deviations` is empty and the trend/deviation
/// columns are left blank for every row.
pub fn write_results_csv(
    path: &Path,
    daily: &[DailyPoint],
    deviations: &[DailyDeviation],
    unit: TempUnit,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "date,unit,avg_temp,trend_temp,deviation")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, p) in daily.iter().enumerate() {
        // Deviations are computed over the same sorted daily grid, so they
        // line up by index when present.
        let (trend_temp, deviation) = match deviations.get(i) {
            Some(d) => (format!("{:.4}", d.trend_temp), format!("{:.4}", d.deviation)),
            None => (String::new(), String::new()),
        };
        writeln!(
            file,
            "{},{},{:.4},{},{}",
            p.date,
            unit.symbol(),
            p.avg_temp,
            trend_temp,
            deviation,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
