//! Linear trend fit over the daily series.
//!
//! The independent variable is epoch milliseconds at midnight of each date;
//! the dependent variable is the daily mean temperature. The result is a
//! [`TrendSegment`]: the fitted values at the minimum and maximum dates of the
//! series, plus the raw coefficients.
//!
//! Degenerate inputs fail with [`TrendError`] rather than producing a segment
//! with NaN/Infinity coordinates. Renderers treat any `TrendError` as
//! "no trendline available" and skip the overlay.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{DailyPoint, TrendLine, TrendSegment};
use crate::math::fit_line;

/// Why a trend fit was not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendError {
    /// Fewer than two daily points.
    NotEnoughDays { got: usize },
    /// Two or more points, but all on the same date (zero x-variance).
    ZeroDateSpan,
    /// The regression produced non-finite coefficients or endpoints.
    NonFinite,
}

impl std::fmt::Display for TrendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendError::NotEnoughDays { got } => {
                write!(f, "need at least 2 days for a trend fit (got {got})")
            }
            TrendError::ZeroDateSpan => {
                write!(f, "all points share the same date (zero x-variance)")
            }
            TrendError::NonFinite => write!(f, "trend fit produced non-finite values"),
        }
    }
}

impl std::error::Error for TrendError {}

/// Epoch milliseconds at midnight (UTC) of a calendar date.
///
/// Matches the x convention the series was originally charted with
/// (`Date.getTime()` of a day-granularity timestamp).
pub fn date_epoch_ms(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// Fit an OLS trendline through the daily series.
///
/// The date extremes are found by scanning, not taken positionally, so the
/// input does not have to be sorted.
pub fn fit(daily: &[DailyPoint]) -> Result<TrendSegment, TrendError> {
    if daily.len() < 2 {
        return Err(TrendError::NotEnoughDays { got: daily.len() });
    }

    let mut xs = Vec::with_capacity(daily.len());
    let mut ys = Vec::with_capacity(daily.len());
    let mut date_min = daily[0].date;
    let mut date_max = daily[0].date;

    for p in daily {
        xs.push(date_epoch_ms(p.date));
        ys.push(p.avg_temp);
        date_min = date_min.min(p.date);
        date_max = date_max.max(p.date);
    }

    if date_min == date_max {
        return Err(TrendError::ZeroDateSpan);
    }

    let fit = fit_line(&xs, &ys).ok_or(TrendError::NonFinite)?;
    let line = TrendLine {
        slope: fit.slope,
        intercept: fit.intercept,
    };

    let start = DailyPoint {
        date: date_min,
        avg_temp: line.value_at(date_epoch_ms(date_min)),
    };
    let end = DailyPoint {
        date: date_max,
        avg_temp: line.value_at(date_epoch_ms(date_max)),
    };

    if !start.avg_temp.is_finite() || !end.avg_temp.is_finite() {
        return Err(TrendError::NonFinite);
    }

    Ok(TrendSegment { start, end, line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn exact_line_recovers_endpoints() {
        // avg_temp rises exactly 2 degrees/day from 50. The fitted segment
        // must reproduce the endpoint values.
        let daily: Vec<DailyPoint> = (0..5)
            .map(|i| DailyPoint {
                date: d(1 + i),
                avg_temp: 50.0 + 2.0 * i as f64,
            })
            .collect();

        let seg = fit(&daily).unwrap();
        assert_eq!(seg.start.date, d(1));
        assert_eq!(seg.end.date, d(5));
        assert!((seg.start.avg_temp - 50.0).abs() < 1e-6);
        assert!((seg.end.avg_temp - 58.0).abs() < 1e-6);
        assert!((seg.line.slope_per_day() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn extremes_are_scanned_not_positional() {
        let daily = vec![
            DailyPoint { date: d(10), avg_temp: 60.0 },
            DailyPoint { date: d(1), avg_temp: 51.0 },
            DailyPoint { date: d(5), avg_temp: 55.0 },
        ];

        let seg = fit(&daily).unwrap();
        assert_eq!(seg.start.date, d(1));
        assert_eq!(seg.end.date, d(10));
        assert!(seg.start.avg_temp < seg.end.avg_temp);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let daily: Vec<DailyPoint> = (0..4)
            .map(|i| DailyPoint { date: d(1 + i), avg_temp: 70.0 })
            .collect();

        let seg = fit(&daily).unwrap();
        assert!(seg.line.slope_per_day().abs() < 1e-9);
        assert!((seg.start.avg_temp - 70.0).abs() < 1e-6);
        assert!((seg.end.avg_temp - 70.0).abs() < 1e-6);
    }

    #[test]
    fn empty_and_single_point_fail_explicitly() {
        assert_eq!(fit(&[]), Err(TrendError::NotEnoughDays { got: 0 }));

        let one = [DailyPoint { date: d(1), avg_temp: 70.0 }];
        assert_eq!(fit(&one), Err(TrendError::NotEnoughDays { got: 1 }));
    }

    #[test]
    fn identical_dates_fail_explicitly() {
        let daily = [
            DailyPoint { date: d(1), avg_temp: 70.0 },
            DailyPoint { date: d(1), avg_temp: 75.0 },
        ];
        assert_eq!(fit(&daily), Err(TrendError::ZeroDateSpan));
    }

    #[test]
    fn segment_never_carries_non_finite_values() {
        let daily = [
            DailyPoint { date: d(1), avg_temp: f64::NAN },
            DailyPoint { date: d(2), avg_temp: 70.0 },
        ];
        assert_eq!(fit(&daily), Err(TrendError::NonFinite));
    }
}
