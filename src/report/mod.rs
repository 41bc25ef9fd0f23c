//! Reporting utilities: trend deviations and warm/cold anomaly rankings.

pub mod format;

pub use format::*;

use crate::domain::{DailyDeviation, DailyPoint, TrendSegment};
use crate::error::AppError;
use crate::fit::date_epoch_ms;

/// Warm/cold anomaly rankings (top-N each side).
#[derive(Debug, Clone)]
pub struct Anomalies {
    pub warm: Vec<DailyDeviation>,
    pub cold: Vec<DailyDeviation>,
}

/// Compute the fitted trend value and deviation for each day.
pub fn compute_deviations(
    daily: &[DailyPoint],
    trend: &TrendSegment,
) -> Result<Vec<DailyDeviation>, AppError> {
    let mut out = Vec::with_capacity(daily.len());
    for p in daily {
        let trend_temp = trend.line.value_at(date_epoch_ms(p.date));
        if !trend_temp.is_finite() {
            return Err(AppError::new(
                4,
                "Non-finite trend value during deviation computation.",
            ));
        }
        let deviation = p.avg_temp - trend_temp;
        out.push(DailyDeviation {
            point: *p,
            trend_temp,
            deviation,
        });
    }
    Ok(out)
}

/// Rank the top warm (above trend) and cold (below trend) days.
pub fn rank_anomalies(deviations: &[DailyDeviation], top_n: usize) -> Anomalies {
    let mut warm = deviations.to_vec();
    warm.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    warm.truncate(top_n);

    let mut cold = deviations.to_vec();
    cold.sort_by(|a, b| {
        a.deviation
            .partial_cmp(&b.deviation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    cold.truncate(top_n);

    Anomalies { warm, cold }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn deviations_measure_distance_from_trend() {
        // Perfect line plus one +5 spike on day 3.
        let mut daily: Vec<DailyPoint> = (0..5)
            .map(|i| DailyPoint {
                date: d(1 + i),
                avg_temp: 60.0 + i as f64,
            })
            .collect();
        daily[2].avg_temp += 5.0;

        let trend = crate::fit::fit(&daily).unwrap();
        let deviations = compute_deviations(&daily, &trend).unwrap();

        let max = deviations
            .iter()
            .max_by(|a, b| a.deviation.partial_cmp(&b.deviation).unwrap())
            .unwrap();
        assert_eq!(max.point.date, d(3));
        assert!(max.deviation > 3.0);
    }

    #[test]
    fn rank_anomalies_splits_warm_and_cold() {
        let daily = vec![
            DailyPoint { date: d(1), avg_temp: 60.0 },
            DailyPoint { date: d(2), avg_temp: 70.0 },
            DailyPoint { date: d(3), avg_temp: 55.0 },
            DailyPoint { date: d(4), avg_temp: 62.0 },
        ];
        let trend = crate::fit::fit(&daily).unwrap();
        let deviations = compute_deviations(&daily, &trend).unwrap();

        let anomalies = rank_anomalies(&deviations, 1);
        assert_eq!(anomalies.warm.len(), 1);
        assert_eq!(anomalies.cold.len(), 1);
        assert_eq!(anomalies.warm[0].point.date, d(2));
        assert_eq!(anomalies.cold[0].point.date, d(3));
    }
}
