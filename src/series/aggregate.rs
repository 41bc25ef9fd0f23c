//! Daily mean aggregation.
//!
//! Groups raw observations by calendar day and computes the arithmetic mean
//! temperature per day. The output is **sorted ascending by date**: downstream
//! line drawing assumes ascending x, so ordering is part of this function's
//! contract rather than an accident of grouping order.

use std::collections::BTreeMap;

use crate::domain::{DailyPoint, Observation};

/// Aggregate raw observations into one mean-temperature point per day.
///
/// - at most one output entry per distinct input date
/// - no entry for dates absent from the input
/// - empty input yields empty output
/// - pure: no side effects, deterministic, insensitive to input order
///   (up to floating-point rounding of the mean)
pub fn aggregate(observations: &[Observation]) -> Vec<DailyPoint> {
    // BTreeMap keys iterate in ascending date order, which gives us the
    // sorted-output contract for free.
    let mut groups: BTreeMap<chrono::NaiveDate, (f64, usize)> = BTreeMap::new();

    for obs in observations {
        let entry = groups.entry(obs.date).or_insert((0.0, 0));
        entry.0 += obs.temperature;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(date, (sum, count))| DailyPoint {
            date,
            avg_temp: sum / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn means_per_distinct_day() {
        let obs = vec![
            Observation { date: d(1), temperature: 10.0 },
            Observation { date: d(1), temperature: 20.0 },
            Observation { date: d(2), temperature: 30.0 },
        ];

        let daily = aggregate(&obs);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, d(1));
        assert!((daily[0].avg_temp - 15.0).abs() < 1e-12);
        assert_eq!(daily[1].date, d(2));
        assert!((daily[1].avg_temp - 30.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn output_is_sorted_even_when_input_is_not() {
        let obs = vec![
            Observation { date: d(9), temperature: 1.0 },
            Observation { date: d(3), temperature: 2.0 },
            Observation { date: d(7), temperature: 3.0 },
        ];

        let daily = aggregate(&obs);
        let dates: Vec<_> = daily.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(3), d(7), d(9)]);
    }

    #[test]
    fn invariant_to_input_reordering() {
        let mut obs = vec![
            Observation { date: d(1), temperature: 10.0 },
            Observation { date: d(2), temperature: 12.0 },
            Observation { date: d(1), temperature: 14.0 },
            Observation { date: d(2), temperature: 16.0 },
        ];
        let forward = aggregate(&obs);
        obs.reverse();
        let backward = aggregate(&obs);

        assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(a.date, b.date);
            assert!((a.avg_temp - b.avg_temp).abs() < 1e-12);
        }
    }

    #[test]
    fn distinct_date_count_is_preserved() {
        let obs = vec![
            Observation { date: d(1), temperature: 1.0 },
            Observation { date: d(1), temperature: 2.0 },
            Observation { date: d(2), temperature: 3.0 },
            Observation { date: d(3), temperature: 4.0 },
            Observation { date: d(3), temperature: 5.0 },
        ];
        assert_eq!(aggregate(&obs).len(), 3);
    }
}
