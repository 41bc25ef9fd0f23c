//! Synthetic weather sample generation.
//!
//! Generates a plausible daily-temperature CSV for demos and testing:
//! a seasonal sinusoid plus a slow warming drift plus Gaussian noise, with
//! several readings per day so the daily aggregation step actually has
//! something to average.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Observation;
use crate::error::AppError;

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: usize,
    /// Readings per day (all on the same date, so they get averaged).
    pub per_day: usize,
    pub seed: u64,

    /// Annual mean temperature.
    pub base_temp: f64,
    /// Seasonal swing around the mean (peak-to-mean).
    pub amplitude: f64,
    /// Linear drift in degrees per year.
    pub drift_per_year: f64,
    /// Standard deviation of per-reading noise.
    pub noise_sd: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        // Roughly a mid-latitude Fahrenheit climate.
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 365,
            per_day: 3,
            seed: 42,
            base_temp: 55.0,
            amplitude: 20.0,
            drift_per_year: 0.5,
            noise_sd: 3.0,
        }
    }
}

/// Generate synthetic observations. Deterministic for a given config.
pub fn generate_observations(config: &SampleConfig) -> Result<Vec<Observation>, AppError> {
    if config.days == 0 || config.per_day == 0 {
        return Err(AppError::new(2, "Sample days and readings-per-day must be > 0."));
    }
    if !(config.base_temp.is_finite()
        && config.amplitude.is_finite()
        && config.drift_per_year.is_finite())
    {
        return Err(AppError::new(2, "Invalid sample temperature settings."));
    }
    if !config.noise_sd.is_finite() || config.noise_sd < 0.0 {
        return Err(AppError::new(2, "Sample noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sd.max(1e-9))
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut observations = Vec::with_capacity(config.days * config.per_day);

    for i in 0..config.days {
        let date = config
            .start
            .checked_add_signed(Duration::days(i as i64))
            .ok_or_else(|| AppError::new(2, "Sample date range overflows the calendar."))?;

        // Coldest around early January, warmest around early July.
        let phase = 2.0 * std::f64::consts::PI * (date.ordinal0() as f64 / DAYS_PER_YEAR);
        let seasonal = -config.amplitude * phase.cos();
        let drift = config.drift_per_year * (i as f64 / DAYS_PER_YEAR);
        let day_mean = config.base_temp + seasonal + drift;

        for _ in 0..config.per_day {
            let noise = normal.sample(&mut rng);
            observations.push(Observation {
                date,
                temperature: day_mean + noise,
            });
        }
    }

    Ok(observations)
}

/// Write observations as a CSV the ingest module accepts.
pub fn write_sample_csv(path: &Path, observations: &[Observation]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create sample CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "date,actual_mean_temp")
        .map_err(|e| AppError::new(2, format!("Failed to write sample CSV header: {e}")))?;
    for obs in observations {
        writeln!(file, "{},{:.2}", obs.date, obs.temperature)
            .map_err(|e| AppError::new(2, format!("Failed to write sample CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let config = SampleConfig { days: 10, ..SampleConfig::default() };
        let a = generate_observations(&config).unwrap();
        let b = generate_observations(&config).unwrap();
        assert_eq!(a.len(), 30);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.temperature, y.temperature);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_observations(&SampleConfig { days: 5, seed: 1, ..SampleConfig::default() }).unwrap();
        let b = generate_observations(&SampleConfig { days: 5, seed: 2, ..SampleConfig::default() }).unwrap();
        assert!(a.iter().zip(b.iter()).any(|(x, y)| x.temperature != y.temperature));
    }

    #[test]
    fn per_day_readings_share_the_date() {
        let config = SampleConfig { days: 2, per_day: 4, ..SampleConfig::default() };
        let obs = generate_observations(&config).unwrap();
        assert_eq!(obs.len(), 8);
        assert!(obs[..4].iter().all(|o| o.date == obs[0].date));
        assert!(obs[4..].iter().all(|o| o.date == obs[4].date));
    }

    #[test]
    fn zero_days_is_rejected() {
        let config = SampleConfig { days: 0, ..SampleConfig::default() };
        assert_eq!(generate_observations(&config).unwrap_err().exit_code(), 2);
    }
}
