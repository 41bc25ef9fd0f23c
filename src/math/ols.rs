//! Ordinary least squares for a straight line.
//!
//! The trend fit is a two-parameter regression `y = slope * x + intercept`,
//! solved with the standard closed-form sums:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! Implementation choices:
//! - x values are epoch milliseconds (~1e12), so we center x around its mean
//!   before accumulating sums. The coefficients are mapped back to raw
//!   coordinates afterwards; this is algebraically identical but avoids
//!   catastrophic cancellation in `n·Σx² − (Σx)²`.
//! - Degenerate systems (fewer than two samples, zero x-variance, non-finite
//!   inputs) return `None` instead of NaN/Infinity coefficients.

/// A fitted line in raw x coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit `y = slope * x + intercept` by ordinary least squares.
///
/// Returns `None` if the system is degenerate (see module docs).
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<LineFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    // Centered sums: Σ(x-x̄)(y-ȳ) and Σ(x-x̄)².
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    if sxx == 0.0 {
        // All x identical: the closed-form denominator is zero.
        return None;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    Some(LineFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        // y = 2x + 3 on integer-spaced x.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 3.0).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 3.0).abs() < 1e-12);
    }

    #[test]
    fn recovers_line_at_epoch_ms_magnitudes() {
        // Same line, but x shifted to epoch-millisecond scale. The naive
        // closed form loses most of its precision here; centering does not.
        let base = 1.7e12;
        let xs: Vec<f64> = (0..10).map(|i| base + i as f64 * 86_400_000.0).collect();
        let ys: Vec<f64> = (0..10).map(|i| 50.0 + 0.1 * i as f64).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        let per_day = fit.slope * 86_400_000.0;
        assert!((per_day - 0.1).abs() < 1e-6);
        assert!((fit.slope * xs[0] + fit.intercept - 50.0).abs() < 1e-6);
    }

    #[test]
    fn single_sample_is_degenerate() {
        assert!(fit_line(&[1.0], &[2.0]).is_none());
    }

    #[test]
    fn zero_x_variance_is_degenerate() {
        assert!(fit_line(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn non_finite_input_is_degenerate() {
        assert!(fit_line(&[0.0, f64::NAN], &[1.0, 2.0]).is_none());
        assert!(fit_line(&[0.0, 1.0], &[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn mismatched_lengths_are_degenerate() {
        assert!(fit_line(&[0.0, 1.0, 2.0], &[1.0, 2.0]).is_none());
    }
}
