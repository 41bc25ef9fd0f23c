//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily mean temperatures: `o`
//! - fitted trendline: `-` segment
//! - optional highlights: `W` (warm anomaly), `C` (cold anomaly)

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{DailyPoint, SeriesFile, TempUnit, TrendSegment, MS_PER_DAY};
use crate::fit::date_epoch_ms;
use crate::report::Anomalies;

/// Render a plot for an in-memory daily series.
///
/// The trendline overlay is optional; a degenerate fit simply renders points
/// without it.
pub fn render_ascii_plot(
    daily: &[DailyPoint],
    trend: Option<&TrendSegment>,
    unit: TempUnit,
    width: usize,
    height: usize,
    anomalies: Option<&Anomalies>,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max, date_min, date_max)) = x_range(daily) else {
        return "Plot: no data\n".to_string();
    };

    // Determine y-range from daily points and trend endpoints.
    let (y_min, y_max) = y_range(daily, trend).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the trendline first (so points can overlay).
    if let Some(seg) = trend {
        let x0 = map_x(date_epoch_ms(seg.start.date), x_min, x_max, width);
        let y0 = map_y(seg.start.avg_temp, y_min, y_max, height);
        let x1 = map_x(date_epoch_ms(seg.end.date), x_min, x_max, width);
        let y1 = map_y(seg.end.avg_temp, y_min, y_max, height);
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }

    // Highlight sets (dates).
    let (warm_dates, cold_dates): (HashSet<NaiveDate>, HashSet<NaiveDate>) = anomalies
        .map(|a| {
            (
                a.warm.iter().map(|d| d.point.date).collect(),
                a.cold.iter().map(|d| d.point.date).collect(),
            )
        })
        .unwrap_or_default();

    for p in daily {
        let x = map_x(date_epoch_ms(p.date), x_min, x_max, width);
        let y = map_y(p.avg_temp, y_min, y_max, height);

        let ch = if warm_dates.contains(&p.date) {
            'W'
        } else if cold_dates.contains(&p.date) {
            'C'
        } else {
            'o'
        };

        grid[y][x] = ch;
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: dates=[{date_min}, {date_max}] | temp=[{y_min:.2}, {y_max:.2}]{}\n",
        unit.symbol()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render a plot from a saved series JSON file.
pub fn render_ascii_plot_from_series(series: &SeriesFile, width: usize, height: usize) -> String {
    render_ascii_plot(
        &series.daily,
        series.trend.as_ref(),
        series.unit,
        width,
        height,
        None,
    )
}

fn x_range(daily: &[DailyPoint]) -> Option<(f64, f64, NaiveDate, NaiveDate)> {
    let mut date_min = None;
    let mut date_max = None;
    for p in daily {
        date_min = Some(date_min.map_or(p.date, |d: NaiveDate| d.min(p.date)));
        date_max = Some(date_max.map_or(p.date, |d: NaiveDate| d.max(p.date)));
    }
    let (date_min, date_max) = (date_min?, date_max?);

    let mut x_min = date_epoch_ms(date_min);
    let mut x_max = date_epoch_ms(date_max);
    if x_max <= x_min {
        // Single-day series: widen the window so mapping stays well-defined.
        x_min -= MS_PER_DAY / 2.0;
        x_max += MS_PER_DAY / 2.0;
    }

    Some((x_min, x_max, date_min, date_max))
}

fn y_range(daily: &[DailyPoint], trend: Option<&TrendSegment>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in daily {
        min_y = min_y.min(p.avg_temp);
        max_y = max_y.max(p.avg_temp);
    }
    if let Some(seg) = trend {
        for v in [seg.start.avg_temp, seg.end.avg_temp] {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let daily = vec![
            DailyPoint { date: d(1), avg_temp: 100.0 },
            DailyPoint { date: d(10), avg_temp: 110.0 },
        ];

        let txt = render_ascii_plot(&daily, None, TempUnit::Fahrenheit, 10, 5, None);
        let expected = concat!(
            "Plot: dates=[2024-06-01, 2024-06-10] | temp=[99.50, 110.50]°F\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn trend_overlay_draws_segment_under_points() {
        let daily: Vec<DailyPoint> = (0..10)
            .map(|i| DailyPoint {
                date: d(1 + i),
                avg_temp: 60.0 + i as f64,
            })
            .collect();
        let trend = crate::fit::fit(&daily).unwrap();

        let txt = render_ascii_plot(&daily, Some(&trend), TempUnit::Fahrenheit, 30, 10, None);
        assert!(txt.contains('-'));
        assert!(txt.contains('o'));
    }

    #[test]
    fn anomaly_highlights_replace_point_markers() {
        let daily = vec![
            DailyPoint { date: d(1), avg_temp: 60.0 },
            DailyPoint { date: d(2), avg_temp: 70.0 },
            DailyPoint { date: d(3), avg_temp: 55.0 },
        ];
        let trend = crate::fit::fit(&daily).unwrap();
        let deviations = crate::report::compute_deviations(&daily, &trend).unwrap();
        let anomalies = crate::report::rank_anomalies(&deviations, 1);

        let txt = render_ascii_plot(
            &daily,
            Some(&trend),
            TempUnit::Fahrenheit,
            20,
            8,
            Some(&anomalies),
        );
        assert!(txt.contains('W'));
        assert!(txt.contains('C'));
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let txt = render_ascii_plot(&[], None, TempUnit::Celsius, 10, 5, None);
        assert_eq!(txt, "Plot: no data\n");
    }
}
