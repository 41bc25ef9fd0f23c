//! Command-line parsing for the daily temperature trend tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/fitting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::TempUnit;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ttrend", version, about = "Daily temperature trend charting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a weather CSV, fit the trendline, print a report, and optionally plot/export.
    Fit(FitArgs),
    /// Plot a previously exported series JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI chart.
    ///
    /// This uses the same underlying pipeline as `ttrend fit`, but renders the
    /// series in a terminal UI using Ratatui, with a movable cursor readout and
    /// a toggleable trendline overlay.
    Tui(FitArgs),
    /// Generate a synthetic weather CSV for demos/testing.
    Sample(SampleArgs),
}

/// Common options for fitting and the TUI.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with `date` and a temperature column
    /// (`actual_mean_temp`, `temperature`, `temp`, or `mean_temp`).
    pub csv: PathBuf,

    /// Unit the input temperatures are expressed in.
    #[arg(long, value_enum, default_value_t = TempUnit::Fahrenheit)]
    pub unit: TempUnit,

    /// Only use observations on or after this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub date_from: Option<NaiveDate>,

    /// Only use observations on or before this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub date_to: Option<NaiveDate>,

    /// Show top-N warm and cold anomaly days.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-day results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the series (daily grid + trend) to JSON.
    #[arg(long = "export-series")]
    pub export_series: Option<PathBuf>,
}

/// Options for plotting a saved series.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Series JSON file produced by `ttrend fit --export-series`.
    #[arg(long, value_name = "JSON")]
    pub series: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for generating a synthetic weather CSV.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// First date of the sample.
    #[arg(long, value_name = "DATE", default_value = "2024-01-01")]
    pub start: NaiveDate,

    /// Number of days to generate.
    #[arg(long, default_value_t = 365)]
    pub days: usize,

    /// Readings per day (averaged by the aggregation step).
    #[arg(long, default_value_t = 3)]
    pub per_day: usize,

    /// Random seed (sample is deterministic for a given seed).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Annual mean temperature.
    #[arg(long, default_value_t = 55.0)]
    pub base_temp: f64,

    /// Seasonal swing around the mean.
    #[arg(long, default_value_t = 20.0)]
    pub amplitude: f64,

    /// Linear drift in degrees per year.
    #[arg(long, default_value_t = 0.5)]
    pub drift_per_year: f64,

    /// Standard deviation of per-reading noise.
    #[arg(long, default_value_t = 3.0)]
    pub noise_sd: f64,
}
