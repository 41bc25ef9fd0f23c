//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the ingest/aggregate/trend pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ttrend` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ttrend weather.csv` to behave like `ttrend tui weather.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &run.ingest,
            &run.stats,
            run.trend.as_ref(),
            run.trend_note.as_deref(),
            &config,
        )
    );

    if let Some(anomalies) = &run.anomalies {
        println!("{}", crate::report::format_anomalies(anomalies, config.unit));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.daily,
            run.trend.as_ref(),
            config.unit,
            config.plot_width,
            config.plot_height,
            run.anomalies.as_ref(),
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.daily, &run.deviations, config.unit)?;
    }
    if let Some(path) = &config.export_series {
        crate::io::series::write_series_json(path, &run.daily, run.trend.as_ref(), config.unit)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let series = crate::io::series::read_series_json(&args.series)?;
    let plot = crate::plot::render_ascii_plot_from_series(&series, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_tui(args: FitArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        start: args.start,
        days: args.days,
        per_day: args.per_day,
        seed: args.seed,
        base_temp: args.base_temp,
        amplitude: args.amplitude,
        drift_per_year: args.drift_per_year,
        noise_sd: args.noise_sd,
    };
    let observations = crate::data::generate_observations(&config)?;
    crate::data::write_sample_csv(&args.out, &observations)?;
    println!(
        "Wrote {} observations over {} days to {}",
        observations.len(),
        config.days,
        args.out.display()
    );
    Ok(())
}

pub fn run_config_from_args(args: &FitArgs) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        unit: args.unit,
        date_from: args.date_from,
        date_to: args.date_to,
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_series: args.export_series.clone(),
    }
}

/// Rewrite argv so `ttrend <csv>` defaults to `ttrend tui <csv>`.
///
/// Rules:
/// - `ttrend weather.csv ...`       -> `ttrend tui weather.csv ...`
/// - `ttrend --unit celsius x.csv`  -> `ttrend tui --unit celsius x.csv`
/// - `ttrend --help/--version/-h`   -> unchanged (show top-level help/version)
/// - explicit subcommands           -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        // Bare `ttrend`: let clap print the missing-subcommand help.
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "plot" | "tui" | "sample");
    if is_subcommand {
        return argv;
    }

    // Anything else (a CSV path or tui flags) is treated as "tui args".
    argv.insert(1, "tui".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_is_unchanged() {
        assert_eq!(rewrite_args(args(&["ttrend"])), args(&["ttrend"]));
    }

    #[test]
    fn csv_path_defaults_to_tui() {
        assert_eq!(
            rewrite_args(args(&["ttrend", "weather.csv"])),
            args(&["ttrend", "tui", "weather.csv"])
        );
    }

    #[test]
    fn flags_default_to_tui() {
        assert_eq!(
            rewrite_args(args(&["ttrend", "--unit", "celsius", "x.csv"])),
            args(&["ttrend", "tui", "--unit", "celsius", "x.csv"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_unchanged() {
        for first in ["fit", "plot", "tui", "sample", "--help", "-V", "help"] {
            let argv = args(&["ttrend", first, "x"]);
            assert_eq!(rewrite_args(argv.clone()), argv);
        }
    }
}
