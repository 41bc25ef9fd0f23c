//! Ratatui-based terminal UI.
//!
//! The terminal counterpart of a hover-and-toggle temperature chart: the daily
//! series is drawn with Plotters, a keyboard cursor plays the role of the
//! mouse tooltip (a readout panel shows the selected day), and the trendline
//! overlay can be toggled on and off.

use std::io;
use std::time::Duration;

use chrono::DateTime;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::cli::FitArgs;
use crate::domain::{RunConfig, TempUnit};
use crate::error::AppError;
use crate::fit::date_epoch_ms;

mod plotters_chart;

use plotters_chart::TempPlottersChart;

/// Start the TUI.
pub fn run(args: FitArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: RunConfig,
    run: RunOutput,
    /// Whether the trendline overlay is drawn (the original chart's checkbox).
    show_trend: bool,
    /// Unit used for display; data stays in the ingest unit.
    display_unit: TempUnit,
    /// Index of the selected day in `run.daily` (the "tooltip" target).
    cursor: usize,
    status: String,
}

impl App {
    fn new(args: FitArgs) -> Result<Self, AppError> {
        let config = crate::app::run_config_from_args(&args);
        let run = crate::app::pipeline::run_fit(&config)?;

        let status = match (&run.trend, &run.trend_note) {
            (Some(_), _) => format!("Loaded {} days.", run.daily.len()),
            (None, Some(note)) => format!("Loaded {} days. No trendline: {note}", run.daily.len()),
            (None, None) => format!("Loaded {} days.", run.daily.len()),
        };

        Ok(Self {
            display_unit: config.unit,
            config,
            run,
            show_trend: true,
            cursor: 0,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('t') => {
                if self.run.trend.is_some() {
                    self.show_trend = !self.show_trend;
                    self.status = if self.show_trend {
                        "Trendline shown.".to_string()
                    } else {
                        "Trendline hidden.".to_string()
                    };
                } else {
                    let note = self.run.trend_note.as_deref().unwrap_or("not available");
                    self.status = format!("No trendline: {note}");
                }
            }
            KeyCode::Char('u') => {
                self.display_unit = self.display_unit.toggled();
                self.status = format!("Display unit: {}", self.display_unit.symbol());
            }
            KeyCode::Char('r') => {
                self.run = crate::app::pipeline::run_fit(&self.config)?;
                self.cursor = self.cursor.min(self.run.daily.len().saturating_sub(1));
                self.status = format!("Reloaded {} days.", self.run.daily.len());
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor + 1 < self.run.daily.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.run.daily.len().saturating_sub(1);
            }
            _ => {}
        }

        Ok(false)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ttrend", Style::default().fg(Color::Cyan)),
            Span::raw(" — daily mean temperature"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "file: {} | days: {} | dates: [{}, {}] | unit: {}",
                self.config.csv_path.display(),
                self.run.stats.n_days,
                self.run.stats.date_min,
                self.run.stats.date_max,
                self.display_unit.symbol(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let trend_line = match &self.run.trend {
            Some(seg) => format!(
                "trend: {:+.4}{}/day ({:+.2}{}/year) [{}]",
                seg.line.slope_per_day(),
                self.config.unit.symbol(),
                seg.line.slope_per_year(),
                self.config.unit.symbol(),
                if self.show_trend { "shown" } else { "hidden" },
            ),
            None => {
                let note = self.run.trend_note.as_deref().unwrap_or("not available");
                format!("trend: none ({note})")
            }
        };
        lines.push(Line::from(Span::styled(
            trend_line,
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_readout(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Average Temperature")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (series, trend, cursor, x_bounds, y_bounds) = self.chart_series();

        let widget = TempPlottersChart {
            series: &series,
            trend: trend.as_deref(),
            cursor,
            x_bounds,
            y_bounds,
            x_label: "date",
            y_label: format!("temp ({})", self.display_unit.symbol()),
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_temp,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_readout(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Day readout").borders(Borders::ALL);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(p) = self.run.daily.get(self.cursor) {
            let avg = self.display_unit.convert_from(p.avg_temp, self.config.unit);
            lines.push(Line::from(format!(
                "Date: {}  ({}/{})",
                p.date,
                self.cursor + 1,
                self.run.daily.len()
            )));
            lines.push(Line::from(format!(
                "Avg temp: {avg:.1}{}",
                self.display_unit.symbol()
            )));

            if let Some(dev) = self.run.deviations.get(self.cursor) {
                let trend = self
                    .display_unit
                    .convert_from(dev.trend_temp, self.config.unit);
                // Deviations are an offset, so only the scale factor applies.
                let delta = match (self.config.unit, self.display_unit) {
                    (TempUnit::Fahrenheit, TempUnit::Celsius) => dev.deviation * 5.0 / 9.0,
                    (TempUnit::Celsius, TempUnit::Fahrenheit) => dev.deviation * 9.0 / 5.0,
                    _ => dev.deviation,
                };
                lines.push(Line::from(format!(
                    "Trend: {trend:.1}{}  deviation: {delta:+.1}{}",
                    self.display_unit.symbol(),
                    self.display_unit.symbol()
                )));
            }
        } else {
            lines.push(Line::from("No data."));
        }

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ select day  Home/End jump  t trendline  u unit  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    /// Build chart series for Plotters, converted to the display unit.
    fn chart_series(
        &self,
    ) -> (
        Vec<(f64, f64)>,
        Option<Vec<(f64, f64)>>,
        Option<(f64, f64)>,
        [f64; 2],
        [f64; 2],
    ) {
        let to_display = |v: f64| self.display_unit.convert_from(v, self.config.unit);

        let series: Vec<(f64, f64)> = self
            .run
            .daily
            .iter()
            .map(|p| (date_epoch_ms(p.date), to_display(p.avg_temp)))
            .collect();

        let trend: Option<Vec<(f64, f64)>> = if self.show_trend {
            self.run.trend.as_ref().map(|seg| {
                vec![
                    (date_epoch_ms(seg.start.date), to_display(seg.start.avg_temp)),
                    (date_epoch_ms(seg.end.date), to_display(seg.end.avg_temp)),
                ]
            })
        } else {
            None
        };

        let cursor = self
            .run
            .daily
            .get(self.cursor)
            .map(|p| (date_epoch_ms(p.date), to_display(p.avg_temp)));

        let mut x0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y0 = f64::INFINITY;
        let mut y1 = f64::NEG_INFINITY;
        for &(x, y) in &series {
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }
        if let Some(trend) = &trend {
            for &(_, y) in trend {
                y0 = y0.min(y);
                y1 = y1.max(y);
            }
        }

        if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
            // Single-day series: widen so Plotters still gets a valid range.
            let mid = if x0.is_finite() { x0 } else { 0.0 };
            x0 = mid - crate::domain::MS_PER_DAY / 2.0;
            x1 = mid + crate::domain::MS_PER_DAY / 2.0;
        }
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            let mid = if y0.is_finite() { y0 } else { 0.0 };
            y0 = mid - 1.0;
            y1 = mid + 1.0;
        }

        let pad = ((y1 - y0).abs() * 0.05).max(1e-12);
        let y_bounds = [y0 - pad, y1 + pad];

        (series, trend, cursor, [x0, x1], y_bounds)
    }
}

fn fmt_axis_date(v: f64) -> String {
    DateTime::from_timestamp_millis(v as i64)
        .map(|dt| dt.date_naive().format("%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_temp(v: f64) -> String {
    format!("{v:.1}")
}
