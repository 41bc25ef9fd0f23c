//! CSV ingest and normalization.
//!
//! This module turns a raw weather CSV into a clean set of
//! `(date, temperature)` observations that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation or fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Observation, RunConfig};
use crate::error::AppError;

/// Temperature column names we accept, in resolution order.
const TEMP_COLUMNS: [&str; 4] = ["actual_mean_temp", "temperature", "temp", "mean_temp"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed observations + row errors + counters.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub observations: Vec<Observation>,
    /// Which temperature column the data came from.
    pub temp_column: String,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and validate observations from the configured CSV file.
pub fn load_observations(config: &RunConfig) -> Result<IngestedData, AppError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", config.csv_path.display()),
        )
    })?;

    read_observations(file, config)
}

/// Ingest from any reader (separated from `load_observations` for testability).
pub fn read_observations<R: Read>(reader: R, config: &RunConfig) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get("date")
        .ok_or_else(|| AppError::new(2, "Missing required column: `date`"))?;

    let (temp_column, temp_idx) = resolve_temp_column(&header_map)?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, date_idx, temp_idx) {
            Ok(obs) => {
                if in_window(obs.date, config) {
                    observations.push(obs);
                }
            }
            Err(e) => row_errors.push(RowError { line, message: e }),
        }
    }

    let rows_used = observations.len();
    if rows_used == 0 {
        return Err(AppError::new(
            3,
            "No valid observations remain after parsing/filtering.",
        ));
    }

    Ok(IngestedData {
        observations,
        temp_column,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_temp_column(header_map: &HashMap<String, usize>) -> Result<(String, usize), AppError> {
    for name in TEMP_COLUMNS {
        if let Some(&idx) = header_map.get(name) {
            return Ok((name.to_string(), idx));
        }
    }
    Err(AppError::new(
        2,
        format!(
            "Missing temperature column: expected one of {}.",
            TEMP_COLUMNS
                .iter()
                .map(|c| format!("`{c}`"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ))
}

fn parse_row(record: &StringRecord, date_idx: usize, temp_idx: usize) -> Result<Observation, String> {
    let date_str = record
        .get(date_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing `date` value.".to_string())?;
    let date = parse_date(date_str)?;

    let temp_str = record
        .get(temp_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing temperature value.".to_string())?;
    let temperature = temp_str
        .parse::<f64>()
        .map_err(|_| format!("Invalid temperature '{temp_str}'."))?;
    if !temperature.is_finite() {
        return Err(format!("Non-finite temperature '{temp_str}'."));
    }

    Ok(Observation { date, temperature })
}

fn in_window(date: NaiveDate, config: &RunConfig) -> bool {
    if let Some(from) = config.date_from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = config.date_to {
        if date > to {
            return false;
        }
    }
    true
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // We recommend ISO dates (`YYYY-MM-DD`), but weather exports often use
    // `MM/DD/YYYY` (US feeds) or `DD-MM-YYYY`. We accept a small set of
    // common formats to reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD-MM-YYYY."
    ))
}
