use chrono::NaiveDate;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_DATA_PATH: &str = "data/attendance.json";
const DEFAULT_PORT: u16 = 8080;

/// Fixed teaching window the remaining-class projection runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for SemesterWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 12, 2).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub semester: SemesterWindow,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = SemesterWindow::default();
        let start = date_var("SEMESTER_START").unwrap_or(defaults.start);
        let end = date_var("SEMESTER_END").unwrap_or(defaults.end);
        let semester = if start <= end {
            SemesterWindow { start, end }
        } else {
            warn!(%start, %end, "semester ends before it starts, using defaults");
            defaults
        };

        Self {
            data_path: resolve_data_path(),
            port: port_var(),
            semester,
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}

fn port_var() -> u16 {
    let Ok(value) = env::var("PORT") else {
        return DEFAULT_PORT;
    };
    value.parse::<u16>().unwrap_or_else(|_| {
        warn!(value, "invalid PORT, falling back to {DEFAULT_PORT}");
        DEFAULT_PORT
    })
}

fn date_var(name: &str) -> Option<NaiveDate> {
    let value = env::var(name).ok()?;
    match value.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(name, value, "ignoring unparseable date: {err}");
            None
        }
    }
}
