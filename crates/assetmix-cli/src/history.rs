//! Append-only run history.
//!
//! Every line a run prints is appended to the history file with a local
//! timestamp prefix, so earlier runs can be compared later.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::CliResult;

/// Timestamp layout at the start of each history line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Run history file.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Creates a history log writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `lines`, each stamped with the current local time.
    pub fn append<S: AsRef<str>>(&self, lines: &[S]) -> CliResult<()> {
        self.append_at(Local::now().naive_local(), lines)
    }

    /// Appends `lines` stamped with `at`.
    pub fn append_at<S: AsRef<str>>(&self, at: NaiveDateTime, lines: &[S]) -> CliResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        let stamp = at.format(TIMESTAMP_FORMAT).to_string();
        for line in lines {
            writeln!(writer, "{stamp} {}", line.as_ref())?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_lines_are_stamped() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join("history.log"));

        log.append_at(at(9, 5, 7), &["Analyzing all accounts", ""]).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "2024-03-09 09:05:07 Analyzing all accounts\n2024-03-09 09:05:07 \n"
        );
    }

    #[test]
    fn test_runs_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join("logs").join("history.log"));

        log.append_at(at(10, 0, 0), &["first"]).unwrap();
        log.append_at(at(11, 0, 0), &["second"]).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec!["2024-03-09 10:00:00 first", "2024-03-09 11:00:00 second"]
        );
    }
}
