//! Append-only run log kept in the scanned root. Human-readable, never
//! parsed back: a header line with a label and timestamp, one indented line
//! per item, one blank trailer line. Nothing is written for an empty run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::Result;

pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%b-%d %H:%M:%S";

pub fn append_run(log_path: &Path, label: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "{} {}",
        label,
        Local::now().format(LOG_TIMESTAMP_FORMAT)
    )?;
    for item in items {
        writeln!(file, "    {}", item)?;
    }
    writeln!(file)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("cleanLog.log");

        append_run(&log, "tv cleanup", &[]).unwrap();
        assert!(!log.exists());
    }

    #[test]
    fn test_section_format() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("cleanLog.log");

        append_run(&log, "tv cleanup", &["/lib/a.srt".to_string()]).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tv cleanup "));
        assert_eq!(lines[1], "    /lib/a.srt");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_runs_append() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("cleanLog.log");

        append_run(&log, "first", &["a".to_string()]).unwrap();
        append_run(&log, "second", &["b".to_string(), "c".to_string()]).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        assert!(content.contains("first"));
        assert!(content.contains("second"));
        assert_eq!(content.lines().filter(|l| l.starts_with("    ")).count(), 3);
    }
}
