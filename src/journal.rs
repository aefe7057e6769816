// ABOUTME: Deployment journal written to the log file and stdout.
// ABOUTME: One timestamped line per event, tagged INFO/ERROR/STATE/GRACEFUL.

use crate::error::{Error, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only journal shared by the whole run. Every line also goes to
/// stdout so a supervisor captures the same record.
#[derive(Debug)]
pub struct Journal {
    file: Mutex<File>,
}

impl Journal {
    /// Open (or create) the journal in append mode. Failure here aborts
    /// the run before any git or docker interaction.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write_line("INFO:", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write_line("ERROR:", message.as_ref());
    }

    pub fn state(&self, message: impl AsRef<str>) {
        self.write_line("STATE:", message.as_ref());
    }

    pub fn graceful(&self, message: impl AsRef<str>) {
        self.write_line("GRACEFUL:", message.as_ref());
    }

    fn write_line(&self, tag: &str, message: &str) {
        let line = format!(
            "{} - {} {}",
            Local::now().format(TIMESTAMP_FORMAT),
            tag,
            message
        );
        println!("{line}");
        let mut file = self.file.lock().expect("journal mutex poisoned");
        if let Err(e) = writeln!(file, "{line}") {
            tracing::warn!("journal write failed: {e}");
        }
    }
}
