//! Storage layer for restbreak.
//!
//! Every time the user takes a break after a busy episode, the number of busy
//! ticks in that episode is appended to a plain text log.
//!
//! # Format
//!
//! One base-10 integer per line, newline terminated. The file is only ever
//! appended to, and each write is flushed before [`RestLog::append`] returns,
//! so an entry is on disk by the time the next tick runs.
//!
//! Blank lines are ignored when reading; any other line that is not an
//! integer is reported with its line number.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Rest log errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file could not be opened or created.
    #[error("failed to open rest log {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An entry could not be written.
    #[error("failed to append to rest log {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log file could not be read.
    #[error("failed to read rest log {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A line did not hold a busy-tick count.
    #[error("invalid entry on line {line} of {}: {content:?}", path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

/// Append-only handle on the rest log.
#[derive(Debug)]
pub struct RestLog {
    path: PathBuf,
    file: File,
}

impl RestLog {
    /// Opens the log for appending, creating it and its parent directory if
    /// needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LogError::Open {
                path: path.clone(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Open {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "opened rest log");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one busy-tick count and flushes it.
    pub fn append(&mut self, busy_ticks: u64) -> Result<(), LogError> {
        writeln!(self.file, "{busy_ticks}")
            .and_then(|()| self.file.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(busy_ticks, "rest logged");
        Ok(())
    }
}

/// Reads every entry of a rest log.
///
/// A missing file is an empty log.
pub fn read_entries(path: &Path) -> Result<Vec<u64>, LogError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LogError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.trim().parse().map_err(|_| LogError::InvalidLine {
                path: path.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

/// Aggregate view of a rest log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of recorded breaks.
    pub entries: usize,
    /// Busy ticks across all breaks.
    pub total_busy_ticks: u64,
    /// Average busy ticks per break, rounded down.
    pub mean_busy_ticks: u64,
    /// Longest busy episode.
    pub max_busy_ticks: u64,
}

/// Summarizes a list of entries.
pub fn summarize(entries: &[u64]) -> Summary {
    let total_busy_ticks = entries.iter().fold(0u64, |acc, n| acc.saturating_add(*n));
    let mean_busy_ticks = u64::try_from(entries.len())
        .ok()
        .filter(|len| *len > 0)
        .map_or(0, |len| total_busy_ticks / len);

    Summary {
        entries: entries.len(),
        total_busy_ticks,
        mean_busy_ticks,
        max_busy_ticks: entries.iter().copied().max().unwrap_or(0),
    }
}
