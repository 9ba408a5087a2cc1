//! History command for showing recorded breaks.

use std::io::Write;

use anyhow::{Context, Result};
use rb_log::{Summary, read_entries, summarize};
use serde::Serialize;

use crate::Config;

#[derive(Debug, Serialize)]
struct HistoryOutput<'a> {
    path: &'a std::path::Path,
    entries: &'a [u64],
    summary: Summary,
}

/// Runs the history command.
pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let entries = read_entries(&config.log_path)
        .with_context(|| format!("failed to read {}", config.log_path.display()))?;
    let summary = summarize(&entries);

    if json {
        let output = HistoryOutput {
            path: &config.log_path,
            entries: &entries,
            summary,
        };
        serde_json::to_writer_pretty(&mut *writer, &output).context("failed to serialize history")?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Rest log: {}", config.log_path.display())?;

    if entries.is_empty() {
        writeln!(writer, "No breaks recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Breaks:")?;
    for (idx, busy_ticks) in entries.iter().enumerate() {
        writeln!(writer, "{:>4}. {busy_ticks} busy ticks", idx + 1)?;
    }
    writeln!(
        writer,
        "Total:   {} busy ticks over {} breaks",
        summary.total_busy_ticks, summary.entries
    )?;
    writeln!(writer, "Mean:    {}", summary.mean_busy_ticks)?;
    writeln!(writer, "Longest: {}", summary.max_busy_ticks)?;

    Ok(())
}
