//! Idle command for checking the idle source.

use std::io::Write;

use anyhow::{Context, Result};
use rb_core::IdleTimeSource;

use crate::Config;

/// Queries the configured idle source once and prints the result.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let mut source = config.idle_source();
    let idle_ms = source
        .idle_ms()
        .with_context(|| format!("failed to query idle time with `{}`", source.program()))?;

    writeln!(writer, "{idle_ms}")?;
    Ok(())
}
