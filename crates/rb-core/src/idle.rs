//! Idle time sources.
//!
//! The scheduler only needs "milliseconds since the last input event". On X11
//! this is what `xprintidle` prints, so the default source runs an external
//! program and parses its output. Any failure is fatal to the caller.

use std::num::ParseIntError;
use std::process::Command;

use thiserror::Error;

/// Program queried when no other idle command is configured.
pub const DEFAULT_IDLE_COMMAND: &str = "xprintidle";

/// Idle query errors.
#[derive(Debug, Error)]
pub enum IdleError {
    /// The idle program could not be started.
    #[error("failed to run idle command `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The idle program exited unsuccessfully.
    #[error("idle command `{program}` exited with {status}: {stderr}")]
    Status {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    /// The idle program printed something other than an integer.
    #[error("idle command printed {output:?}, expected milliseconds")]
    Parse {
        output: String,
        #[source]
        source: ParseIntError,
    },
}

/// Something that can report how long the user has been idle.
pub trait IdleTimeSource {
    /// Returns milliseconds since the last user input.
    fn idle_ms(&mut self) -> Result<u64, IdleError>;
}

/// Parses the stdout of an idle program as base-10 milliseconds.
pub fn parse_idle_output(output: &str) -> Result<u64, IdleError> {
    let trimmed = output.trim();
    trimmed.parse().map_err(|source| IdleError::Parse {
        output: trimmed.to_string(),
        source,
    })
}

/// Idle source backed by an external program such as `xprintidle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandIdleSource {
    program: String,
    args: Vec<String>,
}

impl Default for CommandIdleSource {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_COMMAND, Vec::<String>::new())
    }
}

impl CommandIdleSource {
    /// Creates a source that runs `program` with `args` on every query.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl IdleTimeSource for CommandIdleSource {
    fn idle_ms(&mut self) -> Result<u64, IdleError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| IdleError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(IdleError::Status {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let idle_ms = parse_idle_output(&String::from_utf8_lossy(&output.stdout))?;
        tracing::trace!(idle_ms, "queried idle time");
        Ok(idle_ms)
    }
}
