//! CLI subcommand implementations.

pub mod history;
pub mod idle;
pub mod run;
