//! restbreak CLI library.
//!
//! This crate provides the `rb` command line interface and the presentation
//! glue that turns policy events into indicator changes, notifications and
//! rest log entries.

mod cli;
pub mod commands;
mod config;
pub mod presentation;

pub use cli::{Cli, Commands};
pub use config::Config;
