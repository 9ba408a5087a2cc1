//! Run command: the reminder loop.
//!
//! Opens the rest log, registers the short and long break policies with the
//! scheduler and ticks until Ctrl-C or a fatal error.

use std::io::{self, Write};

use anyhow::{Context, Result};
use rb_core::{CommandIdleSource, Scheduler};
use rb_log::RestLog;

use crate::Config;
use crate::presentation::{Notifier, Presenter};

/// Builds the scheduler described by `config`, rendering to `out`.
pub fn build<W: Write>(
    config: &Config,
    out: W,
) -> Result<Scheduler<CommandIdleSource, Presenter<W>>> {
    let policies = config.policies().context("invalid break thresholds")?;
    let log = RestLog::open(&config.log_path).context("failed to open rest log")?;

    let notifier = Notifier::from_command(config.notify_command.clone());
    let mut presenter = Presenter::new(out, log, notifier);
    presenter.show()?;

    let mut scheduler = Scheduler::new(config.idle_source(), presenter);
    for policy in policies {
        scheduler.add_policy(policy);
    }
    Ok(scheduler)
}

/// Runs the reminder loop on stdout until interrupted.
pub async fn run(config: &Config) -> Result<()> {
    let mut scheduler = build(config, io::stdout())?;

    tokio::select! {
        result = scheduler.start() => match result {
            Ok(never) => match never {},
            Err(e) => Err(e).context("reminder loop stopped"),
        },
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            tracing::info!("exit requested");
            Ok(())
        }
    }
}
