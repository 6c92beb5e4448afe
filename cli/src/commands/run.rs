use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use testcfg_core::utils::{setup_logger, setup_logger_with_default, with_fault, ProgramOpts};
use testcfg_core::{Program, WriteConsole};

#[derive(Parser, Debug, Default)]
#[command(name = "run", about = "(default) Run the program and print its output")]
pub struct RunCmd {
  /// Log at debug level when RUST_LOG is not set. Logs go to stderr.
  #[clap(short, long, action)]
  verbose: bool,

  /// Make the guarded block fail with this message.
  #[clap(long, value_name = "MESSAGE", hide = true)]
  inject_fault: Option<String>,
}

impl RunCmd {
  pub fn run(&self) -> Result<()> {
    if self.verbose {
      setup_logger_with_default("debug");
    } else {
      setup_logger();
    }

    let opts = match self.inject_fault {
      Some(ref message) => ProgramOpts::default().with_options(vec![with_fault(message.as_str())]),
      None => ProgramOpts::default(),
    };

    let stdout = io::stdout().lock();
    let report = Program::new(opts)
      .run(&mut WriteConsole::new(stdout))
      .context("while running program")?;
    tracing::info!(?report, "program finished");

    Ok(())
  }
}
