use std::error::Error as _;
use std::io::{self, Write};

use thiserror::Error;

use crate::arith::sum;
use crate::console::{Console, WriteConsole};
use crate::guard::{guarded, Guarded};
use crate::utils::ProgramOpts;

/// Line printed by the completion step on every run.
pub const COMPLETION_MESSAGE: &str = "Finally block executed";

#[derive(Error, Debug)]
pub enum ProgramError {
  #[error("{0}")]
  Injected(String),
  #[error("failed to write output")]
  Output(#[from] io::Error),
}

impl ProgramError {
  /// The error and its sources joined with `: `, as printed on the `Exception:` line.
  pub fn message(&self) -> String {
    let mut message = self.to_string();
    let mut source = self.source();
    while let Some(err) = source {
      message.push_str(": ");
      message.push_str(&err.to_string());
      source = err.source();
    }
    message
  }
}

/// What a run computed. Nothing in here is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
  /// The printed sum, if the guarded block completed.
  pub sum: Option<i32>,
  /// Message of the error caught by the handler, if any.
  pub caught: Option<String>,
  /// Result of the second summation.
  pub trailing: i32,
}

/// The entry routine.
///
/// Prints `Sum: <a + b>` inside a guarded block, prints `Exception: <message>`
/// if that block fails, then always prints [`COMPLETION_MESSAGE`]. Finally it
/// sums the trailing operands and keeps the result in the [`RunReport`].
#[derive(Debug, Clone, Default)]
pub struct Program {
  opts: ProgramOpts,
}

impl Program {
  pub fn new(opts: ProgramOpts) -> Self {
    Self { opts }
  }

  #[tracing::instrument(skip_all)]
  pub fn run(&self, console: &mut dyn Console) -> Result<RunReport, ProgramError> {
    let outcome = guarded(
      console,
      |console| -> Result<i32, ProgramError> {
        let (a, b) = self.opts.operands();
        let c = sum(a, b);
        tracing::debug!(a, b, sum = c, "computed guarded sum");
        if let Some(message) = self.opts.fault() {
          return Err(ProgramError::Injected(message.to_string()));
        }
        console.line(&format!("Sum: {c}"))?;
        Ok(c)
      },
      |console, err| -> Result<(), ProgramError> {
        let message = err.message();
        tracing::warn!(%message, "guarded block failed");
        console.line(&format!("Exception: {message}"))?;
        Ok(())
      },
      |console| -> Result<(), ProgramError> {
        console.line(COMPLETION_MESSAGE)?;
        Ok(())
      },
    )?;

    let (a, b) = self.opts.trailing_operands();
    let trailing = sum(a, b);
    tracing::debug!(a, b, sum = trailing, "computed trailing sum");

    let report = match outcome {
      Guarded::Completed(c) => RunReport {
        sum: Some(c),
        caught: None,
        trailing,
      },
      Guarded::Caught(err) => RunReport {
        sum: None,
        caught: Some(err.message()),
        trailing,
      },
    };
    Ok(report)
  }
}

/// Runs the default program against `out`.
pub fn run_default(out: impl Write) -> Result<RunReport, ProgramError> {
  Program::default().run(&mut WriteConsole::new(out))
}

#[cfg(test)]
mod tests {
  use std::io;

  use mockall::Sequence;

  use super::*;
  use crate::console::MockConsole;
  use crate::utils::{with_fault, with_operands, with_trailing_operands};

  fn setup_logger() {
    let _ = tracing_subscriber::fmt()
      .with_test_writer()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .try_init();
  }

  fn expect_line(console: &mut MockConsole, seq: &mut Sequence, expected: &'static str) {
    console
      .expect_line()
      .withf(move |text| text == expected)
      .times(1)
      .in_sequence(seq)
      .returning(|_| Ok(()));
  }

  #[test]
  fn test_default_output() {
    setup_logger();

    let mut out = Vec::new();
    let report = run_default(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Sum: 15\nFinally block executed\n");
    assert_eq!(
      report,
      RunReport {
        sum: Some(15),
        caught: None,
        trailing: 7,
      }
    );
  }

  #[test]
  fn test_line_order() {
    let mut console = MockConsole::new();
    let mut seq = Sequence::new();
    expect_line(&mut console, &mut seq, "Sum: 15");
    expect_line(&mut console, &mut seq, "Finally block executed");

    let report = Program::default().run(&mut console).unwrap();
    assert_eq!(report.trailing, 7);
  }

  #[test]
  fn test_injected_fault_still_completes() {
    setup_logger();

    let mut console = MockConsole::new();
    let mut seq = Sequence::new();
    expect_line(&mut console, &mut seq, "Exception: injected");
    expect_line(&mut console, &mut seq, "Finally block executed");

    let program = Program::new(ProgramOpts::default().with_options(vec![with_fault("injected")]));
    let report = program.run(&mut console).unwrap();

    assert_eq!(report.sum, None);
    assert_eq!(report.caught.as_deref(), Some("injected"));
    assert_eq!(report.trailing, 7);
  }

  #[test]
  fn test_failed_sum_line_is_caught() {
    let mut console = MockConsole::new();
    let mut seq = Sequence::new();
    console
      .expect_line()
      .withf(|text| text == "Sum: 15")
      .times(1)
      .in_sequence(&mut seq)
      .returning(|_| Err(io::Error::new(io::ErrorKind::Other, "disk full")));
    expect_line(
      &mut console,
      &mut seq,
      "Exception: failed to write output: disk full",
    );
    expect_line(&mut console, &mut seq, "Finally block executed");

    let report = Program::default().run(&mut console).unwrap();
    assert_eq!(report.sum, None);
    assert_eq!(
      report.caught.as_deref(),
      Some("failed to write output: disk full")
    );
  }

  #[test]
  fn test_failed_completion_line_is_returned() {
    let mut console = MockConsole::new();
    let mut seq = Sequence::new();
    expect_line(&mut console, &mut seq, "Sum: 15");
    console
      .expect_line()
      .withf(|text| text == COMPLETION_MESSAGE)
      .times(1)
      .in_sequence(&mut seq)
      .returning(|_| Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")));

    let err = Program::default().run(&mut console).unwrap_err();
    assert!(matches!(err, ProgramError::Output(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
  }

  #[test]
  fn test_output_error_keeps_io_error_as_source() {
    let err = ProgramError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
    assert_eq!(err.to_string(), "failed to write output");
    assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("disk full"));
    assert_eq!(err.message(), "failed to write output: disk full");

    let err = ProgramError::Injected("boom".to_string());
    assert!(err.source().is_none());
    assert_eq!(err.message(), "boom");
  }

  #[test]
  fn test_custom_operands() {
    let opts = ProgramOpts::default()
      .with_options(vec![with_operands(i32::MAX, 1)])
      .with_options(vec![with_trailing_operands(-3, -4)]);

    let mut console = WriteConsole::new(Vec::new());
    let report = Program::new(opts).run(&mut console).unwrap();

    let out = String::from_utf8(console.into_inner()).unwrap();
    assert_eq!(out, format!("Sum: {}\n{}\n", i32::MIN, COMPLETION_MESSAGE));
    assert_eq!(report.sum, Some(i32::MIN));
    assert_eq!(report.trailing, -7);
  }
}
