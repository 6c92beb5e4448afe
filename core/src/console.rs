use std::io::{self, Write};

/// Line-oriented output used by the entry routine.
#[mockall::automock]
pub trait Console {
  /// Writes `text` followed by a newline.
  fn line(&mut self, text: &str) -> io::Result<()>;
}

/// A [`Console`] over any byte sink. Every line is flushed as it is written.
#[derive(Debug)]
pub struct WriteConsole<W> {
  inner: W,
}

impl<W: Write> WriteConsole<W> {
  pub fn new(inner: W) -> Self {
    Self { inner }
  }

  pub fn into_inner(self) -> W {
    self.inner
  }
}

impl<W: Write> Console for WriteConsole<W> {
  fn line(&mut self, text: &str) -> io::Result<()> {
    writeln!(self.inner, "{text}")?;
    self.inner.flush()
  }
}
