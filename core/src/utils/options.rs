#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOpts {
  operands: (i32, i32),
  trailing_operands: (i32, i32),
  fault: Option<String>,
}

impl ProgramOpts {
  pub fn new() -> Self {
    Self::default()
  }

  // Method to apply options
  pub fn with_options(mut self, opts: impl IntoIterator<Item = impl FnOnce(&mut Self)>) -> Self {
    for opt in opts {
      opt(&mut self);
    }
    self
  }

  /// Operands summed and printed inside the guarded block.
  pub fn operands(&self) -> (i32, i32) {
    self.operands
  }

  /// Operands of the second, unprinted summation.
  pub fn trailing_operands(&self) -> (i32, i32) {
    self.trailing_operands
  }

  /// Failure injected into the guarded block, if any.
  pub fn fault(&self) -> Option<&str> {
    self.fault.as_deref()
  }
}

impl Default for ProgramOpts {
  fn default() -> Self {
    Self {
      operands: (5, 10),
      trailing_operands: (3, 4),
      fault: None,
    }
  }
}

pub fn with_operands(a: i32, b: i32) -> impl FnOnce(&mut ProgramOpts) {
  move |opts: &mut ProgramOpts| {
    opts.operands = (a, b);
  }
}

pub fn with_trailing_operands(a: i32, b: i32) -> impl FnOnce(&mut ProgramOpts) {
  move |opts: &mut ProgramOpts| {
    opts.trailing_operands = (a, b);
  }
}

// Makes the guarded block fail after the sum is computed, before it is printed.
pub fn with_fault(message: impl Into<String>) -> impl FnOnce(&mut ProgramOpts) {
  let message = message.into();
  move |opts: &mut ProgramOpts| {
    opts.fault = Some(message);
  }
}
