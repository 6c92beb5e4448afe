//! # testcfg core
//!
//! A summation routine and a linear entry routine that prints a sum inside a
//! guarded block, followed by a completion message that runs on every exit path.

pub mod arith;
pub mod console;
pub mod guard;
pub mod program;
pub mod utils;

pub use arith::sum;
pub use console::{Console, WriteConsole};
pub use guard::{guarded, Completion, Guarded};
pub use program::{run_default, Program, ProgramError, RunReport};
