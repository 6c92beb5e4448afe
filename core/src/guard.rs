//! Guarded blocks with a completion step that runs on every exit path.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Outcome of the body of a [`guarded`] block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T, E> {
  /// The body returned normally.
  Completed(T),
  /// The body failed and the error was handed to the handler.
  Caught(E),
}

impl<T, E> Guarded<T, E> {
  pub fn completed(self) -> Option<T> {
    match self {
      Guarded::Completed(value) => Some(value),
      Guarded::Caught(_) => None,
    }
  }

  pub fn caught(self) -> Option<E> {
    match self {
      Guarded::Completed(_) => None,
      Guarded::Caught(err) => Some(err),
    }
  }
}

/// Owns some state and runs `F` on it exactly once when leaving scope.
///
/// [`Completion::finish`] runs the step eagerly and hands back its result.
/// If the guard is dropped instead (early return or unwinding), the step
/// still runs but its result is discarded.
pub struct Completion<S, F, R>
where
  F: FnOnce(&mut S) -> R,
{
  state: S,
  step: Option<F>,
  _result: PhantomData<fn() -> R>,
}

impl<S, F, R> Completion<S, F, R>
where
  F: FnOnce(&mut S) -> R,
{
  pub fn new(state: S, step: F) -> Self {
    Self {
      state,
      step: Some(step),
      _result: PhantomData,
    }
  }

  /// Runs the completion step now and returns its result.
  pub fn finish(mut self) -> R {
    // `step` is only taken here and in `drop`, and `finish` consumes the guard.
    let Some(step) = self.step.take() else {
      unreachable!("completion step already ran")
    };
    step(&mut self.state)
  }
}

impl<S, F, R> Deref for Completion<S, F, R>
where
  F: FnOnce(&mut S) -> R,
{
  type Target = S;

  fn deref(&self) -> &S {
    &self.state
  }
}

impl<S, F, R> DerefMut for Completion<S, F, R>
where
  F: FnOnce(&mut S) -> R,
{
  fn deref_mut(&mut self) -> &mut S {
    &mut self.state
  }
}

impl<S, F, R> Drop for Completion<S, F, R>
where
  F: FnOnce(&mut S) -> R,
{
  fn drop(&mut self) {
    if let Some(step) = self.step.take() {
      tracing::trace!("running completion step on drop");
      let _ = step(&mut self.state);
    }
  }
}

/// Runs `body` against `state`. If it fails, `on_error` sees the error.
/// `completion` then runs exactly once, whatever happened before it,
/// including a panic in `body` or `on_error`.
///
/// A failure of `on_error` is returned after `completion` has run, unless
/// `completion` fails too, in which case the completion error wins.
pub fn guarded<S, T, E, X, B, H, C>(
  state: S,
  body: B,
  on_error: H,
  completion: C,
) -> Result<Guarded<T, E>, X>
where
  B: FnOnce(&mut S) -> Result<T, E>,
  H: FnOnce(&mut S, &E) -> Result<(), X>,
  C: FnOnce(&mut S) -> Result<(), X>,
{
  let mut scope = Completion::new(state, completion);

  let outcome = match body(&mut *scope) {
    Ok(value) => Guarded::Completed(value),
    Err(err) => {
      if let Err(handler_err) = on_error(&mut *scope, &err) {
        scope.finish()?;
        return Err(handler_err);
      }
      Guarded::Caught(err)
    }
  };

  scope.finish()?;
  Ok(outcome)
}
