use core::marker::PhantomData;

use super::{MatCombine, MatCombineRule};

/// Combines materialized values with a user-supplied function.
pub struct KeepWith<F, Out> {
  func: F,
  _pd:  PhantomData<fn() -> Out>,
}

impl<F, Out> KeepWith<F, Out> {
  /// Wraps the combining function.
  #[must_use]
  pub const fn new(func: F) -> Self {
    Self { func, _pd: PhantomData }
  }
}

impl<Left, Right, F, Out> MatCombineRule<Left, Right> for KeepWith<F, Out>
where
  F: Fn(Left, Right) -> Out + Send + Sync + 'static,
  Out: 'static,
{
  type Out = Out;

  fn kind(&self) -> MatCombine {
    MatCombine::Custom
  }

  fn combine(&self, left: Left, right: Right) -> Self::Out {
    (self.func)(left, right)
  }
}
