use super::{MatCombine, MatCombineRule};

/// Keeps the left materialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLeft;

impl<Left, Right> MatCombineRule<Left, Right> for KeepLeft {
  type Out = Left;

  fn kind(&self) -> MatCombine {
    MatCombine::KeepLeft
  }

  fn combine(&self, left: Left, _right: Right) -> Self::Out {
    left
  }
}
