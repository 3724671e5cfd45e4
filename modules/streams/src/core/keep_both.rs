use super::{MatCombine, MatCombineRule};

/// Keeps both materialized values as a `(left, right)` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepBoth;

impl<Left, Right> MatCombineRule<Left, Right> for KeepBoth {
  type Out = (Left, Right);

  fn kind(&self) -> MatCombine {
    MatCombine::KeepBoth
  }

  fn combine(&self, left: Left, right: Right) -> Self::Out {
    (left, right)
  }
}
