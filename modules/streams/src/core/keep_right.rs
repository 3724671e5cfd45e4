use super::{MatCombine, MatCombineRule};

/// Keeps the downstream side's value, the rule behind `run_with`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepRight;

impl<Left, Right> MatCombineRule<Left, Right> for KeepRight {
  type Out = Right;

  fn kind(&self) -> MatCombine {
    MatCombine::KeepRight
  }

  fn combine(&self, _: Left, right: Right) -> Self::Out {
    right
  }
}
