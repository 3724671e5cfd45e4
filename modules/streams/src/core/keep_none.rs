use super::{MatCombine, MatCombineRule, StreamNotUsed};

/// Discards both sides; the combined graph materializes [`StreamNotUsed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepNone;

impl<Left, Right> MatCombineRule<Left, Right> for KeepNone {
  type Out = StreamNotUsed;

  fn kind(&self) -> MatCombine {
    MatCombine::KeepNone
  }

  fn combine(&self, _: Left, _: Right) -> Self::Out {
    StreamNotUsed
  }
}
