use super::MatCombine;


/// Rule for combining the materialized values of two composed graphs.
///
/// The rule is chosen while building and applied on every materialization, so the shape of the
/// final value depends only on construction choices.
pub trait MatCombineRule<Left, Right>: Send + Sync + 'static {
  /// Output type produced by the combination.
  type Out;

  /// Returns the combination kind.
  fn kind(&self) -> MatCombine;

  /// Combines materialized values according to the rule.
  fn combine(&self, left: Left, right: Right) -> Self::Out;
}
