/// Materialized value combine strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatCombine {
  /// Keeps the left (upstream) materialized value.
  KeepLeft,
  /// Keeps the right (downstream) materialized value.
  KeepRight,
  /// Keeps both materialized values as a pair.
  KeepBoth,
  /// Drops both materialized values.
  KeepNone,
  /// Combines both values with a user-supplied function.
  Custom,
}
