//! Deferred combination of per-stage materialized values.


use alloc::{boxed::Box, sync::Arc};
use core::any::Any;

use super::{MatCombine, MatCombineRule, StreamError, StreamNotUsed};

/// Type-erased materialized value.
pub(crate) type DynMat = Box<dyn Any + Send>;

type MatCombineFn = Arc<dyn Fn(DynMat, DynMat) -> Result<DynMat, StreamError> + Send + Sync>;
type MatMapFn = Arc<dyn Fn(DynMat) -> Result<DynMat, StreamError> + Send + Sync>;

/// Records how the materialized values of a graph's stages fold into one value.
///
/// Leaves index stages of the owning arena. The tree mirrors the order of composition, so the
/// combined value is determined at build time and only evaluated per materialization.
#[derive(Clone)]
pub(crate) enum MatTree {
  NotUsed,
  Stage(usize),
  Combine { kind: MatCombine, left: Box<MatTree>, right: Box<MatTree>, combine: MatCombineFn },
  Map { inner: Box<MatTree>, map: MatMapFn },
}

impl MatTree {
  pub(crate) const fn stage(index: usize) -> Self {
    Self::Stage(index)
  }

  pub(crate) fn combine<L, R, C>(left: Self, right: Self, rule: C) -> Self
  where
    L: Send + 'static,
    R: Send + 'static,
    C: MatCombineRule<L, R>,
    C::Out: Send + 'static, {
    let kind = rule.kind();
    let combine: MatCombineFn = Arc::new(move |left: DynMat, right: DynMat| {
      let left = downcast_mat::<L>(left)?;
      let right = downcast_mat::<R>(right)?;
      Ok(Box::new(rule.combine(left, right)) as DynMat)
    });
    Self::Combine { kind, left: Box::new(left), right: Box::new(right), combine }
  }

  pub(crate) fn map<A, B, F>(inner: Self, func: F) -> Self
  where
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static, {
    let map: MatMapFn = Arc::new(move |value: DynMat| {
      let value = downcast_mat::<A>(value)?;
      Ok(Box::new(func(value)) as DynMat)
    });
    Self::Map { inner: Box::new(inner), map }
  }

  pub(crate) fn shift(&mut self, offset: usize) {
    match self {
      | Self::NotUsed => {},
      | Self::Stage(index) => *index += offset,
      | Self::Combine { left, right, .. } => {
        left.shift(offset);
        right.shift(offset);
      },
      | Self::Map { inner, .. } => inner.shift(offset),
    }
  }

  /// Combination kind at the root, `None` for a leaf or a mapping.
  pub(crate) const fn root_kind(&self) -> Option<MatCombine> {
    match self {
      | Self::Combine { kind, .. } => Some(*kind),
      | _ => None,
    }
  }

  /// Folds the per-stage values, consuming the referenced leaves.
  pub(crate) fn evaluate(&self, leaves: &mut [Option<DynMat>]) -> Result<DynMat, StreamError> {
    match self {
      | Self::NotUsed => Ok(Box::new(StreamNotUsed::new())),
      | Self::Stage(index) => match leaves.get_mut(*index).and_then(Option::take) {
        | Some(value) => Ok(value),
        | None => Err(StreamError::TypeMismatch),
      },
      | Self::Combine { left, right, combine, .. } => {
        let left = left.evaluate(leaves)?;
        let right = right.evaluate(leaves)?;
        combine(left, right)
      },
      | Self::Map { inner, map } => map(inner.evaluate(leaves)?),
    }
  }
}

pub(crate) fn downcast_mat<T>(value: DynMat) -> Result<T, StreamError>
where
  T: Any + Send + 'static, {
  match value.downcast::<T>() {
    | Ok(value) => Ok(*value),
    | Err(_) => Err(StreamError::TypeMismatch),
  }
}
