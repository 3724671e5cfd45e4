use alloc::boxed::Box;
use core::any::Any;

use super::StreamError;

/// Type-erased stream element carried by a push signal.
pub type DynValue = Box<dyn Any + Send>;

/// Recovers a typed element from a type-erased value.
///
/// # Errors
///
/// Returns [`StreamError::TypeMismatch`] when the element has another type.
pub fn downcast_value<T>(value: DynValue) -> Result<T, StreamError>
where
  T: Any + Send + 'static, {
  match value.downcast::<T>() {
    | Ok(value) => Ok(*value),
    | Err(_) => Err(StreamError::TypeMismatch),
  }
}
