use core::marker::PhantomData;

use super::PortId;

/// Typed outlet port handed out by a [`GraphBuilder`](crate::core::GraphBuilder).
#[derive(Debug)]
pub struct Outlet<T> {
  id:  PortId,
  _pd: PhantomData<fn() -> T>,
}

impl<T> Outlet<T> {
  pub(crate) const fn from_id(id: PortId) -> Self {
    Self { id, _pd: PhantomData }
  }

  /// Returns the port identifier.
  #[must_use]
  pub const fn id(&self) -> PortId {
    self.id
  }
}

impl<T> Clone for Outlet<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Outlet<T> {}

impl<T> PartialEq for Outlet<T> {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl<T> Eq for Outlet<T> {}
