use core::any::Any;

/// A capability attached to a type through its
/// [`TypeMeta`](crate::registry::TypeMeta), looked up by the capability's
/// own type.
pub trait TypeTrait: Any + Send + Sync {}

impl<T: Any + Send + Sync> TypeTrait for T {}
