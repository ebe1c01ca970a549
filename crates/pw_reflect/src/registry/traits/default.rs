use alloc::boxed::Box;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Creates a default instance of the registered type.
///
/// Path writes use it to fill in absent intermediate values and list
/// padding, and bulk conversion uses it to create an empty collection.
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Creates the trait from a constructor function.
    #[inline]
    pub const fn from_fn(func: fn() -> Box<dyn Reflect>) -> Self {
        Self { func }
    }

    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + Typed + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
