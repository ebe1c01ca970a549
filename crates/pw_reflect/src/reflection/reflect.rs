use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::impls;
use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The object-safe view of a reflected value.
///
/// `reflect_ref` and `reflect_mut` expose the container-specific traits
/// in [`ops`](crate::ops), while [`DynamicTyped`] gives the static
/// [`TypeInfo`](crate::info::TypeInfo) of the concrete type.
///
/// Implementations are provided for primitives, `String`, the standard
/// collections, `Option<T>` and arrays. Records implement it through
/// [`impl_record!`](crate::impl_record).
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the concrete type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value`.
    ///
    /// Returns the value back if its concrete type differs.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Debug formatter for the value, used by `impl Debug for dyn Reflect`.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(val) => impls::struct_debug(val, f),
            ReflectRef::List(val) => impls::list_debug(val, f),
            ReflectRef::Set(val) => impls::set_debug(val, f),
            ReflectRef::Map(val) => impls::map_debug(val, f),
            ReflectRef::Array(val) => impls::array_debug(val, f),
            ReflectRef::Properties(val) => fmt::Debug::fmt(val, f),
            ReflectRef::Optional(val) => impls::optional_debug(val, f),
            ReflectRef::Opaque(_) => write!(f, "Reflect({})", self.reflect_type_path()),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl dyn Reflect {
    /// Returns `true` if the concrete type is `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts a boxed value, returning it unchanged on failure.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            match any.downcast::<T>() {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type id checked above"),
            }
        } else {
            Err(self)
        }
    }

    /// Moves the concrete value out of the box.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `set`, `reflect_kind`, `reflect_ref` and `reflect_mut`
/// for a type of the given kind.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: $crate::__macro_exports::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), $crate::__macro_exports::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            ::core::result::Result::Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use crate::__impl_reflect_cast_fn as impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use alloc::{boxed::Box, format, string::String};

    #[test]
    fn downcast_and_take() {
        let boxed: Box<dyn Reflect> = Box::new(String::from("hello"));
        assert!(boxed.is::<String>());
        assert_eq!(boxed.downcast_ref::<String>().map(String::as_str), Some("hello"));

        let boxed = boxed.take::<i32>().unwrap_err();
        assert_eq!(boxed.take::<String>().unwrap(), "hello");
    }

    #[test]
    fn set_checks_type() {
        let mut value = 1_u32;
        assert!(value.set(Box::new(2_u32)).is_ok());
        assert_eq!(value, 2);

        let rejected = value.set(Box::new(3_i64)).unwrap_err();
        assert!(rejected.is::<i64>());
        assert_eq!(value, 2);
    }

    #[test]
    fn debug_output() {
        let value: Option<u8> = Some(7);
        assert_eq!(format!("{:?}", value.as_reflect()), "Some(7)");
    }
}
