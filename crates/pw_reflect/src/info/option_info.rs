use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{Generics, Type, TypeInfo, TypePath, Typed};

/// Type information of an optional value, `Option<T>`.
///
/// Besides the inner type, it keeps a function that wraps a boxed `T`
/// into a boxed `Some(T)`.
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    generics: Generics,
    inner_ty: Type,
    inner_info: fn() -> &'static TypeInfo,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

fn wrap_some<T: Reflect + Typed>(
    value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    Ok(Box::new(Some(value.take::<T>()?)))
}

impl OptionInfo {
    #[inline]
    pub fn new<TOption: TypePath, TInner: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            generics: Generics::new(),
            inner_ty: Type::of::<TInner>(),
            inner_info: TInner::type_info,
            wrap: wrap_some::<TInner>,
        }
    }

    crate::info::impl_type_fn!(ty);
    crate::info::impl_generic_fn!(generics);

    #[inline]
    pub const fn inner_ty(&self) -> &Type {
        &self.inner_ty
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Wraps a value of the inner type into `Some(value)`.
    ///
    /// Returns the value back if its type is not the inner type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}
