use crate::info::{Generics, Type, TypePath};

/// Type information of a value without reflected structure,
/// such as numbers and strings.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
    generics: Generics,
}

impl OpaqueInfo {
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
        }
    }

    crate::info::impl_type_fn!(ty);
    crate::info::impl_generic_fn!(generics);
}

/// Type information of a string-to-string property bag.
///
/// Keys and values are always raw strings, so no type parameter is kept.
#[derive(Clone, Debug)]
pub struct PropertiesInfo {
    ty: Type,
    generics: Generics,
}

impl PropertiesInfo {
    #[inline]
    pub const fn new<T: TypePath>() -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
        }
    }

    crate::info::impl_type_fn!(ty);
    crate::info::impl_generic_fn!(generics);
}
