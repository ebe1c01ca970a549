use crate::info::{Generics, Type, TypeInfo, TypePath};

/// Type information of a key-value mapping.
///
/// Key and value types are the first and second type parameters.
/// Extra parameters, such as a hasher, are never registered.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    generics: Generics,
}

impl MapInfo {
    #[inline]
    pub const fn new<TMap: TypePath>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            generics: Generics::new(),
        }
    }

    crate::info::impl_type_fn!(ty);
    crate::info::impl_generic_fn!(generics);

    /// Returns the declared key type, if any.
    #[inline]
    pub fn key_info(&self) -> Option<&'static TypeInfo> {
        self.generics.type_info_at(0)
    }

    /// Returns the declared value type, if any.
    #[inline]
    pub fn value_info(&self) -> Option<&'static TypeInfo> {
        self.generics.type_info_at(1)
    }
}
