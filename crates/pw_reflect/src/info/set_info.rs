use crate::info::{Generics, Type, TypeInfo, TypePath};

/// Type information of an unordered set. The element type is the first
/// type parameter.
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    generics: Generics,
}

impl SetInfo {
    #[inline]
    pub const fn new<TSet: TypePath>() -> Self {
        Self {
            ty: Type::of::<TSet>(),
            generics: Generics::new(),
        }
    }

    crate::info::impl_type_fn!(ty);
    crate::info::impl_generic_fn!(generics);

    /// Returns the declared element type, if any.
    #[inline]
    pub fn item_info(&self) -> Option<&'static TypeInfo> {
        self.generics.type_info_at(0)
    }
}
