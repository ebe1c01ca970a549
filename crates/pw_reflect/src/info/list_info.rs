use crate::info::{Generics, Type, TypeInfo, TypePath};

/// Type information of an ordered, growable list.
///
/// The element type is the first type parameter. A list created with
/// [`ListInfo::new`] alone has no declared element type.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    generics: Generics,
}

impl ListInfo {
    #[inline]
    pub const fn new<TList: TypePath>() -> Self {
        Self {
            ty: Type::of::<TList>(),
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
