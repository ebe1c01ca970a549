use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, List, Map, Optional, Properties, Set, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Array(&'a dyn Array),
    Properties(&'a Properties),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Array(&'a mut dyn Array),
    Properties(&'a mut Properties),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_kind_fn {
    ($($kind:ident),*) => {
        /// Returns the [`ReflectKind`] of the view.
        pub fn kind(&self) -> ReflectKind {
            match self {
                $( Self::$kind(_) => ReflectKind::$kind, )*
            }
        }
    };
}

macro_rules! impl_as_fn {
    ($name:ident, $kind:ident, $($ref:tt)+) => {
        #[doc = concat!("Returns the inner `", stringify!($kind), "` view, or an error for other kinds.")]
        pub fn $name(self) -> Result<$($ref)+, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                other => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: other.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_kind_fn!(Struct, List, Set, Map, Array, Properties, Optional, Opaque);

    impl_as_fn!(as_struct, Struct, &'a dyn Struct);
    impl_as_fn!(as_list, List, &'a dyn List);
    impl_as_fn!(as_set, Set, &'a dyn Set);
    impl_as_fn!(as_map, Map, &'a dyn Map);
    impl_as_fn!(as_array, Array, &'a dyn Array);
    impl_as_fn!(as_properties, Properties, &'a Properties);
    impl_as_fn!(as_optional, Optional, &'a dyn Optional);
    impl_as_fn!(as_opaque, Opaque, &'a dyn Reflect);
}

impl<'a> ReflectMut<'a> {
    impl_kind_fn!(Struct, List, Set, Map, Array, Properties, Optional, Opaque);

    impl_as_fn!(as_struct, Struct, &'a mut dyn Struct);
    impl_as_fn!(as_list, List, &'a mut dyn List);
    impl_as_fn!(as_set, Set, &'a mut dyn Set);
    impl_as_fn!(as_map, Map, &'a mut dyn Map);
    impl_as_fn!(as_array, Array, &'a mut dyn Array);
    impl_as_fn!(as_properties, Properties, &'a mut Properties);
    impl_as_fn!(as_optional, Optional, &'a mut dyn Optional);
    impl_as_fn!(as_opaque, Opaque, &'a mut dyn Reflect);
}
