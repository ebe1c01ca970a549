use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, Generics, ListInfo, MapInfo, SetInfo, StructInfo};
use crate::info::{OpaqueInfo, OptionInfo, PropertiesInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The container kind of a reflected type.
///
/// [`Reflect::reflect_kind`](crate::Reflect::reflect_kind) and
/// [`TypeInfo::kind`] agree for every concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Set,
    Map,
    Array,
    Properties,
    Optional,
    Opaque,
}

impl ReflectKind {
    /// Returns `true` for kinds that hold a number of elements,
    /// everything except `Struct`, `Optional` and `Opaque`.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::List | Self::Set | Self::Map | Self::Array | Self::Properties
        )
    }
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "record",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Array => "array",
            Self::Properties => "properties",
            Self::Optional => "optional",
            Self::Opaque => "scalar",
        };
        f.pad(name)
    }
}

/// A cast to one kind was attempted on a value or info of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a {expected} but found a {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for a reflected type.
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Array(ArrayInfo),
    Properties(PropertiesInfo),
    Optional(OptionInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_fn {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the inner [`", stringify!($info), "`], or an error for other kinds.")]
        #[inline]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

/// Applies `$body` to the info struct inside every variant.
macro_rules! for_each_info {
    ($this:expr, $info:ident => $body:expr) => {
        match $this {
            Self::Struct($info) => $body,
            Self::List($info) => $body,
            Self::Set($info) => $body,
            Self::Map($info) => $body,
            Self::Array($info) => $body,
            Self::Properties($info) => $body,
            Self::Optional($info) => $body,
            Self::Opaque($info) => $body,
        }
    };
}

impl TypeInfo {
    pub const fn ty(&self) -> &Type {
        for_each_info!(self, info => info.ty())
    }

    /// Type parameters of the described type, empty for containers
    /// declared without element types.
    pub const fn generics(&self) -> &Generics {
        for_each_info!(self, info => info.generics())
    }

    /// Returns the container kind.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Array(_) => ReflectKind::Array,
            Self::Properties(_) => ReflectKind::Properties,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_is<T: core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    impl_cast_fn!(as_struct: Struct => StructInfo);
    impl_cast_fn!(as_list: List => ListInfo);
    impl_cast_fn!(as_set: Set => SetInfo);
    impl_cast_fn!(as_map: Map => MapInfo);
    impl_cast_fn!(as_array: Array => ArrayInfo);
    impl_cast_fn!(as_properties: Properties => PropertiesInfo);
    impl_cast_fn!(as_optional: Optional => OptionInfo);
    impl_cast_fn!(as_opaque: Opaque => OpaqueInfo);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{ReflectKind, Typed};
    use alloc::{
        string::{String, ToString},
        vec::Vec,
    };

    #[test]
    fn kind_and_casts() {
        let info = <Vec<i32> as Typed>::type_info();
        assert_eq!(info.kind(), ReflectKind::List);
        assert!(info.as_list().is_ok());

        let err = info.as_map().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Map);
        assert_eq!(err.received, ReflectKind::List);

        assert!(String::type_info().type_is::<String>());
        assert!(ReflectKind::Set.is_container());
        assert!(!ReflectKind::Optional.is_container());
        assert_eq!(err.to_string(), "expected a map but found a list");
    }
}
