//! Element type resolution for reflected containers.

use core::fmt;

use pw_reflect::info::{TypeInfo, TypePath};

use crate::AccessOptions;
use crate::error::AccessErrorKind;

// -----------------------------------------------------------------------------
// ElementType

/// The type a path step produces.
///
/// `Raw` stands for elements of containers declared without an element
/// type. Such elements are kept as strings.
#[derive(Clone, Copy)]
pub enum ElementType {
    Typed(&'static TypeInfo),
    Raw,
}

impl ElementType {
    #[inline]
    pub fn type_info(self) -> Option<&'static TypeInfo> {
        match self {
            Self::Typed(info) => Some(info),
            Self::Raw => None,
        }
    }

    /// Type path of the produced value, `String` for raw elements.
    #[inline]
    pub fn type_path(self) -> &'static str {
        match self {
            Self::Typed(info) => info.type_path(),
            Self::Raw => <alloc::string::String as TypePath>::type_path(),
        }
    }

    #[inline]
    pub fn is_raw(self) -> bool {
        matches!(self, Self::Raw)
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Typed(a), Self::Typed(b)) => a.ty_id() == b.ty_id(),
            (Self::Raw, Self::Raw) => true,
            _ => false,
        }
    }
}

impl Eq for ElementType {}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(info) => write!(f, "Typed({})", info.type_path()),
            Self::Raw => f.write_str("Raw"),
        }
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Strips any number of `Option` layers.
pub fn unwrap_optional(mut info: &'static TypeInfo) -> &'static TypeInfo {
    while let TypeInfo::Optional(optional) = info {
        info = optional.inner_info();
    }
    info
}

/// Element types of a container: `(key, value)`.
///
/// Keys are `usize` for lists and arrays, the element itself for sets,
/// and `String` for properties. Records and opaque values have none.
pub(crate) fn element_types(
    info: &'static TypeInfo,
    options: &AccessOptions,
) -> Result<Option<(ElementType, ElementType)>, AccessErrorKind> {
    let declared = |index: usize| -> Result<ElementType, AccessErrorKind> {
        match info.generics().type_info_at(index) {
            Some(param) => Ok(ElementType::Typed(param)),
            None if options.strict_generics => Err(AccessErrorKind::AmbiguousDeclaration {
                ty: info.type_path(),
            }),
            None => {
                log::warn!(
                    "`{}` declares no element type, elements are kept as strings",
                    info.type_path()
                );
                Ok(ElementType::Raw)
            }
        }
    };
    let index = ElementType::Typed(<usize as pw_reflect::info::Typed>::type_info());

    Ok(match info {
        TypeInfo::List(_) => Some((index, declared(0)?)),
        TypeInfo::Array(array) => Some((index, ElementType::Typed(array.item_info()))),
        TypeInfo::Set(_) => {
            let item = declared(0)?;
            Some((item, item))
        }
        TypeInfo::Map(_) => Some((declared(0)?, declared(1)?)),
        TypeInfo::Properties(_) => Some((ElementType::Raw, ElementType::Raw)),
        TypeInfo::Struct(_) | TypeInfo::Optional(_) | TypeInfo::Opaque(_) => None,
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use pw_reflect::info::Typed;
    use pw_reflect::ops::{DynamicList, Properties};

    use super::{ElementType, element_types, unwrap_optional};
    use crate::AccessOptions;
    use crate::error::AccessErrorKind;

    #[test]
    fn optional_layers_are_stripped() {
        let info = unwrap_optional(Option::<Option<u8>>::type_info());
        assert!(info.type_is::<u8>());
        assert!(unwrap_optional(String::type_info()).type_is::<String>());
    }

    #[test]
    fn declared_element_types() {
        let options = AccessOptions::new();

        let (key, value) = element_types(Vec::<i32>::type_info(), &options)
            .unwrap()
            .unwrap();
        assert_eq!(key, ElementType::Typed(usize::type_info()));
        assert_eq!(value, ElementType::Typed(i32::type_info()));

        let (key, value) = element_types(HashMap::<String, u8>::type_info(), &options)
            .unwrap()
            .unwrap();
        assert_eq!(key, ElementType::Typed(String::type_info()));
        assert_eq!(value, ElementType::Typed(u8::type_info()));

        let (key, value) = element_types(Properties::type_info(), &options)
            .unwrap()
            .unwrap();
        assert!(key.is_raw() && value.is_raw());

        assert!(element_types(u8::type_info(), &options).unwrap().is_none());
    }

    #[test]
    fn undeclared_element_types() {
        let lenient = AccessOptions::new();
        let (_, value) = element_types(DynamicList::type_info(), &lenient)
            .unwrap()
            .unwrap();
        assert_eq!(value, ElementType::Raw);
        assert_eq!(value.type_path(), "alloc::string::String");

        let strict = AccessOptions::new().strict_generics(true);
        let err = element_types(DynamicList::type_info(), &strict).unwrap_err();
        assert!(matches!(err, AccessErrorKind::AmbiguousDeclaration { .. }));
    }
}
