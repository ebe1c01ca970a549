//! Conversion of raw strings to typed values.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use pw_reflect::Reflect;
use pw_reflect::info::TypeInfo;
use pw_reflect::ops::{DynamicList, ReflectMut};
use pw_reflect::registry::{ConversionError, TypeRegistry};

use crate::AccessOptions;
use crate::error::AccessErrorKind;
use crate::resolver::{ElementType, element_types};
use crate::step::ContainerKind;

// -----------------------------------------------------------------------------
// PropertyValue

/// A value to assign: a single string, or several for bulk assignment
/// to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Single(String),
    Many(Vec<String>),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => f.write_str(value),
            Self::Many(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for PropertyValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for PropertyValue {
    #[inline]
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Vec<String>> for PropertyValue {
    #[inline]
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for PropertyValue {
    #[inline]
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PropertyValue {
    #[inline]
    fn from(values: [&str; N]) -> Self {
        Self::from(&values[..])
    }
}

impl From<&PropertyValue> for PropertyValue {
    #[inline]
    fn from(value: &PropertyValue) -> Self {
        value.clone()
    }
}

// -----------------------------------------------------------------------------
// ValueCoercer

/// Converts raw strings to values of a target type.
///
/// A converter registered for the exact target type always wins.
/// Without one:
///
/// - `Option<T>` falls back to the converter of `T` and wraps the result.
/// - Lists and sets are created empty, every string is converted to an
///   element. A single string becomes a single element.
/// - Arrays take exactly as many strings as they have slots.
/// - Elements without a declared type are kept as strings.
///
/// ```
/// use pw_access::{AccessOptions, ElementType, ValueCoercer};
/// use pw_reflect::info::Typed;
/// use pw_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let coercer = ValueCoercer::new(&registry, AccessOptions::new());
///
/// let port = coercer.coerce("8080", ElementType::Typed(u16::type_info())).unwrap();
/// assert_eq!(port.take::<u16>().ok(), Some(8080));
///
/// let maybe = coercer.coerce("1.5", ElementType::Typed(Option::<f32>::type_info())).unwrap();
/// assert_eq!(maybe.take::<Option<f32>>().ok(), Some(Some(1.5)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValueCoercer<'r> {
    registry: &'r TypeRegistry,
    options: AccessOptions,
}

fn conversion(raw: &str, target: &'static str, reason: impl fmt::Display) -> AccessErrorKind {
    AccessErrorKind::TypeConversionFailure(ConversionError::new(raw, target, reason))
}

/// A value was rejected by the container it was assigned to.
pub(crate) fn mismatch(target: &'static str, value: &dyn Reflect) -> AccessErrorKind {
    conversion(
        &format!("{value:?}"),
        target,
        format!("value of type `{}` does not fit", value.reflect_type_path()),
    )
}

impl<'r> ValueCoercer<'r> {
    #[inline]
    pub const fn new(registry: &'r TypeRegistry, options: AccessOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub const fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    #[inline]
    pub const fn options(&self) -> &AccessOptions {
        &self.options
    }

    /// Converts a single raw string.
    pub fn coerce(&self, raw: &str, target: ElementType) -> Result<Box<dyn Reflect>, AccessErrorKind> {
        let ElementType::Typed(info) = target else {
            return Ok(Box::new(String::from(raw)));
        };

        if self.registry.has_converter(info.ty_id()) {
            return self.registry.convert(raw, info.ty_id()).map_err(Into::into);
        }

        match info {
            TypeInfo::Optional(optional) => {
                let inner = self.coerce(raw, ElementType::Typed(optional.inner_info()))?;
                optional
                    .wrap(inner)
                    .map_err(|value| mismatch(info.type_path(), &*value))
            }
            TypeInfo::List(_) | TypeInfo::Set(_) | TypeInfo::Array(_) => {
                self.coerce_many(&[raw], target)
            }
            _ if !self.registry.contains(info.ty_id()) => {
                Err(conversion(raw, info.type_path(), "type is not registered"))
            }
            _ => Err(conversion(raw, info.type_path(), "no converter registered")),
        }
    }

    /// Converts several raw strings into one collection value.
    ///
    /// Targets that are not collections accept exactly one string.
    pub fn coerce_many<S: AsRef<str>>(
        &self,
        items: &[S],
        target: ElementType,
    ) -> Result<Box<dyn Reflect>, AccessErrorKind> {
        let ElementType::Typed(info) = target else {
            let list: DynamicList = items.iter().map(|item| String::from(item.as_ref())).collect();
            return Ok(Box::new(list));
        };

        match info {
            TypeInfo::List(_) | TypeInfo::Set(_) => {
                let Some((_, item)) = element_types(info, &self.options)? else {
                    return Err(conversion("", info.type_path(), "not a collection"));
                };
                let mut container = self.instantiate(info)?;
                match container.reflect_mut() {
                    ReflectMut::List(list) => {
                        for raw in items {
                            let value = self.coerce(raw.as_ref(), item)?;
                            list.push(value)
                                .map_err(|value| mismatch(item.type_path(), &*value))?;
                        }
                    }
                    ReflectMut::Set(set) => {
                        for raw in items {
                            let value = self.coerce(raw.as_ref(), item)?;
                            set.insert(value)
                                .map_err(|value| mismatch(item.type_path(), &*value))?;
                        }
                    }
                    _ => return Err(mismatch(info.type_path(), &*container)),
                }
                Ok(container)
            }
            TypeInfo::Array(array) => {
                if items.len() != array.capacity() {
                    return Err(AccessErrorKind::unsupported(
                        ContainerKind::Array,
                        info.type_path(),
                        format!(
                            "assigning {} values to {} slots",
                            items.len(),
                            array.capacity()
                        ),
                    ));
                }
                let item = ElementType::Typed(array.item_info());
                let mut container = self.instantiate(info)?;
                if let ReflectMut::Array(slots) = container.reflect_mut() {
                    for (index, raw) in items.iter().enumerate() {
                        let value = self.coerce(raw.as_ref(), item)?;
                        let Some(slot) = slots.get_mut(index) else {
                            return Err(conversion(raw.as_ref(), info.type_path(), "missing slot"));
                        };
                        slot.set(value)
                            .map_err(|value| mismatch(item.type_path(), &*value))?;
                    }
                }
                Ok(container)
            }
            TypeInfo::Optional(optional) => {
                let inner = self.coerce_many(items, ElementType::Typed(optional.inner_info()))?;
                optional
                    .wrap(inner)
                    .map_err(|value| mismatch(info.type_path(), &*value))
            }
            _ => match items {
                [raw] => self.coerce(raw.as_ref(), target),
                _ => {
                    let joined: Vec<&str> = items.iter().map(|item| item.as_ref()).collect();
                    Err(conversion(
                        &joined.join(","),
                        info.type_path(),
                        format!("expected a single value, got {}", items.len()),
                    ))
                }
            },
        }
    }

    /// Converts a [`PropertyValue`] to `target`.
    pub fn coerce_value(
        &self,
        value: &PropertyValue,
        target: ElementType,
    ) -> Result<Box<dyn Reflect>, AccessErrorKind> {
        match value {
            PropertyValue::Single(raw) => self.coerce(raw, target),
            PropertyValue::Many(items) => self.coerce_many(items, target),
        }
    }

    /// Creates the default value of a registered type.
    pub fn instantiate(&self, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, AccessErrorKind> {
        if !self.registry.contains(info.ty_id()) {
            return Err(AccessErrorKind::creation(
                info.type_path(),
                "type is not registered",
            ));
        }
        self.registry.create_default(info.ty_id()).ok_or_else(|| {
            AccessErrorKind::creation(info.type_path(), "no default constructor registered")
        })
    }

    /// Creates a missing element while writing, honoring `create_missing`.
    pub(crate) fn create_missing(
        &self,
        target: ElementType,
    ) -> Result<Box<dyn Reflect>, AccessErrorKind> {
        if !self.options.create_missing {
            return Err(AccessErrorKind::creation(
                target.type_path(),
                "creating missing values is disabled",
            ));
        }
        match target {
            ElementType::Typed(info) => self.instantiate(info),
            ElementType::Raw => Ok(Box::new(String::new())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use alloc::collections::BTreeSet;

    use pw_reflect::info::Typed;
    use pw_reflect::ops::{DynamicList, List};
    use pw_reflect::registry::TypeRegistry;

    use super::{PropertyValue, ValueCoercer};
    use crate::error::AccessErrorKind;
    use crate::resolver::ElementType;
    use crate::step::ContainerKind;
    use crate::AccessOptions;

    fn typed<T: Typed>() -> ElementType {
        ElementType::Typed(T::type_info())
    }

    #[test]
    fn registered_converters() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let value = coercer.coerce("-3", typed::<i64>()).unwrap();
        assert_eq!(value.take::<i64>().ok(), Some(-3));

        let err = coercer.coerce("three", typed::<i64>()).unwrap_err();
        let AccessErrorKind::TypeConversionFailure(err) = err else {
            panic!("expected a conversion failure");
        };
        assert_eq!(err.raw, "three");
        assert_eq!(err.target, "i64");
    }

    #[test]
    fn custom_converter_wins() {
        let mut registry = TypeRegistry::new();
        registry.register_converter::<bool, String, _>(|raw| match raw {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(format!("`{other}` is neither yes nor no")),
        });
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let value = coercer.coerce("yes", typed::<bool>()).unwrap();
        assert_eq!(value.take::<bool>().ok(), Some(true));
        assert!(coercer.coerce("true", typed::<bool>()).is_err());
    }

    #[test]
    fn optional_uses_inner_converter() {
        let mut registry = TypeRegistry::new();
        registry.register::<Option<u8>>();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let value = coercer.coerce("9", typed::<Option<u8>>()).unwrap();
        assert_eq!(value.take::<Option<u8>>().ok(), Some(Some(9)));
    }

    #[test]
    fn bulk_into_collections() {
        let mut registry = TypeRegistry::new();
        registry.register::<Vec<String>>();
        registry.register::<BTreeSet<u8>>();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let tags = PropertyValue::from(["a", "b", "c"]);
        let value = coercer.coerce_value(&tags, typed::<Vec<String>>()).unwrap();
        assert_eq!(value.take::<Vec<String>>().ok(), Some(vec!["a".into(), "b".into(), "c".into()]));

        let value = coercer.coerce_many(&["3", "1", "3"], typed::<BTreeSet<u8>>()).unwrap();
        let set = value.take::<BTreeSet<u8>>().ok().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3]);

        let single = coercer.coerce("only", typed::<Vec<String>>()).unwrap();
        assert_eq!(single.take::<Vec<String>>().ok(), Some(vec![String::from("only")]));
    }

    #[test]
    fn arrays_need_every_slot() {
        let mut registry = TypeRegistry::new();
        registry.register::<[u8; 3]>();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let value = coercer.coerce_many(&["1", "2", "3"], typed::<[u8; 3]>()).unwrap();
        assert_eq!(value.take::<[u8; 3]>().ok(), Some([1, 2, 3]));

        let err = coercer.coerce_many(&["1", "2"], typed::<[u8; 3]>()).unwrap_err();
        assert!(matches!(
            err,
            AccessErrorKind::UnsupportedContainerOperation { kind: ContainerKind::Array, .. }
        ));
    }

    #[test]
    fn raw_targets_keep_strings() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let value = coercer.coerce("x", ElementType::Raw).unwrap();
        assert_eq!(value.take::<String>().ok().as_deref(), Some("x"));

        let value = coercer.coerce_many(&["x", "y"], ElementType::Raw).unwrap();
        let list = value.take::<DynamicList>().ok().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).and_then(|v| v.downcast_ref::<String>()).map(String::as_str), Some("y"));
    }

    #[test]
    fn scalars_reject_many_values() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        assert!(coercer.coerce_many(&["1"], typed::<u8>()).is_ok());
        let err = coercer.coerce_many(&["1", "2"], typed::<u8>()).unwrap_err();
        assert!(matches!(err, AccessErrorKind::TypeConversionFailure(_)));
    }

    #[test]
    fn missing_values_honor_options() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new().create_missing(false));

        let err = coercer.create_missing(typed::<u8>()).unwrap_err();
        assert!(matches!(err, AccessErrorKind::PropertyCreationFailure { .. }));

        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        assert_eq!(coercer.create_missing(typed::<u8>()).unwrap().take::<u8>().ok(), Some(0));
    }
}
