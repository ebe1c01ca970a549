//! Per-container read and write strategies.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use pw_reflect::Reflect;
use pw_reflect::info::ReflectKind;
use pw_reflect::ops::{List, ReflectMut, ReflectRef};

use crate::coercer::{ValueCoercer, mismatch};
use crate::error::AccessErrorKind;
use crate::resolver::ElementType;
use crate::step::{ContainerKind, ResolvedStep, StepKey};

// -----------------------------------------------------------------------------
// Resolved

/// The value at the end of a path.
///
/// Pseudo properties such as `length` have no storage and are returned
/// owned.
#[derive(Debug)]
pub enum Resolved<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl Resolved<'_> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_reflect().downcast_ref::<T>()
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

// -----------------------------------------------------------------------------
// Optional values

/// Follows `Some` layers, `None` for an absent value.
fn present(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    while let ReflectRef::Optional(optional) = value.reflect_ref() {
        value = optional.value()?;
    }
    Some(value)
}

fn is_absent(value: &dyn Reflect) -> bool {
    present(value).is_none()
}

/// Follows `Some` layers, filling `None` with default values.
pub(crate) fn present_mut<'a>(
    value: &'a mut dyn Reflect,
    coercer: &ValueCoercer<'_>,
) -> Result<&'a mut dyn Reflect, AccessErrorKind> {
    if value.reflect_kind() != ReflectKind::Optional {
        return Ok(value);
    }
    let ty = value.reflect_type_path();
    let info = value.reflect_type_info();
    let ReflectMut::Optional(optional) = value.reflect_mut() else {
        return Err(AccessErrorKind::creation(ty, "not an optional value"));
    };

    if !optional.is_some() {
        let Ok(option_info) = info.as_optional() else {
            return Err(AccessErrorKind::creation(ty, "not an optional value"));
        };
        let inner = coercer.create_missing(ElementType::Typed(option_info.inner_info()))?;
        optional
            .replace(Some(inner))
            .map_err(|inner| mismatch(ty, &*inner))?;
    }

    match optional.value_mut() {
        Some(inner) => present_mut(inner, coercer),
        None => Err(AccessErrorKind::creation(ty, "value vanished after creation")),
    }
}

// -----------------------------------------------------------------------------
// Read

fn length(container: ReflectRef<'_>) -> Option<usize> {
    match container {
        ReflectRef::List(list) => Some(list.len()),
        ReflectRef::Set(set) => Some(set.len()),
        ReflectRef::Map(map) => Some(map.len()),
        ReflectRef::Array(array) => Some(array.len()),
        ReflectRef::Properties(properties) => Some(properties.len()),
        _ => None,
    }
}

/// Reads the element a step addresses.
///
/// Absent elements, unset options and write-only fields read as `None`.
pub(crate) fn read<'a>(step: &ResolvedStep, container: &'a dyn Reflect) -> Option<Resolved<'a>> {
    let container = present(container)?;
    let found = match (&step.key, container.reflect_ref()) {
        (StepKey::Field { name, access }, ReflectRef::Struct(record)) => {
            if !access.is_readable() {
                return None;
            }
            record.field(name)
        }
        (StepKey::Index(index), ReflectRef::List(list)) => list.get(*index),
        (StepKey::Index(index), ReflectRef::Array(array)) => array.get(*index),
        (StepKey::Key { value, .. }, ReflectRef::Map(map)) => map.get(&**value),
        (StepKey::Key { value, .. }, ReflectRef::Set(set)) => set.get(&**value),
        (StepKey::Raw(key), ReflectRef::Properties(properties)) => {
            properties.get_value(key).map(Reflect::as_reflect)
        }
        (StepKey::Length, reflect) => {
            return length(reflect).map(|len| Resolved::Owned(Box::new(len)));
        }
        _ => None,
    };
    present(found?).map(Resolved::Borrowed)
}

// -----------------------------------------------------------------------------
// Descend

/// Pads a list with new elements up to `len`, at most
/// `max_list_padding` of them.
fn pad(
    list: &mut dyn List,
    len: Option<usize>,
    ty: &'static str,
    target: ElementType,
    coercer: &ValueCoercer<'_>,
) -> Result<(), AccessErrorKind> {
    let limit = coercer.options().max_list_padding;
    let missing = len.map(|len| len.saturating_sub(list.len()));
    let Some(missing) = missing.filter(|missing| *missing <= limit) else {
        return Err(AccessErrorKind::unsupported(
            ContainerKind::OrderedList,
            ty,
            format!("growing a list of length {} past {limit} new elements", list.len()),
        ));
    };
    for _ in 0..missing {
        let filler = coercer.create_missing(target)?;
        list.push(filler)
            .map_err(|filler| mismatch(target.type_path(), &*filler))?;
    }
    Ok(())
}

fn not_found(step: &ResolvedStep, ty: &'static str) -> AccessErrorKind {
    AccessErrorKind::PropertyNotFound {
        ty,
        name: step.key_text().into(),
    }
}

/// Returns the element a step addresses for further navigation,
/// creating it when missing.
pub(crate) fn descend_mut<'a>(
    step: &ResolvedStep,
    container: &'a mut dyn Reflect,
    coercer: &ValueCoercer<'_>,
) -> Result<&'a mut dyn Reflect, AccessErrorKind> {
    let ty = container.reflect_type_path();
    let child = match (&step.key, container.reflect_mut()) {
        (StepKey::Field { name, access }, ReflectMut::Struct(record)) => {
            if !access.is_readable() {
                return Err(AccessErrorKind::PropertyNotReadable {
                    ty,
                    name: (*name).into(),
                });
            }
            let Some(child) = record.field_mut(name) else {
                return Err(not_found(step, ty));
            };
            // Filling an unset field writes to it.
            if !access.is_writable() && is_absent(child) {
                return Err(AccessErrorKind::PropertyNotWritable {
                    ty,
                    name: (*name).into(),
                });
            }
            child
        }
        (StepKey::Index(index), ReflectMut::List(list)) => {
            pad(list, index.checked_add(1), ty, step.target, coercer)?;
            match list.get_mut(*index) {
                Some(child) => child,
                None => return Err(not_found(step, ty)),
            }
        }
        (StepKey::Index(index), ReflectMut::Array(array)) => {
            let len = array.len();
            match array.get_mut(*index) {
                Some(child) => child,
                None => {
                    return Err(AccessErrorKind::unsupported(
                        ContainerKind::Array,
                        ty,
                        format!("index {index} with length {len}"),
                    ));
                }
            }
        }
        (StepKey::Key { raw, value: key }, ReflectMut::Map(map)) => {
            if map.get(&**key).is_none() {
                let fresh = coercer.create_missing(step.target)?;
                let owned_key = coercer.coerce(raw, ElementType::Typed(key.reflect_type_info()))?;
                map.insert(owned_key, fresh)
                    .map_err(|(_, fresh)| mismatch(step.target.type_path(), &*fresh))?;
            }
            match map.get_mut(&**key) {
                Some(child) => child,
                None => return Err(not_found(step, ty)),
            }
        }
        _ => {
            return Err(AccessErrorKind::unsupported(
                step.kind,
                ty,
                format!("navigating into `{}`", step.key_text()),
            ));
        }
    };
    present_mut(child, coercer)
}

// -----------------------------------------------------------------------------
// Write

/// Stores `value` at the element a step addresses.
pub(crate) fn write(
    step: &ResolvedStep,
    container: &mut dyn Reflect,
    value: Box<dyn Reflect>,
    coercer: &ValueCoercer<'_>,
) -> Result<(), AccessErrorKind> {
    let ty = container.reflect_type_path();
    let target = step.target.type_path();
    match (&step.key, container.reflect_mut()) {
        (StepKey::Field { name, access }, ReflectMut::Struct(record)) => {
            if !access.is_writable() {
                return Err(AccessErrorKind::PropertyNotWritable {
                    ty,
                    name: (*name).into(),
                });
            }
            let Some(field) = record.field_mut(name) else {
                return Err(not_found(step, ty));
            };
            field.set(value).map_err(|value| mismatch(target, &*value))
        }
        (StepKey::Index(index), ReflectMut::List(list)) => {
            pad(list, Some(*index), ty, step.target, coercer)?;
            if *index == list.len() {
                return list.push(value).map_err(|value| mismatch(target, &*value));
            }
            match list.get_mut(*index) {
                Some(slot) => slot.set(value).map_err(|value| mismatch(target, &*value)),
                None => Err(not_found(step, ty)),
            }
        }
        (StepKey::Index(index), ReflectMut::Array(array)) => {
            let len = array.len();
            match array.get_mut(*index) {
                Some(slot) => slot.set(value).map_err(|value| mismatch(target, &*value)),
                None => Err(AccessErrorKind::unsupported(
                    ContainerKind::Array,
                    ty,
                    format!("index {index} with length {len}"),
                )),
            }
        }
        (StepKey::Key { raw, value: key }, ReflectMut::Map(map)) => {
            let owned_key = coercer.coerce(raw, ElementType::Typed(key.reflect_type_info()))?;
            map.insert(owned_key, value)
                .map(|_| ())
                .map_err(|(_, value)| mismatch(target, &*value))
        }
        // Members are identified by value, the key only matters for reads.
        (StepKey::Key { .. } | StepKey::Raw(_), ReflectMut::Set(set)) => set
            .insert(value)
            .map(|_| ())
            .map_err(|value| mismatch(target, &*value)),
        (StepKey::Raw(key), ReflectMut::Properties(properties)) => {
            let value = value.take::<String>().map_err(|value| mismatch(target, &*value))?;
            properties.insert(&**key, value);
            Ok(())
        }
        (StepKey::Length, _) => Err(AccessErrorKind::unsupported(
            ContainerKind::PseudoLength,
            ty,
            "assignment",
        )),
        _ => Err(AccessErrorKind::unsupported(
            step.kind,
            ty,
            format!("writing `{}`", step.key_text()),
        )),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use pw_reflect::Reflect;
    use pw_reflect::info::Typed;
    use pw_reflect::registry::TypeRegistry;

    use super::{descend_mut, present_mut, read, write};
    use crate::coercer::ValueCoercer;
    use crate::error::AccessErrorKind;
    use crate::path::PathElement;
    use crate::step::ResolvedStep;
    use crate::AccessOptions;

    fn step(element: &str, info: &'static pw_reflect::info::TypeInfo, coercer: &ValueCoercer<'_>) -> ResolvedStep {
        ResolvedStep::resolve(&PathElement::Subscript(element.into()), info, coercer, true).unwrap()
    }

    #[test]
    fn list_writes_pad_with_defaults() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let mut list: Vec<u8> = vec![1];

        let at = step("3", Vec::<u8>::type_info(), &coercer);
        write(&at, &mut list, Box::new(9_u8), &coercer).unwrap();
        assert_eq!(list, [1, 0, 0, 9]);

        let at = step("0", Vec::<u8>::type_info(), &coercer);
        write(&at, &mut list, Box::new(4_u8), &coercer).unwrap();
        assert_eq!(list, [4, 0, 0, 9]);

        let err = write(&at, &mut list, Box::new(4_u16), &coercer).unwrap_err();
        assert!(matches!(err, AccessErrorKind::TypeConversionFailure(_)));
    }

    #[test]
    fn list_reads_are_tolerant() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let list: Vec<u8> = vec![5];

        let at = step("0", Vec::<u8>::type_info(), &coercer);
        let found = read(&at, &list).unwrap();
        assert_eq!(found.downcast_ref::<u8>(), Some(&5));

        let at = step("4", Vec::<u8>::type_info(), &coercer);
        assert!(read(&at, &list).is_none());
    }

    #[test]
    fn map_entries_are_created() {
        let mut registry = TypeRegistry::new();
        registry.register::<HashMap<String, Vec<u8>>>();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let mut map: HashMap<String, Vec<u8>> = HashMap::new();

        let at = step("k", HashMap::<String, Vec<u8>>::type_info(), &coercer);
        let child = descend_mut(&at, &mut map, &coercer).unwrap();
        assert!(child.is::<Vec<u8>>());
        assert_eq!(map.get("k").map(Vec::len), Some(0));

        let coercer = ValueCoercer::new(&registry, AccessOptions::new().create_missing(false));
        let at = step("other", HashMap::<String, Vec<u8>>::type_info(), &coercer);
        let err = descend_mut(&at, &mut map, &coercer).unwrap_err();
        assert!(matches!(err, AccessErrorKind::PropertyCreationFailure { .. }));
    }

    #[test]
    fn absent_options_are_filled() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let mut value: Option<u32> = None;

        let inner = present_mut(&mut value, &coercer).unwrap();
        assert!(inner.set(Box::new(3_u32)).is_ok());
        assert_eq!(value, Some(3));
    }

    #[test]
    fn length_is_read_only() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let mut list: Vec<u8> = vec![1, 2];

        let at = ResolvedStep::resolve(
            &PathElement::PropertyName("size".into()),
            Vec::<u8>::type_info(),
            &coercer,
            true,
        )
        .unwrap();
        let len = read(&at, &list).unwrap();
        assert!(len.is_owned());
        assert_eq!(len.downcast_ref::<usize>(), Some(&2));

        let err = write(&at, &mut list, Box::new(5_usize), &coercer).unwrap_err();
        assert!(matches!(err, AccessErrorKind::UnsupportedContainerOperation { .. }));
    }
}
