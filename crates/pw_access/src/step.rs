//! Single resolved path steps.

use alloc::boxed::Box;
use alloc::format;
use core::fmt;

use pw_reflect::Reflect;
use pw_reflect::info::{FieldAccess, TypeInfo, TypePath, Typed};
use pw_reflect::registry::ConversionError;

use crate::coercer::ValueCoercer;
use crate::error::AccessErrorKind;
use crate::path::PathElement;
use crate::resolver::{ElementType, element_types, unwrap_optional};

// -----------------------------------------------------------------------------
// ContainerKind

/// The access strategy selected for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Named fields of a struct.
    Record,
    /// An indexed, growable list.
    OrderedList,
    /// A set addressed by member.
    UnorderedSet,
    /// A map addressed by key.
    Mapping,
    /// A fixed-size array.
    Array,
    /// String properties addressed by name.
    Properties,
    /// The `length` or `size` of a container.
    PseudoLength,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record => f.pad("record"),
            Self::OrderedList => f.pad("list"),
            Self::UnorderedSet => f.pad("set"),
            Self::Mapping => f.pad("map"),
            Self::Array => f.pad("array"),
            Self::Properties => f.pad("properties"),
            Self::PseudoLength => f.pad("length"),
        }
    }
}

// -----------------------------------------------------------------------------
// StepKey

/// How a step addresses its element inside the container.
#[derive(Debug)]
pub enum StepKey {
    Field {
        name: &'static str,
        access: FieldAccess,
    },
    Index(usize),
    /// A map key or set member, converted to the key type.
    Key {
        raw: Box<str>,
        value: Box<dyn Reflect>,
    },
    /// A properties key, or a set member that could not be converted.
    Raw(Box<str>),
    Length,
}

// -----------------------------------------------------------------------------
// ResolvedStep

/// A path element bound to the container type it applies to.
#[derive(Debug)]
pub struct ResolvedStep {
    pub kind: ContainerKind,
    pub key: StepKey,
    /// The container, with `Option` layers stripped.
    pub container: &'static TypeInfo,
    /// The type of the addressed element.
    pub target: ElementType,
}

impl ResolvedStep {
    /// Binds `element` to a container of type `container`.
    ///
    /// Only type information is inspected, so the same resolution serves
    /// runtime walks and compiled descriptors.
    pub fn resolve(
        element: &PathElement,
        container: &'static TypeInfo,
        coercer: &ValueCoercer<'_>,
        is_last: bool,
    ) -> Result<Self, AccessErrorKind> {
        let container = unwrap_optional(container);
        let ty = container.type_path();
        let options = coercer.options();

        match element {
            PathElement::PropertyName(name) => {
                if let TypeInfo::Struct(info) = container {
                    let Some(field) = info.field(name) else {
                        return Err(AccessErrorKind::PropertyNotFound {
                            ty,
                            name: name.clone(),
                        });
                    };
                    return Ok(Self {
                        kind: ContainerKind::Record,
                        key: StepKey::Field {
                            name: field.name(),
                            access: field.access(),
                        },
                        container,
                        target: ElementType::Typed(field.type_info()),
                    });
                }

                let is_length = matches!(&**name, "length" | "size");
                if is_length && options.pseudo_properties && container.kind().is_container() {
                    if !is_last {
                        return Err(AccessErrorKind::unsupported(
                            ContainerKind::PseudoLength,
                            ty,
                            format!("navigating through `{name}`"),
                        ));
                    }
                    return Ok(Self {
                        kind: ContainerKind::PseudoLength,
                        key: StepKey::Length,
                        container,
                        target: ElementType::Typed(usize::type_info()),
                    });
                }

                Err(AccessErrorKind::PropertyNotFound {
                    ty,
                    name: name.clone(),
                })
            }
            PathElement::Subscript(raw) => {
                let Some((key_type, target)) = element_types(container, options)? else {
                    return match container {
                        TypeInfo::Struct(_) => Err(AccessErrorKind::unsupported(
                            ContainerKind::Record,
                            ty,
                            format!("subscript `[{raw}]`"),
                        )),
                        _ => Err(AccessErrorKind::PropertyNotFound {
                            ty,
                            name: format!("[{raw}]").into(),
                        }),
                    };
                };

                let (kind, key) = match container {
                    TypeInfo::List(_) | TypeInfo::Array(_) => {
                        let index = raw.parse::<usize>().map_err(|err| {
                            ConversionError::new(&**raw, usize::type_path(), err)
                        })?;
                        let kind = match container {
                            TypeInfo::List(_) => ContainerKind::OrderedList,
                            _ => ContainerKind::Array,
                        };
                        (kind, StepKey::Index(index))
                    }
                    TypeInfo::Map(_) => {
                        let value = coercer.coerce(raw, key_type)?;
                        let key = StepKey::Key {
                            raw: raw.clone(),
                            value,
                        };
                        (ContainerKind::Mapping, key)
                    }
                    TypeInfo::Set(_) => {
                        // Members that are not convertible can still be
                        // written through, the key is not used for that.
                        let key = match coercer.coerce(raw, key_type) {
                            Ok(value) => StepKey::Key {
                                raw: raw.clone(),
                                value,
                            },
                            Err(_) => StepKey::Raw(raw.clone()),
                        };
                        (ContainerKind::UnorderedSet, key)
                    }
                    _ => (ContainerKind::Properties, StepKey::Raw(raw.clone())),
                };

                Ok(Self {
                    kind,
                    key,
                    container,
                    target,
                })
            }
        }
    }

    /// The raw key text of the step, used in error messages.
    pub fn key_text(&self) -> &str {
        match &self.key {
            StepKey::Field { name, .. } => name,
            StepKey::Key { raw, .. } | StepKey::Raw(raw) => raw,
            StepKey::Index(_) => "<index>",
            StepKey::Length => "length",
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use alloc::collections::BTreeMap;
    use std::collections::HashSet;

    use pw_reflect::impl_record;
    use pw_reflect::info::{FieldAccess, Typed};
    use pw_reflect::registry::TypeRegistry;

    use super::{ContainerKind, ResolvedStep, StepKey};
    use crate::coercer::ValueCoercer;
    use crate::error::AccessErrorKind;
    use crate::path::PathElement;
    use crate::resolver::ElementType;
    use crate::AccessOptions;

    #[derive(Default)]
    struct Host {
        name: String,
        ports: Vec<u16>,
    }

    impl_record! {
        #[reflect(default)]
        Host {
            #[reflect(read_only)]
            name: String,
            ports: Vec<u16>,
        }
    }

    fn name(text: &str) -> PathElement {
        PathElement::PropertyName(text.into())
    }

    fn subscript(text: &str) -> PathElement {
        PathElement::Subscript(text.into())
    }

    #[test]
    fn record_fields() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let step = ResolvedStep::resolve(&name("name"), Host::type_info(), &coercer, true).unwrap();
        assert_eq!(step.kind, ContainerKind::Record);
        assert!(matches!(
            step.key,
            StepKey::Field { name: "name", access: FieldAccess::ReadOnly }
        ));
        assert_eq!(step.target, ElementType::Typed(String::type_info()));

        let err = ResolvedStep::resolve(&name("port"), Host::type_info(), &coercer, true).unwrap_err();
        assert!(matches!(err, AccessErrorKind::PropertyNotFound { .. }));

        let err = ResolvedStep::resolve(&subscript("0"), Host::type_info(), &coercer, true).unwrap_err();
        assert!(matches!(
            err,
            AccessErrorKind::UnsupportedContainerOperation { kind: ContainerKind::Record, .. }
        ));
    }

    #[test]
    fn list_indices() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let info = Vec::<u16>::type_info();

        let step = ResolvedStep::resolve(&subscript("3"), info, &coercer, true).unwrap();
        assert_eq!(step.kind, ContainerKind::OrderedList);
        assert!(matches!(step.key, StepKey::Index(3)));
        assert_eq!(step.target, ElementType::Typed(u16::type_info()));

        let err = ResolvedStep::resolve(&subscript("x"), info, &coercer, true).unwrap_err();
        assert!(matches!(err, AccessErrorKind::TypeConversionFailure(_)));
    }

    #[test]
    fn map_keys_are_converted() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let info = BTreeMap::<u8, String>::type_info();

        let step = ResolvedStep::resolve(&subscript("7"), info, &coercer, true).unwrap();
        assert_eq!(step.kind, ContainerKind::Mapping);
        let StepKey::Key { value, .. } = &step.key else {
            panic!("expected a converted key");
        };
        assert_eq!(value.downcast_ref::<u8>(), Some(&7));

        let err = ResolvedStep::resolve(&subscript("300"), info, &coercer, true).unwrap_err();
        assert!(matches!(err, AccessErrorKind::TypeConversionFailure(_)));
    }

    #[test]
    fn set_members_fall_back_to_raw() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let step =
            ResolvedStep::resolve(&subscript("x"), HashSet::<u32>::type_info(), &coercer, true)
                .unwrap();
        assert_eq!(step.kind, ContainerKind::UnorderedSet);
        assert!(matches!(&step.key, StepKey::Raw(raw) if &**raw == "x"));
    }

    #[test]
    fn pseudo_length() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());
        let info = Vec::<u16>::type_info();

        for text in ["length", "size"] {
            let step = ResolvedStep::resolve(&name(text), info, &coercer, true).unwrap();
            assert_eq!(step.kind, ContainerKind::PseudoLength);
            assert_eq!(step.target, ElementType::Typed(usize::type_info()));
        }

        let err = ResolvedStep::resolve(&name("length"), info, &coercer, false).unwrap_err();
        assert!(matches!(
            err,
            AccessErrorKind::UnsupportedContainerOperation { kind: ContainerKind::PseudoLength, .. }
        ));

        let coercer = ValueCoercer::new(&registry, AccessOptions::new().pseudo_properties(false));
        let err = ResolvedStep::resolve(&name("length"), info, &coercer, true).unwrap_err();
        assert!(matches!(err, AccessErrorKind::PropertyNotFound { .. }));
    }

    #[test]
    fn optional_containers_are_unwrapped() {
        let registry = TypeRegistry::new();
        let coercer = ValueCoercer::new(&registry, AccessOptions::new());

        let step =
            ResolvedStep::resolve(&subscript("0"), Option::<Vec<u16>>::type_info(), &coercer, true)
                .unwrap();
        assert!(step.container.type_is::<Vec<u16>>());
    }
}
