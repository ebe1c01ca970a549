/// Implements the reflection traits for a struct with named fields.
///
/// Generates `TypePath`, `Typed`, `Reflect`, `Struct` and `GetTypeMeta`.
/// Field types must implement `GetTypeMeta`, they are registered as
/// dependencies of the record.
///
/// - `#[reflect(default)]` on the struct registers a `TypeTraitDefault`,
///   the struct must implement [`Default`]. Only such records can be
///   created when a path writes through a missing value.
/// - `#[reflect(read_only)]` or `#[reflect(write_only)]` on a field
///   restricts path access to it.
///
/// With the `auto_register` feature the type is also submitted to
/// [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register).
///
/// ```
/// use pw_reflect::impl_record;
/// use pw_reflect::info::{FieldAccess, Typed};
/// use pw_reflect::ops::Struct;
///
/// #[derive(Default)]
/// struct Account {
///     name: String,
///     id: u64,
///     secret: String,
/// }
///
/// impl_record! {
///     #[reflect(default)]
///     Account {
///         name: String,
///         #[reflect(read_only)]
///         id: u64,
///         #[reflect(write_only)]
///         secret: String,
///     }
/// }
///
/// let info = Account::type_info().as_struct().unwrap();
/// assert_eq!(info.field_names(), ["name", "id", "secret"]);
/// assert_eq!(info.field("id").unwrap().access(), FieldAccess::ReadOnly);
///
/// let account = Account { id: 7, ..Default::default() };
/// assert_eq!(account.field("id").unwrap().downcast_ref::<u64>(), Some(&7));
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[reflect($($flag:ident),* $(,)?)])*
        $name:ident {
            $(
                $(#[reflect($access:ident)])?
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        impl $crate::info::TypePath for $name {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!($name))
            }

            #[inline]
            fn type_name() -> &'static str {
                ::core::stringify!($name)
            }
        }

        impl $crate::info::Typed for $name {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Struct($crate::info::StructInfo::new::<Self>(&[
                        $(
                            $crate::info::NamedField::new::<$ty>(::core::stringify!($field))
                                .with_access($crate::__field_access!($($access)?)),
                        )*
                    ]))
                })
            }
        }

        impl $crate::Reflect for $name {
            $crate::__impl_reflect_cast_fn!(Struct);
        }

        impl $crate::ops::Struct for $name {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn $crate::Reflect> {
                match name {
                    $( ::core::stringify!($field) => ::core::option::Option::Some(&self.$field as &dyn $crate::Reflect), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn $crate::Reflect> {
                match name {
                    $( ::core::stringify!($field) => ::core::option::Option::Some(&mut self.$field as &mut dyn $crate::Reflect), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                const NAMES: &[&str] = &[$(::core::stringify!($field)),*];
                NAMES.get(index).copied()
            }

            fn field_len(&self) -> usize {
                const NAMES: &[&str] = &[$(::core::stringify!($field)),*];
                NAMES.len()
            }

            #[inline]
            fn iter_fields(&self) -> $crate::ops::StructFieldIter<'_> {
                $crate::ops::StructFieldIter::new(self)
            }
        }

        impl $crate::registry::GetTypeMeta for $name {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                #[allow(unused_mut)]
                let mut type_meta = $crate::registry::TypeMeta::of::<Self>();
                $($( $crate::__record_flag!($flag, type_meta); )*)*
                type_meta
            }

            fn register_dependencies(_registry: &mut $crate::registry::TypeRegistry) {
                $( _registry.register::<$ty>(); )*
            }
        }

        $crate::__auto_register!($name);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_access {
    () => {
        $crate::info::FieldAccess::ReadWrite
    };
    (read_only) => {
        $crate::info::FieldAccess::ReadOnly
    };
    (write_only) => {
        $crate::info::FieldAccess::WriteOnly
    };
    ($other:ident) => {
        ::core::compile_error!(::core::concat!(
            "unknown field attribute `",
            ::core::stringify!($other),
            "`, expected `read_only` or `write_only`"
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_flag {
    (default, $meta:ident) => {
        $meta.insert_trait::<$crate::registry::TypeTraitDefault>(
            <$crate::registry::TypeTraitDefault as $crate::registry::FromType<Self>>::from_type(),
        );
    };
    ($other:ident, $meta:ident) => {
        ::core::compile_error!(::core::concat!(
            "unknown record attribute `",
            ::core::stringify!($other),
            "`, expected `default`"
        ));
    };
}

#[cfg(test)]
mod tests {
    use crate::impl_record;
    use crate::info::{FieldAccess, ReflectKind, TypePath, Typed};
    use crate::ops::Struct;
    use crate::registry::{TypeRegistry, TypeTraitDefault};
    use crate::Reflect;
    use alloc::{boxed::Box, format, string::String, vec::Vec};
    use core::any::TypeId;

    #[derive(Debug, Default, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
        tags: Vec<String>,
    }

    impl_record! {
        #[reflect(default)]
        Endpoint {
            host: String,
            #[reflect(read_only)]
            port: u16,
            tags: Vec<String>,
        }
    }

    struct Plain {
        flag: bool,
    }

    impl_record! {
        Plain { flag: bool }
    }

    #[test]
    fn record_info() {
        assert!(Endpoint::type_path().ends_with("::Endpoint"));
        assert_eq!(Endpoint::type_name(), "Endpoint");

        let info = Endpoint::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 3);
        assert_eq!(info.field("port").unwrap().access(), FieldAccess::ReadOnly);
        assert_eq!(info.field("host").unwrap().access(), FieldAccess::ReadWrite);
        assert!(info.field("tags").unwrap().type_is::<Vec<String>>());
        assert!(info.field("missing").is_none());
    }

    #[test]
    fn record_fields() {
        let mut endpoint = Endpoint::default();
        assert_eq!(endpoint.reflect_kind(), ReflectKind::Struct);

        endpoint
            .field_mut("host")
            .unwrap()
            .set(Box::new(String::from("localhost")))
            .unwrap();
        assert_eq!(endpoint.host, "localhost");
        assert_eq!(endpoint.name_at(1), Some("port"));
        assert!(endpoint.field_at(3).is_none());

        let names: Vec<&str> = endpoint.iter_fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["host", "port", "tags"]);

        let text = format!("{:?}", endpoint.as_reflect());
        assert!(text.starts_with("Endpoint {"));
    }

    #[test]
    fn record_registration() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Endpoint>();
        registry.register::<Plain>();

        assert!(registry.contains(TypeId::of::<Vec<String>>()));
        assert!(registry.contains(TypeId::of::<u16>()));
        assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Endpoint>()).is_some());
        assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Plain>()).is_none());
        assert!(registry.get_field(TypeId::of::<Endpoint>(), "tags").is_some());

        let plain = Plain { flag: true };
        assert_eq!(plain.field("flag").and_then(|v| v.downcast_ref::<bool>()), Some(&true));
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn record_auto_registration() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Endpoint>()));
    }
}
