use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;
use core::fmt::Display;

use pw_utils::TypeIdMap;
use pw_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::Reflect;
use crate::info::{NamedField, TypeInfo};
use crate::registry::{ConversionError, GetTypeMeta, TypeMeta, TypeTrait};
use crate::registry::{TypeTraitDefault, TypeTraitFromStr};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// Types are stored by [`TypeId`] and indexed by full type path and by
/// short type name. Short names shared by several types are ambiguous
/// and can not be looked up.
///
/// Registering a type also registers its dependencies, so registering
/// the root type of an object graph is usually enough.
///
/// ```
/// use core::any::TypeId;
/// use pw_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Option<u8>>>();
///
/// // Element types are registered too.
/// assert!(registry.contains(TypeId::of::<Option<u8>>()));
/// let value = registry.convert("7", TypeId::of::<u8>()).unwrap();
/// assert_eq!(value.take::<u8>().ok(), Some(7));
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any type.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with primitives and `String` registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    /// Stores the meta of a new type and indexes its names.
    ///
    /// Returns `false` without calling `make` when the type is known.
    fn insert_meta(&mut self, type_id: TypeId, make: impl FnOnce() -> TypeMeta) -> bool {
        if self.type_meta_table.contains(&type_id) {
            return false;
        }
        let meta = make();
        let ty = meta.ty();
        self.type_path_to_id.insert(ty.path(), type_id);

        // A short name shared by two types is dropped from the index for good.
        let name = ty.name();
        if !self.ambiguous_names.contains(name)
            && self.type_name_to_id.insert(name, type_id).is_some()
        {
            self.type_name_to_id.remove(name);
            self.ambiguous_names.insert(name);
        }

        self.type_meta_table.insert(type_id, meta);
        true
    }

    /// Registers `T` and its dependencies. Registered types are skipped.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.insert_meta(TypeId::of::<T>(), T::get_type_meta) {
            log::trace!("registered type `{}`", T::type_path());
            T::register_dependencies(self);
        }
    }

    /// Registers `T` if needed and installs a string converter for it,
    /// replacing any previous one.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use pw_reflect::registry::TypeRegistry;
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register_converter::<bool, _, _>(|raw: &str| match raw {
    ///     "yes" | "on" => Ok(true),
    ///     "no" | "off" => Ok(false),
    ///     other => Err(format!("`{other}` is not a switch")),
    /// });
    ///
    /// let on = registry.convert("on", TypeId::of::<bool>()).unwrap();
    /// assert_eq!(on.take::<bool>().ok(), Some(true));
    /// ```
    pub fn register_converter<T, E, F>(&mut self, func: F)
    where
        T: GetTypeMeta + Reflect,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register::<T>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            type_meta.insert_trait(TypeTraitFromStr::new(func));
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Looks a type up by its full [`TypePath::type_path`].
    ///
    /// [`TypePath::type_path`]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.get(*self.type_path_to_id.get(type_path)?)
    }

    /// Looks a type up by its short name, `None` when the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.get(*self.type_name_to_id.get(type_name)?)
    }

    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id)?.get_trait::<T>()
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Looks up a named field of a registered record type.
    ///
    /// Returns `None` if the type is not registered, is not a record,
    /// or has no such field.
    pub fn get_field(&self, type_id: TypeId, name: &str) -> Option<&'static NamedField> {
        self.get_type_info(type_id)?.as_struct().ok()?.field(name)
    }

    /// Creates a default instance of a registered type.
    pub fn create_default(&self, type_id: TypeId) -> Option<Box<dyn Reflect>> {
        self.get_type_trait::<TypeTraitDefault>(type_id)
            .map(TypeTraitDefault::default)
    }

    /// Returns `true` if a string converter is registered for the type.
    #[inline]
    pub fn has_converter(&self, type_id: TypeId) -> bool {
        self.get_type_trait::<TypeTraitFromStr>(type_id).is_some()
    }

    /// Converts `raw` with the converter registered for exactly `type_id`.
    pub fn convert(&self, raw: &str, type_id: TypeId) -> Result<Box<dyn Reflect>, ConversionError> {
        let Some(type_meta) = self.get(type_id) else {
            return Err(ConversionError::new(raw, "<unregistered>", "type is not registered"));
        };
        match type_meta.get_trait::<TypeTraitFromStr>() {
            Some(converter) => converter
                .convert(raw)
                .map_err(|reason| ConversionError::new(raw, type_meta.type_path(), reason)),
            None => Err(ConversionError::new(
                raw,
                type_meta.type_path(),
                "no converter registered",
            )),
        }
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    /// Registers every type submitted by [`impl_record!`](crate::impl_record)
    /// in any linked crate.
    ///
    /// Returns `false` if the `auto_register` feature is disabled.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            let mut count = 0_usize;
            for registration in inventory::iter::<AutoRegistration> {
                (registration.func)(self);
                count += 1;
            }
            log::debug!("auto registered {count} record types");
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.type_meta_table.values().map(TypeMeta::type_path))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// AutoRegistration

/// A type submitted for [`TypeRegistry::auto_register`].
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    func: fn(&mut TypeRegistry),
}

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    pub const fn of<T: GetTypeMeta>() -> Self {
        Self {
            func: TypeRegistry::register::<T>,
        }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::registry::{TypeTraitDefault, TypeTraitFromStr};
    use alloc::{collections::BTreeMap, string::String, vec::Vec};
    use core::any::TypeId;

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::empty();
        registry.register::<BTreeMap<String, Vec<u32>>>();

        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.contains(TypeId::of::<Vec<u32>>()));
        assert!(registry.contains(TypeId::of::<u32>()));

        let meta = registry.get(TypeId::of::<Vec<u32>>()).unwrap();
        assert!(meta.has_trait::<TypeTraitDefault>());
        assert!(!meta.has_trait::<TypeTraitFromStr>());
    }

    #[test]
    fn lookup_by_path_and_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Option<u8>>();

        let meta = registry.get_with_type_path("core::option::Option<u8>").unwrap();
        assert_eq!(meta.type_id(), TypeId::of::<Option<u8>>());
        assert!(registry.get_with_type_name("String").is_some());
        assert!(!registry.is_ambiguous("String"));
    }

    #[test]
    fn shared_short_names_are_ambiguous() {
        let mut registry = TypeRegistry::empty();
        registry.register::<std::collections::HashMap<u8, u8>>();
        assert!(registry.get_with_type_name("HashMap<u8, u8>").is_some());

        registry.register::<pw_utils::hash::HashMap<u8, u8>>();
        assert!(registry.is_ambiguous("HashMap<u8, u8>"));
        assert!(registry.get_with_type_name("HashMap<u8, u8>").is_none());
        assert!(registry.get_with_type_path("std::collections::HashMap<u8, u8, std::hash::RandomState>").is_some());
    }

    #[test]
    fn convert_reports_failures() {
        let registry = TypeRegistry::new();

        let value = registry.convert("12", TypeId::of::<i64>()).unwrap();
        assert_eq!(value.take::<i64>().ok(), Some(12));

        let err = registry.convert("x", TypeId::of::<i64>()).unwrap_err();
        assert_eq!(err.raw, "x");
        assert_eq!(err.target, "i64");

        let err = registry.convert("1", TypeId::of::<Vec<u8>>()).unwrap_err();
        assert_eq!(err.reason, "type is not registered");
    }

    #[test]
    fn custom_converter_replaces_parse() {
        let mut registry = TypeRegistry::new();
        registry.register_converter::<u16, _, _>(|raw: &str| {
            raw.strip_prefix("0x")
                .map(|hex| u16::from_str_radix(hex, 16))
                .unwrap_or_else(|| raw.parse())
        });

        let value = registry.convert("0x1F", TypeId::of::<u16>()).unwrap();
        assert_eq!(value.take::<u16>().ok(), Some(31));
    }

    #[test]
    fn create_default_value() {
        let registry = TypeRegistry::new();
        let value = registry.create_default(TypeId::of::<String>()).unwrap();
        assert_eq!(value.take::<String>().ok().as_deref(), Some(""));
        assert!(registry.create_default(TypeId::of::<Vec<u8>>()).is_none());
    }
}
