//! The `get_property`, `set_property` and `apply_properties` front end.

use alloc::format;
use alloc::string::ToString;

use pw_reflect::Reflect;
use pw_reflect::info::{TypeInfo, TypePath, Typed};
use pw_reflect::registry::{ConversionError, TypeRegistry};

use crate::accessor::Resolved;
use crate::coercer::{PropertyValue, ValueCoercer};
use crate::descriptor::PathDescriptor;
use crate::error::{AccessError, ApplyPropertiesError};
use crate::path::PathExpression;
use crate::walker::{self, DynamicSteps};
use crate::AccessOptions;

// -----------------------------------------------------------------------------
// PropertyAccess

/// Reads and writes nested properties of reflected values by path.
///
/// Types reached while writing must be registered in the
/// [`TypeRegistry`]: missing values are created from their registered
/// default, raw strings are converted with their registered converter.
///
/// ```
/// use pw_access::PropertyAccess;
/// use pw_reflect::impl_record;
/// use pw_reflect::registry::TypeRegistry;
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     ports: Vec<u16>,
/// }
///
/// impl_record! {
///     #[reflect(default)]
///     Server { host: String, ports: Vec<u16> }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Server>();
/// let access = PropertyAccess::new(&registry);
///
/// let mut server = Server::default();
/// access.set_property(&mut server, "host", "localhost").unwrap();
/// access.set_property(&mut server, "ports[1]", "8080").unwrap();
/// assert_eq!(server.ports, [0, 8080]);
///
/// let host = access.get_property_as::<String>(&server, "host").unwrap();
/// assert_eq!(host.as_deref(), Some("localhost"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertyAccess<'r> {
    coercer: ValueCoercer<'r>,
}

impl<'r> PropertyAccess<'r> {
    #[inline]
    pub const fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, AccessOptions::DEFAULT)
    }

    #[inline]
    pub const fn with_options(registry: &'r TypeRegistry, options: AccessOptions) -> Self {
        Self {
            coercer: ValueCoercer::new(registry, options),
        }
    }

    #[inline]
    pub const fn registry(&self) -> &'r TypeRegistry {
        self.coercer.registry()
    }

    #[inline]
    pub const fn options(&self) -> &AccessOptions {
        self.coercer.options()
    }

    #[inline]
    pub const fn coercer(&self) -> &ValueCoercer<'r> {
        &self.coercer
    }

    /// Reads the value at `path`.
    ///
    /// Returns `Ok(None)` if a list index, map key or set member on the
    /// way is absent, an optional value is unset, the addressed field is
    /// write-only, a name matches no property, or a key does not convert
    /// to the key type. Fails on malformed paths and on containers whose
    /// element types are undeclared under
    /// [`AccessOptions::strict_generics`].
    pub fn get_property<'a>(
        &self,
        root: &'a dyn Reflect,
        path: &str,
    ) -> Result<Option<Resolved<'a>>, AccessError> {
        let expression = PathExpression::parse(path).map_err(AccessError::parse)?;
        let steps = DynamicSteps {
            expression: &expression,
            coercer: &self.coercer,
        };
        walker::read(&steps, root)
    }

    /// Reads the value at `path` as a `T`.
    pub fn get_property_as<T: Reflect + TypePath + Clone>(
        &self,
        root: &dyn Reflect,
        path: &str,
    ) -> Result<Option<T>, AccessError> {
        let Some(found) = self.get_property(root, path)? else {
            return Ok(None);
        };
        match found.downcast_ref::<T>() {
            Some(value) => Ok(Some(value.clone())),
            None => {
                let value = found.as_reflect();
                let err = ConversionError::new(
                    format!("{value:?}"),
                    T::type_path(),
                    format!("found a value of type `{}`", value.reflect_type_path()),
                );
                Err(AccessError::new(err.into(), path, None))
            }
        }
    }

    /// Converts `value` and assigns it to the property at `path`.
    ///
    /// Missing optional values, list entries and map entries on the way
    /// are created unless disabled through
    /// [`AccessOptions::create_missing`]. The empty path addresses the
    /// root itself, assigning to it does nothing.
    pub fn set_property(
        &self,
        root: &mut dyn Reflect,
        path: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), AccessError> {
        self.set_value(root, path, &value.into())
    }

    fn set_value(
        &self,
        root: &mut dyn Reflect,
        path: &str,
        value: &PropertyValue,
    ) -> Result<(), AccessError> {
        let expression = PathExpression::parse(path).map_err(AccessError::parse)?;
        let steps = DynamicSteps {
            expression: &expression,
            coercer: &self.coercer,
        };
        walker::write(&steps, root, value, &self.coercer)
    }

    /// Assigns every `(path, value)` pair in order.
    ///
    /// Stops at the first failure. Earlier assignments are kept.
    /// Returns the number of assigned properties.
    pub fn apply_properties<I, K, V>(
        &self,
        root: &mut dyn Reflect,
        properties: I,
    ) -> Result<usize, ApplyPropertiesError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PropertyValue>,
    {
        let mut applied = 0;
        for (key, value) in properties {
            let key = key.as_ref();
            let value = value.into();
            if let Err(source) = self.set_value(root, key, &value) {
                log::debug!("stopped after {applied} properties: {source}");
                return Err(ApplyPropertiesError {
                    key: key.to_string(),
                    value: value.to_string(),
                    source,
                });
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Compiles `path` for values of the root type `root`.
    pub fn compile(&self, root: &'static TypeInfo, path: &str) -> Result<PathDescriptor, AccessError> {
        PathDescriptor::compile(root, path, &self.coercer)
    }

    /// Compiles `path` for values of type `T`.
    #[inline]
    pub fn compile_for<T: Typed>(&self, path: &str) -> Result<PathDescriptor, AccessError> {
        self.compile(T::type_info(), path)
    }
}


// -----------------------------------------------------------------------------
// Tests
