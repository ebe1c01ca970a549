use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use pw_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// The registered data of a type: its [`TypeInfo`] and a table of
/// [`TypeTrait`]s keyed by the trait's own type.
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    traits: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            traits: TypeIdMap::new(),
        }
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_info.ty_id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    /// Stores `data`, replacing an earlier trait of the same type.
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.traits.insert(TypeId::of::<T>(), Box::new(data));
    }

    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        let data: &dyn TypeTrait = &**self.traits.get(&TypeId::of::<T>())?;
        <dyn Any>::downcast_ref(data)
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.traits.contains(&TypeId::of::<T>())
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("traits", &self.traits.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Creates the [`TypeMeta`] of a type.
///
/// `register_dependencies` registers the types this type refers to, such
/// as field types and element types, so registering a root type makes its
/// whole object graph known to the registry.
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
