//! `static` storage for type information.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use pw_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// The [`TypeInfo`] of a non generic type, built on first access.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, build: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(build)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Per-instantiation storage for generic types.
///
/// A `static` inside a generic function is shared by all instantiations,
/// so values are keyed by the [`TypeId`] of the instantiated type. Stored
/// values are leaked and live until the program exits.
///
/// ```
/// use pw_reflect::impls::{GenericTypePathCell, concat};
/// use pw_reflect::info::TypePath;
///
/// struct Slot<T>(T);
///
/// impl<T: TypePath> TypePath for Slot<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Slot<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Slot<", T::type_name(), ">"]))
///     }
/// }
///
/// assert_eq!(Slot::<u8>::type_name(), "Slot<u8>");
/// assert_eq!(Slot::<Slot<bool>>::type_name(), "Slot<Slot<bool>>");
/// ```
pub struct GenericTypeCell<T: 'static> {
    entries: RwLock<TypeIdMap<&'static T>>,
}

pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: 'static> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the value stored for `G`, building it on first use.
    pub fn get_or_insert<G: Any + ?Sized>(&self, build: impl FnOnce() -> T) -> &T {
        let key = TypeId::of::<G>();
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(value) = cached {
            return value;
        }

        // Nested generics reenter this cell from `build`, so no lock is held.
        let value = build();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries.get_or_insert(key, || Box::leak(Box::new(value)))
    }
}
