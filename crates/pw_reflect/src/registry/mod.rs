//! Provide type registry for non-object information querying.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A capability supported by a type.
//! - [`FromType`]: Creates a `TypeTrait` from a type.
//! - [`TypeMeta`]: A [`TypeInfo`] together with a [`TypeTrait`] table.
//! - [`GetTypeMeta`]: Creates the `TypeMeta` of a type and registers its dependencies.
//! - [`TypeRegistry`]: Stores `TypeMeta`s by [`TypeId`], type path and type name.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: Creates a default instance, used to fill in missing values.
//!     - [`TypeTraitFromStr`]: Converts a raw string into a value of the type.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, every type passed to
//! [`impl_record!`](crate::impl_record) is collected by the [`inventory`]
//! crate, see [`TypeRegistry::auto_register`].
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`TypeId`]: core::any::TypeId
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{ConversionError, TypeTraitDefault, TypeTraitFromStr};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;

#[cfg(feature = "auto_register")]
pub use type_registry::AutoRegistration;
