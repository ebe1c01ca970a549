//! Static type information.
//!
//! Every reflected type provides a [`TypeInfo`] through [`Typed`].
//! Container infos keep their element types in [`Generics`], which is
//! what path resolution reads to find the declared type of the next step.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod field_info;
mod generics;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod set_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

use generics::impl_generic_fn;

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use field_info::{FieldAccess, NamedField};
pub use generics::{Generics, TypeParamInfo};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::{OpaqueInfo, PropertiesInfo};
pub use option_info::OptionInfo;
pub use set_info::SetInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
