//! Container-specific operations.
//!
//! Each subtrait of [`Reflect`] gives access to one kind of container:
//!
//! - [`Struct`]: records with named fields.
//! - [`List`]: ordered, growable sequences (e.g. `Vec<T>`).
//! - [`Set`]: unordered unique collections (e.g. `HashSet<T>`).
//! - [`Map`]: key-value mappings (e.g. `BTreeMap<K, V>`).
//! - [`Array`]: fixed-size sequences (e.g. `[T; N]`).
//! - [`Optional`]: a value that may be absent (e.g. `Option<T>`).
//!
//! [`Properties`] and [`DynamicList`] are concrete reflected containers
//! whose elements are raw strings or untyped values.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod properties;
mod set_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};

pub use array_ops::{Array, ArrayItemIter};
pub use list_ops::{DynamicList, List, ListItemIter};
pub use map_ops::Map;
pub use option_ops::Optional;
pub use properties::Properties;
pub use set_ops::Set;
pub use struct_ops::{Struct, StructFieldIter};
