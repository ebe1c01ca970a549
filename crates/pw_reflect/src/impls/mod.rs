//! Provide some utilities for implementing reflection traits,
//! and the implementations for standard types.
//!
//! - [`concat`]: String concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//! - `xxx_debug`: Used to implement [`Reflect::reflect_debug`] (e.g. [`list_debug`]).
//!
//! ## Implemented Menu
//!
//! - `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`, `String`
//! - `Option<T>`, `[T; N]`
//! - `Vec<T>`, `VecDeque<T>`
//! - `BTreeMap<K, V>`, `BTreeSet<T>`
//! - `std::collections::HashMap<K, V, S>`, `std::collections::HashSet<T, S>`
//! - `hashbrown::HashMap<K, V, S>`, `hashbrown::HashSet<T, S>`, including the
//!   `pw_utils::hash` aliases
//!
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod debug;

mod array;
mod list;
mod map;
mod option;
mod primitive;
mod set;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use debug::{array_debug, list_debug, map_debug, optional_debug, set_debug, struct_debug};

/// Concatenates string slices, used to build generic type paths.
///
/// ```
/// use pw_reflect::impls::concat;
///
/// assert_eq!(concat(&["Vec<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
