//! Items used by the exported macros. Not a public API.

#[cfg(feature = "auto_register")]
pub use inventory;

/// Submits a record type for [`TypeRegistry::auto_register`].
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[cfg(feature = "auto_register")]
#[doc(hidden)]
#[macro_export]
macro_rules! __auto_register {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration::of::<$ty>()
        }
    };
}

#[cfg(not(feature = "auto_register"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __auto_register {
    ($ty:ty) => {};
}

pub use alloc::boxed::Box;
