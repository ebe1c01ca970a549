use alloc::boxed::Box;
use core::ops::Deref;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeParamInfo

/// A declared type parameter, such as the `T` of `Vec<T>`.
///
/// Keeps a function pointer to the parameter's [`TypeInfo`], so nested
/// infos are resolved lazily and recursive types stay finite.
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl TypeParamInfo {
    /// Creates a parameter named `name` bound to `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Returns the parameter name, e.g. `"T"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeInfo`] of the bound type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    crate::info::impl_type_fn!(ty);
}

// -----------------------------------------------------------------------------
// Generics

/// The type parameters of a type, in declaration order.
///
/// Empty for non generic types and for containers that do not declare
/// their element types.
///
/// ```
/// use pw_reflect::info::Typed;
///
/// let info = <Vec<u8> as Typed>::type_info();
/// let param = &info.generics()[0];
/// assert_eq!(param.name(), "T");
/// assert!(param.type_is::<u8>());
/// assert!(info.generics().get_named("K").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Generics(Option<Box<[TypeParamInfo]>>);

impl Generics {
    /// Creates an empty `Generics`.
    #[inline]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Creates `Generics` from a parameter list.
    #[inline]
    pub fn from<const P: usize>(params: [TypeParamInfo; P]) -> Self {
        if P == 0 {
            Self(None)
        } else {
            Self(Some(Box::new(params)))
        }
    }

    /// Returns the parameter with the given name.
    pub fn get_named(&self, name: &str) -> Option<&TypeParamInfo> {
        self.iter().find(|param| param.name() == name)
    }

    /// Returns the [`TypeInfo`] bound to the parameter at `index`.
    #[inline]
    pub fn type_info_at(&self, index: usize) -> Option<&'static TypeInfo> {
        self.get(index).map(TypeParamInfo::type_info)
    }
}

impl Deref for Generics {
    type Target = [TypeParamInfo];

    #[inline]
    fn deref(&self) -> &Self::Target {
        match &self.0 {
            Some(params) => params,
            None => &[],
        }
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `with_generics` and `generics` for an info struct.
macro_rules! impl_generic_fn {
    ($field:ident) => {
        /// Replaces the declared type parameters.
        #[inline]
        pub fn with_generics(mut self, generics: $crate::info::Generics) -> Self {
            self.$field = generics;
            self
        }

        /// Returns the declared type parameters.
        #[inline]
        pub const fn generics(&self) -> &$crate::info::Generics {
            &self.$field
        }
    };
}

pub(crate) use impl_generic_fn;
