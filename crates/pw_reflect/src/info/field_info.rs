use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldAccess

/// Which directions of access a record field allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldAccess {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl FieldAccess {
    #[inline]
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }

    #[inline]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}

impl fmt::Display for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadWrite => f.pad("read-write"),
            Self::ReadOnly => f.pad("read-only"),
            Self::WriteOnly => f.pad("write-only"),
        }
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// A named field of a record.
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    access: FieldAccess,
}

impl NamedField {
    /// Creates a read-write field of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            access: FieldAccess::ReadWrite,
        }
    }

    #[inline]
    pub const fn with_access(mut self, access: FieldAccess) -> Self {
        self.access = access;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn access(&self) -> FieldAccess {
        self.access
    }

    /// Returns the declared [`TypeInfo`] of the field.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    crate::info::impl_type_fn!(ty);
}
