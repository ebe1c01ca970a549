//! Error taxonomy of path access.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::{error, fmt};

use pw_reflect::registry::ConversionError;
use thiserror::Error;

use crate::path::ParseError;
use crate::step::ContainerKind;

// -----------------------------------------------------------------------------
// AccessErrorKind

/// What went wrong while resolving or applying a path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessErrorKind {
    /// The path text does not follow the grammar.
    #[error(transparent)]
    MalformedPath(#[from] ParseError),

    /// A property name is unknown for the addressed type.
    #[error("`{ty}` has no property `{name}`")]
    PropertyNotFound { ty: &'static str, name: Box<str> },

    /// The target property can not be written.
    #[error("property `{name}` of `{ty}` is read-only")]
    PropertyNotWritable { ty: &'static str, name: Box<str> },

    /// An intermediate property can not be read, so it can not be navigated.
    #[error("property `{name}` of `{ty}` is write-only")]
    PropertyNotReadable { ty: &'static str, name: Box<str> },

    /// A raw string could not be converted to the target type.
    #[error(transparent)]
    TypeConversionFailure(#[from] ConversionError),

    /// A missing value could not be created.
    #[error("cannot create a value of `{ty}`: {reason}")]
    PropertyCreationFailure { ty: &'static str, reason: Cow<'static, str> },

    /// The container does not support the requested operation.
    #[error("{kind} `{ty}` does not support {operation}")]
    UnsupportedContainerOperation {
        kind: ContainerKind,
        ty: &'static str,
        operation: Cow<'static, str>,
    },

    /// A container declares no element type and strict generics are enabled.
    #[error("`{ty}` is declared without an element type")]
    AmbiguousDeclaration { ty: &'static str },

    /// A compiled descriptor was applied to a value of another type.
    #[error("descriptor compiled for `{expected}` applied to `{actual}`")]
    MismatchedRoot { expected: &'static str, actual: &'static str },
}

impl AccessErrorKind {
    #[inline]
    pub(crate) fn unsupported(
        kind: ContainerKind,
        ty: &'static str,
        operation: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::UnsupportedContainerOperation {
            kind,
            ty,
            operation: operation.into(),
        }
    }

    #[inline]
    pub(crate) fn creation(ty: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::PropertyCreationFailure {
            ty,
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// An [`AccessErrorKind`] with the path and the failing step.
#[derive(Debug)]
pub struct AccessError {
    kind: AccessErrorKind,
    path: Box<str>,
    step: Option<usize>,
}

impl AccessError {
    #[inline]
    pub(crate) fn new(kind: AccessErrorKind, path: &str, step: Option<usize>) -> Self {
        Self {
            kind,
            path: path.into(),
            step,
        }
    }

    #[inline]
    pub(crate) fn parse(err: ParseError) -> Self {
        let path = err.path.clone();
        Self {
            kind: AccessErrorKind::MalformedPath(err),
            path,
            step: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    #[inline]
    pub fn into_kind(self) -> AccessErrorKind {
        self.kind
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Index of the path element that failed, `None` for parse errors
    /// and errors about the whole path.
    #[inline]
    pub fn step(&self) -> Option<usize> {
        self.step
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(step) => write!(
                f,
                "failed to access `{}` at element {}: {}",
                self.path, step, self.kind
            ),
            None => write!(f, "failed to access `{}`: {}", self.path, self.kind),
        }
    }
}

impl error::Error for AccessError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.kind)
    }
}

// -----------------------------------------------------------------------------
// ApplyPropertiesError

/// The first entry of a bulk application that failed.
#[derive(Debug, Error)]
#[error("cannot apply property `{key}` = `{value}`")]
pub struct ApplyPropertiesError {
    pub key: String,
    pub value: String,
    #[source]
    pub source: AccessError,
}
