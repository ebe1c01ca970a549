use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt::{self, Display};
use core::str::FromStr;

use thiserror::Error;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

// -----------------------------------------------------------------------------
// ConversionError

/// A raw string could not be converted to the target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{raw}` to `{target}`: {reason}")]
pub struct ConversionError {
    /// The rejected input.
    pub raw: String,
    /// Type path of the target type.
    pub target: &'static str,
    pub reason: String,
}

impl ConversionError {
    pub fn new(raw: impl Into<String>, target: &'static str, reason: impl Display) -> Self {
        Self {
            raw: raw.into(),
            target,
            reason: reason.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitFromStr

type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Reflect>, String> + Send + Sync;

/// Converts a raw string to a value of the registered type.
///
/// Types implementing [`FromStr`] get one through [`FromType`]; any other
/// conversion can be registered with
/// [`TypeRegistry::register_converter`](crate::registry::TypeRegistry::register_converter).
///
/// ```
/// use pw_reflect::registry::{FromType, TypeTraitFromStr};
///
/// let parse = <TypeTraitFromStr as FromType<i32>>::from_type();
/// assert_eq!(parse.convert("-12").unwrap().take::<i32>().ok(), Some(-12));
/// assert!(parse.convert("twelve").is_err());
/// ```
#[derive(Clone)]
pub struct TypeTraitFromStr {
    func: Arc<ConvertFn>,
}

impl TypeTraitFromStr {
    /// Creates a converter from a typed parse function.
    pub fn new<T, E, F>(func: F) -> Self
    where
        T: Reflect,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(move |raw| match func(raw) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Reflect>),
                Err(err) => Err(err.to_string()),
            }),
        }
    }

    /// Converts `raw`, returning the failure reason as text.
    #[inline]
    pub fn convert(&self, raw: &str) -> Result<Box<dyn Reflect>, String> {
        (self.func)(raw)
    }
}

impl<T> FromType<T> for TypeTraitFromStr
where
    T: FromStr + Typed + Reflect,
    T::Err: Display,
{
    fn from_type() -> Self {
        Self::new(str::parse::<T>)
    }
}

impl fmt::Debug for TypeTraitFromStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTraitFromStr").finish_non_exhaustive()
    }
}
