use crate::info::Typed;

/// Creates a type trait value for the type `T`.
///
/// ```
/// use pw_reflect::registry::{FromType, TypeTraitDefault};
///
/// let default = <TypeTraitDefault as FromType<u16>>::from_type();
/// assert_eq!(default.default().take::<u16>().ok(), Some(0));
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
