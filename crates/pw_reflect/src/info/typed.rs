use crate::info::{TypeInfo, TypePath};

/// A static accessor to compile-time type information.
///
/// Implementations store the [`TypeInfo`] in a static cell so that every
/// call returns the same reference:
///
/// ```
/// use pw_reflect::impls::NonGenericTypeInfoCell;
/// use pw_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Token;
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "demo::Token" }
///     fn type_name() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Token::type_info(), Token::type_info()));
/// ```
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

/// [`Typed`] through a value, usable on `dyn Reflect`.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
