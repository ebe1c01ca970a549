use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// Stable, human readable names of a type.
///
/// `type_path` is the fully qualified name and must be unique among the
/// registered types, since registry lookups by name go through it.
/// `type_name` drops the module prefix and is what error messages show.
///
/// ```
/// use pw_reflect::info::TypePath;
///
/// struct Endpoint;
///
/// impl TypePath for Endpoint {
///     fn type_path() -> &'static str { "net::Endpoint" }
///     fn type_name() -> &'static str { "Endpoint" }
/// }
///
/// assert_eq!(Vec::<u8>::type_name(), "Vec<u8>");
/// ```
///
/// Records get an implementation from [`impl_record!`](crate::impl_record),
/// generic containers build theirs once through
/// [`GenericTypePathCell`](crate::impls::GenericTypePathCell).
pub trait TypePath: 'static {
    fn type_path() -> &'static str;

    fn type_name() -> &'static str;
}

/// Object safe access to [`TypePath`], implemented for every `TypePath` type.
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        T::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        T::type_name()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] paired with the type's names.
///
/// Two `Type`s are equal when their ids are, names are never compared.
///
/// ```
/// use pw_reflect::info::Type;
///
/// let ty = Type::of::<String>();
/// assert!(ty.is::<String>());
/// assert_eq!(ty.name(), "String");
/// assert_eq!(ty, Type::of::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// impl_type_fn

/// Forwards the [`Type`] accessors of an info struct to its `$field`.
macro_rules! impl_type_fn {
    ($field:ident) => {
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }
    };
}

pub(crate) use impl_type_fn;
