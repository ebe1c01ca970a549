use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault, TypeTraitFromStr};

/// Implements the reflection traits for a `Default + FromStr + Debug` leaf type.
macro_rules! impl_reflect_for_primitive {
    ($ty:ty, $path:literal, $name:literal) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Debug::fmt(self, f)
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut type_meta = TypeMeta::of::<Self>();
                type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                type_meta.insert_trait::<TypeTraitFromStr>(FromType::<Self>::from_type());
                type_meta
            }
        }
    };
}

impl_reflect_for_primitive!(bool, "bool", "bool");
impl_reflect_for_primitive!(char, "char", "char");
impl_reflect_for_primitive!(u8, "u8", "u8");
impl_reflect_for_primitive!(u16, "u16", "u16");
impl_reflect_for_primitive!(u32, "u32", "u32");
impl_reflect_for_primitive!(u64, "u64", "u64");
impl_reflect_for_primitive!(u128, "u128", "u128");
impl_reflect_for_primitive!(usize, "usize", "usize");
impl_reflect_for_primitive!(i8, "i8", "i8");
impl_reflect_for_primitive!(i16, "i16", "i16");
impl_reflect_for_primitive!(i32, "i32", "i32");
impl_reflect_for_primitive!(i64, "i64", "i64");
impl_reflect_for_primitive!(i128, "i128", "i128");
impl_reflect_for_primitive!(isize, "isize", "isize");
impl_reflect_for_primitive!(f32, "f32", "f32");
impl_reflect_for_primitive!(f64, "f64", "f64");
impl_reflect_for_primitive!(String, "alloc::string::String", "String");

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use alloc::string::String;

    #[test]
    fn primitive_paths_and_kind() {
        assert_eq!(u64::type_path(), "u64");
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
        assert_eq!(f32::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(1.5_f64.reflect_kind(), ReflectKind::Opaque);
    }
}
