use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{Generics, OptionInfo, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::Optional;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(
                OptionInfo::new::<Self, T>()
                    .with_generics(Generics::from([TypeParamInfo::new::<T>("T")])),
            )
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::reflection::impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    fn replace(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>> {
        *self = match value {
            Some(value) => Some(value.take::<T>()?),
            None => None,
        };
        Ok(())
    }
}

impl<T: GetTypeMeta + Reflect> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut type_meta = TypeMeta::of::<Self>();
        type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        type_meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::info::Typed;
    use crate::ops::Optional;
    use alloc::{boxed::Box, string::String};

    #[test]
    fn replace_and_wrap() {
        let mut value: Option<String> = None;
        assert!(!Optional::is_some(&value));

        Optional::replace(&mut value, Some(Box::new(String::from("x")))).unwrap();
        assert_eq!(value.as_deref(), Some("x"));
        assert!(Optional::replace(&mut value, Some(Box::new(1_u8))).is_err());

        Optional::replace(&mut value, None).unwrap();
        assert!(value.is_none());

        let info = Option::<u32>::type_info().as_optional().unwrap();
        assert!(info.inner_info().type_is::<u32>());
        let wrapped = info.wrap(Box::new(5_u32)).unwrap();
        assert_eq!(wrapped.take::<Option<u32>>().ok(), Some(Some(5)));
        assert!(info.wrap(Box::new(5_i32)).is_err());
    }
}
