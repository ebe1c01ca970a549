use alloc::boxed::Box;
use alloc::string::ToString;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ArrayInfo, Generics, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::{Array, ArrayItemIter};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(
                ArrayInfo::new::<Self, T>(N)
                    .with_generics(Generics::from([TypeParamInfo::new::<T>("T")])),
            )
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn iter(&self) -> ArrayItemIter<'_> {
        ArrayItemIter::new(self)
    }
}

fn default_array<T: Default + Reflect, const N: usize>() -> Box<dyn Reflect>
where
    [T; N]: Reflect,
{
    Box::new(core::array::from_fn::<T, N, _>(|_| T::default()))
}

// `[T; N]: Default` is only implemented for small `N`,
// so elements are built one by one.
impl<T: GetTypeMeta + Reflect + Default, const N: usize> GetTypeMeta for [T; N] {
    fn get_type_meta() -> TypeMeta {
        let mut type_meta = TypeMeta::of::<Self>();
        type_meta.insert_trait(TypeTraitDefault::from_fn(default_array::<T, N>));
        type_meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Array;
    use crate::registry::TypeRegistry;
    use core::any::TypeId;

    #[test]
    fn array_info_and_default() {
        assert_eq!(<[u8; 3]>::type_path(), "[u8; 3]");
        let info = <[u8; 3]>::type_info().as_array().unwrap();
        assert_eq!(info.capacity(), 3);
        assert!(info.item_info().type_is::<u8>());

        let mut registry = TypeRegistry::new();
        registry.register::<[u16; 40]>();
        let value = registry.create_default(TypeId::of::<[u16; 40]>()).unwrap();
        assert_eq!(value.take::<[u16; 40]>().ok(), Some([0; 40]));
    }

    #[test]
    fn array_access() {
        let mut values = [1_i32, 2, 3];
        assert_eq!(Array::len(&values), 3);
        assert!(Array::get(&values, 3).is_none());
        Array::get_mut(&mut values, 1)
            .unwrap()
            .set(alloc::boxed::Box::new(20_i32))
            .unwrap();
        assert_eq!(values, [1, 20, 3]);
    }
}
