use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{Generics, ListInfo, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::{List, ListItemIter};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

macro_rules! impl_reflect_for_list {
    ($ty:ident, $storage:ty, $module:literal, $push:ident) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[stringify!($ty), "<", T::type_name(), ">"]))
            }
        }

        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(
                        ListInfo::new::<Self>()
                            .with_generics(Generics::from([TypeParamInfo::new::<T>("T")])),
                    )
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            crate::reflection::impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect + Typed> List for $ty<T> {
            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                <$storage>::get(self, index).map(Reflect::as_reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                <$storage>::get_mut(self, index).map(Reflect::as_reflect_mut)
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                <$ty<T>>::$push(self, value.take::<T>()?);
                Ok(())
            }

            fn insert(
                &mut self,
                index: usize,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                if index > Self::len(self) {
                    return Err(value);
                }
                Self::insert(self, index, value.take::<T>()?);
                Ok(())
            }

            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            #[inline]
            fn iter(&self) -> ListItemIter<'_> {
                ListItemIter::new(self)
            }
        }

        impl<T: GetTypeMeta + Reflect> GetTypeMeta for $ty<T> {
            fn get_type_meta() -> TypeMeta {
                let mut type_meta = TypeMeta::of::<Self>();
                type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                type_meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_reflect_for_list!(Vec, [T], "alloc::vec", push);
impl_reflect_for_list!(VecDeque, VecDeque<T>, "alloc::collections", push_back);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;
    use alloc::{boxed::Box, collections::VecDeque, string::String, vec, vec::Vec};

    #[test]
    fn vec_paths_and_generics() {
        assert_eq!(Vec::<u8>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(VecDeque::<String>::type_name(), "VecDeque<String>");

        let info = Vec::<i32>::type_info().as_list().unwrap();
        assert!(info.item_info().unwrap().type_is::<i32>());
    }

    #[test]
    fn push_and_insert_check_types() {
        let mut list: Vec<u8> = vec![1, 3];
        List::insert(&mut list, 1, Box::new(2_u8)).unwrap();
        List::push(&mut list, Box::new(4_u8)).unwrap();
        assert_eq!(list, [1, 2, 3, 4]);

        assert!(List::push(&mut list, Box::new(5_i32)).is_err());
        assert!(List::insert(&mut list, 9, Box::new(5_u8)).is_err());
        assert_eq!(List::len(&list), 4);

        let third = List::get(&list, 2).and_then(<dyn Reflect>::downcast_ref::<u8>);
        assert_eq!(third, Some(&3));
    }
}
