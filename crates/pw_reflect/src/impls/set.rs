use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash};

use pw_utils::hash::hashbrown;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{Generics, SetInfo, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::Set;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

macro_rules! impl_set_methods {
    () => {
        fn get(&self, value: &dyn Reflect) -> Option<&dyn Reflect> {
            value
                .downcast_ref::<T>()
                .and_then(|value| Self::get(self, value))
                .map(Reflect::as_reflect)
        }

        fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>> {
            Ok(Self::insert(self, value.take::<T>()?))
        }

        #[inline]
        fn len(&self) -> usize {
            Self::len(self)
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
            Box::new(Self::iter(self).map(Reflect::as_reflect))
        }
    };
}

macro_rules! impl_set_type_info {
    () => {
        fn type_info() -> &'static TypeInfo {
            static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                TypeInfo::Set(
                    SetInfo::new::<Self>()
                        .with_generics(Generics::from([TypeParamInfo::new::<T>("T")])),
                )
            })
        }
    };
}

macro_rules! impl_set_type_meta {
    () => {
        fn get_type_meta() -> TypeMeta {
            let mut type_meta = TypeMeta::of::<Self>();
            type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
            type_meta
        }

        fn register_dependencies(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    };
}

// -----------------------------------------------------------------------------
// Hash sets

macro_rules! impl_reflect_for_hashset {
    ($ty:ident, $module:literal) => {
        impl<T: TypePath, S: TypePath> TypePath for $ty::HashSet<T, S> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$module, "::HashSet<", T::type_path(), ", ", S::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&["HashSet<", T::type_name(), ">"]))
            }
        }

        impl<T, S> Typed for $ty::HashSet<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            impl_set_type_info!();
        }

        impl<T, S> Reflect for $ty::HashSet<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            crate::reflection::impl_reflect_cast_fn!(Set);
        }

        impl<T, S> Set for $ty::HashSet<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            impl_set_methods!();
        }

        impl<T, S> GetTypeMeta for $ty::HashSet<T, S>
        where
            T: GetTypeMeta + Reflect + Eq + Hash,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            impl_set_type_meta!();
        }
    };
}

mod std_collections {
    pub(super) use std::collections::HashSet;
}

impl_reflect_for_hashset!(std_collections, "std::collections");
impl_reflect_for_hashset!(hashbrown, "hashbrown");

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: TypePath> TypePath for BTreeSet<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::collections::BTreeSet<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["BTreeSet<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed + Ord> Typed for BTreeSet<T> {
    impl_set_type_info!();
}

impl<T: Reflect + Typed + Ord> Reflect for BTreeSet<T> {
    crate::reflection::impl_reflect_cast_fn!(Set);
}

impl<T: Reflect + Typed + Ord> Set for BTreeSet<T> {
    impl_set_methods!();
}

impl<T: GetTypeMeta + Reflect + Ord> GetTypeMeta for BTreeSet<T> {
    impl_set_type_meta!();
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Set;
    use alloc::{boxed::Box, collections::BTreeSet, string::String};
    use pw_utils::hash::HashSet;

    #[test]
    fn set_membership() {
        let mut tags: HashSet<String> = HashSet::default();
        assert_eq!(Set::insert(&mut tags, Box::new(String::from("a"))).ok(), Some(true));
        assert_eq!(Set::insert(&mut tags, Box::new(String::from("a"))).ok(), Some(false));
        assert!(Set::insert(&mut tags, Box::new(3_u8)).is_err());

        let probe = String::from("a");
        assert!(Set::contains(&tags, probe.as_reflect()));
        assert_eq!(Set::len(&tags), 1);
    }

    #[test]
    fn btree_set_info() {
        assert_eq!(BTreeSet::<u8>::type_name(), "BTreeSet<u8>");
        let info = BTreeSet::<u8>::type_info().as_set().unwrap();
        assert!(info.item_info().unwrap().type_is::<u8>());
    }
}
