use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};

use pw_utils::hash::{FixedHashState, hashbrown};

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{Generics, MapInfo, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::Map;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

// -----------------------------------------------------------------------------
// Hasher paths

impl TypePath for std::hash::RandomState {
    #[inline]
    fn type_path() -> &'static str {
        "std::hash::RandomState"
    }

    #[inline]
    fn type_name() -> &'static str {
        "RandomState"
    }
}

impl TypePath for FixedHashState {
    #[inline]
    fn type_path() -> &'static str {
        "pw_utils::hash::FixedHashState"
    }

    #[inline]
    fn type_name() -> &'static str {
        "FixedHashState"
    }
}

// -----------------------------------------------------------------------------
// Shared parts

/// Only the key and value are declared as type parameters,
/// a hasher is part of the path but never of the signature.
fn map_generics<K: Typed, V: Typed>() -> Generics {
    Generics::from([TypeParamInfo::new::<K>("K"), TypeParamInfo::new::<V>("V")])
}

macro_rules! impl_map_methods {
    () => {
        fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
            key.downcast_ref::<K>()
                .and_then(|key| Self::get(self, key))
                .map(Reflect::as_reflect)
        }

        fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
            key.downcast_ref::<K>()
                .and_then(|key| Self::get_mut(self, key))
                .map(Reflect::as_reflect_mut)
        }

        fn insert(
            &mut self,
            key: Box<dyn Reflect>,
            value: Box<dyn Reflect>,
        ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
            let key = match key.take::<K>() {
                Ok(key) => key,
                Err(key) => return Err((key, value)),
            };
            let value = match value.take::<V>() {
                Ok(value) => value,
                Err(value) => return Err((Box::new(key) as Box<dyn Reflect>, value)),
            };
            Ok(Self::insert(self, key, value).map(Reflect::into_boxed_reflect))
        }

        #[inline]
        fn len(&self) -> usize {
            Self::len(self)
        }

        fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
            Box::new(
                Self::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())),
            )
        }
    };
}

macro_rules! impl_map_type_meta {
    () => {
        fn get_type_meta() -> TypeMeta {
            let mut type_meta = TypeMeta::of::<Self>();
            type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
            type_meta
        }

        fn register_dependencies(registry: &mut TypeRegistry) {
            registry.register::<K>();
            registry.register::<V>();
        }
    };
}

// -----------------------------------------------------------------------------
// Hash maps

macro_rules! impl_reflect_for_hashmap {
    ($ty:ident, $module:literal) => {
        impl<K: TypePath, V: TypePath, S: TypePath> TypePath for $ty::HashMap<K, V, S> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[
                        $module,
                        "::HashMap<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ", ",
                        S::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&["HashMap<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }
        }

        impl<K, V, S> Typed for $ty::HashMap<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self>().with_generics(map_generics::<K, V>()))
                })
            }
        }

        impl<K, V, S> Reflect for $ty::HashMap<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            crate::reflection::impl_reflect_cast_fn!(Map);
        }

        impl<K, V, S> Map for $ty::HashMap<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            impl_map_methods!();
        }

        impl<K, V, S> GetTypeMeta for $ty::HashMap<K, V, S>
        where
            K: GetTypeMeta + Reflect + Eq + Hash,
            V: GetTypeMeta + Reflect,
            S: TypePath + BuildHasher + Default + Send + Sync,
        {
            impl_map_type_meta!();
        }
    };
}

mod std_collections {
    pub(super) use std::collections::HashMap;
}

impl_reflect_for_hashmap!(std_collections, "std::collections");
impl_reflect_for_hashmap!(hashbrown, "hashbrown");

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: TypePath, V: TypePath> TypePath for BTreeMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&[
                "alloc::collections::BTreeMap<",
                K::type_path(),
                ", ",
                V::type_path(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["BTreeMap<", K::type_name(), ", ", V::type_name(), ">"]))
    }
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Typed for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self>().with_generics(map_generics::<K, V>()))
        })
    }
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Reflect for BTreeMap<K, V> {
    crate::reflection::impl_reflect_cast_fn!(Map);
}

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Map for BTreeMap<K, V> {
    impl_map_methods!();
}

impl<K: GetTypeMeta + Reflect + Ord, V: GetTypeMeta + Reflect> GetTypeMeta for BTreeMap<K, V> {
    impl_map_type_meta!();
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Map;
    use alloc::{boxed::Box, collections::BTreeMap, string::String};
    use pw_utils::hash::HashMap;

    #[test]
    fn hash_map_generics_skip_hasher() {
        type Env = std::collections::HashMap<String, u32>;
        assert_eq!(
            Env::type_path(),
            "std::collections::HashMap<alloc::string::String, u32, std::hash::RandomState>"
        );
        assert_eq!(Env::type_name(), "HashMap<String, u32>");

        let info = Env::type_info().as_map().unwrap();
        assert_eq!(info.generics().len(), 2);
        assert!(info.key_info().unwrap().type_is::<String>());
        assert!(info.value_info().unwrap().type_is::<u32>());
    }

    #[test]
    fn insert_and_lookup() {
        let mut map: HashMap<String, i32> = HashMap::default();
        let old = Map::insert(&mut map, Box::new(String::from("a")), Box::new(1_i32)).unwrap();
        assert!(old.is_none());

        let old = Map::insert(&mut map, Box::new(String::from("a")), Box::new(2_i32)).unwrap();
        assert_eq!(old.and_then(|v| v.take::<i32>().ok()), Some(1));

        let key = String::from("a");
        let found = Map::get(&map, key.as_reflect()).and_then(<dyn Reflect>::downcast_ref::<i32>);
        assert_eq!(found, Some(&2));

        // Keys of another type are never found.
        assert!(Map::get(&map, 1_i32.as_reflect()).is_none());
        assert!(Map::insert(&mut map, Box::new(1_u8), Box::new(1_i32)).is_err());
    }

    #[test]
    fn btree_map_iterates_in_order() {
        let map: BTreeMap<u8, bool> = [(2, true), (1, false)].into_iter().collect();
        let keys: alloc::vec::Vec<u8> = Map::iter(&map)
            .filter_map(|(key, _)| key.downcast_ref::<u8>().copied())
            .collect();
        assert_eq!(keys, [1, 2]);
    }
}
