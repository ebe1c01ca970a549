use core::any::TypeId;
use core::fmt;

use crate::hash::FixedHashState;
use crate::hash::hashbrown::HashMap;

// -----------------------------------------------------------------------------
// TypeIdMap

/// Values keyed by [`TypeId`].
///
/// Type ids are already well distributed, so the map uses the fixed
/// [`FixedHashState`] hasher. `new` is `const` so a map can sit in a
/// `static` behind a lock.
///
/// ```
/// use core::any::TypeId;
/// use pw_utils::TypeIdMap;
///
/// let mut sizes = TypeIdMap::new();
/// sizes.insert(TypeId::of::<u16>(), 2);
/// assert_eq!(sizes.get(&TypeId::of::<u16>()), Some(&2));
/// assert!(!sizes.contains(&TypeId::of::<u32>()));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, FixedHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(FixedHashState))
    }

    /// Returns the value for `id`, inserting `make()` first if absent.
    pub fn get_or_insert(&mut self, id: TypeId, make: impl FnOnce() -> V) -> &mut V {
        self.0.entry(id).or_insert_with(make)
    }

    #[inline]
    pub fn get(&self, id: &TypeId) -> Option<&V> {
        self.0.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(id)
    }

    /// Replaces the value for `id`, returning the old one.
    #[inline]
    pub fn insert(&mut self, id: TypeId, value: V) -> Option<V> {
        self.0.insert(id, value)
    }

    #[inline]
    pub fn contains(&self, id: &TypeId) -> bool {
        self.0.contains_key(id)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in no particular order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
