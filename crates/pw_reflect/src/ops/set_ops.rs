use alloc::boxed::Box;

use crate::Reflect;

/// An unordered collection of unique values.
pub trait Set: Reflect {
    /// Returns the stored value equal to `value`.
    fn get(&self, value: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Inserts a value, returning whether it was newly added.
    ///
    /// Returns the value back if its type is not the element type.
    fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>>;

    #[inline]
    fn contains(&self, value: &dyn Reflect) -> bool {
        self.get(value).is_some()
    }

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}
