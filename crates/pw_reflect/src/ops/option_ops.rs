use alloc::boxed::Box;

use crate::Reflect;

/// A value that may be absent.
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Replaces the content, `None` clears it.
    ///
    /// Returns the value back if its type is not the inner type.
    fn replace(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>>;

    #[inline]
    fn is_some(&self) -> bool {
        self.value().is_some()
    }
}
