use crate::Reflect;
use crate::info::StructInfo;

// -----------------------------------------------------------------------------
// Struct

/// Access to the named fields of a record.
///
/// Implemented by [`impl_record!`](crate::impl_record).
pub trait Struct: Reflect {
    /// Returns the field with the given name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field with the given name, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`, in declaration order.
    fn name_at(&self, index: usize) -> Option<&'static str>;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.name_at(index).and_then(|name| self.field(name))
    }

    fn field_len(&self) -> usize;

    /// Returns the [`StructInfo`] of the concrete type.
    fn struct_info(&self) -> Option<&'static StructInfo> {
        self.reflect_type_info().as_struct().ok()
    }

    /// Returns an iterator over `(name, value)` pairs.
    fn iter_fields(&self) -> StructFieldIter<'_>;
}

// -----------------------------------------------------------------------------
// StructFieldIter

/// An iterator over the fields of a [`Struct`].
pub struct StructFieldIter<'a> {
    record: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    #[inline(always)]
    pub const fn new(record: &'a dyn Struct) -> Self {
        Self { record, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'static str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.record.name_at(self.index)?;
        let value = self.record.field_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.record.field_len().saturating_sub(self.index);
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
