//! Root-wrapped collections: homogeneous sequences behind a single root.
//!
//! Vectors, lists and bit-fields are each one ordered sequence. They hold a
//! [`Root`] and expose length, iteration and indexed access through
//! [`RootCollection`], which forwards everything to the root. Size
//! classification stays with the concrete collection type.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::slice;

use crate::error::{SszError, SszResult};

/// Index-keyed access to a collection's single root sequence.
pub trait RootCollection {
    type Item;

    /// The wrapped sequence.
    fn root(&self) -> &[Self::Item];

    fn len(&self) -> usize {
        self.root().len()
    }

    fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Elements in order. Each call starts a fresh walk.
    fn iter(&self) -> slice::Iter<'_, Self::Item> {
        self.root().iter()
    }

    /// The element at `index`.
    fn get(&self, index: usize) -> SszResult<&Self::Item> {
        let root = self.root();
        root.get(index).ok_or(SszError::OutOfRange {
            index,
            len: root.len(),
        })
    }

    /// The elements in `range`.
    fn slice<B: RangeBounds<usize>>(&self, range: B) -> SszResult<&[Self::Item]> {
        let root = self.root();
        let len = root.len();

        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };

        if end > len {
            return Err(SszError::OutOfRange { index: end, len });
        }
        if start > end {
            return Err(SszError::OutOfRange { index: start, len });
        }
        Ok(&root[start..end])
    }
}

/// The single root sequence of a collection.
///
/// Immutable once constructed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Root<T> {
    items: Vec<T>,
}

impl<T> Root<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Root<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> RootCollection for Root<T> {
    type Item = T;

    fn root(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Root<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Root<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Root<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Root<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_root(f, "Root", &self.items)
    }
}

/// Render `Name(data=[..])`.
pub fn fmt_root<T: fmt::Debug>(f: &mut fmt::Formatter<'_>, name: &str, items: &[T]) -> fmt::Result {
    write!(f, "{}(data=", name)?;
    f.debug_list().entries(items).finish()?;
    write!(f, ")")
}
