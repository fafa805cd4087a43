//! Generic unordered set container.
//!
//! [`Set`] stores each distinct value at most once and answers membership,
//! size, and enumeration queries in expected constant time per element.
//!
//! # Ordering
//!
//! Iteration order, [`Set::to_vec`] order, and the order of elements in the
//! [`Display`](fmt::Display) rendering are unspecified and may differ between
//! runs.
//!
//! # Concurrency
//!
//! The container performs no internal synchronisation. A set shared between
//! threads must be guarded by the caller (for example with a `Mutex`).
//! Mutating the set while a borrowing iterator from [`Set::iter`] is alive
//! is rejected by the borrow checker; owned iteration consumes the set.

use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

/// An unordered collection of unique values.
///
/// Backed by a map from element to a unit presence marker.
#[derive(Clone)]
pub struct Set<T> {
    elements: HashMap<T, ()>,
}

impl<T: Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq + Hash> Eq for Set<T> {}

impl<T: Eq + Hash> Set<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// The capacity is a hint; the set grows past it as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: HashMap::with_capacity(capacity),
        }
    }

    /// Creates a set holding each distinct value of `elements` once.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = elements.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for element in iter {
            set.elements.insert(element, ());
        }
        set
    }

    /// Returns `true` if `element` is in the set.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains_key(element)
    }

    /// Inserts `element`, returning whether it was already present.
    pub fn add(&mut self, element: T) -> bool {
        self.elements.insert(element, ()).is_some()
    }

    /// Removes `element`, returning whether it was present.
    pub fn remove(&mut self, element: &T) -> bool {
        self.elements.remove(element).is_some()
    }

    /// Number of distinct elements currently held.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a lazy iterator over the current elements.
    ///
    /// Each call starts a fresh pass. Dropping the iterator early leaves the
    /// set untouched.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements.keys(),
        }
    }
}

impl<T: Eq + Hash + Clone> Set<T> {
    /// Copies every element into a newly allocated vector.
    ///
    /// The vector is independent of the set and can be mutated freely.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.elements.len());
        out.extend(self.elements.keys().cloned());
        out
    }
}

impl<T: Eq + Hash> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for Set<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from_elements(elements)
    }
}

impl<T: Eq + Hash> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.elements.insert(element, ());
        }
    }
}

impl<T: fmt::Display> fmt::Display for Set<T> {
    /// Renders the set as `{ a, b, c }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, element) in self.elements.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str(" }")
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.keys()).finish()
    }
}

/// Borrowing iterator returned by [`Set::iter`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator returned by `Set::into_iter`.
pub struct IntoIter<T> {
    inner: hash_map::IntoKeys<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T: Eq + Hash> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.elements.into_keys(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_single_element() {
        let set = Set::from([7]);
        assert_eq!(set.to_string(), "{ 7 }");
    }

    #[test]
    fn display_empty_set() {
        let set: Set<i32> = Set::new();
        assert_eq!(set.to_string(), "{  }");
    }

    #[test]
    fn display_lists_every_element_once() {
        let set = Set::from(["a", "b", "c"]);
        let rendered = set.to_string();
        assert!(rendered.starts_with("{ "));
        assert!(rendered.ends_with(" }"));

        let inner = &rendered[2..rendered.len() - 2];
        let mut parts: Vec<&str> = inner.split(", ").collect();
        parts.sort_unstable();
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn with_capacity_is_not_a_limit() {
        let mut set = Set::with_capacity(1);
        for i in 0..10 {
            set.add(i);
        }
        assert_eq!(set.size(), 10);
    }

    #[test]
    fn iter_reports_exact_size() {
        let set = Set::from([1, 2, 3]);
        let mut iter = set.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn extend_collapses_duplicates() {
        let mut set = Set::from([1, 2]);
        set.extend([2, 3, 3, 4]);
        assert_eq!(set.size(), 4);
    }

    #[test]
    fn clone_is_independent() {
        let original = Set::from([1, 2]);
        let mut copy = original.clone();
        copy.add(3);
        assert_eq!(original.size(), 2);
        assert_eq!(copy.size(), 3);
    }
}
