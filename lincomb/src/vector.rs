//! Dense vectors over a [`Ring`].
//!
//! Like every other function that does arithmetic, the functions that do
//! arithmetic on vectors take the ring as an argument, e.g.
//! ```ignore
//! fn add_assign(&mut self, rhs: &Vector<R>, r: &R)
//! ```

use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use itertools::Itertools as _;

use crate::rings::{Ring, RingElement as _};

/// An owned vector whose entries are elements of the ring `R`.
pub struct Vector<R: Ring> {
    entries: Vec<R::Element>,
    phantom: PhantomData<R>,
}

impl<R: Ring> Vector<R> {
    /// Creates a vector from its entries.
    pub fn from_entries(entries: Vec<R::Element>) -> Self {
        Self { entries, phantom: PhantomData }
    }

    /// Creates a vector from a slice of anything that converts into elements.
    pub fn from_slice<U: Into<R::Element> + Clone>(s: &[U]) -> Self {
        Self::from_entries(s.iter().map(|e| e.clone().into()).collect())
    }

    /// The zero vector of dimension `dim`.
    pub fn zero(dim: usize) -> Self {
        Self::from_entries(vec![R::zero(); dim])
    }

    /// The number of entries.
    pub fn dim(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, R::Element> {
        self.entries.iter()
    }

    /// Creates a new vector over another ring by applying `f` to each entry.
    pub fn transform<U: Ring, F: FnMut(&R::Element) -> U::Element>(
        &self,
        f: F,
    ) -> Vector<U> {
        Vector::from_entries(self.entries.iter().map(f).collect())
    }

    /// Is every entry zero?
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|e| e.is_zero())
    }

    /// Adds `rhs` to `self`.
    pub fn add_assign(&mut self, rhs: &Vector<R>, r: &R) {
        assert_eq!(self.dim(), rhs.dim(), "Vector dimensions must match.");
        for (l, e) in self.entries.iter_mut().zip(rhs.iter()) {
            r.add_assign(l, e);
        }
    }

    /// Sum of all entries.
    pub fn sum(&self, r: &R) -> R::Element {
        self.entries.iter().fold(R::zero(), |acc, e| r.add(acc, e))
    }

    /// The dot product.
    pub fn dot(&self, rhs: &Vector<R>, r: &R) -> R::Element {
        assert_eq!(self.dim(), rhs.dim(), "Vector dimensions must match.");
        let mut acc = R::zero();
        for (a, b) in self.entries.iter().zip(rhs.iter()) {
            r.mul_add_assign(&mut acc, a, b);
        }
        acc
    }
}

impl<R: Ring> FromIterator<R::Element> for Vector<R> {
    fn from_iter<I: IntoIterator<Item = R::Element>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl<R: Ring> Clone for Vector<R> {
    fn clone(&self) -> Self {
        Self::from_entries(self.entries.clone())
    }
}

impl<R: Ring> PartialEq for Vector<R> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<R: Ring> Eq for Vector<R> where R::Element: Eq {}

impl<R: Ring> Index<usize> for Vector<R> {
    type Output = R::Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<R: Ring> IndexMut<usize> for Vector<R> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

impl<R: Ring> Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<R: Ring> Display for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.entries.iter().join(", "))
    }
}
