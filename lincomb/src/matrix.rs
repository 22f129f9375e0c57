//! Dense row-major matrices over a [`Ring`].
//!
//! As with [`crate::vector`], arithmetic takes the ring as an argument.

use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use itertools::{Itertools as _, iproduct};

use crate::rings::Ring;
use crate::vector::Vector;

/// An owned matrix whose entries are elements of the ring `R`.
pub struct Matrix<R: Ring> {
    /// The entries in row-major order.
    entries: Vec<R::Element>,
    rows: usize,
    cols: usize,
    phantom: PhantomData<R>,
}

impl<R: Ring> Matrix<R> {
    fn from_raw(entries: Vec<R::Element>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(entries.len(), rows * cols);
        Self { entries, rows, cols, phantom: PhantomData }
    }

    /// Returns an r×c zero matrix.
    pub fn zero(r: usize, c: usize) -> Self {
        Self::from_raw(vec![R::zero(); r * c], r, c)
    }

    /// Creates a matrix from an iterator in row-major order.
    pub fn from_iter<I: Iterator<Item = R::Element>>(
        r: usize,
        c: usize,
        iter: I,
    ) -> Self {
        let entries: Vec<_> = iter.take(r * c).collect();
        assert_eq!(
            entries.len(),
            r * c,
            "The iterator needs to return at least r * c items."
        );
        Self::from_raw(entries, r, c)
    }

    /// Creates a matrix from an array of rows.
    pub fn from_array<U: Into<R::Element>, const RS: usize, const CS: usize>(
        a: [[U; CS]; RS],
    ) -> Self {
        Self::from_iter(RS, CS, a.into_iter().flatten().map(Into::into))
    }

    /// Creates a matrix from slice of rows.
    pub fn from_rows<U, V>(rows: &[U]) -> Self
    where
        U: AsRef<[V]>,
        V: Into<R::Element> + Clone,
    {
        let r = rows.len();
        let c = rows.first().map_or(0, |row| row.as_ref().len());
        assert!(rows.iter().all(|row| row.as_ref().len() == c));

        Self::from_iter(
            r,
            c,
            rows.iter()
                .flat_map(|row| row.as_ref().iter().map(|e| e.clone().into())),
        )
    }

    /// Stacks the vectors as the columns of a matrix with `dim` rows.
    ///
    /// `dim` is needed because there might not be any columns.
    pub fn from_columns(dim: usize, columns: &[Vector<R>]) -> Self {
        assert!(
            columns.iter().all(|c| c.dim() == dim),
            "Every column needs to have dimension {dim}."
        );
        Self::from_iter(
            dim,
            columns.len(),
            iproduct!(0..dim, 0..columns.len()).map(|(r, c)| columns[c][r].clone()),
        )
    }

    /// The number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Returns a reference to the entry at row `r` and column `c`.
    pub fn entry(&self, r: usize, c: usize) -> &R::Element {
        &self.entries[r * self.cols + c]
    }

    /// Returns a mutable reference to the entry at row `r` and column `c`.
    pub fn entry_mut(&mut self, r: usize, c: usize) -> &mut R::Element {
        &mut self.entries[r * self.cols + c]
    }

    /// Returns the row at index `r`.
    pub fn row(&self, r: usize) -> &[R::Element] {
        &self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns the row at index `r` mutably.
    pub fn row_mut(&mut self, r: usize) -> &mut [R::Element] {
        &mut self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns an iterator over the entries of column `c`.
    pub fn col(&self, c: usize) -> impl DoubleEndedIterator<Item = &R::Element> + '_ {
        assert!(c < self.cols, "Column index out of range.");
        self.entries.iter().skip(c).step_by(self.cols)
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[R::Element]> + '_ {
        // `chunks_exact` panics on a chunk size of zero.
        (0..self.rows).map(|r| self.row(r))
    }

    /// Creates a new matrix over another ring by applying `f` to each entry.
    pub fn transform<U: Ring, F: FnMut(&R::Element) -> U::Element>(
        &self,
        f: F,
    ) -> Matrix<U> {
        Matrix::from_raw(self.entries.iter().map(f).collect(), self.rows, self.cols)
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let cols = self.cols;
        let (top, bottom) = self.entries.split_at_mut(hi * cols);
        top[lo * cols..(lo + 1) * cols].swap_with_slice(&mut bottom[..cols]);
    }

    /// Multiplies the row by a constant.
    pub fn row_multiply(&mut self, row: usize, c: &R::Element, r: &R) {
        for e in self.row_mut(row) {
            r.mul_assign(e, c);
        }
    }

    /// Adds a multiple of row `src` to row `dst`, i.e. `dst += c * src`.
    pub fn row_multiply_add(
        &mut self,
        src: usize,
        dst: usize,
        c: &R::Element,
        r: &R,
    ) {
        assert_ne!(src, dst, "Source and destination rows must differ.");
        let cols = self.cols;
        let (src_row, dst_row) = if src < dst {
            let (top, bottom) = self.entries.split_at_mut(dst * cols);
            (&top[src * cols..(src + 1) * cols], &mut bottom[..cols])
        } else {
            let (top, bottom) = self.entries.split_at_mut(src * cols);
            (&bottom[..cols], &mut top[dst * cols..(dst + 1) * cols])
        };

        for (d, s) in dst_row.iter_mut().zip(src_row) {
            r.mul_add_assign(d, c, s);
        }
    }

    /// Post-multiply a matrix with a vector.
    pub fn mul_vec_post(&self, rhs: &Vector<R>, r: &R) -> Vector<R> {
        assert_eq!(
            self.cols,
            rhs.dim(),
            "Vector must have an entry for each column in the matrix."
        );
        self.rows()
            .map(|row| {
                let mut acc = R::zero();
                for (a, b) in row.iter().zip(rhs.iter()) {
                    r.mul_add_assign(&mut acc, a, b);
                }
                acc
            })
            .collect()
    }
}

impl<R: Ring> Clone for Matrix<R> {
    fn clone(&self) -> Self {
        Self::from_raw(self.entries.clone(), self.rows, self.cols)
    }
}

impl<R: Ring> PartialEq for Matrix<R> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.entries == other.entries
    }
}

impl<R: Ring> Eq for Matrix<R> where R::Element: Eq {}

impl<R: Ring> Index<(usize, usize)> for Matrix<R> {
    type Output = R::Element;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        self.entry(r, c)
    }
}

impl<R: Ring> IndexMut<(usize, usize)> for Matrix<R> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        self.entry_mut(r, c)
    }
}

impl<R: Ring> Debug for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

/// One row per line.
impl<R: Ring> Display for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "[{}]", row.iter().join(", "))?;
        }
        Ok(())
    }
}
