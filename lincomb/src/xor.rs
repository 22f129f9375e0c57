//! Finding the smallest subset of binary vectors whose XOR is a given vector.
//!
//! In other words, given a matrix `A` over [`F2`] and a vector `g`, find the
//! solution of `Ax = g` with the fewest ones.

use num_bigint::BigUint;
use thiserror::Error;
use tracing::trace;

use crate::matrix::Matrix;
use crate::rings::F2;
use crate::vector::Vector;

/// Maximum number of candidate vectors. The search enumerates up to `2^n`
/// subsets, given as the bits of a `u64`.
pub const MAX_VECTORS: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XorError {
    #[error("no subset of the vectors XORs to the goal")]
    NoSolutionFound,

    #[error("{vectors} vectors exceed the limit of {max}", max = MAX_VECTORS)]
    TooManyVectors { vectors: usize },
}

fn check_size(matrix: &Matrix<F2>, goal: &Vector<F2>) -> Result<(), XorError> {
    assert_eq!(
        matrix.num_rows(),
        goal.dim(),
        "Vector must have an entry for each row in the matrix."
    );

    if matrix.num_cols() > MAX_VECTORS {
        return Err(XorError::TooManyVectors { vectors: matrix.num_cols() });
    }

    Ok(())
}

/// Packs a vector into an integer. Bit `i` is entry `i`.
fn pack<'a>(entries: impl Iterator<Item = &'a bool>) -> BigUint {
    let mut packed = BigUint::default();
    for (i, _) in entries.enumerate().filter(|(_, e)| **e) {
        packed.set_bit(i as u64, true);
    }
    packed
}

/// Returns the subset of columns with the fewest elements whose XOR is the
/// goal, as a bitmask over the columns. Among subsets of equal size the
/// smallest mask wins.
///
/// This tries all `2^n` subsets.
pub fn min_xor_subset(
    matrix: &Matrix<F2>,
    goal: &Vector<F2>,
) -> Result<u64, XorError> {
    check_size(matrix, goal)?;

    let columns: Vec<BigUint> = (0..matrix.num_cols())
        .map(|c| pack(matrix.col(c)))
        .collect();
    let target = pack(goal.iter());

    let mut best: Option<u64> = None;
    for mask in 0..1u64 << columns.len() {
        let xor = columns
            .iter()
            .enumerate()
            .filter(|(j, _)| (mask >> j) & 1 == 1)
            .fold(BigUint::default(), |acc, (_, c)| acc ^ c);

        if xor != target {
            continue;
        }

        if best.is_none_or(|b| mask.count_ones() < b.count_ones()) {
            trace!(mask, size = mask.count_ones(), "smaller subset");
            best = Some(mask);
        }
    }

    best.ok_or(XorError::NoSolutionFound)
}

/// Returns the size of the smallest subset of columns whose XOR is the goal.
pub fn solve_xor(matrix: &Matrix<F2>, goal: &Vector<F2>) -> Result<usize, XorError> {
    min_xor_subset(matrix, goal).map(|mask| mask.count_ones() as usize)
}

/// Same as [`solve_xor`] but it reduces `[A | g]` to reduced row echelon form
/// first and only enumerates the null space, which has `2^k` elements where
/// `k` is the number of free variables.
pub fn solve_xor_by_elimination(
    matrix: &Matrix<F2>,
    goal: &Vector<F2>,
) -> Result<usize, XorError> {
    check_size(matrix, goal)?;

    let m = matrix.num_rows();
    let n = matrix.num_cols();

    // The augmented matrix.
    let mut a = Matrix::<F2>::from_iter(
        m,
        n + 1,
        (0..m).flat_map(|r| matrix.row(r).iter().copied().chain([goal[r]])),
    );

    // The pivot column of each of the first `rank` rows.
    let mut pivots = Vec::new();
    let mut free = Vec::new();
    for c in 0..n {
        let r = pivots.len();
        let Some(p) = (r..m).find(|&i| a[(i, c)]) else {
            free.push(c);
            continue;
        };

        a.swap_rows(r, p);
        for i in 0..m {
            if i != r && a[(i, c)] {
                a.row_multiply_add(r, i, &true, &F2);
            }
        }
        pivots.push(c);
    }

    // A zero row with a one on the right-hand side means 0 = 1.
    if (pivots.len()..m).any(|i| a[(i, n)]) {
        return Err(XorError::NoSolutionFound);
    }

    // Free variables are 0, so the pivot variables are the right-hand side.
    let particular = pivots
        .iter()
        .enumerate()
        .filter(|&(r, _)| a[(r, n)])
        .fold(0u64, |acc, (_, &c)| acc | 1 << c);

    // Setting one free variable to 1 flips every pivot variable whose row has
    // a 1 in that column.
    let basis: Vec<u64> = free
        .iter()
        .map(|&f| {
            pivots
                .iter()
                .enumerate()
                .filter(|&(r, _)| a[(r, f)])
                .fold(1u64 << f, |acc, (_, &c)| acc | 1 << c)
        })
        .collect();

    // Walk the coset in Gray code order, so each step is a single XOR.
    let mut current = particular;
    let mut best = current.count_ones();
    for i in 1..1u64 << basis.len() {
        current ^= basis[i.trailing_zeros() as usize];
        best = best.min(current.count_ones());
    }

    Ok(best as usize)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::distr::{Bernoulli, Distribution as _, Uniform};
    use rand::{SeedableRng as _, rngs::StdRng};

    fn matrix(rows: &[&[u8]]) -> Matrix<F2> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.iter().map(|&e| e == 1).collect())
            .collect();
        Matrix::from_rows(&rows)
    }

    fn vector(entries: &[u8]) -> Vector<F2> {
        entries.iter().map(|&e| e == 1).collect()
    }

    /// XORs the columns selected by `mask`.
    fn xor_columns(matrix: &Matrix<F2>, mask: u64) -> Vector<F2> {
        let mut acc = Vector::<F2>::zero(matrix.num_rows());
        for c in (0..matrix.num_cols()).filter(|c| (mask >> c) & 1 == 1) {
            acc.add_assign(&matrix.col(c).copied().collect::<Vector<F2>>(), &F2);
        }
        acc
    }

    #[test]
    fn single_vector_matches() {
        // [#.] [0] [1]
        let m = matrix(&[&[1, 0], &[0, 1]]);
        assert_eq!(solve_xor(&m, &vector(&[1, 0])), Ok(1));
        assert_eq!(min_xor_subset(&m, &vector(&[1, 0])), Ok(0b01));
    }

    #[test]
    fn zero_goal_is_the_empty_subset() {
        let m = matrix(&[&[1, 1], &[0, 1]]);
        assert_eq!(solve_xor(&m, &vector(&[0, 0])), Ok(0));
        assert_eq!(solve_xor_by_elimination(&m, &vector(&[0, 0])), Ok(0));
    }

    #[test]
    fn no_solution() {
        let m = matrix(&[&[1], &[0]]);
        let g = vector(&[0, 1]);
        assert_eq!(solve_xor(&m, &g), Err(XorError::NoSolutionFound));
        assert_eq!(solve_xor_by_elimination(&m, &g), Err(XorError::NoSolutionFound));
    }

    #[test]
    fn no_vectors() {
        let m = Matrix::<F2>::zero(2, 0);
        assert_eq!(solve_xor(&m, &vector(&[1, 0])), Err(XorError::NoSolutionFound));
        assert_eq!(
            solve_xor_by_elimination(&m, &vector(&[1, 0])),
            Err(XorError::NoSolutionFound)
        );
        assert_eq!(solve_xor(&m, &vector(&[0, 0])), Ok(0));
    }

    #[test]
    fn puzzle_sample() {
        // [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1)
        let m = matrix(&[
            &[0, 0, 0, 0, 1, 1],
            &[0, 1, 0, 0, 0, 1],
            &[0, 0, 1, 1, 1, 0],
            &[1, 1, 0, 1, 0, 0],
        ]);
        let g = vector(&[0, 1, 1, 0]);
        assert_eq!(solve_xor(&m, &g), Ok(2));
        assert_eq!(solve_xor_by_elimination(&m, &g), Ok(2));
        assert_eq!(xor_columns(&m, min_xor_subset(&m, &g).unwrap()), g);
    }

    #[test]
    fn too_many_vectors() {
        let m = Matrix::<F2>::zero(1, MAX_VECTORS + 1);
        assert_eq!(
            solve_xor(&m, &vector(&[0])),
            Err(XorError::TooManyVectors { vectors: MAX_VECTORS + 1 })
        );
    }

    /// Patterns are not limited to the width of a machine word.
    #[test]
    fn long_patterns() {
        let dim = 150;
        // Column `j` has ones in rows `j`, `j + 50` and `j + 100`.
        let m = Matrix::<F2>::from_iter(
            dim,
            20,
            (0..dim).flat_map(|r| (0..20).map(move |c| r % 50 == c)),
        );
        let mut g = Vector::<F2>::zero(dim);
        for r in [3, 53, 103, 19, 69, 119] {
            g[r] = true;
        }
        assert_eq!(solve_xor(&m, &g), Ok(2));
        assert_eq!(solve_xor_by_elimination(&m, &g), Ok(2));
        assert_eq!(min_xor_subset(&m, &g), Ok(1 << 3 | 1 << 19));

        g[149] = true;
        assert_eq!(solve_xor(&m, &g), Err(XorError::NoSolutionFound));
        assert_eq!(solve_xor_by_elimination(&m, &g), Err(XorError::NoSolutionFound));
    }

    /// Compares both solvers against each other and against checking every
    /// subset of each size on random small instances.
    #[test]
    fn random_cross_check() {
        let rng = &mut StdRng::seed_from_u64(0);
        let size = Uniform::new_inclusive(0usize, 7).unwrap();
        let bit = Bernoulli::new(0.4).unwrap();

        for _ in 0..500 {
            let rows = size.sample(rng);
            let cols = size.sample(rng);
            let m = Matrix::<F2>::from_iter(rows, cols, std::iter::repeat_with(|| bit.sample(rng)));
            let g: Vector<F2> = (0..rows).map(|_| bit.sample(rng)).collect();

            let brute = (0..1u64 << cols)
                .filter(|&mask| xor_columns(&m, mask) == g)
                .map(|mask| mask.count_ones() as usize)
                .min();

            let exhaustive = solve_xor(&m, &g).ok();
            let elimination = solve_xor_by_elimination(&m, &g).ok();
            assert_eq!(exhaustive, brute, "matrix:\n{m}\ngoal: {g}");
            assert_eq!(elimination, brute, "matrix:\n{m}\ngoal: {g}");

            if let Ok(mask) = min_xor_subset(&m, &g) {
                assert_eq!(xor_columns(&m, mask), g);
            }
        }
    }
}
