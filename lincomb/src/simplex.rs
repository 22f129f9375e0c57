//! Exact linear programming over [`Q`].
//!
//! Solves `min c·x` subject to `Ax = b`, `x >= 0` with the two-phase tableau
//! simplex method. Pivots are chosen with Bland's rule, so it can not cycle.

use num_rational::BigRational;

use crate::matrix::Matrix;
use crate::rings::{Field as _, OrderedRing as _, Q, Ring as _, RingElement as _};
use crate::vector::Vector;

/// A linear program in standard form: `min c·x` subject to `Ax = b`, `x >= 0`.
#[derive(Clone, Debug)]
pub struct LinearProgram {
    pub a: Matrix<Q>,
    pub b: Vector<Q>,
    pub c: Vector<Q>,
}

/// The result of solving a [`LinearProgram`].
#[derive(Clone, Debug, PartialEq)]
pub enum LpOutcome {
    /// An optimal vertex and the objective value there.
    Optimal { x: Vector<Q>, objective: BigRational },

    /// There is no `x >= 0` with `Ax = b`.
    Infeasible,

    /// The objective is unbounded from below.
    Unbounded,
}

impl LinearProgram {
    pub fn new(a: Matrix<Q>, b: Vector<Q>, c: Vector<Q>) -> Self {
        assert_eq!(a.num_rows(), b.dim(),
            "Vector must have an entry for each row in the matrix.");
        assert_eq!(a.num_cols(), c.dim(),
            "Objective must have an entry for each column in the matrix.");
        Self { a, b, c }
    }

    /// The number of variables.
    pub fn num_vars(&self) -> usize {
        self.a.num_cols()
    }

    /// Solves the linear program.
    pub fn solve(&self) -> LpOutcome {
        let n = self.num_vars();
        let mut t = Tableau::phase_one(self);

        // Artificial variables may enter in the first phase.
        if t.run(n + t.m).is_err() {
            unreachable!("Phase one of the simplex method is never unbounded.");
        }

        // The sum of the artificial variables did not reach zero.
        if !t.objective_row_rhs().is_zero() {
            return LpOutcome::Infeasible;
        }

        t.drive_out_artificials(n);
        t.set_objective(&self.c);

        if t.run(n).is_err() {
            return LpOutcome::Unbounded;
        }

        let mut x = Vector::<Q>::zero(n);
        for (row, &var) in t.basis.iter().enumerate() {
            if var < n {
                x[var] = t.rhs(row).clone();
            }
        }

        let objective = self.c.dot(&x, &Q);
        LpOutcome::Optimal { x, objective }
    }
}

struct Unbounded;

/// A simplex tableau.
///
/// The first `m` rows are the constraints, the last row contains the reduced
/// costs and the negated objective value in the last column. The columns are
/// the `n` variables, then one artificial variable per constraint and then the
/// right-hand side.
struct Tableau {
    t: Matrix<Q>,
    basis: Vec<usize>,
    m: usize,
}

impl Tableau {
    /// Builds the tableau for minimizing the sum of the artificial variables.
    fn phase_one(lp: &LinearProgram) -> Self {
        let m = lp.a.num_rows();
        let n = lp.a.num_cols();
        let rhs = n + m;
        let mut t = Matrix::<Q>::zero(m + 1, n + m + 1);

        for i in 0..m {
            // Artificial variables start at `b`, so `b` has to be non-negative.
            let flip = Q.is_negative(&lp.b[i]);
            for j in 0..n {
                t[(i, j)] = lp.a[(i, j)].clone();
            }
            t[(i, rhs)] = lp.b[i].clone();
            if flip {
                t.row_multiply(i, &Q.negative_one(), &Q);
            }
            t[(i, n + i)] = Q::one();
        }

        // Reduced costs: 1 for the artificial variables minus the sum of the
        // rows they are basic in.
        for i in 0..m {
            t.row_multiply_add(i, m, &Q.negative_one(), &Q);
        }
        for i in 0..m {
            t[(m, n + i)] = Q::zero();
        }

        Self { t, basis: (n..n + m).collect(), m }
    }

    fn rhs_col(&self) -> usize {
        self.t.num_cols() - 1
    }

    fn rhs(&self, row: usize) -> &BigRational {
        &self.t[(row, self.rhs_col())]
    }

    fn objective_row_rhs(&self) -> &BigRational {
        self.rhs(self.m)
    }

    /// Makes `col` basic in `row`.
    fn pivot(&mut self, row: usize, col: usize) {
        let inv = Q.inverse(&self.t[(row, col)])
            .expect("Pivot element must be non-zero.");
        self.t.row_multiply(row, &inv, &Q);

        for k in 0..=self.m {
            if k == row || self.t[(k, col)].is_zero() {
                continue;
            }
            let factor = Q.neg(self.t[(k, col)].clone());
            self.t.row_multiply_add(row, k, &factor, &Q);
        }

        self.basis[row] = col;
    }

    /// Pivots until no column in `0..allowed` has a negative reduced cost.
    fn run(&mut self, allowed: usize) -> Result<(), Unbounded> {
        loop {
            // Bland's rule: the first improving column enters.
            let Some(col) = (0..allowed).find(|&j| Q.is_negative(&self.t[(self.m, j)])) else {
                return Ok(());
            };

            // Among the rows with minimal ratio, the one with the smallest
            // basic variable leaves.
            let row = (0..self.m)
                .filter(|&i| Q.is_positive(&self.t[(i, col)]))
                .map(|i| (i, Q.div(self.rhs(i).clone(), &self.t[(i, col)])))
                .min_by(|(i, a), (j, b)| {
                    a.cmp(b).then(self.basis[*i].cmp(&self.basis[*j]))
                })
                .map(|(i, _)| i);

            let Some(row) = row else {
                return Err(Unbounded);
            };

            self.pivot(row, col);
        }
    }

    /// Replaces artificial variables that are still basic (at value zero)
    /// by original variables. Rows where that is impossible are redundant and
    /// are left alone.
    fn drive_out_artificials(&mut self, n: usize) {
        for row in 0..self.m {
            if self.basis[row] < n {
                continue;
            }
            if let Some(col) = (0..n).find(|&j| !self.t[(row, j)].is_zero()) {
                self.pivot(row, col);
            }
        }
    }

    /// Replaces the objective row with the reduced costs of `c`.
    fn set_objective(&mut self, c: &Vector<Q>) {
        let n = c.dim();
        let m = self.m;
        for e in self.t.row_mut(m) {
            *e = Q::zero();
        }
        for j in 0..n {
            self.t[(m, j)] = c[j].clone();
        }
        for row in 0..m {
            let var = self.basis[row];
            if var < n && !c[var].is_zero() {
                let factor = Q.neg(c[var].clone());
                self.t.row_multiply_add(row, m, &factor, &Q);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::BigInt;

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn lp<const R: usize, const C: usize>(
        a: [[i64; C]; R],
        b: [i64; R],
        c: [i64; C],
    ) -> LinearProgram {
        LinearProgram::new(
            Matrix::from_array(a.map(|r| r.map(q))),
            Vector::from_slice(&b.map(q)),
            Vector::from_slice(&c.map(q)),
        )
    }

    #[test]
    fn simple_minimum() {
        // x0 + x1 = 4, x0 - x1 + s = 2, min x0 + 2 x1 -> x0 = 3, x1 = 1.
        let p = lp([[1, 1, 0], [1, -1, 1]], [4, 2], [1, 2, 0]);
        match p.solve() {
            LpOutcome::Optimal { x, objective } => {
                assert_eq!(objective, q(5));
                assert_eq!(x, Vector::from_slice(&[q(3), q(1), q(0)]));
            }
            o => panic!("expected an optimum, got {o:?}"),
        }
    }

    #[test]
    fn fractional_vertex() {
        // 2 x0 + 2 x1 = 3, min x0 + x1 -> 3/2.
        let p = lp([[2, 2]], [3], [1, 1]);
        let LpOutcome::Optimal { x, objective } = p.solve() else {
            panic!("expected an optimum");
        };
        assert_eq!(objective, BigRational::new(3.into(), 2.into()));
        assert_eq!(p.a.mul_vec_post(&x, &Q), p.b);
    }

    #[test]
    fn negative_right_hand_side() {
        // -x0 - x1 = -2, min x0 -> x0 = 0, x1 = 2.
        let p = lp([[-1, -1]], [-2], [1, 0]);
        let LpOutcome::Optimal { x, objective } = p.solve() else {
            panic!("expected an optimum");
        };
        assert_eq!(objective, q(0));
        assert_eq!(x, Vector::from_slice(&[q(0), q(2)]));
    }

    #[test]
    fn infeasible() {
        // x0 + x1 = -1 has no non-negative solution.
        assert_eq!(lp([[1, 1]], [-1], [1, 1]).solve(), LpOutcome::Infeasible);
        // x0 = 1 and x0 = 2.
        assert_eq!(lp([[1], [1]], [1, 2], [1]).solve(), LpOutcome::Infeasible);
    }

    #[test]
    fn unbounded() {
        // x0 - x1 = 0, min -x0.
        assert_eq!(lp([[1, -1]], [0], [-1, 0]).solve(), LpOutcome::Unbounded);
    }

    #[test]
    fn redundant_rows() {
        // The same constraint twice.
        let p = lp([[1, 1], [1, 1]], [2, 2], [1, 3]);
        let LpOutcome::Optimal { x, objective } = p.solve() else {
            panic!("expected an optimum");
        };
        assert_eq!(objective, q(2));
        assert_eq!(x, Vector::from_slice(&[q(2), q(0)]));
    }

    #[test]
    fn no_constraints() {
        let p = lp::<0, 2>([], [], [1, 0]);
        assert_eq!(
            p.solve(),
            LpOutcome::Optimal { x: Vector::from_slice(&[q(0), q(0)]), objective: q(0) }
        );
        assert_eq!(lp::<0, 1>([], [], [-1]).solve(), LpOutcome::Unbounded);
    }
}
