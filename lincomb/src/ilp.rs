//! Minimum non-negative integer combinations.
//!
//! Given a non-negative integer matrix `A` and a goal `b`, find `x >= 0` in
//! `Z^n` with `Ax = b` that minimizes `sum(x)`. This is an integer linear
//! program, which is handed to an [`IntegerProgramSolver`]. The solution it
//! returns is rounded and checked against `Ax = b` before it is accepted.

use std::fmt::Display;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed as _;
use thiserror::Error;
use tracing::{debug, trace};

use crate::matrix::Matrix;
use crate::rings::{Q, Ring as _, Z};
use crate::simplex::{LinearProgram, LpOutcome};
use crate::vector::Vector;

/// `min sum(x)` subject to `Ax = b` and `0 <= x <= upper` with `x` integral.
///
/// The upper bounds are implied by `Ax = b` because `A` is non-negative, so
/// they don't change the set of solutions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerProgram {
    pub a: Matrix<Z>,
    pub b: Vector<Z>,
    pub upper: Vector<Z>,
}

/// Why a solver did not produce an optimal solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IlpStatus {
    Infeasible,
    Unbounded,
    /// The solver gave up, e.g. because it hit a resource limit.
    Unknown,
}

impl Display for IlpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IlpStatus::Infeasible => "infeasible",
            IlpStatus::Unbounded => "unbounded",
            IlpStatus::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IlpError {
    #[error("matrix entry ({row}, {col}) is negative")]
    NegativeCoefficient { row: usize, col: usize },

    #[error("the solver did not find an optimal solution: {0}")]
    NotOptimal(IlpStatus),

    #[error(
        "the rounded solution {solution} does not satisfy the constraints: \
        A·x = {product} but the goal is {goal}, where A =\n{matrix}"
    )]
    NumericalMismatch {
        matrix: Matrix<Z>,
        goal: Vector<Z>,
        solution: Vector<Z>,
        product: Vector<Z>,
    },
}

impl IntegerProgram {
    /// Sets up the program and derives an upper bound for every variable:
    /// `x_j <= b_i / A_ij` for every row `i` with `A_ij > 0`. A variable whose
    /// column is zero is bounded by zero, since it only increases the sum.
    pub fn new(a: Matrix<Z>, b: Vector<Z>) -> Result<Self, IlpError> {
        assert_eq!(a.num_rows(), b.dim(),
            "Vector must have an entry for each row in the matrix.");

        if let Some((row, col)) = (0..a.num_rows())
            .flat_map(|r| (0..a.num_cols()).map(move |c| (r, c)))
            .find(|&(r, c)| a[(r, c)].is_negative())
        {
            return Err(IlpError::NegativeCoefficient { row, col });
        }

        let upper = (0..a.num_cols())
            .map(|c| {
                a.col(c)
                    .zip(b.iter())
                    .filter(|(e, _)| e.is_positive())
                    .map(|(e, g)| Z::floor_div(g, e))
                    .min()
                    .unwrap_or_else(Z::zero)
            })
            .collect();

        Ok(Self { a, b, upper })
    }

    /// The number of variables.
    pub fn num_vars(&self) -> usize {
        self.a.num_cols()
    }

    /// Does `x` satisfy every constraint?
    pub fn is_feasible(&self, x: &Vector<Z>) -> bool {
        x.dim() == self.num_vars()
            && x.iter().zip(self.upper.iter()).all(|(e, u)| !e.is_negative() && e <= u)
            && self.a.mul_vec_post(x, &Z) == self.b
    }
}

/// Something that can solve an [`IntegerProgram`].
///
/// Solvers return the values of the variables in an optimal solution. They
/// are allowed to be slightly off, [`solve_ilp`] rounds them to the nearest
/// integer and checks them.
pub trait IntegerProgramSolver {
    fn solve(&self, program: &IntegerProgram) -> Result<Vector<Q>, IlpStatus>;
}

/// Depth-first branch and bound over the exact LP relaxations.
#[derive(Clone, Debug)]
pub struct BranchAndBound {
    /// Maximum number of LP relaxations to solve before giving up.
    pub node_limit: usize,
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self { node_limit: 1_000_000 }
    }
}

/// The bounds of the variables in a subproblem.
struct Node {
    lower: Vec<BigInt>,
    upper: Vec<BigInt>,
}

/// The solution of the LP relaxation of a [`Node`].
struct Relaxation {
    /// Values of the variables (not shifted by the lower bounds).
    x: Vec<BigRational>,
    objective: BigRational,
}

impl BranchAndBound {
    /// Solves the LP relaxation of the program restricted to the bounds of
    /// the node.
    ///
    /// The variables are shifted to `y = x - lower` so that the bounds become
    /// `0 <= y <= upper - lower`, which is expressed with one slack variable
    /// per variable. The constraints are
    /// ```text
    /// [A 0] [y]   [b - A·lower  ]
    /// [I I] [s] = [upper - lower]
    /// ```
    fn relax(
        program: &IntegerProgram,
        node: &Node,
    ) -> Result<Relaxation, IlpStatus> {
        let m = program.a.num_rows();
        let n = program.num_vars();

        if node.lower.iter().zip(&node.upper).any(|(l, u)| l > u) {
            return Err(IlpStatus::Infeasible);
        }

        let mut a = Matrix::<Q>::zero(m + n, 2 * n);
        for i in 0..m {
            for j in 0..n {
                a[(i, j)] = Q.element_from_bigint(&program.a[(i, j)]);
            }
        }
        for j in 0..n {
            a[(m + j, j)] = Q::one();
            a[(m + j, n + j)] = Q::one();
        }

        let lower = Vector::<Z>::from_entries(node.lower.clone());
        let shifted = program.a.mul_vec_post(&lower, &Z);
        let b: Vector<Q> = program.b.iter()
            .zip(shifted.iter())
            .map(|(g, s)| Q.element_from_bigint(&(g - s)))
            .chain(node.upper.iter()
                .zip(&node.lower)
                .map(|(u, l)| Q.element_from_bigint(&(u - l))))
            .collect();

        let c: Vector<Q> = (0..2 * n)
            .map(|j| if j < n { Q::one() } else { Q::zero() })
            .collect();

        match LinearProgram::new(a, b, c).solve() {
            LpOutcome::Optimal { x, objective } => {
                let x = x.iter()
                    .take(n)
                    .zip(&node.lower)
                    .map(|(y, l)| y + Q.element_from_bigint(l))
                    .collect();
                let offset = node.lower.iter().fold(BigInt::from(0), |acc, l| acc + l);
                Ok(Relaxation { x, objective: objective + Q.element_from_bigint(&offset) })
            }
            LpOutcome::Infeasible => Err(IlpStatus::Infeasible),
            LpOutcome::Unbounded => Err(IlpStatus::Unbounded),
        }
    }
}

impl IntegerProgramSolver for BranchAndBound {
    fn solve(&self, program: &IntegerProgram) -> Result<Vector<Q>, IlpStatus> {
        let mut stack = vec![Node {
            lower: vec![BigInt::from(0); program.num_vars()],
            upper: program.upper.iter().cloned().collect(),
        }];

        let mut best: Option<(BigInt, Vec<BigInt>)> = None;
        let mut nodes = 0usize;

        while let Some(node) = stack.pop() {
            nodes += 1;
            if nodes > self.node_limit {
                debug!(nodes, "branch and bound hit the node limit");
                return Err(IlpStatus::Unknown);
            }

            let relaxation = match Self::relax(program, &node) {
                Ok(r) => r,
                Err(IlpStatus::Infeasible) => continue,
                Err(status) => return Err(status),
            };

            // The objective is a sum of integers, so the relaxation bound can
            // be rounded up.
            let bound = Q::ceil(&relaxation.objective);
            if best.as_ref().is_some_and(|(b, _)| &bound >= b) {
                trace!(%bound, "pruned");
                continue;
            }

            let fractional = relaxation.x.iter().position(|e| !e.is_integer());
            let Some(j) = fractional else {
                let x: Vec<BigInt> = relaxation.x.iter().map(Q::round).collect();
                trace!(objective = %bound, "new incumbent");
                best = Some((bound, x));
                continue;
            };

            // Explore `x_j <= floor(v)` first, then `x_j >= floor(v) + 1`.
            let floor = Q::floor(&relaxation.x[j]);

            let mut up = Node { lower: node.lower.clone(), upper: node.upper.clone() };
            up.lower[j] = &floor + 1;
            stack.push(up);

            let mut down = node;
            down.upper[j] = floor;
            stack.push(down);
        }

        debug!(nodes, "branch and bound finished");

        match best {
            Some((_, x)) => Ok(x.iter().map(|e| Q.element_from_bigint(e)).collect()),
            None => Err(IlpStatus::Infeasible),
        }
    }
}

/// Uses z3's optimizer.
#[cfg(feature = "z3")]
#[derive(Clone, Debug, Default)]
pub struct Z3Optimizer;

#[cfg(feature = "z3")]
impl IntegerProgramSolver for Z3Optimizer {
    fn solve(&self, program: &IntegerProgram) -> Result<Vector<Q>, IlpStatus> {
        use num_traits::{ToPrimitive as _, Zero as _};
        use z3::ast::{Ast as _, Int};

        let cfg = z3::Config::new();
        let ctx = z3::Context::new(&cfg);
        let opt = z3::Optimize::new(&ctx);

        let constant = |e: &BigInt| e.to_i64()
            .map(|e| Int::from_i64(&ctx, e))
            .ok_or(IlpStatus::Unknown);

        let x: Vec<_> = (0..program.num_vars())
            .map(|j| Int::new_const(&ctx, format!("x{j}")))
            .collect();

        let zero = Int::from_i64(&ctx, 0);
        for (x, upper) in x.iter().zip(program.upper.iter()) {
            opt.assert(&x.ge(&zero));
            opt.assert(&x.le(&constant(upper)?));
        }

        for (row, goal) in program.a.rows().zip(program.b.iter()) {
            let terms = row.iter()
                .zip(&x)
                .filter(|(a, _)| !a.is_zero())
                .map(|(a, x)| -> Result<Int, IlpStatus> {
                    Ok(Int::mul(&ctx, &[&constant(a)?, x]))
                })
                .collect::<Result<Vec<_>, IlpStatus>>()?;
            let lhs = match terms.as_slice() {
                [] => zero.clone(),
                terms => Int::add(&ctx, &terms.iter().collect::<Vec<_>>()),
            };
            opt.assert(&lhs._eq(&constant(goal)?));
        }

        let total = match x.as_slice() {
            [] => zero.clone(),
            x => Int::add(&ctx, &x.iter().collect::<Vec<_>>()),
        };
        opt.minimize(&total);

        match opt.check(&[]) {
            z3::SatResult::Sat => {}
            z3::SatResult::Unsat => return Err(IlpStatus::Infeasible),
            z3::SatResult::Unknown => return Err(IlpStatus::Unknown),
        }

        let model = opt.get_model().ok_or(IlpStatus::Unknown)?;
        x.iter()
            .map(|x| {
                model.eval(x, true)
                    .and_then(|v| v.as_i64())
                    .map(|v| Q.element_from_bigint(&BigInt::from(v)))
                    .ok_or(IlpStatus::Unknown)
            })
            .collect()
    }
}

/// Returns the minimum of `sum(x)` over all `x >= 0` in `Z^n` with `Ax = b`.
///
/// The values returned by the solver are rounded to the nearest integer and
/// the result is only accepted if it satisfies `Ax = b` exactly.
pub fn solve_ilp<S: IntegerProgramSolver + ?Sized>(
    matrix: &Matrix<Z>,
    goal: &Vector<Z>,
    solver: &S,
) -> Result<BigInt, IlpError> {
    let program = IntegerProgram::new(matrix.clone(), goal.clone())?;
    let values = solver.solve(&program).map_err(IlpError::NotOptimal)?;

    let solution: Vector<Z> = values.iter().map(Q::round).collect();
    let product = matrix.mul_vec_post(&solution, &Z);
    if product != *goal || solution.iter().any(|e| e.is_negative()) {
        return Err(IlpError::NumericalMismatch {
            matrix: matrix.clone(),
            goal: goal.clone(),
            solution,
            product,
        });
    }

    let total = solution.sum(&Z);
    debug!(%solution, %total, "integer program solved");
    Ok(total)
}
