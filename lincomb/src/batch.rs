//! Solving every instance of an input and summing up the answers.

use num_bigint::BigInt;
use thiserror::Error;
use tracing::{debug, info};

use crate::ilp::{solve_ilp, BranchAndBound, IlpError, IntegerProgramSolver};
use crate::problem::{parse_input, ParseError};
use crate::xor::{solve_xor, XorError};

/// The sums of the answers over all instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of the sizes of the smallest XOR subsets.
    pub xor: usize,

    /// Sum of the smallest non-negative integer combination sizes.
    pub ilp: BigInt,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("line {line}: {source}")]
    Xor {
        line: usize,
        #[source]
        source: XorError,
    },

    #[error("line {line}: {source}")]
    Ilp {
        line: usize,
        #[source]
        source: IlpError,
    },
}

impl Error {
    /// The 1-based line number of the instance that failed.
    pub fn line(&self) -> usize {
        match self {
            Error::Parse(e) => e.line,
            Error::Xor { line, .. } | Error::Ilp { line, .. } => *line,
        }
    }
}

/// Solves every instance in `text` with the default integer program solver.
pub fn solve_all(text: &str) -> Result<Totals, Error> {
    solve_all_with(text, &BranchAndBound::default())
}

/// Solves every instance in `text`, stopping at the first one that fails.
pub fn solve_all_with(
    text: &str,
    solver: &dyn IntegerProgramSolver,
) -> Result<Totals, Error> {
    let problems = parse_input(text)?;
    info!(instances = problems.len(), "parsed input");

    problems.into_iter().try_fold(Totals::default(), |mut totals, (line, p)| {
        let xor = solve_xor(&p.binary_matrix(), &p.binary_goal)
            .map_err(|source| Error::Xor { line, source })?;
        let ilp = solve_ilp(&p.matrix, &p.goal, solver)
            .map_err(|source| Error::Ilp { line, source })?;

        debug!(line, xor, %ilp, "solved instance");
        totals.xor += xor;
        totals.ilp += ilp;
        Ok(totals)
    })
}
