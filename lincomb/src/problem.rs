//! Parsing of problem instances.
//!
//! Every non-empty line of the input describes one instance:
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! ```
//! The first token is the binary goal (`#` is 1, anything else 0), the last
//! token is the integer goal and every token in between is a candidate vector
//! given by the positions at which it is 1. Each token is wrapped in `[]`, `()`
//! or `{}`, it does not matter which.

use std::num::ParseIntError;

use num_bigint::BigInt;
use thiserror::Error;

use crate::matrix::Matrix;
use crate::rings::{F2, Z};
use crate::vector::Vector;

/// One instance: a binary goal, the candidate vectors as the columns of the
/// combination matrix and an integer goal.
///
/// The binary goal, the integer goal and the columns of the matrix all have
/// the same dimension.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Problem {
    /// The bit pattern the XOR of a subset of columns needs to reproduce.
    pub binary_goal: Vector<F2>,

    /// One 0/1 column per candidate vector.
    pub matrix: Matrix<Z>,

    /// The vector the non-negative integer combination needs to sum to.
    pub goal: Vector<Z>,
}

impl Problem {
    /// The dimension shared by the goals and the candidate vectors.
    pub fn dim(&self) -> usize {
        self.goal.dim()
    }

    /// The number of candidate vectors.
    pub fn num_vectors(&self) -> usize {
        self.matrix.num_cols()
    }

    /// The combination matrix over [`F2`].
    pub fn binary_matrix(&self) -> Matrix<F2> {
        self.matrix.transform(|e| e.bit(0))
    }
}

/// Why a line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected a binary pattern and a goal, found {found} token(s)")]
    TooFewTokens { found: usize },

    #[error("token `{token}` is not wrapped in `[]`, `()` or `{{}}`")]
    Undelimited { token: String },

    #[error("`{entry}` in token `{token}` is not a non-negative integer")]
    InvalidInteger {
        token: String,
        entry: String,
        #[source]
        source: ParseIntError,
    },

    #[error("index {index} in token `{token}` is out of range for dimension {dim}")]
    IndexOutOfRange { token: String, index: usize, dim: usize },

    #[error("binary pattern has length {pattern} but the goal has dimension {goal}")]
    DimensionMismatch { pattern: usize, goal: usize },
}

/// Strips the delimiters of a token and returns the inside.
fn strip_delimiters(token: &str) -> Result<&str, ParseErrorKind> {
    let inner = [('[', ']'), ('(', ')'), ('{', '}')]
        .into_iter()
        .find_map(|(open, close)| token.strip_prefix(open)?.strip_suffix(close));

    inner.ok_or_else(|| ParseErrorKind::Undelimited { token: token.to_owned() })
}

/// Parses a delimited comma-separated list of non-negative integers.
/// Every entry must be present, so `()` and `(1,)` are rejected.
fn parse_list<T>(token: &str) -> Result<Vec<T>, ParseErrorKind>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    strip_delimiters(token)?
        .split(',')
        .map(|entry| {
            entry.trim().parse().map_err(|source| ParseErrorKind::InvalidInteger {
                token: token.to_owned(),
                entry: entry.to_owned(),
                source,
            })
        })
        .collect()
}

/// Expands a sparse index list into a dense 0/1 vector of dimension `dim`.
fn expand_sparse(token: &str, dim: usize) -> Result<Vector<Z>, ParseErrorKind> {
    let mut v = Vector::<Z>::zero(dim);
    for index in parse_list::<usize>(token)? {
        if index >= dim {
            return Err(ParseErrorKind::IndexOutOfRange {
                token: token.to_owned(),
                index,
                dim,
            });
        }
        v[index] = BigInt::from(1);
    }
    Ok(v)
}

fn parse_tokens(s: &str) -> Result<Problem, ParseErrorKind> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let [pattern, sparse @ .., goal] = tokens.as_slice() else {
        return Err(ParseErrorKind::TooFewTokens { found: tokens.len() });
    };

    let binary_goal: Vector<F2> = strip_delimiters(pattern)?
        .chars()
        .map(|c| c == '#')
        .collect();

    let goal: Vector<Z> = parse_list::<u64>(goal)?
        .into_iter()
        .map(BigInt::from)
        .collect();

    if binary_goal.dim() != goal.dim() {
        return Err(ParseErrorKind::DimensionMismatch {
            pattern: binary_goal.dim(),
            goal: goal.dim(),
        });
    }

    let columns = sparse
        .iter()
        .map(|token| expand_sparse(token, goal.dim()))
        .collect::<Result<Vec<_>, _>>()?;

    let matrix = Matrix::from_columns(goal.dim(), &columns);

    Ok(Problem { binary_goal, matrix, goal })
}

/// Parses a single line. `line` is the 1-based line number used in errors.
pub fn parse_line(s: &str, line: usize) -> Result<Problem, ParseError> {
    parse_tokens(s).map_err(|kind| ParseError { line, kind })
}

/// Parses every non-empty line of the input, stopping at the first error.
///
/// Each problem is returned with its 1-based line number.
pub fn parse_input(text: &str) -> Result<Vec<(usize, Problem)>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(l, i + 1).map(|p| (i + 1, p)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn square_brackets_everywhere() {
        let p = parse_line("[#.] [0] [1] [1,0]", 1).unwrap();
        assert_eq!(p.binary_goal, Vector::from_slice(&[true, false]));
        assert_eq!(p.matrix, Matrix::from_rows(&[[1, 0], [0, 1]]));
        assert_eq!(p.goal, Vector::from_slice(&[1, 0]));
        assert_eq!(p.dim(), 2);
        assert_eq!(p.num_vectors(), 2);
    }

    #[test]
    fn puzzle_delimiters() {
        let p = parse_line("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}", 1).unwrap();
        assert_eq!(p.binary_goal, Vector::from_slice(&[false, true, true, false]));
        assert_eq!(p.goal, Vector::from_slice(&[3, 5, 4, 7]));
        assert_eq!(
            p.matrix,
            Matrix::from_rows(&[
                [0, 0, 0, 0, 1, 1],
                [0, 1, 0, 0, 0, 1],
                [0, 0, 1, 1, 1, 0],
                [1, 1, 0, 1, 0, 0],
            ])
        );
        assert_eq!(
            p.binary_matrix().row(3),
            &[true, true, false, true, false, false]
        );
    }

    #[test]
    fn no_candidate_vectors() {
        let p = parse_line("[#] {1}", 1).unwrap();
        assert_eq!(p.num_vectors(), 0);
        assert_eq!(p.matrix.num_rows(), 1);
    }

    #[test]
    fn duplicate_indices_are_idempotent() {
        let p = parse_line("[..] (1,1) {0,2}", 1).unwrap();
        assert_eq!(p.matrix, Matrix::from_rows(&[[0], [1]]));
    }

    #[test]
    fn parse_input_skips_blank_lines() {
        let text = format!("\n{SAMPLE}\n\n");
        let problems = parse_input(&text).unwrap();
        assert_eq!(problems.len(), 3);
        assert_eq!(problems.iter().map(|(l, _)| *l).collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(problems[2].1.dim(), 6);
        assert_eq!(problems[2].1.num_vectors(), 4);
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse_input(SAMPLE).unwrap(), parse_input(SAMPLE).unwrap());
    }

    #[test]
    fn too_few_tokens() {
        let e = parse_line("[#.]", 7).unwrap_err();
        assert_eq!(e.line, 7);
        assert_eq!(e.kind, ParseErrorKind::TooFewTokens { found: 1 });
        assert!(matches!(
            parse_line("   ", 1).unwrap_err().kind,
            ParseErrorKind::TooFewTokens { found: 0 }
        ));
    }

    #[test]
    fn undelimited_token() {
        let e = parse_line("[#.] 0 {1,0}", 1).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::Undelimited { token: "0".into() });

        // Mismatched pairs are not accepted.
        let e = parse_line("[#.] (0] {1,0}", 1).unwrap_err();
        assert!(matches!(e.kind, ParseErrorKind::Undelimited { .. }));
    }

    #[test]
    fn invalid_integer() {
        let e = parse_line("[#.] (0,x) {1,0}", 3).unwrap_err();
        assert!(matches!(
            e.kind,
            ParseErrorKind::InvalidInteger { ref entry, .. } if entry == "x"
        ));
        assert!(e.to_string().starts_with("line 3: `x`"));

        let e = parse_line("[#.] (0) {1,-2}", 1).unwrap_err();
        assert!(matches!(e.kind, ParseErrorKind::InvalidInteger { .. }));
    }

    #[test]
    fn empty_entries() {
        for line in ["[#.] () {1,0}", "[] {}", "[#.] (0,) {1,0}", "[#.] (0) { }"] {
            let e = parse_line(line, 5).unwrap_err();
            assert!(
                matches!(e.kind, ParseErrorKind::InvalidInteger { ref entry, .. } if entry.trim().is_empty()),
                "{line}: {e}"
            );
            assert_eq!(e.line, 5);
        }
    }

    #[test]
    fn index_out_of_range() {
        let e = parse_line("[#.] (2) {1,0}", 1).unwrap_err();
        assert_eq!(
            e.kind,
            ParseErrorKind::IndexOutOfRange { token: "(2)".into(), index: 2, dim: 2 }
        );
    }

    #[test]
    fn dimension_mismatch() {
        let e = parse_line("[#..] (0) {1,0}", 1).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::DimensionMismatch { pattern: 3, goal: 2 });
    }

    #[test]
    fn first_error_stops_parsing() {
        let e = parse_input("[#] (0) {1}\n[#] (x) {1}\n[#] (y) {1}").unwrap_err();
        assert_eq!(e.line, 2);
    }
}
