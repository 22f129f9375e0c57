//! Minimum-size linear combinations of small vectors.
//!
//! Every problem instance has a set of 0/1 candidate vectors and asks two
//! questions about them:
//! - What is the smallest subset whose XOR is a given bit pattern? See [`xor`].
//! - What is the smallest total number of vectors, each used any non-negative
//!   number of times, whose sum is a given integer vector? See [`ilp`].
//!
//! [`batch::solve_all`] parses a whole input and sums up both answers.

pub mod batch;
pub mod ilp;
pub mod matrix;
pub mod problem;
pub mod rings;
pub mod simplex;
pub mod vector;
pub mod xor;

pub use batch::{solve_all, solve_all_with, Error, Totals};
