//! A trait for the kind of number
//! ([ring](https://en.wikipedia.org/wiki/Ring_(mathematics))) we are working
//! with.
//!
//! The solvers need three of them:
//!
//! - [`F2`], the integers mod 2, in which adding vectors is the same as
//!   XOR-ing them. The binary goals live here.
//! - [`Z`], the integers, for the combination matrix and the integer goals.
//! - [`Q`], the rationals, in which the LP relaxations of the integer
//!   programs are solved exactly.
//!
//! All operations on elements are implemented on the [`Ring`] and an instance
//! of it is passed to any function that uses the ring. For these three rings
//! the instance is empty, but it keeps vectors and matrices generic the same
//! way for all of them.

mod binary;
mod integers;
mod rationals;
mod traits;

pub use binary::*;
pub use integers::*;
pub use rationals::*;
pub use traits::*;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

impl_ring_element!(BigInt);
impl_ring_element!(BigRational);

/// Negates an element without allocating. There should really be a `NegAssign`
/// trait for this in `num_traits`.
pub(crate) fn neg_assign<T: std::ops::Neg<Output = T> + Default>(e: &mut T) {
    *e = -std::mem::take(e);
}
