use num_bigint::BigInt;

/// An element of a ring.
/// This exists mostly for convenience, so we can call `e.is_zero` on ring
/// elements. All arithmetic lives on the [`Ring`] itself.
pub trait RingElement: 'static + Clone + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns the "zero" element of the ring.
    fn zero() -> Self;

    /// Is the given element "zero"?
    fn is_zero(&self) -> bool;

    /// Returns the "one" element of the ring.
    fn one() -> Self;

    /// Is the given element "one"?
    fn is_one(&self) -> bool;
}

macro_rules! impl_ring_element {
    ($t:ident) => {
        impl RingElement for $t {
            fn zero() -> Self {
                Zero::zero()
            }

            fn is_zero(&self) -> bool {
                Zero::is_zero(self)
            }

            fn one() -> Self {
                One::one()
            }

            fn is_one(&self) -> bool {
                One::is_one(self)
            }
        }
    };
}

pub(crate) use impl_ring_element;

/// A ring.
///
/// An instance of the ring is passed to every operation even though all
/// current rings are zero-sized. `Clone` is here for convenience, deriving
/// `Clone` for structs that have a `R: Ring` generic will not work because the
/// `R` is not `Clone`.
pub trait Ring: 'static + Clone + PartialEq + Eq + std::fmt::Debug {
    /// The type of the elements of the ring.
    type Element: RingElement;

    /// Returns the "zero" element of the ring.
    fn zero() -> Self::Element {
        Self::Element::zero()
    }

    /// Returns the "one" element of the ring.
    fn one() -> Self::Element {
        Self::Element::one()
    }

    /// Returns the additive inverse of 1.
    fn negative_one(&self) -> Self::Element {
        self.sub(Self::zero(), &Self::one())
    }

    /// Negates the element in place.
    fn neg_assign(&self, e: &mut Self::Element);

    /// Negates the element, i.e. computes `0 - e`.
    fn neg(&self, mut e: Self::Element) -> Self::Element {
        self.neg_assign(&mut e);
        e
    }

    /// Add an element to another element.
    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Add two elements.
    fn add(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.add_assign(&mut l, r);
        l
    }

    /// Subtract one element from another.
    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Subtract one element from another.
    fn sub(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.sub_assign(&mut l, r);
        l
    }

    /// Multiply two elements.
    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Multiply two elements.
    fn mul(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.mul_assign(&mut l, r);
        l
    }

    /// Multiply two elements and add the result to another element.
    ///
    /// The default implementation allocates a new element for the product.
    fn mul_add_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        self.add_assign(acc, &self.mul(a.clone(), b))
    }

    /// Check if an element is a unit.
    fn is_unit(&self, e: &Self::Element) -> bool;

    /// Compute the multiplicative inverse of an element if it is a unit.
    fn inverse(&self, e: &Self::Element) -> Option<Self::Element>;

    /// Converts the [`BigInt`] `n` into an element.
    ///
    /// - If `n` is non-negative, this is the result of adding `1` `n`-times to
    ///   itself.
    ///
    /// - If `n` is negative, this is the result of adding `-1` `-n`-times to
    ///   itself.
    fn element_from_bigint(&self, n: &BigInt) -> Self::Element;
}

/// A ring in which every non-zero element is a unit.
pub trait Field: Ring {
    /// Divides `l` by `r`. Panics if `r` is zero.
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Divides `l` by `r`. Panics if `r` is zero.
    fn div(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.div_assign(&mut l, r);
        l
    }
}

/// A ring with a total order compatible with addition.
pub trait OrderedRing: Ring {
    /// Compares two elements.
    fn cmp(&self, l: &Self::Element, r: &Self::Element) -> std::cmp::Ordering;

    /// Is `l < r`?
    fn is_lt(&self, l: &Self::Element, r: &Self::Element) -> bool {
        self.cmp(l, r).is_lt()
    }

    /// Is `l > r`?
    fn is_gt(&self, l: &Self::Element, r: &Self::Element) -> bool {
        self.cmp(l, r).is_gt()
    }

    /// Is the element strictly greater than zero?
    fn is_positive(&self, e: &Self::Element) -> bool {
        self.is_gt(e, &Self::zero())
    }

    /// Is the element strictly less than zero?
    fn is_negative(&self, e: &Self::Element) -> bool {
        self.is_lt(e, &Self::zero())
    }
}
