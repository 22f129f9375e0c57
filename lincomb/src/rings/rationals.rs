use super::*;

/// The rationals.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Q;

impl Ring for Q {
    type Element = BigRational;

    fn negative_one(&self) -> Self::Element {
        (-<BigInt as One>::one()).into()
    }

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e)
    }

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l += r;
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l -= r;
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l *= r;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        !RingElement::is_zero(e.numer())
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        self.is_unit(e).then(|| e.recip())
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        n.clone().into()
    }
}

impl Field for Q {
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l /= r;
    }
}

impl OrderedRing for Q {
    fn cmp(&self, l: &Self::Element, r: &Self::Element) -> std::cmp::Ordering {
        l.cmp(r)
    }
}

impl Q {
    /// Rounds to the nearest integer, half-way cases away from zero.
    pub fn round(e: &BigRational) -> BigInt {
        e.round().to_integer()
    }

    /// The largest integer `<= e`.
    pub fn floor(e: &BigRational) -> BigInt {
        e.floor().to_integer()
    }

    /// The smallest integer `>= e`.
    pub fn ceil(e: &BigRational) -> BigInt {
        e.ceil().to_integer()
    }
}

#[test]
fn rounding_test() {
    let q = |n: i64, d: i64| BigRational::new(n.into(), d.into());
    assert_eq!(Q::round(&q(5, 2)), BigInt::from(3));
    assert_eq!(Q::round(&q(-5, 2)), BigInt::from(-3));
    assert_eq!(Q::round(&q(7, 3)), BigInt::from(2));
    assert_eq!(Q::floor(&q(-1, 3)), BigInt::from(-1));
    assert_eq!(Q::ceil(&q(1, 3)), BigInt::from(1));
    assert_eq!(Q::ceil(&q(4, 2)), BigInt::from(2));
}
