use super::*;

/// The integers mod 2. Addition is XOR and multiplication is AND.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct F2;

impl RingElement for bool {
    fn zero() -> Self {
        false
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn one() -> Self {
        true
    }

    fn is_one(&self) -> bool {
        *self
    }
}

impl Ring for F2 {
    type Element = bool;

    fn negative_one(&self) -> Self::Element {
        true
    }

    fn neg_assign(&self, _: &mut Self::Element) {}

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l ^= *r;
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l ^= *r;
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l &= *r;
    }

    fn mul_add_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        *acc ^= *a & *b;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        *e
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        e.then_some(true)
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        n.bit(0)
    }
}

#[test]
fn element_from_bigint_test() {
    assert!(!F2.element_from_bigint(&BigInt::from(4)));
    assert!(F2.element_from_bigint(&BigInt::from(7)));
    // Two's complement semantics: -1 is odd.
    assert!(F2.element_from_bigint(&BigInt::from(-1)));
}
