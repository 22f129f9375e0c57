use super::*;

/// The integers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Z;

impl Ring for Z {
    type Element = BigInt;

    fn negative_one(&self) -> Self::Element {
        -<BigInt as One>::one()
    }

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e);
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
        One::is_one(e.magnitude())
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        if !self.is_unit(e) {
            None
        } else if e.is_negative() {
            Some(self.negative_one())
        } else {
            Some(Self::one())
        }
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        n.clone()
    }
}

impl Z {
    /// Floor division. Panics if `r` is zero.
    pub fn floor_div(l: &BigInt, r: &BigInt) -> BigInt {
        num_integer::Integer::div_floor(l, r)
    }
}

#[test]
fn floor_div_test() {
    let check = |l: i64, r: i64, q: i64| {
        assert_eq!(
            Z::floor_div(&l.into(), &r.into()),
            BigInt::from(q),
            "floor_div({l}, {r})"
        );
    };
    check(7, 2, 3);
    check(-7, 2, -4);
    check(6, 3, 2);
    check(0, 5, 0);
}
