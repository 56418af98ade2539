//! Property-based tests across the ring implementations.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use exalg_integers::Integer;

    use crate::modular_big::ModularBigRing;
    use crate::modular_word::ModularWordRing;
    use crate::pow::{positive_power, power};
    use crate::rational::{ExactRational, RationalField};
    use crate::traits::{RingElement, RingFactory};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = ExactRational> {
        (small_int(), non_zero_int())
            .prop_map(|(n, d)| ExactRational::from_i64(n, d).unwrap())
    }

    proptest! {
        // Canonical form is preserved by every arithmetic operation.

        #[test]
        fn rational_sum_is_canonical(a in rational(), b in rational()) {
            prop_assert!((a + b).validate().is_ok());
        }

        #[test]
        fn rational_product_is_canonical(a in rational(), b in rational()) {
            prop_assert!((a * b).validate().is_ok());
        }

        #[test]
        fn rational_sum_matches_textbook(
            n1 in small_int(), d1 in non_zero_int(),
            n2 in small_int(), d2 in non_zero_int()
        ) {
            // The partial-gcd path must agree with n1*d2 + n2*d1 over d1*d2.
            let a = ExactRational::from_i64(n1, d1).unwrap();
            let b = ExactRational::from_i64(n2, d2).unwrap();
            let textbook = ExactRational::new(
                Integer::new(n1 * d2 + n2 * d1),
                Integer::new(d1 * d2),
            ).unwrap();
            prop_assert_eq!(a + b, textbook);
        }

        // Field axioms

        #[test]
        fn rational_additive_inverse(a in rational()) {
            prop_assert!((a.clone() + (-a)).is_zero());
        }

        #[test]
        fn rational_multiplicative_inverse(n in non_zero_int(), d in non_zero_int()) {
            let a = ExactRational::from_i64(n, d).unwrap();
            let inv = a.inverse().unwrap();
            prop_assert!((a * inv).is_one());
        }

        // Ordering is total and consistent with equality.

        #[test]
        fn rational_ordering_antisymmetric(a in rational(), b in rational()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a.cmp(&b) == std::cmp::Ordering::Equal, a == b);
        }

        #[test]
        fn rational_ordering_transitive(a in rational(), b in rational(), c in rational()) {
            let mut v = vec![a, b, c];
            v.sort();
            prop_assert!(v[0] <= v[1] && v[1] <= v[2] && v[0] <= v[2]);
        }

        // Modular reduction range

        #[test]
        fn big_ring_reduction_range(v in any::<i64>(), m in 1i64..100_000) {
            let ring = ModularBigRing::new(Integer::new(m)).unwrap();
            prop_assert!(ring.from_i64(v).validate().is_ok());
        }

        #[test]
        fn word_ring_reduction_range(v in any::<i64>(), m in 1i64..=((1 << 31) - 1)) {
            let ring = ModularWordRing::new(m).unwrap();
            prop_assert!(ring.from_i64(v).validate().is_ok());
        }

        // Euclidean identity for both modular representations

        #[test]
        fn big_ring_egcd_identity(a in small_int(), b in small_int(), m in 2i64..10_000) {
            let ring = ModularBigRing::new(Integer::new(m)).unwrap();
            let a = ring.from_i64(a);
            let b = ring.from_i64(b);
            let (g, x, y) = a.extended_gcd(&b);
            prop_assert_eq!(x * a + y * b, g);
        }

        #[test]
        fn word_ring_egcd_identity(a in small_int(), b in small_int(), m in 2i64..10_000) {
            let ring = ModularWordRing::new(m).unwrap();
            let a = ring.from_i64(a);
            let b = ring.from_i64(b);
            let (g, x, y) = a.extended_gcd(&b);
            prop_assert_eq!(x * a + y * b, g);
        }

        // The two modular representations agree wherever both apply.

        #[test]
        fn representations_agree(a in small_int(), b in small_int(), m in 2i64..100_000) {
            let big = ModularBigRing::new(Integer::new(m)).unwrap();
            let word = ModularWordRing::new(m).unwrap();

            let sum = (big.from_i64(a) + big.from_i64(b)).value().to_i64();
            prop_assert_eq!(sum, Some((word.from_i64(a) + word.from_i64(b)).value()));

            let prod = (big.from_i64(a) * big.from_i64(b)).value().to_i64();
            prop_assert_eq!(prod, Some((word.from_i64(a) * word.from_i64(b)).value()));

            match (big.from_i64(a).inverse(), word.from_i64(a).inverse()) {
                (Ok(x), Ok(y)) => prop_assert_eq!(x.value().to_i64(), Some(y.value())),
                (Err(_), Err(_)) => {}
                (x, y) => prop_assert!(false, "inverse disagreement: {x:?} vs {y:?}"),
            }
        }

        // Exponentiation consistency

        #[test]
        fn power_matches_repeated_multiply(base in rational(), n in 0i64..16) {
            let f = RationalField;
            let mut expected = f.one();
            for _ in 0..n {
                expected = expected * base.clone();
            }
            prop_assert_eq!(power(&f, &base, n).unwrap(), expected);
        }

        #[test]
        fn negative_power_is_power_of_inverse(n in non_zero_int(), d in non_zero_int(), e in 1i64..16) {
            let f = RationalField;
            let base = ExactRational::from_i64(n, d).unwrap();
            let lhs = power(&f, &base, -e).unwrap();
            let rhs = power(&f, &base.inverse().unwrap(), e).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn positive_power_agrees_with_power(base in rational(), e in 1i64..16) {
            let f = RationalField;
            prop_assert_eq!(
                positive_power(&base, e).unwrap(),
                power(&f, &base, e).unwrap()
            );
        }

        // Fermat's little theorem through the generic algorithm

        #[test]
        fn word_ring_fermat(a in 1i64..7919) {
            let zp = ModularWordRing::new(7919).unwrap(); // prime
            let a = zp.from_i64(a);
            prop_assert!(power(&zp, &a, 7918).unwrap().value() == 1);
        }
    }
}
