//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::primality::{is_probable_prime, next_probable_prime};
    use crate::Integer;

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);

            let rem_a = a.clone() % g.clone();
            let rem_b = b.clone() % g.clone();
            prop_assert!(rem_a.is_zero());
            prop_assert!(rem_b.is_zero());
        }

        #[test]
        fn gcd_commutative(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.gcd(&b), b.gcd(&a));
        }

        #[test]
        fn extended_gcd_bezout_identity(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let (g, x, y) = a.extended_gcd(&b);
            prop_assert_eq!(a * x + b * y, g);
        }

        #[test]
        fn modpow_matches_naive(base in 0i64..50, exp in 0u32..12, m in 2i64..1000) {
            let naive = Integer::new(base).pow(exp) % Integer::new(m);
            let fast = Integer::new(base).modpow(&Integer::new(i64::from(exp)), &Integer::new(m));
            prop_assert_eq!(naive, fast);
        }

        #[test]
        fn next_probable_prime_is_prime_and_greater(n in 0i64..100_000) {
            let n = Integer::new(n);
            let p = next_probable_prime(&n);
            prop_assert!(p > n);
            prop_assert!(is_probable_prime(&p));
        }

        #[test]
        fn primality_agrees_with_trial_division(n in 2i64..10_000) {
            let trial = (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0);
            prop_assert_eq!(is_probable_prime(&Integer::new(n)), trial);
        }
    }
}
