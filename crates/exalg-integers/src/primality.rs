//! Probabilistic primality testing.
//!
//! A Miller-Rabin probable-prime test over [`Integer`]. The witness
//! schedule is deterministic in the tested value, so the test is a pure
//! function: racing callers that memoize its result always publish the
//! same answer.

use num_traits::{One, Zero};

use crate::Integer;

/// Small primes used for the trial-division screen.
const SMALL_PRIMES: [i64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Miller-Rabin witnesses proving primality for every input below 2^64.
const DETERMINISTIC_WITNESSES: [i64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Extra witnesses drawn per input above 64 bits.
const EXTRA_WITNESS_ROUNDS: usize = 16;

/// Tests whether `n` is a probable prime.
///
/// Inputs below 2^64 are decided exactly (the deterministic witness set
/// covers that range); larger inputs additionally run extra rounds with
/// witnesses derived from the input itself.
#[must_use]
pub fn is_probable_prime(n: &Integer) -> bool {
    let two = Integer::new(2);
    if n < &two {
        return false;
    }
    for p in SMALL_PRIMES {
        let p = Integer::new(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n - 1 = 2^r * d with d odd.
    let n_minus_one = n - &Integer::one();
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d = d / &two;
        r += 1;
    }

    for a in DETERMINISTIC_WITNESSES {
        if !witness_passes(&Integer::new(a), &d, r, n, &n_minus_one) {
            return false;
        }
    }

    if n.bit_len() > 64 {
        let mut state = seed_from(n);
        let span = n - &Integer::new(3);
        for _ in 0..EXTRA_WITNESS_ROUNDS {
            state = splitmix64(state);
            let a = Integer::new(2) + Integer::from(state) % &span;
            if !witness_passes(&a, &d, r, n, &n_minus_one) {
                return false;
            }
        }
    }

    true
}

/// Returns the smallest probable prime strictly greater than `n`.
#[must_use]
pub fn next_probable_prime(n: &Integer) -> Integer {
    let two = Integer::new(2);
    if n < &two {
        return two;
    }
    let mut candidate = n + &Integer::one();
    if candidate.is_even() {
        candidate = candidate + Integer::one();
    }
    while !is_probable_prime(&candidate) {
        candidate = candidate + &two;
    }
    candidate
}

/// One Miller-Rabin round: true if `a` does not witness compositeness.
fn witness_passes(a: &Integer, d: &Integer, r: u32, n: &Integer, n_minus_one: &Integer) -> bool {
    let a = a % n;
    if a.is_zero() {
        return true;
    }
    let mut x = a.modpow(d, n);
    if x.is_one() || &x == n_minus_one {
        return true;
    }
    for _ in 1..r {
        x = x.modpow(&Integer::new(2), n);
        if &x == n_minus_one {
            return true;
        }
    }
    false
}

fn seed_from(n: &Integer) -> u64 {
    // Low 63 bits of n, which always fit in an i64.
    let low = n % &Integer::new(i64::MAX);
    low.to_i64().unwrap_or(1) as u64 | 1
}

fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_cases() {
        assert!(!is_probable_prime(&Integer::new(0)));
        assert!(!is_probable_prime(&Integer::new(1)));
        assert!(is_probable_prime(&Integer::new(2)));
        assert!(is_probable_prime(&Integer::new(3)));
        assert!(!is_probable_prime(&Integer::new(4)));
        assert!(is_probable_prime(&Integer::new(97)));
        assert!(!is_probable_prime(&Integer::new(99)));
    }

    #[test]
    fn test_known_primes() {
        // Primes just below powers of two, as used by the prime stream.
        for p in [268_435_399i64, 536_870_909, 4_294_967_291] {
            assert!(is_probable_prime(&Integer::new(p)));
        }
        assert!(is_probable_prime(&Integer::new((1 << 31) - 1)));
        assert!(!is_probable_prime(&Integer::new(1 << 31)));
    }

    #[test]
    fn test_carmichael_numbers() {
        // Fermat pseudoprimes to many bases; Miller-Rabin rejects them.
        for c in [561i64, 1105, 1729, 41041, 825_265] {
            assert!(!is_probable_prime(&Integer::new(c)));
        }
    }

    #[test]
    fn test_large_prime() {
        // 2^127 - 1 is a Mersenne prime.
        let m127 = Integer::new(2).pow(127) - Integer::one();
        assert!(is_probable_prime(&m127));
        assert!(!is_probable_prime(&(m127 + Integer::new(2))));
    }

    #[test]
    fn test_next_probable_prime() {
        assert_eq!(next_probable_prime(&Integer::new(-5)).to_i64(), Some(2));
        assert_eq!(next_probable_prime(&Integer::new(2)).to_i64(), Some(3));
        assert_eq!(next_probable_prime(&Integer::new(10)).to_i64(), Some(11));
        assert_eq!(next_probable_prime(&Integer::new(11)).to_i64(), Some(13));
        assert_eq!(
            next_probable_prime(&Integer::new(4_294_967_291)).to_i64(),
            Some(4_294_967_311)
        );
    }
}
