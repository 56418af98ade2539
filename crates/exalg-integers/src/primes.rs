//! A lazily extended, process-wide stream of probable primes.
//!
//! The stream is seeded with a fixed table of known primes found by
//! subtracting small offsets from powers of two, and grows on demand by
//! searching for the next probable prime after the current tail. The
//! cache is append-only and shared by every consumer; each call to
//! [`PrimeStream::iter`] yields an independent cursor from index 0.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::primality::next_probable_prime;
use crate::Integer;

/// Known primes of the form `2^power - offset`, in increasing order.
const SEED_PRIMES: [(u32, i64); 30] = [
    (28, 273),
    (28, 213),
    (28, 183),
    (28, 165),
    (28, 143),
    (28, 125),
    (28, 119),
    (28, 95),
    (28, 89),
    (28, 57),
    (29, 133),
    (29, 121),
    (29, 99),
    (29, 93),
    (29, 75),
    (29, 73),
    (29, 63),
    (29, 43),
    (29, 33),
    (29, 3),
    (32, 267),
    (32, 209),
    (32, 185),
    (32, 153),
    (32, 135),
    (32, 107),
    (32, 99),
    (32, 65),
    (32, 17),
    (32, 5),
];

static CACHE: Lazy<RwLock<Vec<Integer>>> = Lazy::new(|| {
    RwLock::new(
        SEED_PRIMES
            .iter()
            .map(|&(power, offset)| Integer::new((1i64 << power) - offset))
            .collect(),
    )
});

/// The process-wide stream of increasing probable primes.
///
/// All methods operate on a single shared cache; entries are published
/// once and never change, so concurrent extension is safe.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimeStream;

impl PrimeStream {
    /// Returns the `i`-th probable prime (0-based), extending the cache
    /// as needed.
    #[must_use]
    pub fn get(i: usize) -> Integer {
        {
            let cache = CACHE.read();
            if let Some(p) = cache.get(i) {
                return p.clone();
            }
        }
        let mut cache = CACHE.write();
        while cache.len() <= i {
            let next = next_probable_prime(cache.last().expect("cache is seeded non-empty"));
            cache.push(next);
        }
        cache[i].clone()
    }

    /// Number of primes currently cached. Monotonically increasing.
    #[must_use]
    pub fn cached_len() -> usize {
        CACHE.read().len()
    }

    /// Returns a fresh cursor over the logically infinite sequence,
    /// starting at index 0.
    #[must_use]
    pub fn iter() -> Primes {
        Primes { index: 0 }
    }
}

/// An independent cursor over the prime stream.
#[derive(Clone, Debug)]
pub struct Primes {
    index: usize,
}

impl Iterator for Primes {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        let p = PrimeStream::get(self.index);
        self.index += 1;
        Some(p)
    }
}
