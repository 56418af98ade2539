//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::Integer` with
//! the operations needed for exact rational and modular arithmetic.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig` and provides the operations
/// needed for rational reduction, modular arithmetic, and primality
/// testing.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates an integer from a string in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if this integer is even.
    #[must_use]
    pub fn is_even(&self) -> bool {
        !self.0.bit(0)
    }

    /// Returns the number of bits needed to represent this integer.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Computes the greatest common divisor.
    ///
    /// The result is always non-negative; `gcd(0, 0)` is zero.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, x, y)` such that `g = self*x + other*y` and
    /// `g = gcd(self, other)` up to sign (`g` carries the sign the
    /// Euclidean loop leaves on it; for non-negative inputs it is
    /// non-negative).
    #[must_use]
    pub fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let mut old_r = self.clone();
        let mut r = other.clone();
        let mut old_s = Self::one();
        let mut s = Self::zero();
        let mut old_t = Self::zero();
        let mut t = Self::one();

        while !r.is_zero() {
            let q = &old_r / &r;
            let rem = &old_r % &r;
            old_r = r;
            r = rem;

            let new_s = old_s - &q * &s;
            old_s = s;
            s = new_s;

            let new_t = old_t - &q * &t;
            old_t = t;
            t = new_t;
        }

        (old_r, old_s, old_t)
    }

    /// Computes `self^exp mod modulus` by square-and-multiply.
    ///
    /// The result is the canonical non-negative residue. `exp` must be
    /// non-negative and `modulus` positive.
    #[must_use]
    pub fn modpow(&self, exp: &Self, modulus: &Self) -> Self {
        debug_assert!(!exp.is_negative(), "modpow exponent must be non-negative");
        debug_assert!(modulus.signum() > 0, "modpow modulus must be positive");

        let m = &modulus.0;
        let mut base = &self.0 % m;
        if DashuSigned::is_negative(&base) {
            base = base + m;
        }
        let mut result = IBig::ONE;
        for i in (0..exp.0.bit_len()).rev() {
            result = &result * &result % m;
            if exp.0.bit(i) {
                result = result * &base % m;
            }
        }
        Self(result)
    }

    /// Draws a uniformly random non-negative integer with at most
    /// `bits` bits.
    #[must_use]
    pub fn random_bits<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> Self {
        let mut value = IBig::ZERO;
        let mut remaining = bits;
        while remaining > 0 {
            let take = remaining.min(32);
            let chunk = u64::from(rng.gen::<u32>()) & ((1u64 << take) - 1);
            value = value * IBig::from(1u64 << take) + IBig::from(chunk);
            remaining -= take;
        }
        Self(value)
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Arithmetic operations
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: &Integer) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: &Integer) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: &Integer) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

impl Div for Integer {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Integer> for Integer {
    type Output = Self;

    fn div(self, rhs: &Integer) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &Integer {
    type Output = Integer;

    fn div(self, rhs: Self) -> Self::Output {
        Integer(&self.0 / &rhs.0)
    }
}

impl Rem for Integer {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Rem<&Integer> for Integer {
    type Output = Self;

    fn rem(self, rhs: &Integer) -> Self::Output {
        Self(self.0 % &rhs.0)
    }
}

impl Rem for &Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        Integer(&self.0 % &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(value as i64)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}
