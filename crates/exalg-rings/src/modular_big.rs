//! Residues modulo an arbitrary-precision modulus.
//!
//! A [`ModularBigRing`] owns the modulus and a memoized field flag
//! shared by every element it produces; the flag is computed at most
//! once per factory by a primality test of the modulus. Elements hold
//! their canonical non-negative residue in `[0, modulus)`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use exalg_integers::{is_probable_prime, Integer};
use num_traits::{One, Zero};
use rand::Rng;

use crate::error::RingError;
use crate::traits::{RingElement, RingFactory};

#[derive(Debug)]
struct RingInner {
    modulus: Integer,
    // Written at most once; racing recomputations publish the same
    // deterministic value.
    field: once_cell::sync::OnceCell<bool>,
}

/// The ring of integers modulo an arbitrary-precision modulus.
#[derive(Clone, Debug)]
pub struct ModularBigRing(Arc<RingInner>);

/// A residue in a [`ModularBigRing`].
#[derive(Clone)]
pub struct ModularBigInt {
    ring: ModularBigRing,
    value: Integer,
}

impl ModularBigRing {
    /// Creates the ring of integers modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NonPositiveModulus`] unless `modulus > 0`.
    pub fn new(modulus: Integer) -> Result<Self, RingError> {
        if modulus.signum() <= 0 {
            return Err(RingError::NonPositiveModulus);
        }
        Ok(Self(Arc::new(RingInner {
            modulus,
            field: once_cell::sync::OnceCell::new(),
        })))
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus(&self) -> &Integer {
        &self.0.modulus
    }

    /// Wraps `value` as an element, reducing it into `[0, modulus)`.
    #[must_use]
    pub fn element(&self, value: Integer) -> ModularBigInt {
        ModularBigInt {
            ring: self.clone(),
            value: self.reduce(value),
        }
    }

    fn reduce(&self, value: Integer) -> Integer {
        let r = value % &self.0.modulus;
        if r.is_negative() {
            r + &self.0.modulus
        } else {
            r
        }
    }
}

impl PartialEq for ModularBigRing {
    fn eq(&self, other: &Self) -> bool {
        self.0.modulus == other.0.modulus
    }
}

impl Eq for ModularBigRing {}

impl RingFactory for ModularBigRing {
    type Element = ModularBigInt;

    fn zero(&self) -> ModularBigInt {
        ModularBigInt {
            ring: self.clone(),
            value: Integer::zero(),
        }
    }

    fn one(&self) -> ModularBigInt {
        self.element(Integer::one())
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn from_integer(&self, n: &Integer) -> ModularBigInt {
        self.element(n.clone())
    }

    fn from_i64(&self, n: i64) -> ModularBigInt {
        self.element(Integer::new(n))
    }

    fn random<R: Rng + ?Sized>(&self, bit_length: u32, rng: &mut R) -> ModularBigInt {
        self.element(Integer::random_bits(bit_length, rng))
    }

    fn is_field(&self) -> bool {
        *self
            .0
            .field
            .get_or_init(|| is_probable_prime(&self.0.modulus))
    }

    fn characteristic(&self) -> Integer {
        self.0.modulus.clone()
    }
}

impl ModularBigInt {
    /// Returns the canonical residue, in `[0, modulus)`.
    #[must_use]
    pub fn value(&self) -> &Integer {
        &self.value
    }

    /// Returns the owning ring.
    #[must_use]
    pub fn ring(&self) -> &ModularBigRing {
        &self.ring
    }

    /// Returns true if this is the zero residue.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if this is the residue of one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.value.is_one() || self.ring.0.modulus.is_one()
    }

    fn assert_same_ring(&self, other: &Self) {
        assert!(
            self.ring == other.ring,
            "mixed moduli: {} vs {}",
            self.ring.0.modulus,
            other.ring.0.modulus
        );
    }
}

impl PartialEq for ModularBigInt {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.value == other.value
    }
}

impl Eq for ModularBigInt {}

impl Hash for ModularBigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ring.0.modulus.hash(state);
        self.value.hash(state);
    }
}

impl PartialOrd for ModularBigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModularBigInt {
    /// Elements order by `(modulus, value)`. Residues of different
    /// rings are never equal, and neither operand is privileged.
    fn cmp(&self, other: &Self) -> Ordering {
        self.ring
            .0
            .modulus
            .cmp(&other.ring.0.modulus)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl Add for ModularBigInt {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        let ring = self.ring;
        ring.element(self.value + rhs.value)
    }
}

impl Sub for ModularBigInt {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        let ring = self.ring;
        ring.element(self.value - rhs.value)
    }
}

impl Mul for ModularBigInt {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        let ring = self.ring;
        ring.element(self.value * rhs.value)
    }
}

impl Neg for ModularBigInt {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.value.is_zero() {
            return self;
        }
        let value = &self.ring.0.modulus - &self.value;
        Self {
            ring: self.ring,
            value,
        }
    }
}

impl RingElement for ModularBigInt {
    type Factory = ModularBigRing;

    fn factory(&self) -> ModularBigRing {
        self.ring.clone()
    }

    fn is_zero(&self) -> bool {
        ModularBigInt::is_zero(self)
    }

    fn is_one(&self) -> bool {
        ModularBigInt::is_one(self)
    }

    fn is_unit(&self) -> bool {
        if self.value.is_zero() {
            return false;
        }
        if self.ring.is_field() {
            return true;
        }
        self.value.gcd(&self.ring.0.modulus).is_one()
    }

    fn signum(&self) -> i8 {
        // Canonical residues are non-negative.
        if self.value.is_zero() {
            0
        } else {
            1
        }
    }

    fn abs(&self) -> Self {
        self.clone()
    }

    fn inverse(&self) -> Result<Self, RingError> {
        let (g, x, _) = self.value.extended_gcd(&self.ring.0.modulus);
        if !g.is_one() {
            return Err(RingError::NotInvertible {
                element: self.to_string(),
            });
        }
        Ok(self.ring.element(x))
    }

    fn divide(&self, other: &Self) -> Result<Self, RingError> {
        self.assert_same_ring(other);
        if other.value.is_zero() {
            return Err(RingError::DivisionByZero);
        }
        match other.inverse() {
            Ok(inv) => Ok(self.clone() * inv),
            Err(err) => {
                // A non-invertible divisor may still divide exactly.
                if (&self.value % &other.value).is_zero() {
                    Ok(self.ring.element(&self.value / &other.value))
                } else {
                    Err(err)
                }
            }
        }
    }

    fn remainder(&self, other: &Self) -> Result<Self, RingError> {
        self.assert_same_ring(other);
        if other.value.is_zero() {
            return Err(RingError::DivisionByZero);
        }
        // Euclidean remainder of the canonical residues; both operands
        // are already non-negative.
        Ok(self.ring.element(&self.value % &other.value))
    }

    fn gcd(&self, other: &Self) -> Self {
        self.assert_same_ring(other);
        self.ring.element(self.value.gcd(&other.value))
    }

    fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        self.assert_same_ring(other);
        // Unit shortcut: 1 = a^-1 * a + 0 * b.
        if let Ok(inv) = self.inverse() {
            return (self.ring.one(), inv, self.ring.zero());
        }
        if let Ok(inv) = other.inverse() {
            return (self.ring.one(), self.ring.zero(), inv);
        }
        // Extended Euclid on the two residues themselves, not on
        // value/modulus.
        let (g, x, y) = self.value.extended_gcd(&other.value);
        (
            self.ring.element(g),
            self.ring.element(x),
            self.ring.element(y),
        )
    }

    fn validate(&self) -> Result<(), RingError> {
        if self.value.is_negative() || self.value >= self.ring.0.modulus {
            return Err(RingError::InvariantViolation {
                detail: format!(
                    "residue {} is outside [0, {})",
                    self.value, self.ring.0.modulus
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ModularBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.value, self.ring.0.modulus)
    }
}

impl fmt::Display for ModularBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(m: i64) -> ModularBigRing {
        ModularBigRing::new(Integer::new(m)).unwrap()
    }

    #[test]
    fn test_construction_reduces() {
        let z7 = ring(7);
        assert_eq!(z7.from_i64(10).value().to_i64(), Some(3));
        assert_eq!(z7.from_i64(-3).value().to_i64(), Some(4));
        assert_eq!(z7.from_i64(0).value().to_i64(), Some(0));
        assert_eq!(
            ModularBigRing::new(Integer::new(0)),
            Err(RingError::NonPositiveModulus)
        );
        assert_eq!(
            ModularBigRing::new(Integer::new(-5)),
            Err(RingError::NonPositiveModulus)
        );
    }

    #[test]
    fn test_arithmetic() {
        let z7 = ring(7);
        let a = z7.from_i64(5);
        let b = z7.from_i64(4);

        assert_eq!((a.clone() + b.clone()).value().to_i64(), Some(2));
        assert_eq!((a.clone() - b.clone()).value().to_i64(), Some(1));
        assert_eq!((a.clone() * b).value().to_i64(), Some(6));
        assert_eq!((-a).value().to_i64(), Some(2));
        assert_eq!((-z7.zero()).value().to_i64(), Some(0));
    }

    #[test]
    fn test_inverse() {
        let z7 = ring(7);
        // 3 * 5 = 15 = 1 (mod 7)
        assert_eq!(z7.from_i64(3).inverse().unwrap(), z7.from_i64(5));
        assert!(matches!(
            z7.zero().inverse(),
            Err(RingError::NotInvertible { .. })
        ));

        let z12 = ring(12);
        assert!(matches!(
            z12.from_i64(4).inverse(),
            Err(RingError::NotInvertible { .. })
        ));
        assert_eq!(z12.from_i64(5).inverse().unwrap(), z12.from_i64(5));
    }

    #[test]
    fn test_divide_exact_fallback() {
        let z12 = ring(12);
        // 4 is not invertible mod 12, but 8/4 divides exactly.
        assert_eq!(
            z12.from_i64(8).divide(&z12.from_i64(4)).unwrap(),
            z12.from_i64(2)
        );
        assert!(matches!(
            z12.from_i64(7).divide(&z12.from_i64(4)),
            Err(RingError::NotInvertible { .. })
        ));
        assert_eq!(
            z12.from_i64(8).divide(&z12.zero()),
            Err(RingError::DivisionByZero)
        );
    }

    #[test]
    fn test_is_unit_and_field() {
        let z7 = ring(7);
        assert!(z7.is_field());
        assert!(z7.from_i64(6).is_unit());
        assert!(!z7.zero().is_unit());

        let z12 = ring(12);
        assert!(!z12.is_field());
        assert!(z12.from_i64(5).is_unit());
        assert!(!z12.from_i64(4).is_unit());
        assert_eq!(z12.characteristic().to_i64(), Some(12));
        assert!(z12.is_finite());
    }

    #[test]
    fn test_extended_gcd_identity() {
        let z12 = ring(12);
        for (a, b) in [(4, 6), (8, 4), (5, 7), (0, 9), (0, 0)] {
            let a = z12.from_i64(a);
            let b = z12.from_i64(b);
            let (g, x, y) = a.extended_gcd(&b);
            assert_eq!(x * a.clone() + y * b.clone(), g, "egcd({a:?}, {b:?})");
        }
    }

    #[test]
    fn test_cross_ring_comparison_is_symmetric() {
        // Residues of different rings order by (modulus, value) and
        // never compare equal; both orientations agree.
        let a = ring(7).from_i64(3);
        let b = ring(11).from_i64(3);
        assert_ne!(a, b);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    #[should_panic(expected = "mixed moduli")]
    fn test_mixed_modulus_arithmetic_panics() {
        let _ = ring(7).from_i64(3) + ring(11).from_i64(3);
    }

    #[test]
    fn test_large_modulus() {
        let p = Integer::from_str_radix("170141183460469231731687303715884105727", 10).unwrap();
        let ring = ModularBigRing::new(p).unwrap();
        assert!(ring.is_field());
        let a = ring.from_i64(123_456_789);
        let inv = a.inverse().unwrap();
        assert!((a * inv).is_one());
    }

    #[test]
    fn test_validate() {
        let z7 = ring(7);
        assert!(z7.from_i64(100).validate().is_ok());
        let broken = ModularBigInt {
            ring: z7,
            value: Integer::new(9),
        };
        assert!(matches!(
            broken.validate(),
            Err(RingError::InvariantViolation { .. })
        ));
    }
}
