//! Residues modulo a bounded machine-word modulus.
//!
//! Same algebraic contract as [`crate::modular_big`], but the modulus
//! is capped at `2^31 - 1` so that the product of two reduced residues
//! always fits in an `i64`. Steady-state arithmetic, including the
//! extended-Euclidean loop, never touches arbitrary precision; the big
//! integer primitive is bridged only at the `random` boundary.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use exalg_integers::{is_probable_prime, Integer};
use rand::Rng;

use crate::error::RingError;
use crate::traits::{RingElement, RingFactory};

/// Largest accepted modulus: `2^31 - 1`. For any `m` up to this bound,
/// `(m - 1)^2 < 2^62`, so residue products cannot overflow an `i64`.
pub const MAX_WORD_MODULUS: i64 = (1 << 31) - 1;

#[derive(Debug)]
struct RingInner {
    modulus: i64,
    field: once_cell::sync::OnceCell<bool>,
}

/// The ring of integers modulo a word-sized modulus.
#[derive(Clone, Debug)]
pub struct ModularWordRing(Arc<RingInner>);

/// A residue in a [`ModularWordRing`].
#[derive(Clone)]
pub struct ModularWord {
    ring: ModularWordRing,
    value: i64,
}

impl ModularWordRing {
    /// Creates the ring of integers modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NonPositiveModulus`] for `modulus <= 0` and
    /// [`RingError::ModulusTooLarge`] above [`MAX_WORD_MODULUS`].
    pub fn new(modulus: i64) -> Result<Self, RingError> {
        if modulus <= 0 {
            return Err(RingError::NonPositiveModulus);
        }
        if modulus > MAX_WORD_MODULUS {
            return Err(RingError::ModulusTooLarge { modulus });
        }
        Ok(Self(Arc::new(RingInner {
            modulus,
            field: once_cell::sync::OnceCell::new(),
        })))
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus(&self) -> i64 {
        self.0.modulus
    }

    /// Wraps `value` as an element, reducing it into `[0, modulus)`.
    #[must_use]
    pub fn element(&self, value: i64) -> ModularWord {
        ModularWord {
            ring: self.clone(),
            value: self.reduce(value),
        }
    }

    fn reduce(&self, value: i64) -> i64 {
        let r = value % self.0.modulus;
        if r < 0 {
            r + self.0.modulus
        } else {
            r
        }
    }
}

impl PartialEq for ModularWordRing {
    fn eq(&self, other: &Self) -> bool {
        self.0.modulus == other.0.modulus
    }
}

impl Eq for ModularWordRing {}

impl RingFactory for ModularWordRing {
    type Element = ModularWord;

    fn zero(&self) -> ModularWord {
        ModularWord {
            ring: self.clone(),
            value: 0,
        }
    }

    fn one(&self) -> ModularWord {
        self.element(1)
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn from_integer(&self, n: &Integer) -> ModularWord {
        let r = (n.clone() % Integer::new(self.0.modulus))
            .to_i64()
            .expect("remainder by a word modulus fits in i64");
        self.element(r)
    }

    fn from_i64(&self, n: i64) -> ModularWord {
        self.element(n)
    }

    fn random<R: Rng + ?Sized>(&self, bit_length: u32, rng: &mut R) -> ModularWord {
        // Arbitrary precision only at this boundary, never in
        // steady-state arithmetic.
        self.from_integer(&Integer::random_bits(bit_length, rng))
    }

    fn is_field(&self) -> bool {
        *self
            .0
            .field
            .get_or_init(|| is_probable_prime(&Integer::new(self.0.modulus)))
    }

    fn characteristic(&self) -> Integer {
        Integer::new(self.0.modulus)
    }
}

impl ModularWord {
    /// Returns the canonical residue, in `[0, modulus)`.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns the owning ring.
    #[must_use]
    pub fn ring(&self) -> &ModularWordRing {
        &self.ring
    }

    /// Returns true if this is the zero residue.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Returns true if this is the residue of one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.value == 1 || self.ring.0.modulus == 1
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

// Word-sized extended Euclid. For inputs in [0, 2^31) every
// intermediate product q*s, q*t is bounded by the larger input, so the
// loop stays inside i64.
fn word_extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i64, 0i64);
    let (mut old_t, mut t) = (0i64, 1i64);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }

    (old_r, old_s, old_t)
}

impl PartialEq for ModularWord {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.value == other.value
    }
}

impl Eq for ModularWord {}

impl Hash for ModularWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ring.0.modulus.hash(state);
        self.value.hash(state);
    }
}

impl PartialOrd for ModularWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModularWord {
    /// Elements order by `(modulus, value)`, matching the big ring.
    fn cmp(&self, other: &Self) -> Ordering {
        self.ring
            .0
            .modulus
            .cmp(&other.ring.0.modulus)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl Add for ModularWord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        // Sum of two reduced residues is below 2^32: no overflow.
        let ring = self.ring;
        ring.element(self.value + rhs.value)
    }
}

impl Sub for ModularWord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        let ring = self.ring;
        ring.element(self.value - rhs.value)
    }
}

impl Mul for ModularWord {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.assert_same_ring(&rhs);
        // The construction bound guarantees this product fits in i64.
        let ring = self.ring;
        ring.element(self.value * rhs.value)
    }
}

impl Neg for ModularWord {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.value == 0 {
            return self;
        }
        let value = self.ring.0.modulus - self.value;
        Self {
            ring: self.ring,
            value,
        }
    }
}

impl RingElement for ModularWord {
    type Factory = ModularWordRing;

    fn factory(&self) -> ModularWordRing {
        self.ring.clone()
    }

    fn is_zero(&self) -> bool {
        ModularWord::is_zero(self)
    }

    fn is_one(&self) -> bool {
        ModularWord::is_one(self)
    }

    fn is_unit(&self) -> bool {
        if self.value == 0 {
            return false;
        }
        if self.ring.is_field() {
            return true;
        }
        word_extended_gcd(self.value, self.ring.0.modulus).0 == 1
    }

    fn signum(&self) -> i8 {
        if self.value == 0 {
            0
        } else {
            1
        }
    }

    fn abs(&self) -> Self {
        self.clone()
    }

    fn inverse(&self) -> Result<Self, RingError> {
        let (g, x, _) = word_extended_gcd(self.value, self.ring.0.modulus);
        if g != 1 {
            return Err(RingError::NotInvertible {
                element: self.to_string(),
            });
        }
        Ok(self.ring.element(normalize(x, self.ring.0.modulus)))
    }

    fn divide(&self, other: &Self) -> Result<Self, RingError> {
        self.assert_same_ring(other);
        if other.value == 0 {
            return Err(RingError::DivisionByZero);
        }
        match other.inverse() {
            Ok(inv) => Ok(self.clone() * inv),
            Err(err) => {
                if self.value % other.value == 0 {
                    Ok(self.ring.element(self.value / other.value))
                } else {
                    Err(err)
                }
            }
        }
    }

    fn remainder(&self, other: &Self) -> Result<Self, RingError> {
        self.assert_same_ring(other);
        if other.value == 0 {
            return Err(RingError::DivisionByZero);
        }
        Ok(self.ring.element(self.value % other.value))
    }

    fn gcd(&self, other: &Self) -> Self {
        self.assert_same_ring(other);
        self.ring.element(word_extended_gcd(self.value, other.value).0)
    }

    fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        self.assert_same_ring(other);
        if let Ok(inv) = self.inverse() {
            return (self.ring.one(), inv, self.ring.zero());
        }
        if let Ok(inv) = other.inverse() {
            return (self.ring.one(), self.ring.zero(), inv);
        }
        let m = self.ring.0.modulus;
        let (g, x, y) = word_extended_gcd(self.value, other.value);
        (
            self.ring.element(g),
            self.ring.element(normalize(x, m)),
            self.ring.element(normalize(y, m)),
        )
    }

    fn validate(&self) -> Result<(), RingError> {
        if self.value < 0 || self.value >= self.ring.0.modulus {
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

// Bezout coefficients come out of the Euclidean loop possibly
// negative; lift them into [0, m) before wrapping.
fn normalize(x: i64, m: i64) -> i64 {
    let r = x % m;
    if r < 0 {
        r + m
    } else {
        r
    }
}

impl fmt::Debug for ModularWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.value, self.ring.0.modulus)
    }
}

impl fmt::Display for ModularWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
