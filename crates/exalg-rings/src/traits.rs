//! Algebraic capability traits.
//!
//! This module defines the element/factory pair at the heart of the
//! crate. A [`RingElement`] is an immutable value supporting the ring
//! operations; its [`RingFactory`] knows how to produce identities and
//! construct elements from integers or randomness. Two of the three
//! concrete rings carry runtime state (the modulus), which is why
//! identities come from a factory value rather than associated
//! functions.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use exalg_integers::Integer;
use rand::Rng;

use crate::error::RingError;

/// An element of a commutative ring.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `factory().zero()`
/// - Multiplication is associative and commutative with identity `factory().one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
/// - `cmp` is a total order consistent with `Eq` and `Hash`
pub trait RingElement:
    Clone
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Sized
{
    /// The factory that produced this element.
    type Factory: RingFactory<Element = Self>;

    /// Returns the owning factory.
    fn factory(&self) -> Self::Factory;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Returns true if this element has a multiplicative inverse.
    fn is_unit(&self) -> bool;

    /// Returns the sign: -1, 0, or 1.
    fn signum(&self) -> i8;

    /// Returns the absolute value.
    fn abs(&self) -> Self;

    /// Computes the multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotInvertible`] if the element is zero or a
    /// non-unit.
    fn inverse(&self) -> Result<Self, RingError>;

    /// Divides by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DivisionByZero`] for a zero divisor, and
    /// [`RingError::NotInvertible`] where no quotient exists.
    fn divide(&self, other: &Self) -> Result<Self, RingError>;

    /// Computes the Euclidean remainder by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DivisionByZero`] for a zero divisor.
    fn remainder(&self, other: &Self) -> Result<Self, RingError>;

    /// Computes a greatest common divisor of the two elements.
    fn gcd(&self, other: &Self) -> Self;

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, x, y)` such that `g = x*self + y*other`.
    fn extended_gcd(&self, other: &Self) -> (Self, Self, Self);

    /// Checks the representation invariants of this value.
    ///
    /// External test harnesses call this after generating candidate
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvariantViolation`] naming the broken
    /// invariant.
    fn validate(&self) -> Result<(), RingError>;
}

/// A factory for the elements of one concrete ring.
pub trait RingFactory: Clone + Debug {
    /// The element type this factory produces.
    type Element: RingElement<Factory = Self>;

    /// The additive identity.
    fn zero(&self) -> Self::Element;

    /// The multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Returns true if the ring has finitely many elements.
    fn is_finite(&self) -> bool;

    /// Constructs an element from an arbitrary-precision integer.
    fn from_integer(&self, n: &Integer) -> Self::Element;

    /// Constructs an element from a machine integer.
    fn from_i64(&self, n: i64) -> Self::Element;

    /// Draws a random element from at most `bit_length` random bits.
    fn random<R: Rng + ?Sized>(&self, bit_length: u32, rng: &mut R) -> Self::Element;

    /// Returns true if the ring is a field.
    fn is_field(&self) -> bool;

    /// The characteristic of the ring (zero for infinite rings of
    /// characteristic zero).
    fn characteristic(&self) -> Integer;
}
