//! Errors raised by ring operations.

use thiserror::Error;

/// Errors that can occur during ring construction and arithmetic.
///
/// All failures are synchronous and local to the operation that raised
/// them; the core never retries and never returns partial results.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RingError {
    /// Malformed numeric input, including an explicit zero denominator.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The rejected input string.
        input: String,
        /// What made it unparseable.
        reason: String,
    },

    /// `divide` or `remainder` with the additive identity as divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `inverse` on an element with no multiplicative inverse.
    #[error("element {element} is not invertible")]
    NotInvertible {
        /// Display form of the offending element.
        element: String,
    },

    /// A bounded-word ring constructed with a modulus above 2^31 - 1.
    #[error("modulus {modulus} exceeds the word-ring bound 2^31 - 1")]
    ModulusTooLarge {
        /// The rejected modulus.
        modulus: i64,
    },

    /// A modular ring constructed with a non-positive modulus.
    #[error("modulus must be positive")]
    NonPositiveModulus,

    /// `positive_power` called with a non-positive exponent.
    #[error("exponent {exponent} must be strictly positive")]
    NonPositiveExponent {
        /// The rejected exponent.
        exponent: i64,
    },

    /// A `validate` self-check found a broken representation invariant.
    #[error("invariant violated: {detail}")]
    InvariantViolation {
        /// Which invariant failed.
        detail: String,
    },
}
