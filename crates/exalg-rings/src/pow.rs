//! Generic square-and-multiply exponentiation.
//!
//! These algorithms are written purely against the
//! [`RingElement`]/[`RingFactory`] capability pair, so one
//! implementation serves rationals and both modular representations.
//! All run in `O(log |exponent|)` multiplications.

use crate::error::RingError;
use crate::traits::{RingElement, RingFactory};

/// Computes `base^exponent`.
///
/// `exponent == 0` yields `factory.one()`; a negative exponent inverts
/// the base first and proceeds with its absolute value.
///
/// # Errors
///
/// Returns [`RingError::NotInvertible`] if the exponent is negative and
/// the base has no inverse.
pub fn power<F: RingFactory>(
    factory: &F,
    base: &F::Element,
    exponent: i64,
) -> Result<F::Element, RingError> {
    if exponent == 0 {
        return Ok(factory.one());
    }
    let base = if exponent < 0 {
        base.inverse()?
    } else {
        base.clone()
    };
    let mut exp = exponent.unsigned_abs();
    let mut result = factory.one();
    let mut sq = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * sq.clone();
        }
        sq = sq.clone() * sq;
        exp >>= 1;
    }
    Ok(result)
}

/// Computes `base^exponent` for strictly positive exponents, without
/// consulting a factory (no identity element is needed).
///
/// Zero and one bases short-circuit to themselves.
///
/// # Errors
///
/// Returns [`RingError::NonPositiveExponent`] if `exponent <= 0`; a
/// zero exponent is never silently reinterpreted as the identity.
pub fn positive_power<E: RingElement>(base: &E, exponent: i64) -> Result<E, RingError> {
    if exponent <= 0 {
        return Err(RingError::NonPositiveExponent { exponent });
    }
    if base.is_zero() || base.is_one() {
        return Ok(base.clone());
    }
    let exp = exponent.unsigned_abs();
    // Most-significant-bit-first accumulation seeded with the base
    // itself, so no identity element is required.
    let mut result = base.clone();
    let below_msb = 63 - exp.leading_zeros();
    for i in (0..below_msb).rev() {
        result = result.clone() * result;
        if (exp >> i) & 1 == 1 {
            result = result * base.clone();
        }
    }
    Ok(result)
}

/// Computes `base^exponent mod modulus`, reducing every partial product
/// immediately by `remainder(modulus)`.
///
/// A negative exponent inverts the base, reduces it, and proceeds with
/// the absolute value. `exponent == 0` returns `factory.one()` with no
/// reduction applied, matching the convention `a^0 = 1`.
///
/// # Errors
///
/// Returns [`RingError::DivisionByZero`] for a zero modulus, and
/// [`RingError::NotInvertible`] for a negative exponent on a
/// non-invertible base.
pub fn mod_power<F: RingFactory>(
    factory: &F,
    base: &F::Element,
    exponent: i64,
    modulus: &F::Element,
) -> Result<F::Element, RingError> {
    if exponent == 0 {
        return Ok(factory.one());
    }
    let base = if exponent < 0 {
        base.inverse()?.remainder(modulus)?
    } else {
        base.remainder(modulus)?
    };
    let mut exp = exponent.unsigned_abs();
    let mut result = factory.one();
    let mut sq = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * sq.clone()).remainder(modulus)?;
        }
        sq = (sq.clone() * sq).remainder(modulus)?;
        exp >>= 1;
    }
    Ok(result)
}

/// Folds a sequence of elements into their product, starting from
/// `factory.one()`. An empty sequence yields one.
pub fn product_of<F, I>(factory: &F, elements: I) -> F::Element
where
    F: RingFactory,
    I: IntoIterator<Item = F::Element>,
{
    elements
        .into_iter()
        .fold(factory.one(), |acc, e| acc * e)
}
