//! The field of rational numbers.
//!
//! [`ExactRational`] stores an explicit numerator/denominator pair in
//! canonical form: the denominator is positive, numerator and
//! denominator are coprime, and zero is always `0/1`. Arithmetic uses
//! partial gcds of the operands so intermediate products stay as small
//! as the result allows.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use exalg_integers::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::error::RingError;
use crate::traits::{RingElement, RingFactory};

/// An arbitrary precision rational number in lowest terms.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ExactRational {
    num: Integer,
    den: Integer,
}

/// The field of rational numbers, acting as the factory for
/// [`ExactRational`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RationalField;

impl ExactRational {
    /// Creates the canonical reduced fraction `num/den`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DivisionByZero`] if `den` is zero.
    pub fn new(num: Integer, den: Integer) -> Result<Self, RingError> {
        if den.is_zero() {
            return Err(RingError::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::DivisionByZero`] if `den` is zero.
    pub fn from_i64(num: i64, den: i64) -> Result<Self, RingError> {
        Self::new(Integer::new(num), Integer::new(den))
    }

    /// Creates a rational from an integer (denominator 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self {
            num: n,
            den: Integer::one(),
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &Integer {
        &self.num
    }

    /// Returns the denominator. Always positive.
    #[must_use]
    pub fn denominator(&self) -> &Integer {
        &self.den
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// Returns true if this is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Returns true if this is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    // Canonical reduction: divide out the gcd, keep the denominator
    // positive, and pin zero to 0/1.
    fn reduced(num: Integer, den: Integer) -> Self {
        debug_assert!(!den.is_zero(), "denominator cannot be zero");
        if num.is_zero() {
            return Self {
                num,
                den: Integer::one(),
            };
        }
        let g = num.gcd(&den);
        let mut num = num / &g;
        let mut den = den / &g;
        if den.signum() < 0 {
            num = -num;
            den = -den;
        }
        Self { num, den }
    }

    // Reciprocal of a value known to be nonzero.
    fn recip(&self) -> Self {
        debug_assert!(!self.is_zero(), "reciprocal of zero");
        if self.num.signum() < 0 {
            Self {
                num: -&self.den,
                den: -&self.num,
            }
        } else {
            Self {
                num: self.den.clone(),
                den: self.num.clone(),
            }
        }
    }
}

impl Add for ExactRational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        // Integer fast paths: no reduction needed, the result is
        // already canonical.
        if self.den.is_one() && rhs.den.is_one() {
            return Self {
                num: self.num + rhs.num,
                den: self.den,
            };
        }
        if self.den.is_one() {
            return Self {
                num: self.num * &rhs.den + rhs.num,
                den: rhs.den,
            };
        }
        if rhs.den.is_one() {
            return Self {
                num: rhs.num * &self.den + self.num,
                den: self.den,
            };
        }
        let d1 = self.den.gcd(&rhs.den);
        if d1.is_one() {
            // Coprime denominators: the textbook sum is reduced.
            return Self {
                num: &self.num * &rhs.den + &rhs.num * &self.den,
                den: self.den * rhs.den,
            };
        }
        // Knuth 4.5.1: a second gcd pass on the unreduced sum numerator
        // against d1 finishes the reduction without ever forming the
        // full denominator product.
        let t = &self.num * &(&rhs.den / &d1) + &rhs.num * &(&self.den / &d1);
        if t.is_zero() {
            return RationalField.zero();
        }
        let d2 = t.gcd(&d1);
        Self {
            num: t / &d2,
            den: (&self.den / &d1) * &(rhs.den / d2),
        }
    }
}

impl Sub for ExactRational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul for ExactRational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return RationalField.zero();
        }
        if self.den.is_one() && rhs.den.is_one() {
            return Self {
                num: self.num * rhs.num,
                den: self.den,
            };
        }
        if self.den.is_one() {
            let g = self.num.gcd(&rhs.den);
            return Self {
                num: (self.num / &g) * rhs.num,
                den: rhs.den / g,
            };
        }
        if rhs.den.is_one() {
            let g = rhs.num.gcd(&self.den);
            return Self {
                num: (rhs.num / &g) * self.num,
                den: self.den / g,
            };
        }
        // Cross-cancel before multiplying so the intermediate products
        // are the reduced result's own factors.
        let g1 = self.num.gcd(&rhs.den);
        let g2 = rhs.num.gcd(&self.den);
        Self {
            num: (self.num / &g1) * &(rhs.num / &g2),
            den: (self.den / g2) * &(rhs.den / g1),
        }
    }
}

impl Neg for ExactRational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Zero for ExactRational {
    fn zero() -> Self {
        RationalField.zero()
    }

    fn is_zero(&self) -> bool {
        ExactRational::is_zero(self)
    }
}

impl One for ExactRational {
    fn one() -> Self {
        RationalField.one()
    }

    fn is_one(&self) -> bool {
        ExactRational::is_one(self)
    }
}

impl PartialOrd for ExactRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactRational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Sign comparison settles everything except two values of the
        // same nonzero sign, which fall through to cross-multiplication
        // (exact, since the products are arbitrary precision).
        let s = self.num.signum();
        let o = other.num.signum();
        if s != o {
            return s.cmp(&o);
        }
        if s == 0 {
            return Ordering::Equal;
        }
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl RingElement for ExactRational {
    type Factory = RationalField;

    fn factory(&self) -> RationalField {
        RationalField
    }

    fn is_zero(&self) -> bool {
        ExactRational::is_zero(self)
    }

    fn is_one(&self) -> bool {
        ExactRational::is_one(self)
    }

    fn is_unit(&self) -> bool {
        !ExactRational::is_zero(self)
    }

    fn signum(&self) -> i8 {
        self.num.signum()
    }

    fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    fn inverse(&self) -> Result<Self, RingError> {
        if ExactRational::is_zero(self) {
            return Err(RingError::NotInvertible {
                element: self.to_string(),
            });
        }
        Ok(self.recip())
    }

    fn divide(&self, other: &Self) -> Result<Self, RingError> {
        if ExactRational::is_zero(other) {
            return Err(RingError::DivisionByZero);
        }
        Ok(self.clone() * other.recip())
    }

    fn remainder(&self, other: &Self) -> Result<Self, RingError> {
        // Rationals form a field: division is exact, the remainder is
        // always zero for a nonzero divisor.
        if ExactRational::is_zero(other) {
            return Err(RingError::DivisionByZero);
        }
        Ok(RationalField.zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if ExactRational::is_zero(self) {
            return other.clone();
        }
        if ExactRational::is_zero(other) {
            return self.clone();
        }
        RationalField.one()
    }

    fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let field = RationalField;
        if ExactRational::is_zero(self) && ExactRational::is_zero(other) {
            return (field.zero(), field.zero(), field.zero());
        }
        if ExactRational::is_zero(other) {
            return (field.one(), self.recip(), field.zero());
        }
        if ExactRational::is_zero(self) {
            return (field.one(), field.zero(), other.recip());
        }
        // Any two nonzero field elements generate the whole field;
        // splitting 1 evenly between them yields one valid witness pair.
        let half = Self {
            num: Integer::one(),
            den: Integer::new(2),
        };
        (
            field.one(),
            self.recip() * half.clone(),
            other.recip() * half,
        )
    }

    fn validate(&self) -> Result<(), RingError> {
        if self.den.signum() <= 0 {
            return Err(RingError::InvariantViolation {
                detail: format!("denominator {} is not positive", self.den),
            });
        }
        if !self.num.abs().gcd(&self.den).is_one() {
            return Err(RingError::InvariantViolation {
                detail: format!("{}/{} is not in lowest terms", self.num, self.den),
            });
        }
        Ok(())
    }
}

impl RingFactory for RationalField {
    type Element = ExactRational;

    fn zero(&self) -> ExactRational {
        ExactRational {
            num: Integer::zero(),
            den: Integer::one(),
        }
    }

    fn one(&self) -> ExactRational {
        ExactRational {
            num: Integer::one(),
            den: Integer::one(),
        }
    }

    fn is_finite(&self) -> bool {
        false
    }

    fn from_integer(&self, n: &Integer) -> ExactRational {
        ExactRational::from_integer(n.clone())
    }

    fn from_i64(&self, n: i64) -> ExactRational {
        ExactRational::from_integer(Integer::new(n))
    }

    fn random<R: Rng + ?Sized>(&self, bit_length: u32, rng: &mut R) -> ExactRational {
        let mut num = Integer::random_bits(bit_length, rng);
        if rng.gen::<bool>() {
            num = -num;
        }
        let den = Integer::random_bits(bit_length, rng) + Integer::one();
        ExactRational::reduced(num, den)
    }

    fn is_field(&self) -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }
}

impl FromStr for ExactRational {
    type Err = RingError;

    /// Parses `"n"`, `"n/d"`, or a signed decimal such as `"-0.125"`.
    ///
    /// The integer part of a decimal may be empty (`".5"` is `1/2`);
    /// the fractional part may not (`"1."` is rejected).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(parse_error(s, "empty input"));
        }
        if let Some((num, den)) = trimmed.split_once('/') {
            let num = parse_integer(s, num.trim())?;
            let den = parse_integer(s, den.trim())?;
            if den.is_zero() {
                return Err(parse_error(s, "zero denominator"));
            }
            return Ok(Self::reduced(num, den));
        }
        if let Some((int_part, frac_part)) = trimmed.split_once('.') {
            let (negative, int_digits) = match int_part.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, int_part.strip_prefix('+').unwrap_or(int_part)),
            };
            if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(parse_error(s, "invalid fractional digits"));
            }
            if !int_digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(parse_error(s, "invalid integer digits"));
            }
            let int_value = if int_digits.is_empty() {
                Integer::zero()
            } else {
                parse_integer(s, int_digits)?
            };
            let frac_value = parse_integer(s, frac_part)?;
            let scale = Integer::new(10).pow(u32::try_from(frac_part.len()).unwrap_or(u32::MAX));
            // The sign is applied once, to the fully assembled sum.
            let magnitude = Self::from_integer(int_value) + Self::reduced(frac_value, scale);
            return Ok(if negative { -magnitude } else { magnitude });
        }
        parse_integer(s, trimmed).map(Self::from_integer)
    }
}

fn parse_error(input: &str, reason: &str) -> RingError {
    RingError::Parse {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_integer(input: &str, digits: &str) -> Result<Integer, RingError> {
    Integer::from_str_radix(digits, 10).map_err(|e| RingError::Parse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

impl fmt::Debug for ExactRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExactRational({self})")
    }
}

impl fmt::Display for ExactRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl From<i64> for ExactRational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<Integer> for ExactRational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}
