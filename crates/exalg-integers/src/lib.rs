//! # exalg-integers
//!
//! Arbitrary precision integer arithmetic for exalg.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Probabilistic primality testing (Miller-Rabin)
//! - A lazily extended, process-wide stream of probable primes (`PrimeStream`)
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - Large integers are heap-allocated with GMP-like performance

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod primality;
pub mod primes;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use primality::{is_probable_prime, next_probable_prime};
pub use primes::PrimeStream;
