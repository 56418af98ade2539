//! # exalg-rings
//!
//! Exact algebraic structures for exalg.
//!
//! This crate provides:
//! - Capability traits: [`RingElement`], [`RingFactory`]
//! - Concrete rings: the rational field, and modular integer rings in
//!   both arbitrary-precision and bounded machine-word representations
//! - Generic square-and-multiply exponentiation over any conforming
//!   element type
//!
//! The two modular representations share one algebraic contract behind
//! the capability traits but keep independent internals: the word ring
//! trades generality for overflow-free native arithmetic, the big ring
//! accepts any positive modulus.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod modular_big;
pub mod modular_word;
pub mod pow;
pub mod rational;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::RingError;
pub use modular_big::{ModularBigInt, ModularBigRing};
pub use modular_word::{ModularWord, ModularWordRing, MAX_WORD_MODULUS};
pub use pow::{mod_power, positive_power, power, product_of};
pub use rational::{ExactRational, RationalField};
pub use traits::{RingElement, RingFactory};
