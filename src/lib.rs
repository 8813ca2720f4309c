//! Arbitrary-precision signed integers and rationals with explicit control
//! over their limb storage.
//!
//! ```toml
//! [dependencies]
//! hugenum = "0.3"
//! ```
//!
//! # Integers
//!
//! A [`BigInt`] owns a single heap buffer of machine-word limbs together
//! with a signed count of the limbs in use. The sign of that count is the
//! sign of the number, so zero is represented by a count of zero.
//!
//! ```
//! use hugenum::BigInt;
//!
//! # fn main() -> hugenum::Result<()> {
//! let mut x = BigInt::from(u64::MAX);
//! x.try_add(1u32)?;
//! assert_eq!(x.to_string(), "18446744073709551616");
//! assert_eq!(x.bit_length(), 65);
//! # Ok(())
//! # }
//! ```
//!
//! # Rationals
//!
//! A [`BigRational`] is a numerator and a denominator. Every construction,
//! assignment and arithmetic operation leaves the pair in lowest terms with
//! a positive denominator, so two rationals are equal exactly when their
//! components are.
//!
//! ```
//! use hugenum::BigRational;
//!
//! # fn main() -> hugenum::Result<()> {
//! let a = BigRational::from_integers(-6i64, 4u64)?;
//! assert_eq!(a.to_string(), "-3/2");
//!
//! let b: BigRational = "0x1F/0xA".parse()?;
//! assert_eq!(format!("{:X}", b), "1F/A");
//! assert_eq!((&a + 1).to_string(), "-1/2");
//! # Ok(())
//! # }
//! ```
//!
//! # Storage
//!
//! Storage can be sized ahead of time with [`BigInt::allocate`] and
//! [`BigRational::allocate`], inspected through `allocated_limbs`,
//! `used_limbs` and `limbs_ptr`, and returned to the allocator early with
//! `dispose`. Allocation failures surface as [`Error`]s from every `try_*`
//! operation and fallible constructor; the operator impls and `Clone` abort
//! on allocation failure the way `Vec` does.

#![doc(html_root_url = "https://docs.rs/hugenum/0.3.2")]
#![deny(clippy::all, clippy::pedantic)]
// Ignored clippy lints
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::comparison_chain,
    clippy::doc_markdown,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_range_loop,
    clippy::return_self_not_must_use,
    clippy::similar_names,
    clippy::unreadable_literal
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// A facade around all the types we need from the `std`, `core`, and `alloc`
/// crates. This avoids elaborate import wrangling having to happen in every
/// module.
mod lib {
    mod core {
        #[cfg(not(feature = "std"))]
        pub use core::*;
        #[cfg(feature = "std")]
        pub use std::*;
    }

    pub use self::core::cmp::Ordering;
    pub use self::core::fmt::{self, Debug, Display};
    pub use self::core::hash::{Hash, Hasher};
    pub use self::core::ptr::{self, NonNull};
    pub use self::core::str::{self, FromStr};
    pub use self::core::{cmp, mem, ops, result, slice};

    #[cfg(not(feature = "std"))]
    pub use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error, realloc, Layout};
    #[cfg(feature = "std")]
    pub use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, realloc, Layout};

    #[cfg(not(feature = "std"))]
    pub use alloc::boxed::Box;
    #[cfg(feature = "std")]
    pub use std::boxed::Box;

    #[cfg(not(feature = "std"))]
    pub use alloc::string::{String, ToString};
    #[cfg(feature = "std")]
    pub use std::string::{String, ToString};

    #[cfg(not(feature = "std"))]
    pub use alloc::vec::Vec;
    #[cfg(feature = "std")]
    pub use std::vec::Vec;
}

#[doc(inline)]
pub use crate::buffer::LimbBuffer;
#[doc(inline)]
pub use crate::error::{Category, Error, ErrorCode, Result};
#[doc(inline)]
pub use crate::int::BigInt;
pub use crate::math::{Limb, LIMB_BITS};
#[doc(inline)]
pub use crate::operand::{Operand, Sign};
#[doc(inline)]
pub use crate::rational::{BigRational, RationalOperand};

mod arith;
mod buffer;
mod error;
mod float;
mod format;
mod int;
mod math;
mod operand;
mod parse;
mod rational;
#[cfg(feature = "serde")]
mod serde;
