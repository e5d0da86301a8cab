// SPDX-License-Identifier: MIT

//! Hardware-bound device identity and random data for constrained
//! microcontrollers.
//!
//! Two primitives are provided behind uniform traits:
//!
//! - [`IdentityProvider`](identity::IdentityProvider): a stable device
//!   identifier, truncated to the caller's buffer.
//! - [`EntropyProvider`](entropy::EntropyProvider): an arbitrary amount
//!   of random bytes.
//!
//! Each board has one physical source for each, implemented as a
//! backend over a peripheral driver capability from [`driver`]:
//!
//! | Backend                                      | Identity | Entropy |
//! |----------------------------------------------|----------|---------|
//! | [`SecureElement`](secure_element::SecureElement) | 9 byte serial | 32 byte draws |
//! | [`FlashUid`](flash::FlashUid)                | 16 byte unique ID | |
//! | [`Trng`](trng::Trng)                         |          | 4 byte register reads |
//! | [`JitterEntropy`](jitter::JitterEntropy)     |          | analog jitter, 1 byte per 8 bits |
//!
//! The backend for a build is selected with Cargo features and
//! re-exported from [`board`]. Everything runs synchronously on the
//! calling context; backends hold no locks and must not be shared
//! between execution contexts without external serialization.
//!
//! # Quick Example
//!
//! ```
//! use hwtrust::{entropy::EntropyProvider, jitter::JitterEntropy};
//!
//! # fn main() -> Result<(), hwtrust::error::Error> {
//! // An ADC channel on a floating pin.
//! let mut reading = 0u16;
//! let mut rng = JitterEntropy::new(move || {
//!     reading = reading.wrapping_add(1);
//!     reading / 3
//! });
//! let mut random_data = [0u8; 8];
//! rng.fill_random(&mut random_data)?;
//! # Ok(())
//! # }
//! ```
//!
//! The jitter fallback is not conditioned; hash its output before using
//! it as key material.
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod driver;
pub mod entropy;
pub mod error;
pub mod flash;
pub mod identity;
pub mod jitter;
pub mod power;
pub mod secure_element;
pub mod trng;

#[cfg(feature = "rand_core")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand_core")))]
pub mod rng;

#[cfg(test)]
mod mock;
