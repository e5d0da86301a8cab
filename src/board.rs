// SPDX-License-Identifier: MIT

//! Build-time backend selection.
//!
//! A build targets exactly one board, so exactly one identity backend
//! and one entropy backend are chosen through Cargo features and
//! re-exported here as [`Identity`] and [`Entropy`]:
//!
//! | Feature               | Re-export                                        |
//! |-----------------------|--------------------------------------------------|
//! | `identity-atsha204a`  | `Identity` = [`SecureElement`](crate::secure_element::SecureElement) |
//! | `identity-flash-uid`  | `Identity` = [`FlashUid`](crate::flash::FlashUid) |
//! | `entropy-atsha204a`   | `Entropy` = [`SecureElement`](crate::secure_element::SecureElement) |
//! | `entropy-trng`        | `Entropy` = [`Trng`](crate::trng::Trng)           |
//! | `entropy-adc-jitter`  | `Entropy` = [`JitterEntropy`](crate::jitter::JitterEntropy) |
//!
//! When the secure element provides both, a single instance serves as
//! `Identity` and `Entropy` since both share the bus and power line.
//!
//! Selecting no backend, or more than one, for either role fails the
//! build.

#[cfg(not(any(feature = "identity-atsha204a", feature = "identity-flash-uid")))]
compile_error!("no identity backend: enable `identity-atsha204a` or `identity-flash-uid`");

#[cfg(all(feature = "identity-atsha204a", feature = "identity-flash-uid"))]
compile_error!("enable only one of `identity-atsha204a` and `identity-flash-uid`");

#[cfg(not(any(
    feature = "entropy-atsha204a",
    feature = "entropy-trng",
    feature = "entropy-adc-jitter"
)))]
compile_error!(
    "no entropy backend: enable `entropy-atsha204a`, `entropy-trng` or `entropy-adc-jitter`"
);

#[cfg(any(
    all(feature = "entropy-atsha204a", feature = "entropy-trng"),
    all(feature = "entropy-atsha204a", feature = "entropy-adc-jitter"),
    all(feature = "entropy-trng", feature = "entropy-adc-jitter")
))]
compile_error!("enable only one of `entropy-atsha204a`, `entropy-trng` and `entropy-adc-jitter`");

#[cfg(feature = "identity-atsha204a")]
pub use crate::secure_element::SecureElement as Identity;

#[cfg(feature = "identity-flash-uid")]
pub use crate::flash::FlashUid as Identity;

#[cfg(feature = "entropy-atsha204a")]
pub use crate::secure_element::SecureElement as Entropy;

#[cfg(feature = "entropy-trng")]
pub use crate::trng::Trng as Entropy;

#[cfg(feature = "entropy-adc-jitter")]
pub use crate::jitter::JitterEntropy as Entropy;

/// Native identity length of the selected backend.
#[cfg(feature = "identity-atsha204a")]
pub const ID_LEN: usize = crate::driver::SERIAL_LEN;

/// Native identity length of the selected backend.
#[cfg(feature = "identity-flash-uid")]
pub const ID_LEN: usize = crate::flash::UID_LEN;

/// Whether the selected entropy backend must be hashed before its
/// output is used as key material.
pub const NEEDS_CONDITIONING: bool = cfg!(feature = "entropy-adc-jitter");
