// SPDX-License-Identifier: MIT

//! Traits for defining entropy sources.
use crate::error::Error;

/// Represents a source of random bytes backed by hardware. Its primary
/// use-case is to generate key material or seed random number
/// generators.
pub trait EntropyProvider {
    /// Perform the one-time enablement some sources need before first
    /// use. Sources without such a step accept the call and do
    /// nothing. Calling it more than once is harmless.
    ///
    /// # Error
    ///
    /// Returns an error if the source cannot be enabled.
    fn enable(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Fill `bytes` with random data from the entropy source.
    ///
    /// There is no limit on the length of `bytes`; the source is drawn
    /// from as many times as needed.
    ///
    /// # Error
    ///
    /// Returns an error if there is a problem with the underlying
    /// entropy source. The contents of `bytes` must not be trusted
    /// after an error, even if part of it was written.
    fn fill_random(&mut self, bytes: &mut [u8]) -> Result<(), Error>;
}

/// Marker for sources whose output is produced by dedicated random
/// number hardware and may be used directly as key material.
///
/// The analog-jitter fallback deliberately does not implement this.
pub trait CryptoEntropy: EntropyProvider {}
