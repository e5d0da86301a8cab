// SPDX-License-Identifier: MIT

//! [`rand_core`] integration for entropy providers.
use crate::{
    entropy::{CryptoEntropy, EntropyProvider},
    error::Error,
};

use rand_core::{TryCryptoRng, TryRngCore};

/// Adapter exposing an [`EntropyProvider`] as a [`TryRngCore`].
///
/// Only providers backed by random number hardware
/// ([`CryptoEntropy`]) are also [`TryCryptoRng`].
///
/// # Example
///
/// ```
/// use hwtrust::{jitter::JitterEntropy, rng::EntropyRng};
/// use rand_core::TryRngCore;
///
/// # fn main() -> Result<(), hwtrust::error::Error> {
/// let mut reading = 0u16;
/// let mut rng = EntropyRng::new(JitterEntropy::new(move || {
///     reading = reading.wrapping_add(1);
///     reading / 2
/// }));
/// let _ = rng.try_next_u32()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EntropyRng<E> {
    source: E,
}

impl<E> EntropyRng<E>
where
    E: EntropyProvider,
{
    pub fn new(source: E) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> E {
        self.source
    }
}

impl<E> TryRngCore for EntropyRng<E>
where
    E: EntropyProvider,
{
    type Error = Error;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut bytes = [0u8; 4];
        self.source.fill_random(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut bytes = [0u8; 8];
        self.source.fill_random(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn try_fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.source.fill_random(bytes)
    }
}

impl<E> TryCryptoRng for EntropyRng<E> where E: CryptoEntropy {}
