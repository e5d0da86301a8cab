// SPDX-License-Identifier: MIT

//! Entropy from an on-die TRNG peripheral (SAM3X class).
//!
//! The peripheral has to be clocked and enabled once before its output
//! register can be read. The backend tracks that in its own
//! [`BackendState`]: a freshly constructed [`Trng`] refuses requests
//! until [`EntropyProvider::enable`] has been called, after which it
//! stays enabled for its lifetime.
use crate::{
    driver::TrngPeripheral,
    entropy::{CryptoEntropy, EntropyProvider},
    error::{Error, ErrorKind},
};

use embedded_hal::delay::DelayNs;
use log::debug;

/// Time the noise source needs to settle after enablement.
const SETTLE_MS: u32 = 10;

/// Enablement state of the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendState {
    #[default]
    Uninitialized,
    Enabled,
}

/// TRNG backend. Each register read yields 4 bytes, consumed least
/// significant byte first.
///
/// # Example
///
/// ```
/// # use embedded_hal::delay::DelayNs;
/// use hwtrust::{driver::TrngPeripheral, entropy::EntropyProvider, trng::Trng};
///
/// # struct Sam3xTrng(u32);
/// # impl TrngPeripheral for Sam3xTrng {
/// #     fn enable_clock(&mut self) {}
/// #     fn enable(&mut self) {}
/// #     fn read_output(&mut self) -> u32 {
/// #         self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
/// #         self.0
/// #     }
/// # }
/// # struct Delay;
/// # impl DelayNs for Delay { fn delay_ns(&mut self, _ns: u32) {} }
/// # fn main() -> Result<(), hwtrust::error::Error> {
/// let mut rng = Trng::new(Sam3xTrng(1), Delay);
/// rng.enable()?;
/// let mut nonce = [0u8; 12];
/// rng.fill_random(&mut nonce)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Trng<T, D> {
    trng: T,
    delay: D,
    state: BackendState,
}

impl<T, D> Trng<T, D>
where
    T: TrngPeripheral,
    D: DelayNs,
{
    pub fn new(trng: T, delay: D) -> Self {
        Self {
            trng,
            delay,
            state: BackendState::Uninitialized,
        }
    }

    pub fn state(&self) -> BackendState {
        self.state
    }

    pub fn free(self) -> (T, D) {
        (self.trng, self.delay)
    }
}

impl<T, D> EntropyProvider for Trng<T, D>
where
    T: TrngPeripheral,
    D: DelayNs,
{
    /// Clock and enable the peripheral, then wait for it to settle.
    /// Does nothing if already enabled.
    fn enable(&mut self) -> Result<(), Error> {
        if self.state == BackendState::Enabled {
            return Ok(());
        }
        self.trng.enable_clock();
        self.trng.enable();
        self.delay.delay_ms(SETTLE_MS);
        self.state = BackendState::Enabled;
        debug!("trng enabled");
        Ok(())
    }

    /// # Error
    ///
    /// Returns [`ErrorKind::NotEnabled`] without touching the
    /// peripheral if [`enable`](EntropyProvider::enable) was never
    /// called. Cannot fail otherwise.
    fn fill_random(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        if self.state != BackendState::Enabled {
            debug!("trng not enabled");
            return Err(ErrorKind::NotEnabled.into());
        }
        for blk in bytes.chunks_mut(4) {
            let word = self.trng.read_output().to_le_bytes();
            blk.copy_from_slice(&word[..blk.len()]);
        }
        Ok(())
    }
}

impl<T, D> CryptoEntropy for Trng<T, D>
where
    T: TrngPeripheral,
    D: DelayNs,
{
}
