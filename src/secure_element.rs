// SPDX-License-Identifier: MIT

//! Identity and entropy from a discrete secure element (ATSHA204A
//! class) that is powered only while it is being accessed.
//!
//! Every request runs a full bus session under the
//! [`PowerSequencer`]: power on, `init`, the transaction(s), `release`,
//! power off. A failure at any step aborts the session and the power
//! line is still released.
use crate::{
    driver::{SecureElementDriver, RANDOM_LEN, SERIAL_LEN},
    entropy::{CryptoEntropy, EntropyProvider},
    error::{Error, ErrorKind, Step},
    identity::{copy_truncated, IdentityProvider},
    power::PowerSequencer,
};

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

/// Output of an element whose configuration zone was never locked.
/// It is compared against the start of the last draw of a request.
pub const WEAK_PATTERN: [u8; 4] = [0xff, 0xff, 0x00, 0x00];

/// Secure element backend, providing both the device identity (its
/// 9 byte serial number) and random data (32 bytes per draw).
///
/// # Example
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{ErrorType, OutputPin};
/// use hwtrust::{
///     driver::{SecureElementDriver, RANDOM_LEN, SERIAL_LEN},
///     entropy::EntropyProvider,
///     identity::IdentityProvider,
///     secure_element::SecureElement,
/// };
///
/// # struct Pin;
/// # impl ErrorType for Pin { type Error = Infallible; }
/// # impl OutputPin for Pin {
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # struct Atsha204a;
/// # impl SecureElementDriver for Atsha204a {
/// #     type Error = ();
/// #     fn init(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn read_serial(&mut self, serial: &mut [u8; SERIAL_LEN]) -> Result<(), ()> {
/// #         serial.fill(0x01);
/// #         Ok(())
/// #     }
/// #     fn random(&mut self, chunk: &mut [u8; RANDOM_LEN]) -> Result<(), ()> {
/// #         chunk.fill(0x5a);
/// #         Ok(())
/// #     }
/// #     fn release(&mut self) -> Result<(), ()> { Ok(()) }
/// # }
/// # fn main() -> Result<(), hwtrust::error::Error> {
/// let mut element = SecureElement::new(Atsha204a, Pin);
/// let mut serial = [0u8; 9];
/// element.device_identity(&mut serial)?;
/// let mut key = [0u8; 40];
/// element.fill_random(&mut key)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SecureElement<D, P> {
    driver: D,
    power: PowerSequencer<P>,
}

fn check<E: Debug>(res: Result<(), E>, step: Step) -> Result<(), Error> {
    res.map_err(|e| {
        warn!("secure element {:?} failed: {:?}", step, e);
        Error::driver(step)
    })
}

impl<D, P> SecureElement<D, P>
where
    D: SecureElementDriver,
    P: OutputPin,
{
    pub fn new(driver: D, power_pin: P) -> Self {
        Self {
            driver,
            power: PowerSequencer::new(power_pin),
        }
    }

    /// Release the driver and the power-control pin.
    pub fn free(self) -> (D, P) {
        (self.driver, self.power.free())
    }
}

impl<D, P> IdentityProvider for SecureElement<D, P>
where
    D: SecureElementDriver,
    P: OutputPin,
{
    const ID_LEN: usize = SERIAL_LEN;

    /// Read the element's serial number. The caller buffer is only
    /// written once the session has been released successfully.
    fn device_identity(&mut self, bytes: &mut [u8]) -> Result<usize, Error> {
        let driver = &mut self.driver;
        let serial = self.power.with_powered(|| {
            let mut serial = [0u8; SERIAL_LEN];
            check(driver.init(), Step::Init)?;
            check(driver.read_serial(&mut serial), Step::Read)?;
            check(driver.release(), Step::Release)?;
            Ok(serial)
        })?;
        debug!("secure element serial: {:02x?}", serial);
        Ok(copy_truncated(&serial, bytes))
    }
}

impl<D, P> EntropyProvider for SecureElement<D, P>
where
    D: SecureElementDriver,
    P: OutputPin,
{
    /// Fill `bytes` in 32 byte draws, the last one truncated.
    ///
    /// # Error
    ///
    /// Returns a driver error if any session step fails, and
    /// [`ErrorKind::Implausible`] if the last draw starts with
    /// [`WEAK_PATTERN`]. In both cases `bytes` may already hold data
    /// that must be discarded.
    fn fill_random(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        let driver = &mut self.driver;
        let last = self.power.with_powered(|| {
            check(driver.init(), Step::Init)?;
            let mut last = None;
            for blk in bytes.chunks_mut(RANDOM_LEN) {
                let mut chunk = [0u8; RANDOM_LEN];
                check(driver.random(&mut chunk), Step::Read)?;
                blk.copy_from_slice(&chunk[..blk.len()]);
                last = Some(chunk);
            }
            check(driver.release(), Step::Release)?;
            Ok(last)
        })?;

        match last {
            Some(chunk) if chunk.starts_with(&WEAK_PATTERN) => {
                debug!("secure element returned its default pattern");
                Err(ErrorKind::Implausible.into())
            }
            _ => Ok(()),
        }
    }
}

impl<D, P> CryptoEntropy for SecureElement<D, P>
where
    D: SecureElementDriver,
    P: OutputPin,
{
}
