// SPDX-License-Identifier: MIT

//! Scoped power control for sources that are only energized during
//! access.
//!
//! The power line is asserted by [`PowerSequencer::power_on`] and
//! deasserted when the returned [`Powered`] guard is dropped, so every
//! exit path of the enclosing operation (success, driver failure, early
//! return or unwinding) leaves the source unpowered.
//! [`PowerSequencer::with_powered`] releases the guard explicitly so a
//! line that cannot be driven low is reported as [`ErrorKind::Power`].
use crate::error::{Error, ErrorKind};

use embedded_hal::digital::OutputPin;
use log::warn;

/// Owner of the power-control line of a physical source.
///
/// # Example
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{ErrorType, OutputPin};
/// use hwtrust::power::PowerSequencer;
///
/// # struct Pin(bool);
/// # impl ErrorType for Pin { type Error = Infallible; }
/// # impl OutputPin for Pin {
/// #     fn set_low(&mut self) -> Result<(), Infallible> { self.0 = false; Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { self.0 = true; Ok(()) }
/// # }
/// let mut power = PowerSequencer::new(Pin(false));
/// let answer = power.with_powered(|| Ok(42))?;
/// assert_eq!(42, answer);
/// assert!(!power.free().0);
/// # Ok::<(), hwtrust::error::Error>(())
/// ```
#[derive(Debug)]
pub struct PowerSequencer<P> {
    pin: P,
}

/// Guard holding the power line asserted. Dropping it deasserts the
/// line; [`Powered::release`] does the same and reports failure.
#[derive(Debug)]
pub struct Powered<'a, P: OutputPin> {
    pin: &'a mut P,
    released: bool,
}

impl<P> PowerSequencer<P>
where
    P: OutputPin,
{
    /// Take ownership of the power-control pin. The line is left as
    /// the board configured it until the first access.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Assert the power line.
    ///
    /// # Error
    ///
    /// Returns [`ErrorKind::Power`] if the pin cannot be driven high.
    /// The line is driven low before returning in that case.
    pub fn power_on(&mut self) -> Result<Powered<'_, P>, Error> {
        if let Err(e) = self.pin.set_high() {
            warn!("power line assert failed: {:?}", e);
            if let Err(e) = self.pin.set_low() {
                warn!("power line deassert failed: {:?}", e);
            }
            return Err(ErrorKind::Power.into());
        }
        Ok(Powered {
            pin: &mut self.pin,
            released: false,
        })
    }

    /// Run `operation` with the source powered and return its result
    /// after the line has been deasserted.
    ///
    /// # Error
    ///
    /// Returns the error of `operation` if it failed. Otherwise returns
    /// [`ErrorKind::Power`] if the line could not be asserted or
    /// deasserted.
    pub fn with_powered<T, F>(&mut self, operation: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        let powered = self.power_on()?;
        let res = operation();
        let off = powered.release();
        let value = res?;
        off?;
        Ok(value)
    }

    /// Release the power-control pin.
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> Powered<'_, P>
where
    P: OutputPin,
{
    /// Deassert the power line.
    ///
    /// # Error
    ///
    /// Returns [`ErrorKind::Power`] if the pin cannot be driven low.
    /// The source may still be powered in that case.
    pub fn release(mut self) -> Result<(), Error> {
        self.released = true;
        self.pin.set_low().map_err(|e| {
            warn!("power line deassert failed: {:?}", e);
            ErrorKind::Power.into()
        })
    }
}

impl<P> Drop for Powered<'_, P>
where
    P: OutputPin,
{
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.pin.set_low() {
            warn!("power line deassert failed: {:?}", e);
        }
    }
}
