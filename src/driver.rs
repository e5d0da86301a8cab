// SPDX-License-Identifier: MIT

//! Capabilities consumed from the board's peripheral drivers.
//!
//! The crate never talks to registers or buses itself. Each backend is
//! generic over one of these traits and the board support code provides
//! the implementation (an ATSHA204A bus driver, the SAM3X flash
//! controller, the TRNG peripheral, an ADC channel).
use core::fmt::Debug;

/// Length of the secure element serial number.
pub const SERIAL_LEN: usize = 9;

/// Bytes produced by a single secure element random draw.
pub const RANDOM_LEN: usize = 32;

/// Words in the flash controller unique-ID block.
pub const UID_WORDS: usize = 4;

/// A discrete secure element reached over a bus session.
///
/// Each call maps to one bus transaction. Calls other than
/// [`init`](SecureElementDriver::init) are only made between a
/// successful `init` and the matching `release`.
pub trait SecureElementDriver {
    type Error: Debug;

    /// Open a bus session with the element.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Read the element's serial number.
    fn read_serial(&mut self, serial: &mut [u8; SERIAL_LEN]) -> Result<(), Self::Error>;

    /// Draw one chunk of random data.
    fn random(&mut self, chunk: &mut [u8; RANDOM_LEN]) -> Result<(), Self::Error>;

    /// Close the bus session.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Flash controller access width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Bits128,
    Bits64,
}

/// An on-die flash controller exposing a unique-ID block.
pub trait FlashController {
    type Error: Debug;

    /// Configure the controller access mode and wait states.
    fn init(&mut self, mode: AccessMode, wait_states: u32) -> Result<(), Self::Error>;

    /// Run the start/stop unique-ID read sequence.
    fn read_unique_id(&mut self, uid: &mut [u32; UID_WORDS]) -> Result<(), Self::Error>;
}

/// An on-die true random number generator peripheral.
///
/// Once clocked and enabled the output register is assumed to always
/// hold fresh data.
pub trait TrngPeripheral {
    fn enable_clock(&mut self);

    fn enable(&mut self);

    fn read_output(&mut self) -> u32;
}

/// A single analog input that can be sampled repeatedly.
pub trait AnalogSource {
    fn sample(&mut self) -> u16;
}

impl<F> AnalogSource for F
where
    F: FnMut() -> u16,
{
    fn sample(&mut self) -> u16 {
        self()
    }
}
