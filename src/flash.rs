// SPDX-License-Identifier: MIT

//! Device identity from the unique-ID block of an on-die flash
//! controller (SAM3X EEFC class). No power sequencing is needed.
use crate::{
    driver::{AccessMode, FlashController, UID_WORDS},
    error::{Error, Step},
    identity::{copy_truncated, IdentityProvider},
};

use log::{debug, warn};

/// Length of the unique ID in bytes.
pub const UID_LEN: usize = UID_WORDS * 4;

const ACCESS_MODE: AccessMode = AccessMode::Bits128;
const WAIT_STATES: u32 = 4;

#[derive(Debug)]
pub struct FlashUid<F> {
    flash: F,
}

impl<F> FlashUid<F>
where
    F: FlashController,
{
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    pub fn free(self) -> F {
        self.flash
    }
}

impl<F> IdentityProvider for FlashUid<F>
where
    F: FlashController,
{
    const ID_LEN: usize = UID_LEN;

    /// Read the 4 word unique ID. Words are laid out least significant
    /// byte first, matching the in-memory layout on the target.
    fn device_identity(&mut self, bytes: &mut [u8]) -> Result<usize, Error> {
        self.flash.init(ACCESS_MODE, WAIT_STATES).map_err(|e| {
            warn!("flash controller init failed: {:?}", e);
            Error::driver(Step::Init)
        })?;

        let mut words = [0u32; UID_WORDS];
        self.flash.read_unique_id(&mut words).map_err(|e| {
            warn!("flash unique id read failed: {:?}", e);
            Error::driver(Step::Read)
        })?;

        let mut uid = [0u8; UID_LEN];
        for (dst, word) in uid.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
        debug!("own id: {:02x?}", uid);
        Ok(copy_truncated(&uid, bytes))
    }
}
