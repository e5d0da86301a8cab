// SPDX-License-Identifier: MIT

//! Traits for reading a hardware-bound device identifier.
use crate::error::Error;

/// A source of a stable, hardware-bound device identifier.
///
/// The identifier is re-read from hardware on every call; nothing is
/// cached.
pub trait IdentityProvider {
    /// Native length of the identifier in bytes.
    const ID_LEN: usize;

    /// Copy the device identifier into `bytes`.
    ///
    /// At most [`ID_LEN`](IdentityProvider::ID_LEN) bytes are written.
    /// If `bytes` is longer, the bytes past the identifier are left
    /// untouched rather than zeroed. Returns the number of bytes
    /// written.
    ///
    /// # Error
    ///
    /// Returns an error if any step of the hardware read fails. `bytes`
    /// is not modified in that case.
    fn device_identity(&mut self, bytes: &mut [u8]) -> Result<usize, Error>;
}

/// Copy `min(bytes.len(), id.len())` bytes of `id` to the front of
/// `bytes`.
pub(crate) fn copy_truncated(id: &[u8], bytes: &mut [u8]) -> usize {
    let len = bytes.len().min(id.len());
    bytes[..len].copy_from_slice(&id[..len]);
    len
}
