//! The raw, OS-native form of a socket address.

use crate::error::{Error, Result};
use crate::layout;
use libc::sa_family_t;
use std::fmt;

/// The exact number of meaningful bytes in a raw encoding.
pub type Socklen = libc::socklen_t;

/// A fixed-capacity buffer holding an address in the OS's native binary
/// layout.
///
/// The buffer is as large as the biggest raw structure on the platform
/// (`sockaddr_storage`); only the prefix up to the [`Socklen`] returned by
/// [`address_to_raw`](crate::address_to_raw) is meaningful, the rest is
/// zero padding. The leading bytes hold the platform's header: a one-byte
/// length and one-byte family on the BSDs, a two-byte family tag on Linux.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct RawAddress {
    buf: [u8; layout::RAW_CAPACITY],
}

impl RawAddress {
    /// Creates a zero-filled buffer. Its family tag is `AF_UNSPEC`.
    pub const fn new() -> Self {
        Self {
            buf: [0; layout::RAW_CAPACITY],
        }
    }

    /// Copies an OS-produced encoding into a fresh buffer.
    ///
    /// `bytes` may be shorter than the full capacity; the remainder is
    /// zeroed. Fails with [`Error::InvalidArgument`] if it is longer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > layout::RAW_CAPACITY {
            return Err(Error::InvalidArgument);
        }

        let mut raw = Self::new();
        raw.buf[..bytes.len()].copy_from_slice(bytes);
        Ok(raw)
    }

    /// Returns the family tag stored in the header.
    pub fn family(&self) -> sa_family_t {
        layout::read_family(&self.buf)
    }

    /// Total capacity of the buffer in bytes.
    pub const fn capacity(&self) -> usize {
        layout::RAW_CAPACITY
    }

    /// The whole buffer, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Default for RawAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RawAddress")
            .field("family", &self.family())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffer_is_unspecified() {
        let raw = RawAddress::new();
        assert_eq!(raw.family(), libc::AF_UNSPEC as sa_family_t);
        assert!(raw.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_bytes_zero_pads_short_input() {
        let raw = RawAddress::from_bytes(&[1, 2, 3]).unwrap();
        assert_eq!(&raw.as_bytes()[..3], &[1, 2, 3]);
        assert!(raw.as_bytes()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn from_bytes_rejects_oversized_input() {
        let too_big = vec![0u8; layout::RAW_CAPACITY + 1];
        assert_eq!(
            RawAddress::from_bytes(&too_big),
            Err(Error::InvalidArgument)
        );
    }
}
