//! Error reporting for the conversion routines.

use std::fmt;

/// The ways a conversion can fail.
///
/// Conversions are deterministic, so retrying a failed call with the same
/// input fails the same way.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// The input value cannot be represented in the raw layout: an
    /// out-of-range interface index, a Unix path that is empty (where the
    /// platform forbids that) or too long for the path field, or a raw
    /// buffer with a malformed embedded length.
    InvalidArgument,
    /// The address family is not part of this platform's layout table, or
    /// the typed variant has no encoding rule here.
    UnsupportedFamily,
}

impl Error {
    /// A short description of the error.
    pub const fn desc(self) -> &'static str {
        match self {
            Error::InvalidArgument => "invalid argument",
            Error::UnsupportedFamily => "address family not supported",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.desc())
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
