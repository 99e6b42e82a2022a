//! Conversions between typed socket addresses and the raw, fixed-layout
//! binary form the operating system's socket API speaks.
//!
//! The OS represents every address family in one opaque byte buffer whose
//! interpretation depends on a leading family tag and on platform-specific
//! field layout. This crate owns that transcoding in both directions:
//!
//! - [`address_to_raw`] encodes a typed [`Address`] into a [`RawAddress`]
//!   plus the exact valid length ([`Socklen`]) for its family;
//! - [`raw_to_address`] reads the family tag out of a raw buffer and
//!   reconstructs the typed value.
//!
//! Field offsets, tag values and length formulas live in a per-platform
//! layout table selected at build time; the BSDs embed a length byte in the
//! structure while Linux carries the length separately, and that difference
//! never leaks past the table. Both conversions are pure and stateless, so
//! they can be called freely from any thread.
//!
//! ```
//! use sockaddr::{address_to_raw, raw_to_address, Address, Ipv4Address};
//!
//! # fn main() -> sockaddr::Result<()> {
//! let addr = Address::Inet(Ipv4Address::new(127, 0, 0, 1, 80));
//! let (raw, socklen) = address_to_raw(&addr)?;
//! assert_eq!(raw_to_address(&raw)?, addr);
//! # let _ = socklen;
//! # Ok(())
//! # }
//! ```

#[deny(missing_docs)]
mod addr;
mod convert;
#[deny(missing_docs)]
mod error;
mod layout;
#[deny(missing_docs)]
mod raw;

pub use self::addr::{Address, AddressFamily, Ipv4Address, Ipv6Address, LinkAddress, UnixAddress};
#[cfg(any(target_os = "android", target_os = "linux"))]
pub use self::addr::netlink::NetlinkAddress;
pub use self::convert::{address_to_raw, raw_to_address};
pub use self::error::{Error, Result};
pub use self::raw::{RawAddress, Socklen};
