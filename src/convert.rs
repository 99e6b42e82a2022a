//! The two conversion routines between [`Address`] and [`RawAddress`].
//!
//! Both are pure transforms: a fresh buffer or typed value is produced per
//! call, the input is never mutated, and a failure yields no partial result.
//! Every offset, size and length formula comes from the
//! [layout table](crate::layout).

use crate::addr::{Address, AddressFamily, Ipv4Address, Ipv6Address, LinkAddress, UnixAddress};
#[cfg(any(target_os = "android", target_os = "linux"))]
use crate::addr::NetlinkAddress;
use crate::error::{Error, Result};
use crate::layout;
use crate::raw::{RawAddress, Socklen};
use cfg_if::cfg_if;

/// Encodes a typed address into the platform's raw layout.
///
/// Returns the buffer together with the exact number of meaningful bytes in
/// it. The buffer is freshly zeroed, so everything past that length is zero
/// padding. Port fields are written in network byte order; all other
/// multi-byte fields stay in host byte order.
pub fn address_to_raw(addr: &Address) -> Result<(RawAddress, Socklen)> {
    match addr {
        Address::Inet(sin) => Ok(encode_inet(sin)),
        Address::Inet6(sin6) => Ok(encode_inet6(sin6)),
        Address::Unix(sun) => encode_unix(sun),
        Address::Link(sll) => encode_link(sll),
        // There is no encoding rule for netlink addresses; the kernel hands
        // them out fully formed.
        #[cfg(any(target_os = "android", target_os = "linux"))]
        Address::Netlink(_) => Err(Error::UnsupportedFamily),
    }
}

/// Decodes a raw buffer into a typed address.
///
/// Dispatches on the family tag in the buffer's header; a tag the platform's
/// layout table does not know fails with [`Error::UnsupportedFamily`]. The
/// buffer is only read, never written.
pub fn raw_to_address(raw: &RawAddress) -> Result<Address> {
    let family = match AddressFamily::from_raw(raw.family()) {
        Some(family) => family,
        None => return Err(Error::UnsupportedFamily),
    };

    let buf = raw.as_bytes();
    match family {
        AddressFamily::Inet => Ok(decode_inet(buf)),
        AddressFamily::Inet6 => Ok(decode_inet6(buf)),
        AddressFamily::Unix => decode_unix(buf),
        #[cfg(any(target_os = "android", target_os = "linux"))]
        AddressFamily::Packet => Ok(decode_link(buf)),
        #[cfg(any(target_os = "android", target_os = "linux"))]
        AddressFamily::Netlink => Ok(decode_netlink(buf)),
        #[cfg(any(
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "ios",
            target_os = "macos",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        AddressFamily::Link => Ok(decode_link(buf)),
    }
}

fn encode_inet(sin: &Ipv4Address) -> (RawAddress, Socklen) {
    let mut raw = RawAddress::new();
    let buf = raw.as_mut_bytes();

    layout::write_header(buf, AddressFamily::Inet.raw(), layout::inet::SIZE);
    layout::put_u16_be(buf, layout::inet::port_offset(), sin.port());
    layout::put_bytes(buf, layout::inet::addr_offset(), &sin.octets());

    (raw, layout::inet::SIZE as Socklen)
}

fn encode_inet6(sin6: &Ipv6Address) -> (RawAddress, Socklen) {
    let mut raw = RawAddress::new();
    let buf = raw.as_mut_bytes();

    layout::write_header(buf, AddressFamily::Inet6.raw(), layout::inet6::SIZE);
    layout::put_u16_be(buf, layout::inet6::port_offset(), sin6.port());
    layout::put_bytes(buf, layout::inet6::addr_offset(), &sin6.octets());
    layout::put_u32_ne(buf, layout::inet6::scope_offset(), sin6.scope_id());

    (raw, layout::inet6::SIZE as Socklen)
}

cfg_if! {
    if #[cfg(any(target_os = "android", target_os = "linux"))] {
        fn encode_unix(sun: &UnixAddress) -> Result<(RawAddress, Socklen)> {
            let name = sun.name_bytes();
            let n = name.len();

            // A zero-length name is an unnamed socket.
            if n >= layout::unix::path_capacity() {
                return Err(Error::InvalidArgument);
            }

            let mut socklen = layout::unix::socklen(n);
            let mut raw = RawAddress::new();
            let buf = raw.as_mut_bytes();

            layout::write_header(buf, AddressFamily::Unix.raw(), socklen);
            let path = layout::unix::path_offset();
            layout::put_bytes(buf, path, name);

            // An abstract name starts with a NUL on the wire and is not
            // NUL-terminated, so the terminator drops back out of the
            // length.
            if n > 0 && name[0] == b'@' {
                buf[path] = 0;
                socklen -= 1;
            }

            Ok((raw, socklen as Socklen))
        }

        fn encode_link(sll: &LinkAddress) -> Result<(RawAddress, Socklen)> {
            if sll.ifindex() < 0 {
                return Err(Error::InvalidArgument);
            }

            let mut raw = RawAddress::new();
            let buf = raw.as_mut_bytes();

            layout::write_header(buf, AddressFamily::Packet.raw(), layout::packet::SIZE);
            layout::put_u16_ne(buf, layout::packet::protocol_offset(), sll.protocol);
            layout::put_i32_ne(buf, layout::packet::ifindex_offset(), sll.ifindex);
            layout::put_u16_ne(buf, layout::packet::hatype_offset(), sll.hatype);
            buf[layout::packet::pkttype_offset()] = sll.pkttype;
            buf[layout::packet::halen_offset()] = sll.halen;
            layout::put_bytes(buf, layout::packet::addr_offset(), &sll.addr);

            Ok((raw, layout::packet::SIZE as Socklen))
        }

        fn decode_link(buf: &[u8]) -> Address {
            Address::Link(LinkAddress {
                protocol: layout::get_u16_ne(buf, layout::packet::protocol_offset()),
                ifindex: layout::get_i32_ne(buf, layout::packet::ifindex_offset()),
                hatype: layout::get_u16_ne(buf, layout::packet::hatype_offset()),
                pkttype: buf[layout::packet::pkttype_offset()],
                halen: buf[layout::packet::halen_offset()],
                addr: layout::get_bytes(buf, layout::packet::addr_offset()),
            })
        }

        fn decode_netlink(buf: &[u8]) -> Address {
            Address::Netlink(NetlinkAddress {
                pad: layout::get_u16_ne(buf, layout::netlink::pad_offset()),
                pid: layout::get_u32_ne(buf, layout::netlink::pid_offset()),
                groups: layout::get_u32_ne(buf, layout::netlink::groups_offset()),
            })
        }
    } else {
        fn encode_unix(sun: &UnixAddress) -> Result<(RawAddress, Socklen)> {
            let name = sun.name_bytes();
            let n = name.len();

            if n == 0 || n >= layout::unix::path_capacity() {
                return Err(Error::InvalidArgument);
            }

            let socklen = layout::unix::socklen(n);
            let mut raw = RawAddress::new();
            let buf = raw.as_mut_bytes();

            layout::write_header(buf, AddressFamily::Unix.raw(), socklen);
            layout::put_bytes(buf, layout::unix::path_offset(), name);

            Ok((raw, socklen as Socklen))
        }

        fn encode_link(sdl: &LinkAddress) -> Result<(RawAddress, Socklen)> {
            if sdl.ifindex() == 0 {
                return Err(Error::InvalidArgument);
            }

            let mut raw = RawAddress::new();
            let buf = raw.as_mut_bytes();

            layout::write_header(buf, AddressFamily::Link.raw(), layout::link::SIZE);
            layout::put_u16_ne(buf, layout::link::index_offset(), sdl.index);
            buf[layout::link::type_offset()] = sdl.link_type;
            buf[layout::link::nlen_offset()] = sdl.nlen;
            buf[layout::link::alen_offset()] = sdl.alen;
            buf[layout::link::slen_offset()] = sdl.slen;
            layout::put_bytes(buf, layout::link::data_offset(), &sdl.data);

            Ok((raw, layout::link::SIZE as Socklen))
        }

        fn decode_link(buf: &[u8]) -> Address {
            Address::Link(LinkAddress {
                index: layout::get_u16_ne(buf, layout::link::index_offset()),
                link_type: buf[layout::link::type_offset()],
                nlen: buf[layout::link::nlen_offset()],
                alen: buf[layout::link::alen_offset()],
                slen: buf[layout::link::slen_offset()],
                data: layout::get_bytes(buf, layout::link::data_offset()),
            })
        }
    }
}

fn decode_inet(buf: &[u8]) -> Address {
    Address::Inet(Ipv4Address {
        octets: layout::get_bytes(buf, layout::inet::addr_offset()),
        port: layout::get_u16_be(buf, layout::inet::port_offset()),
    })
}

fn decode_inet6(buf: &[u8]) -> Address {
    Address::Inet6(Ipv6Address {
        octets: layout::get_bytes(buf, layout::inet6::addr_offset()),
        port: layout::get_u16_be(buf, layout::inet6::port_offset()),
        scope_id: layout::get_u32_ne(buf, layout::inet6::scope_offset()),
    })
}

cfg_if! {
    if #[cfg(any(target_os = "android", target_os = "linux"))] {
        // No length is embedded in the buffer, so the name ends at the first
        // NUL in the path field (or at its capacity). A leading NUL marks
        // the abstract namespace and becomes the `@` of the display form;
        // the scan then resumes behind it.
        fn decode_unix(buf: &[u8]) -> Result<Address> {
            let path = layout::unix::path_offset();
            let cap = layout::unix::path_capacity();

            let mut name = buf[path..path + cap].to_vec();
            if name[0] == 0 {
                name[0] = b'@';
            }

            let n = name.iter().position(|&b| b == 0).unwrap_or(cap);
            name.truncate(n);

            Ok(Address::Unix(UnixAddress { name }))
        }
    } else {
        // The embedded length counts the two header bytes and the trailing
        // NUL. It is only an upper bound: getsockname() and friends may
        // overestimate, so an earlier NUL wins.
        fn decode_unix(buf: &[u8]) -> Result<Address> {
            let path = layout::unix::path_offset();

            let declared = layout::read_len(buf);
            if declared < path + 1 || declared > layout::unix::SIZE {
                return Err(Error::InvalidArgument);
            }

            let mut n = declared - path - 1;
            if let Some(nul) = buf[path..path + n].iter().position(|&b| b == 0) {
                n = nul;
            }

            Ok(Address::Unix(UnixAddress {
                name: buf[path..path + n].to_vec(),
            }))
        }
    }
}
