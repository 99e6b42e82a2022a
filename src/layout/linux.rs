//! Layout table for Linux-family targets.
//!
//! Raw structures start with a two-byte `sa_family_t` in host byte order and
//! carry no embedded length; the valid length travels next to the buffer as a
//! separate `socklen_t`.

use libc::sa_family_t;

use super::{get_u16_ne, put_u16_ne};

pub(crate) fn write_header(buf: &mut [u8], family: sa_family_t, _socklen: usize) {
    put_u16_ne(buf, 0, family);
}

pub(crate) fn read_family(buf: &[u8]) -> sa_family_t {
    get_u16_ne(buf, 0)
}

pub(crate) fn put_i32_ne(buf: &mut [u8], off: usize, val: i32) {
    buf[off..off + 4].copy_from_slice(&val.to_ne_bytes());
}

pub(crate) fn get_i32_ne(buf: &[u8], off: usize) -> i32 {
    i32::from_ne_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

pub(crate) mod inet {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) const SIZE: usize = mem::size_of::<libc::sockaddr_in>();

    pub(crate) fn port_offset() -> usize {
        offset_of!(libc::sockaddr_in, sin_port)
    }

    pub(crate) fn addr_offset() -> usize {
        offset_of!(libc::sockaddr_in, sin_addr)
    }
}

pub(crate) mod inet6 {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) const SIZE: usize = mem::size_of::<libc::sockaddr_in6>();

    pub(crate) fn port_offset() -> usize {
        offset_of!(libc::sockaddr_in6, sin6_port)
    }

    pub(crate) fn addr_offset() -> usize {
        offset_of!(libc::sockaddr_in6, sin6_addr)
    }

    pub(crate) fn scope_offset() -> usize {
        offset_of!(libc::sockaddr_in6, sin6_scope_id)
    }
}

pub(crate) mod unix {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) const SIZE: usize = mem::size_of::<libc::sockaddr_un>();

    pub(crate) fn path_offset() -> usize {
        offset_of!(libc::sockaddr_un, sun_path)
    }

    pub(crate) fn path_capacity() -> usize {
        SIZE - path_offset()
    }

    /// Family tag, path bytes, and a trailing NUL for pathnames. An unnamed
    /// address is the bare tag.
    pub(crate) fn socklen(n: usize) -> usize {
        if n > 0 {
            path_offset() + n + 1
        } else {
            path_offset()
        }
    }
}

pub(crate) mod packet {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) const SIZE: usize = mem::size_of::<libc::sockaddr_ll>();
    pub(crate) const ADDR_LEN: usize = 8;

    pub(crate) fn protocol_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_protocol)
    }

    pub(crate) fn ifindex_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_ifindex)
    }

    pub(crate) fn hatype_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_hatype)
    }

    pub(crate) fn pkttype_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_pkttype)
    }

    pub(crate) fn halen_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_halen)
    }

    pub(crate) fn addr_offset() -> usize {
        offset_of!(libc::sockaddr_ll, sll_addr)
    }
}

pub(crate) mod netlink {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) fn pad_offset() -> usize {
        // `nl_pad` is a private field in libc, so `offset_of!` can't name it.
        // It sits immediately before the public `nl_pid` field and is a `u16`.
        offset_of!(libc::sockaddr_nl, nl_pid) - mem::size_of::<u16>()
    }

    pub(crate) fn pid_offset() -> usize {
        offset_of!(libc::sockaddr_nl, nl_pid)
    }

    pub(crate) fn groups_offset() -> usize {
        offset_of!(libc::sockaddr_nl, nl_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn family_tag_is_two_bytes_host_order() {
        let mut buf = [0u8; 4];
        write_header(&mut buf, libc::AF_NETLINK as sa_family_t, 0);
        assert_eq!(
            get_u16_ne(&buf, 0),
            libc::AF_NETLINK as u16
        );
    }

    #[test]
    fn unix_path_field_starts_after_family() {
        assert_eq!(unix::path_offset(), mem::size_of::<sa_family_t>());
        assert_eq!(unix::path_capacity(), 108);
    }

    #[test]
    fn unnamed_socklen_is_bare_tag() {
        assert_eq!(unix::socklen(0), 2);
    }
}
