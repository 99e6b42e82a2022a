//! Layout table for BSD-family targets.
//!
//! Raw structures start with a one-byte total length followed by a one-byte
//! family tag; the length is embedded in the structure itself.

use libc::sa_family_t;

pub(crate) fn write_header(buf: &mut [u8], family: sa_family_t, socklen: usize) {
    buf[0] = socklen as u8;
    buf[1] = family as u8;
}

pub(crate) fn read_family(buf: &[u8]) -> sa_family_t {
    buf[1] as sa_family_t
}

/// The length byte the kernel embeds at offset zero.
pub(crate) fn read_len(buf: &[u8]) -> usize {
    buf[0] as usize
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

    /// Length byte, family byte, path bytes, and a trailing NUL.
    pub(crate) fn socklen(n: usize) -> usize {
        path_offset() + n + 1
    }
}

pub(crate) mod link {
    use memoffset::offset_of;
    use std::mem;

    pub(crate) const SIZE: usize = mem::size_of::<libc::sockaddr_dl>();
    pub(crate) const DATA_LEN: usize = 12;

    pub(crate) fn index_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_index)
    }

    pub(crate) fn type_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_type)
    }

    pub(crate) fn nlen_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_nlen)
    }

    pub(crate) fn alen_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_alen)
    }

    pub(crate) fn slen_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_slen)
    }

    pub(crate) fn data_offset() -> usize {
        offset_of!(libc::sockaddr_dl, sdl_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoffset::offset_of;
    use std::mem;

    #[test]
    fn header_is_len_then_family() {
        let mut buf = [0u8; 4];
        write_header(&mut buf, libc::AF_INET as sa_family_t, inet::SIZE);
        assert_eq!(buf[0] as usize, inet::SIZE);
        assert_eq!(buf[1], libc::AF_INET as u8);
    }

    #[test]
    fn unix_path_field_starts_after_header() {
        assert_eq!(
            unix::path_offset(),
            mem::size_of::<u8>() + mem::size_of::<sa_family_t>()
        );
        assert_eq!(unix::path_capacity(), 104);
    }

    #[test]
    fn link_data_follows_fixed_fields() {
        assert!(link::data_offset() + link::DATA_LEN <= link::SIZE);
        assert_eq!(offset_of!(libc::sockaddr_dl, sdl_len), 0);
    }
}
