//! Typed socket addresses.
//!
//! One struct per family, plus the [`Address`] union the conversion routines
//! dispatch on. These types are plain data: the raw, platform-specific layout
//! is produced and parsed only by [`address_to_raw`](crate::address_to_raw)
//! and [`raw_to_address`](crate::raw_to_address).

pub use self::datalink::LinkAddress;
#[cfg(any(target_os = "android", target_os = "linux"))]
pub use self::netlink::NetlinkAddress;
use libc::sa_family_t;
use std::ffi::OsStr;
use std::fmt;
use std::net;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Address families supported on this platform, corresponding to `AF_*`
/// constants in libc.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum AddressFamily {
    /// `AF_INET`
    Inet,
    /// `AF_INET6`
    Inet6,
    /// `AF_UNIX`
    Unix,
    /// `AF_PACKET`
    #[cfg(any(target_os = "android", target_os = "linux"))]
    Packet,
    /// `AF_NETLINK`
    #[cfg(any(target_os = "android", target_os = "linux"))]
    Netlink,
    /// `AF_LINK`
    #[cfg(any(
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "ios",
        target_os = "macos",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    Link,
}

impl AddressFamily {
    /// Looks up the family matching a raw tag value, `None` if this
    /// platform's layout table has no entry for it.
    pub fn from_raw(family: sa_family_t) -> Option<AddressFamily> {
        match family as libc::c_int {
            libc::AF_INET => Some(AddressFamily::Inet),
            libc::AF_INET6 => Some(AddressFamily::Inet6),
            libc::AF_UNIX => Some(AddressFamily::Unix),
            #[cfg(any(target_os = "android", target_os = "linux"))]
            libc::AF_PACKET => Some(AddressFamily::Packet),
            #[cfg(any(target_os = "android", target_os = "linux"))]
            libc::AF_NETLINK => Some(AddressFamily::Netlink),
            #[cfg(any(
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "ios",
                target_os = "macos",
                target_os = "netbsd",
                target_os = "openbsd"
            ))]
            libc::AF_LINK => Some(AddressFamily::Link),
            _ => None,
        }
    }

    /// The raw tag value written at the header's family offset.
    pub const fn raw(self) -> sa_family_t {
        match self {
            AddressFamily::Inet => libc::AF_INET as sa_family_t,
            AddressFamily::Inet6 => libc::AF_INET6 as sa_family_t,
            AddressFamily::Unix => libc::AF_UNIX as sa_family_t,
            #[cfg(any(target_os = "android", target_os = "linux"))]
            AddressFamily::Packet => libc::AF_PACKET as sa_family_t,
            #[cfg(any(target_os = "android", target_os = "linux"))]
            AddressFamily::Netlink => libc::AF_NETLINK as sa_family_t,
            #[cfg(any(
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "ios",
                target_os = "macos",
                target_os = "netbsd",
                target_os = "openbsd"
            ))]
            AddressFamily::Link => libc::AF_LINK as sa_family_t,
        }
    }
}

/// An IPv4 socket address
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv4Address {
    pub(crate) octets: [u8; 4],
    pub(crate) port: u16,
}

impl Ipv4Address {
    /// Creates a new socket address from IPv4 octets and a port number.
    pub const fn new(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Self {
            octets: [a, b, c, d],
            port,
        }
    }

    /// Returns the IP address associated with this socket address.
    pub const fn ip(&self) -> net::Ipv4Addr {
        let [a, b, c, d] = self.octets;
        net::Ipv4Addr::new(a, b, c, d)
    }

    /// The address bytes, in the order they appear on the wire.
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// Returns the port number associated with this socket address, in
    /// native endian.
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{}.{}.{}.{}:{}", a, b, c, d, self.port)
    }
}

impl From<net::SocketAddrV4> for Ipv4Address {
    fn from(addr: net::SocketAddrV4) -> Self {
        Self {
            octets: addr.ip().octets(),
            port: addr.port(),
        }
    }
}

impl From<Ipv4Address> for net::SocketAddrV4 {
    fn from(addr: Ipv4Address) -> Self {
        net::SocketAddrV4::new(addr.ip(), addr.port)
    }
}

impl std::str::FromStr for Ipv4Address {
    type Err = net::AddrParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        net::SocketAddrV4::from_str(s).map(Ipv4Address::from)
    }
}

/// An IPv6 socket address
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv6Address {
    pub(crate) octets: [u8; 16],
    pub(crate) port: u16,
    pub(crate) scope_id: u32,
}

impl Ipv6Address {
    /// Creates a new socket address from an IPv6 address, a port number and
    /// a scope (zone) identifier.
    pub fn new(ip: net::Ipv6Addr, port: u16, scope_id: u32) -> Self {
        Self {
            octets: ip.octets(),
            port,
            scope_id,
        }
    }

    /// Returns the IP address associated with this socket address.
    pub fn ip(&self) -> net::Ipv6Addr {
        net::Ipv6Addr::from(self.octets)
    }

    /// The address bytes, in the order they appear on the wire.
    pub const fn octets(&self) -> [u8; 16] {
        self.octets
    }

    /// Returns the port number associated with this socket address, in
    /// native endian.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the scope ID associated with this address.
    pub const fn scope_id(&self) -> u32 {
        self.scope_id
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // These things are really hard to display properly.  Easier to let
        // std do it.
        let std = net::SocketAddrV6::new(self.ip(), self.port, 0, self.scope_id);
        std.fmt(f)
    }
}

impl From<net::SocketAddrV6> for Ipv6Address {
    // Flow information has no field in the raw layout written here, so it
    // does not survive the conversion.
    fn from(addr: net::SocketAddrV6) -> Self {
        Self {
            octets: addr.ip().octets(),
            port: addr.port(),
            scope_id: addr.scope_id(),
        }
    }
}

impl From<Ipv6Address> for net::SocketAddrV6 {
    fn from(addr: Ipv6Address) -> Self {
        net::SocketAddrV6::new(addr.ip(), addr.port, 0, addr.scope_id)
    }
}

impl std::str::FromStr for Ipv6Address {
    type Err = net::AddrParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        net::SocketAddrV6::from_str(s).map(Ipv6Address::from)
    }
}

/// A Unix-domain socket address.
///
/// The name is kept in its display form: a filesystem path, an empty name
/// for an unnamed socket, or a name with a leading `@` for a Linux abstract
/// address. On the wire the `@` becomes the leading NUL byte that marks the
/// abstract namespace.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnixAddress {
    pub(crate) name: Vec<u8>,
}

impl UnixAddress {
    /// Creates an address naming a filesystem path.
    pub fn new<P: AsRef<Path>>(path: P) -> UnixAddress {
        UnixAddress {
            name: path.as_ref().as_os_str().as_bytes().to_vec(),
        }
    }

    /// Creates an address in the abstract namespace.
    ///
    /// `name` is the bare name; the leading marker is added here and the
    /// NUL form is produced during encoding. This is a Linux-specific
    /// extension, primarily used to allow chrooted processes to communicate
    /// with processes having a different filesystem view.
    #[cfg(any(target_os = "android", target_os = "linux"))]
    pub fn new_abstract(name: &[u8]) -> UnixAddress {
        let mut bytes = Vec::with_capacity(name.len() + 1);
        bytes.push(b'@');
        bytes.extend_from_slice(name);
        UnixAddress { name: bytes }
    }

    /// Creates an "unnamed" unix socket address.
    #[cfg(any(target_os = "android", target_os = "linux"))]
    pub const fn new_unnamed() -> UnixAddress {
        UnixAddress { name: Vec::new() }
    }

    /// If this address represents a filesystem path, return that path.
    pub fn path(&self) -> Option<&Path> {
        if self.name.is_empty() {
            return None;
        }
        #[cfg(any(target_os = "android", target_os = "linux"))]
        if self.name[0] == b'@' {
            return None;
        }
        Some(Path::new(OsStr::from_bytes(&self.name)))
    }

    /// If this address represents an abstract socket, return its name
    /// without the leading marker.
    #[cfg(any(target_os = "android", target_os = "linux"))]
    pub fn as_abstract(&self) -> Option<&[u8]> {
        match self.name.first() {
            Some(&b'@') => Some(&self.name[1..]),
            _ => None,
        }
    }

    /// Check if this address is an "unnamed" unix socket address.
    #[cfg(any(target_os = "android", target_os = "linux"))]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// The name in its display form, as raw bytes.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }
}

impl fmt::Display for UnixAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            f.pad("<unbound UNIX socket>")
        } else {
            fmt::Display::fmt(&String::from_utf8_lossy(&self.name), f)
        }
    }
}

#[cfg(any(target_os = "android", target_os = "linux"))]
mod datalink {
    use std::fmt;

    /// A link-layer (`AF_PACKET`) socket address.
    ///
    /// # References
    ///
    /// [packet(7)](https://man7.org/linux/man-pages/man7/packet.7.html)
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct LinkAddress {
        pub(crate) protocol: u16,
        pub(crate) ifindex: i32,
        pub(crate) hatype: u16,
        pub(crate) pkttype: u8,
        pub(crate) halen: u8,
        pub(crate) addr: [u8; crate::layout::packet::ADDR_LEN],
    }

    impl LinkAddress {
        /// Builds an address from its raw fields. All fields are carried
        /// verbatim into the raw structure, in host byte order.
        pub const fn new(
            protocol: u16,
            ifindex: i32,
            hatype: u16,
            pkttype: u8,
            halen: u8,
            addr: [u8; crate::layout::packet::ADDR_LEN],
        ) -> Self {
            Self {
                protocol,
                ifindex,
                hatype,
                pkttype,
                halen,
                addr,
            }
        }

        /// Physical-layer protocol
        pub const fn protocol(&self) -> u16 {
            self.protocol
        }

        /// Interface number
        pub const fn ifindex(&self) -> i32 {
            self.ifindex
        }

        /// ARP hardware type
        pub const fn hatype(&self) -> u16 {
            self.hatype
        }

        /// Packet type
        pub const fn pkttype(&self) -> u8 {
            self.pkttype
        }

        /// Length of MAC address
        pub const fn halen(&self) -> usize {
            self.halen as usize
        }

        /// Physical-layer address (MAC)
        // Returns an Option just for cross-platform compatibility
        pub fn addr(&self) -> Option<[u8; 6]> {
            Some([
                self.addr[0],
                self.addr[1],
                self.addr[2],
                self.addr[3],
                self.addr[4],
                self.addr[5],
            ])
        }
    }

    impl fmt::Display for LinkAddress {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            if let Some(addr) = self.addr() {
                write!(
                    f,
                    "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                    addr[0], addr[1], addr[2], addr[3], addr[4], addr[5]
                )
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(any(
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "ios",
    target_os = "macos",
    target_os = "netbsd",
    target_os = "openbsd"
))]
mod datalink {
    use std::fmt;

    /// A datalink (`AF_LINK`) socket address.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct LinkAddress {
        pub(crate) index: u16,
        pub(crate) link_type: u8,
        pub(crate) nlen: u8,
        pub(crate) alen: u8,
        pub(crate) slen: u8,
        pub(crate) data: [u8; crate::layout::link::DATA_LEN],
    }

    impl LinkAddress {
        /// Builds an address from its raw fields. All fields are carried
        /// verbatim into the raw structure.
        pub const fn new(
            index: u16,
            link_type: u8,
            nlen: u8,
            alen: u8,
            slen: u8,
            data: [u8; crate::layout::link::DATA_LEN],
        ) -> Self {
            Self {
                index,
                link_type,
                nlen,
                alen,
                slen,
                data,
            }
        }

        /// interface index, if != 0, system given index for interface
        pub const fn ifindex(&self) -> usize {
            self.index as usize
        }

        /// Datalink type
        pub const fn datalink_type(&self) -> u8 {
            self.link_type
        }

        /// Interface name length, MAC address start position
        pub const fn nlen(&self) -> usize {
            self.nlen as usize
        }

        /// link level address length
        pub const fn alen(&self) -> usize {
            self.alen as usize
        }

        /// link layer selector length
        pub const fn slen(&self) -> usize {
            self.slen as usize
        }

        /// if link level address length == 0,
        /// or `data` not be larger.
        pub fn is_empty(&self) -> bool {
            let nlen = self.nlen();
            let alen = self.alen();

            alen == 0 || nlen + alen >= self.data.len()
        }

        /// Physical-layer address (MAC)
        pub fn addr(&self) -> Option<[u8; 6]> {
            let nlen = self.nlen();

            if self.is_empty() || nlen + 6 > self.data.len() {
                None
            } else {
                Some([
                    self.data[nlen],
                    self.data[nlen + 1],
                    self.data[nlen + 2],
                    self.data[nlen + 3],
                    self.data[nlen + 4],
                    self.data[nlen + 5],
                ])
            }
        }
    }

    impl fmt::Display for LinkAddress {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            if let Some(addr) = self.addr() {
                write!(
                    f,
                    "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                    addr[0], addr[1], addr[2], addr[3], addr[4], addr[5]
                )
            } else {
                Ok(())
            }
        }
    }
}

/// Addresses for kernel user interface sockets.
#[cfg(any(target_os = "android", target_os = "linux"))]
pub mod netlink {
    use std::fmt;

    /// Address for the Linux kernel user interface device.
    ///
    /// # References
    ///
    /// [netlink(7)](https://man7.org/linux/man-pages/man7/netlink.7.html)
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct NetlinkAddress {
        pub(crate) pad: u16,
        pub(crate) pid: u32,
        pub(crate) groups: u32,
    }

    impl NetlinkAddress {
        /// Construct a new socket address from its port ID and multicast
        /// groups mask.
        pub const fn new(pid: u32, groups: u32) -> NetlinkAddress {
            NetlinkAddress {
                pad: 0,
                pid,
                groups,
            }
        }

        /// Return the socket's port ID.
        pub const fn pid(&self) -> u32 {
            self.pid
        }

        /// Return the socket's multicast groups mask
        pub const fn groups(&self) -> u32 {
            self.groups
        }
    }

    impl fmt::Display for NetlinkAddress {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "pid: {} groups: {}", self.pid, self.groups)
        }
    }
}

/// A socket address of any supported family.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Address {
    /// An IPv4 address
    Inet(Ipv4Address),
    /// An IPv6 address
    Inet6(Ipv6Address),
    /// A Unix-domain address
    Unix(UnixAddress),
    /// A link-layer address
    Link(LinkAddress),
    /// A netlink address
    #[cfg(any(target_os = "android", target_os = "linux"))]
    Netlink(NetlinkAddress),
}

impl Address {
    /// The family of the active variant.
    pub fn family(&self) -> AddressFamily {
        match self {
            Address::Inet(_) => AddressFamily::Inet,
            Address::Inet6(_) => AddressFamily::Inet6,
            Address::Unix(_) => AddressFamily::Unix,
            #[cfg(any(target_os = "android", target_os = "linux"))]
            Address::Link(_) => AddressFamily::Packet,
            #[cfg(any(
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "ios",
                target_os = "macos",
                target_os = "netbsd",
                target_os = "openbsd"
            ))]
            Address::Link(_) => AddressFamily::Link,
            #[cfg(any(target_os = "android", target_os = "linux"))]
            Address::Netlink(_) => AddressFamily::Netlink,
        }
    }

    /// Encodes this address into its raw form. See
    /// [`address_to_raw`](crate::address_to_raw).
    pub fn to_raw(&self) -> crate::Result<(crate::RawAddress, crate::Socklen)> {
        crate::convert::address_to_raw(self)
    }

    /// Decodes an address from its raw form. See
    /// [`raw_to_address`](crate::raw_to_address).
    pub fn from_raw(raw: &crate::RawAddress) -> crate::Result<Address> {
        crate::convert::raw_to_address(raw)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::Inet(a) => a.fmt(f),
            Address::Inet6(a) => a.fmt(f),
            Address::Unix(a) => a.fmt(f),
            Address::Link(a) => a.fmt(f),
            #[cfg(any(target_os = "android", target_os = "linux"))]
            Address::Netlink(a) => a.fmt(f),
        }
    }
}

impl From<Ipv4Address> for Address {
    fn from(addr: Ipv4Address) -> Self {
        Address::Inet(addr)
    }
}

impl From<Ipv6Address> for Address {
    fn from(addr: Ipv6Address) -> Self {
        Address::Inet6(addr)
    }
}

impl From<UnixAddress> for Address {
    fn from(addr: UnixAddress) -> Self {
        Address::Unix(addr)
    }
}

impl From<net::SocketAddrV4> for Address {
    fn from(addr: net::SocketAddrV4) -> Self {
        Address::Inet(addr.into())
    }
}

impl From<net::SocketAddrV6> for Address {
    fn from(addr: net::SocketAddrV6) -> Self {
        Address::Inet6(addr.into())
    }
}

impl From<net::SocketAddr> for Address {
    fn from(addr: net::SocketAddr) -> Self {
        match addr {
            net::SocketAddr::V4(v4) => v4.into(),
            net::SocketAddr::V6(v6) => v6.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod family {
        use super::*;

        #[test]
        fn round_trips_through_raw_tags() {
            for family in [
                AddressFamily::Inet,
                AddressFamily::Inet6,
                AddressFamily::Unix,
            ] {
                assert_eq!(AddressFamily::from_raw(family.raw()), Some(family));
            }
        }

        #[test]
        fn unknown_tag_has_no_entry() {
            assert_eq!(AddressFamily::from_raw(255), None);
            assert_eq!(
                AddressFamily::from_raw(libc::AF_UNSPEC as sa_family_t),
                None
            );
        }
    }

    mod sockaddr_in {
        use super::*;
        use std::str::FromStr;

        #[test]
        fn display() {
            let s = "127.0.0.1:8080";
            let addr = Ipv4Address::from_str(s).unwrap();
            assert_eq!(s, format!("{addr}"));
        }

        #[test]
        fn to_and_from() {
            let std = net::SocketAddrV4::new(net::Ipv4Addr::new(10, 8, 0, 1), 1234);
            let addr = Ipv4Address::from(std);
            assert_eq!(addr.octets(), [10, 8, 0, 1]);
            assert_eq!(net::SocketAddrV4::from(addr), std);
        }
    }

    mod sockaddr_in6 {
        use super::*;
        use std::str::FromStr;

        #[test]
        fn display() {
            let s = "[1234:5678:90ab:cdef::1111:2222]:8080";
            let addr = Ipv6Address::from_str(s).unwrap();
            assert_eq!(s, format!("{addr}"));
        }

        #[test]
        fn scope_id_survives_std_round_trip() {
            let addr = Ipv6Address::new(net::Ipv6Addr::LOCALHOST, 80, 0x9abc);
            let std: net::SocketAddrV6 = addr.into();
            assert_eq!(Ipv6Address::from(std), addr);
        }
    }

    mod unixaddr {
        use super::*;

        #[test]
        fn pathname_kind() {
            let addr = UnixAddress::new("/tmp/sock");
            assert_eq!(addr.path(), Some(Path::new("/tmp/sock")));
            assert_eq!(format!("{addr}"), "/tmp/sock");
        }

        #[cfg(any(target_os = "android", target_os = "linux"))]
        #[test]
        fn abstract_kind() {
            let addr = UnixAddress::new_abstract(b"grail");
            assert_eq!(addr.as_abstract(), Some(&b"grail"[..]));
            assert_eq!(addr.path(), None);
            assert_eq!(format!("{addr}"), "@grail");
        }

        #[cfg(any(target_os = "android", target_os = "linux"))]
        #[test]
        fn unnamed_kind() {
            let addr = UnixAddress::new_unnamed();
            assert!(addr.is_unnamed());
            assert_eq!(addr.path(), None);
            assert_eq!(format!("{addr}"), "<unbound UNIX socket>");
        }
    }

    mod link {
        #[allow(unused_imports)]
        use super::*;

        #[cfg(any(target_os = "android", target_os = "linux"))]
        #[test]
        fn display() {
            let addr = LinkAddress::new(
                0x0003,
                2,
                1,
                0,
                6,
                [0x18, 0x65, 0x90, 0xdd, 0x4c, 0xb0, 0, 0],
            );
            assert_eq!(format!("{addr}"), "18:65:90:dd:4c:b0");
        }

        /// Don't panic when trying to display an empty datalink address
        #[cfg(any(
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "ios",
            target_os = "macos",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        #[test]
        fn display_empty() {
            let addr = LinkAddress::new(5, 24, 3, 0, 0, [0; 12]);
            assert!(addr.addr().is_none());
            assert_eq!(format!("{addr}"), "");
        }

        #[cfg(any(
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "ios",
            target_os = "macos",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        #[test]
        fn mac_follows_interface_name() {
            let addr = LinkAddress::new(
                7,
                6,
                3,
                6,
                0,
                [b'e', b'n', b'0', 0x18, 0x65, 0x90, 0xdd, 0x4c, 0xb0, 0, 0, 0],
            );
            assert_eq!(addr.addr(), Some([0x18, 0x65, 0x90, 0xdd, 0x4c, 0xb0]));
        }
    }
}
