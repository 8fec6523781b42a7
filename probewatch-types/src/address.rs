//! IPv4 interface addresses and the subnets they belong to.

use core::fmt;
use core::str::FromStr;
use std::net::Ipv4Addr;

use crate::TokenError;

/// Widest IPv4 prefix.
const MAX_PREFIX_LEN: u8 = 32;

/// A probed host address with its prefix length, e.g. `10.20.30.1/16`.
///
/// An address written without a prefix is a host route (`/32`). Two
/// addresses with the same host bits but different prefixes are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Address {
    ip: Ipv4Addr,
    prefix_len: u8,
}

impl Address {
    /// Create an address, returning `None` when `prefix_len` exceeds 32.
    pub fn new(ip: Ipv4Addr, prefix_len: u8) -> Option<Self> {
        (prefix_len <= MAX_PREFIX_LEN).then_some(Self { ip, prefix_len })
    }

    /// The host address.
    pub const fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    /// The prefix length.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The subnet obtained by masking the host bits.
    pub fn subnet(&self) -> Subnet {
        let network = u32::from(self.ip) & netmask(self.prefix_len);
        Subnet {
            network: Ipv4Addr::from(network),
            prefix_len: self.prefix_len,
        }
    }
}

fn netmask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        len => u32::MAX << (u32::from(MAX_PREFIX_LEN) - u32::from(len)),
    }
}

impl FromStr for Address {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, prefix) = match s.split_once('/') {
            Some((host, prefix)) => (host, Some(prefix)),
            None => (s, None),
        };

        let ip: Ipv4Addr = host.parse().map_err(|_| TokenError::Address(s.to_string()))?;

        let prefix_len = match prefix {
            None => MAX_PREFIX_LEN,
            Some(p) if !p.is_empty() && p.len() <= 2 && p.bytes().all(|b| b.is_ascii_digit()) => {
                p.parse().map_err(|_| TokenError::PrefixLength(s.to_string()))?
            }
            Some(_) => return Err(TokenError::PrefixLength(s.to_string())),
        };

        Address::new(ip, prefix_len).ok_or_else(|| TokenError::PrefixLength(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ip, self.prefix_len)
    }
}

impl TryFrom<String> for Address {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

/// A network derived from an [`Address`], e.g. `10.20.0.0/16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Subnet {
    network: Ipv4Addr,
    prefix_len: u8,
}

impl Subnet {
    /// The network address (host bits zeroed).
    pub const fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The prefix length.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Whether `address` masks to this subnet.
    pub fn contains(&self, address: &Address) -> bool {
        address.subnet() == *self
    }
}

impl FromStr for Subnet {
    type Err = TokenError;

    /// Parses `a.b.c.d/len`; host bits are masked off.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Address>().map(|a| a.subnet())
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

impl From<Subnet> for String {
    fn from(value: Subnet) -> Self {
        value.to_string()
    }
}
