//! Network endpoint of a cluster member
//!
//! Wire layout: port as `i32`, one kind byte, then the host string.

use crate::error::{CodecError, CodecResult};
use crate::serialization::{DataSerializable, ObjectDataInput, ObjectDataOutput};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// How the host part of an address is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Hostname,
}

impl AddressKind {
    /// Wire id of this kind
    pub fn id(self) -> u8 {
        match self {
            AddressKind::Ipv4 => 4,
            AddressKind::Ipv6 => 6,
            AddressKind::Hostname => 0,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            4 => Some(AddressKind::Ipv4),
            6 => Some(AddressKind::Ipv6),
            0 => Some(AddressKind::Hostname),
            _ => None,
        }
    }

    fn of_host(host: &str) -> Self {
        match host.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => AddressKind::Ipv4,
            Ok(IpAddr::V6(_)) => AddressKind::Ipv6,
            Err(_) => AddressKind::Hostname,
        }
    }
}

/// Host and port a member listens on
#[derive(Debug, Clone)]
pub struct Address {
    host: String,
    port: u16,
    kind: AddressKind,
}

impl Address {
    /// Create an address; the kind is inferred from the host
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let kind = AddressKind::of_host(&host);
        Self { host, port, kind }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Resolve to a socket address when the host is an IP literal
    pub fn to_socket_addr(&self) -> Option<SocketAddr> {
        self.host
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, self.port))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.port == other.port && self.host == other.host
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl From<SocketAddr> for Address {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }
}

impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(addr.into());
        }
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| CodecError::InvalidAddress(format!("missing port in '{}'", s)))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(CodecError::InvalidAddress(format!("missing host in '{}'", s)));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| CodecError::InvalidAddress(format!("bad port in '{}': {}", s, e)))?;
        Ok(Self::new(host, port))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:{}", self.host, self.port)
    }
}

impl DataSerializable for Address {
    fn write_data(&self, out: &mut dyn ObjectDataOutput) -> CodecResult<()> {
        out.write_int(i32::from(self.port))?;
        out.write_byte(self.kind.id())?;
        out.write_utf(&self.host)
    }

    fn read_data(input: &mut dyn ObjectDataInput) -> CodecResult<Self> {
        let port = input.read_int()?;
        let port = u16::try_from(port)
            .map_err(|_| CodecError::InvalidAddress(format!("port {} out of range", port)))?;
        let kind_id = input.read_byte()?;
        let kind = AddressKind::from_id(kind_id)
            .ok_or_else(|| CodecError::InvalidAddress(format!("unknown address kind {}", kind_id)))?;
        let host = input.read_utf()?;
        Ok(Self { host, port, kind })
    }
}
