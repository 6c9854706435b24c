//! # Endpoint Addresses
//!
//! | Form | Channel |
//! |------|---------|
//! | `tcp:HOST:PORT`, `HOST:PORT`, `tcp:HOST` | [`TcpChannel`] (port 9100 if omitted) |
//! | `bt:/dev/rfcommN` | [`RfcommChannel`] |
//! | `usb:/dev/usb/lpN` | [`UsbLpChannel`] |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ByteChannel, RfcommChannel, TcpChannel, UsbLpChannel, tcp};
use crate::error::TransportError;

/// Where a printer lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Tcp { host: String, port: u16 },
    Rfcomm(PathBuf),
    UsbLp(PathBuf),
}

impl Endpoint {
    /// A closed channel for this endpoint.
    pub fn channel(&self) -> Box<dyn ByteChannel + Send> {
        match self {
            Self::Tcp { host, port } => Box::new(TcpChannel::new(host.clone(), *port)),
            Self::Rfcomm(path) => Box::new(RfcommChannel::new(path)),
            Self::UsbLp(path) => Box::new(UsbLpChannel::new(path)),
        }
    }
}

fn parse_tcp(s: &str, original: &str) -> Result<Endpoint, TransportError> {
    let invalid = || TransportError::InvalidEndpoint(original.to_string());
    let (host, port) = match s.rsplit_once(':') {
        Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
        None => (s, tcp::DEFAULT_PORT),
    };
    if host.is_empty() || port == 0 || host.contains(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(Endpoint::Tcp {
        host: host.to_string(),
        port,
    })
}

impl FromStr for Endpoint {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || TransportError::InvalidEndpoint(s.to_string());

        if let Some(path) = s.strip_prefix("bt:") {
            if !path.starts_with('/') {
                return Err(invalid());
            }
            return Ok(Self::Rfcomm(PathBuf::from(path)));
        }
        if let Some(path) = s.strip_prefix("usb:") {
            if !path.starts_with('/') {
                return Err(invalid());
            }
            return Ok(Self::UsbLp(PathBuf::from(path)));
        }
        if let Some(rest) = s.strip_prefix("tcp:") {
            return parse_tcp(rest, s);
        }
        // Bare HOST:PORT
        if s.contains(':') {
            return parse_tcp(s, s);
        }
        Err(invalid())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "tcp:{}:{}", host, port),
            Self::Rfcomm(path) => write!(f, "bt:{}", path.display()),
            Self::UsbLp(path) => write!(f, "usb:{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tcp(host: &str, port: u16) -> Endpoint {
        Endpoint::Tcp {
            host: host.into(),
            port,
        }
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("tcp:10.0.0.5:9100".parse::<Endpoint>().unwrap(), tcp("10.0.0.5", 9100));
        assert_eq!("10.0.0.5:9101".parse::<Endpoint>().unwrap(), tcp("10.0.0.5", 9101));
        assert_eq!("tcp:printer.local".parse::<Endpoint>().unwrap(), tcp("printer.local", 9100));
        assert_eq!(
            "bt:/dev/rfcomm0".parse::<Endpoint>().unwrap(),
            Endpoint::Rfcomm("/dev/rfcomm0".into())
        );
        assert_eq!(
            "usb:/dev/usb/lp1".parse::<Endpoint>().unwrap(),
            Endpoint::UsbLp("/dev/usb/lp1".into())
        );
    }

    #[test]
    fn test_parse_rejects() {
        for bad in ["", "printer", "tcp::9100", "tcp:host:99999", "host:0", "bt:rfcomm0", "usb:"] {
            assert!(
                matches!(bad.parse::<Endpoint>(), Err(TransportError::InvalidEndpoint(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["tcp:192.168.1.50:9100", "bt:/dev/rfcomm0", "usb:/dev/usb/lp0"] {
            assert_eq!(s.parse::<Endpoint>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_channel_matches_endpoint() {
        let ep: Endpoint = "usb:/dev/usb/lp3".parse().unwrap();
        let ch = ep.channel();
        assert_eq!(ch.describe(), ep.to_string());
        assert!(!ch.is_open());
    }
}
