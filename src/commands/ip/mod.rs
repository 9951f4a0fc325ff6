//! Network commands: addresses, subnets, reachability

pub mod list;
pub mod ping;
pub mod port;
pub mod subnet;
pub mod validate;

use crate::registry::CommandRegistry;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address scope, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScope {
    Loopback,
    LinkLocal,
    Private,
    Public,
}

impl fmt::Display for AddressScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AddressScope::Loopback => "Loopback",
            AddressScope::LinkLocal => "Link-local",
            AddressScope::Private => "Private",
            AddressScope::Public => "Public",
        };
        f.write_str(text)
    }
}

pub fn classify_v4(ip: Ipv4Addr) -> AddressScope {
    if ip.is_loopback() {
        AddressScope::Loopback
    } else if ip.is_link_local() {
        AddressScope::LinkLocal
    } else if ip.is_private() {
        AddressScope::Private
    } else {
        AddressScope::Public
    }
}

pub fn classify_v6(ip: Ipv6Addr) -> AddressScope {
    let first = ip.segments()[0];
    if ip.is_loopback() {
        AddressScope::Loopback
    } else if first & 0xffc0 == 0xfe80 {
        AddressScope::LinkLocal
    } else if first & 0xfe00 == 0xfc00 {
        AddressScope::Private
    } else {
        AddressScope::Public
    }
}

pub fn classify(ip: IpAddr) -> AddressScope {
    match ip {
        IpAddr::V4(v4) => classify_v4(v4),
        IpAddr::V6(v6) => classify_v6(v6),
    }
}

/// Table label such as `IPv4 (Private)`
pub fn address_type(ip: IpAddr) -> String {
    let family = if ip.is_ipv4() { "IPv4" } else { "IPv6" };
    format!("{} ({})", family, classify(ip))
}

/// Parse a TCP port in 1-65535
pub fn parse_port(raw: &str) -> Result<u16, String> {
    match raw.trim().parse::<u32>() {
        Ok(port) if (1..=u16::MAX as u32).contains(&port) => Ok(port as u16),
        Ok(_) => Err(format!("Port must be between 1 and {}", u16::MAX)),
        Err(_) => Err("Invalid port number".to_string()),
    }
}

/// Register every `ip:*` command
pub fn register_all(registry: &mut CommandRegistry) {
    list::register(registry);
    validate::register(registry);
    subnet::register(registry);
    ping::register(registry);
    port::register(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(s: &str) -> AddressScope {
        classify(s.parse().unwrap())
    }

    #[test]
    fn test_classify_v4() {
        assert_eq!(scope("127.0.0.1"), AddressScope::Loopback);
        assert_eq!(scope("169.254.10.1"), AddressScope::LinkLocal);
        assert_eq!(scope("10.0.0.5"), AddressScope::Private);
        assert_eq!(scope("172.20.1.1"), AddressScope::Private);
        assert_eq!(scope("192.168.1.1"), AddressScope::Private);
        assert_eq!(scope("8.8.8.8"), AddressScope::Public);
    }

    #[test]
    fn test_classify_v6() {
        assert_eq!(scope("::1"), AddressScope::Loopback);
        assert_eq!(scope("fe80::1"), AddressScope::LinkLocal);
        assert_eq!(scope("fd12:3456::1"), AddressScope::Private);
        assert_eq!(scope("2001:4860:4860::8888"), AddressScope::Public);
    }

    #[test]
    fn test_address_type() {
        assert_eq!(address_type("192.168.0.2".parse().unwrap()), "IPv4 (Private)");
        assert_eq!(address_type("fe80::1".parse().unwrap()), "IPv6 (Link-local)");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080"), Ok(8080));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port("0"), Err("Port must be between 1 and 65535".to_string()));
        assert_eq!(parse_port("70000"), Err("Port must be between 1 and 65535".to_string()));
        assert_eq!(parse_port("http"), Err("Invalid port number".to_string()));
    }
}
