//! Host name resolution
//!
//! Resolution never fails loudly: a host that cannot be resolved yields `None`
//! and the fixture records it as an unknown host.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};

/// Resolves output host names to addresses
pub trait HostResolver {
    /// Address of `host`, or `None` if it cannot be resolved
    fn resolve(&self, host: &str) -> Option<IpAddr>;
}

/// Resolver backed by the system name service
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        let host = host.trim();
        if host.is_empty() {
            return None;
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Some(ip);
        }
        match (host, 0).to_socket_addrs() {
            Ok(mut addrs) => addrs.next().map(|addr| addr.ip()),
            Err(e) => {
                tracing::debug!("Lookup of '{}' failed: {}", host, e);
                None
            }
        }
    }
}

/// Resolver answering from a fixed table, IP literals always resolve
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to the table
    pub fn with_host(mut self, name: impl Into<String>, ip: IpAddr) -> Self {
        self.hosts.insert(name.into(), ip);
        self
    }
}

impl HostResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        let host = host.trim();
        host.parse::<IpAddr>()
            .ok()
            .or_else(|| self.hosts.get(host).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_system_resolver_ip_literal() {
        let resolver = SystemResolver;
        assert_eq!(
            resolver.resolve("192.168.1.20"),
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)))
        );
        assert_eq!(resolver.resolve("  "), None);
    }

    #[test]
    fn test_static_resolver() {
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        let resolver = StaticResolver::new().with_host("controller.local", ip);
        assert_eq!(resolver.resolve("controller.local"), Some(ip));
        assert_eq!(resolver.resolve("missing.local"), None);
        assert!(resolver.resolve("::1").is_some());
    }
}
