//! # Chat Server Utilities
//!
//! File: cli/src/commands/srv/utils.rs
//!
//! Helpers for the startup banner.
//!
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use tracing::{debug, warn};

/// # Get Local IP Address (`get_local_ip`)
///
/// Finds the address of the interface the machine would use for outbound
/// traffic. A UDP "connect" only selects a route; no packet is sent.
///
/// Returns `None` when there is no usable non-loopback interface.
pub fn get_local_ip() -> Option<IpAddr> {
    let socket = match UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)) {
        Ok(socket) => socket,
        Err(e) => {
            warn!("Could not open a UDP socket for IP detection: {}", e);
            return None;
        }
    };
    if let Err(e) = socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9)) {
        debug!("No route for IP detection: {}", e);
        return None;
    }
    let ip = socket.local_addr().ok()?.ip();
    debug!("Detected local IP: {}", ip);
    (!ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}

/// URLs a browser can use to reach a server bound to `addr`.
///
/// A loopback bind is only reachable locally; an unspecified bind
/// (`0.0.0.0`) is also reachable on the network address, when known.
pub fn display_urls(addr: SocketAddr, network_ip: Option<IpAddr>) -> Vec<String> {
    let port = addr.port();
    let mut urls = Vec::new();
    if addr.ip().is_loopback() || addr.ip().is_unspecified() {
        urls.push(format!("http://localhost:{port}"));
    }
    if addr.ip().is_unspecified() {
        if let Some(ip) = network_ip {
            urls.push(format!("http://{}", SocketAddr::new(ip, port)));
        }
    } else if !addr.ip().is_loopback() {
        urls.push(format!("http://{addr}"));
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_local_ip_is_never_loopback() {
        if let Some(ip) = get_local_ip() {
            assert!(!ip.is_loopback());
        }
    }

    #[test]
    fn test_display_urls_loopback() {
        let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();
        let urls = display_urls(addr, Some("10.0.0.5".parse().unwrap()));
        assert_eq!(urls, vec!["http://localhost:8000".to_string()]);
    }

    #[test]
    fn test_display_urls_all_interfaces() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let urls = display_urls(addr, Some("10.0.0.5".parse().unwrap()));
        assert_eq!(urls, vec!["http://localhost:9000", "http://10.0.0.5:9000"]);
    }

    #[test]
    fn test_display_urls_specific_interface() {
        let addr: SocketAddr = "10.0.0.5:9000".parse().unwrap();
        assert_eq!(display_urls(addr, None), vec!["http://10.0.0.5:9000"]);
    }
}
