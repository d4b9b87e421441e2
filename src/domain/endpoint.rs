use std::fmt::{Debug, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Network location and credentials of the unit.
#[derive(Clone, PartialEq)]
pub struct Endpoint {
    address: SocketAddr,
    username: String,
    password: String,
    timeout: Option<Duration>,
}

impl Endpoint {
    pub fn new(ip: IpAddr, port: u16, username: String, password: String) -> Self {
        Endpoint {
            address: SocketAddr::new(ip, port),
            username,
            password,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn schema_url(&self) -> String {
        format!("{}/js/data/data.json", self.base_url())
    }

    pub fn command_url(&self) -> String {
        format!("{}/api.cgi", self.base_url())
    }

    // SocketAddr renders IPv6 addresses in brackets.
    fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }
}

impl Debug for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn urls_use_the_ipv4_address() {
        let endpoint = Endpoint::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 80, "user".into(), "secret".into());

        assert_eq!(endpoint.schema_url(), "http://192.168.1.20:80/js/data/data.json");
        assert_eq!(endpoint.command_url(), "http://192.168.1.20:80/api.cgi");
    }

    #[test]
    fn urls_bracket_ipv6_addresses() {
        let endpoint = Endpoint::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 8080, "user".into(), "secret".into());

        assert_eq!(endpoint.command_url(), "http://[::1]:8080/api.cgi");
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let endpoint = Endpoint::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 80, "user".into(), "secret".into());

        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
