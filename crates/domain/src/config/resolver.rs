use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    #[default]
    Udp,

    Tcp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Name server to query, `ip` or `ip:port`.
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub protocol: TransportProtocol,

    /// Retry truncated UDP answers over TCP.
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,

    #[serde(default = "default_true")]
    pub recursion_desired: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_ms: default_timeout_ms(),
            protocol: TransportProtocol::default(),
            tcp_fallback: true,
            recursion_desired: true,
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_server_addr(&self.server)
    }
}

/// Accepts `ip:port`, `[v6]:port` or a bare address on the default port.
pub fn parse_server_addr(server: &str) -> Result<SocketAddr, ConfigError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigError::Validation(format!("Invalid server address '{}'", server)))
}

fn default_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
