//! Blocking transports carrying a client request to its name server.

pub mod null;
pub mod tcp;
pub mod udp;

use ferrous_resolve_application::RequestResolver;
use ferrous_resolve_domain::config::{ResolverConfig, TransportProtocol};
use ferrous_resolve_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

pub use null::NullResolver;
pub use tcp::TcpResolver;
pub use udp::UdpResolver;

/// Builds the resolver chain described by `config`.
///
/// UDP resolvers fall back to TCP on truncation unless `tcp_fallback` is
/// off, in which case a truncated answer fails the request.
pub fn create_resolver(config: &ResolverConfig) -> Arc<dyn RequestResolver> {
    let timeout = config.timeout();
    match config.protocol {
        TransportProtocol::Tcp => Arc::new(TcpResolver::new(timeout)),
        TransportProtocol::Udp => {
            let fallback: Arc<dyn RequestResolver> = if config.tcp_fallback {
                Arc::new(TcpResolver::new(timeout))
            } else {
                Arc::new(NullResolver)
            };
            Arc::new(UdpResolver::new(timeout).with_fallback(fallback))
        }
    }
}

pub(crate) fn transport_error(server: SocketAddr, err: io::Error) -> DomainError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::TransportIo {
            server: server.to_string(),
            reason: err.to_string(),
        },
    }
}
