//! DNS over UDP (RFC 1035 §4.2.1).
//!
//! Messages are sent unframed in a single datagram. A reply with the TC bit
//! set is handed to the fallback resolver, normally [`TcpResolver`].
//!
//! [`TcpResolver`]: super::TcpResolver

use super::transport_error;
use bytes::Bytes;
use ferrous_resolve_application::{ClientRequest, ClientResponse, RequestResolver};
use ferrous_resolve_domain::DomainError;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Largest UDP payload, so a reply is never cut short by the receive buffer.
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

pub struct UdpResolver {
    timeout: Duration,
    fallback: Option<Arc<dyn RequestResolver>>,
}

impl UdpResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            fallback: None,
        }
    }

    /// Resolver used when a reply comes back truncated. Without one the
    /// truncated reply is returned as received.
    pub fn with_fallback(self, fallback: Arc<dyn RequestResolver>) -> Self {
        Self {
            fallback: Some(fallback),
            ..self
        }
    }

    fn exchange(&self, server: SocketAddr, message: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr).map_err(|e| transport_error(server, e))?;
        socket
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| socket.set_write_timeout(Some(self.timeout)))
            .and_then(|_| socket.connect(server))
            .map_err(|e| transport_error(server, e))?;

        let bytes_sent = socket.send(message).map_err(|e| transport_error(server, e))?;
        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .map_err(|e| transport_error(server, e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");
        Ok(recv_buf)
    }
}

impl RequestResolver for UdpResolver {
    fn resolve(&self, request: &ClientRequest) -> Result<ClientResponse, DomainError> {
        let server = request.destination();
        let message = request.to_bytes()?;

        let raw = self.exchange(server, &message)?;
        let response = ClientResponse::from_bytes(server, Bytes::from(raw))?;

        if response.is_truncated() {
            if let Some(fallback) = &self.fallback {
                debug!(
                    server = %server,
                    id = request.id(),
                    fallback = fallback.protocol_name(),
                    "UDP response truncated, retrying"
                );
                return fallback.resolve(request);
            }
        }

        Ok(response)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
