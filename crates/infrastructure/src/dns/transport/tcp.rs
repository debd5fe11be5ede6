//! DNS over TCP (RFC 1035 §4.2.2).
//!
//! Each message is preceded by its length as a 2-byte big-endian integer.
//! A fresh connection is opened per request.

use super::transport_error;
use bytes::{BufMut, Bytes, BytesMut};
use ferrous_resolve_application::{ClientRequest, ClientResponse, RequestResolver};
use ferrous_resolve_domain::DomainError;
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;
use tracing::debug;

const LENGTH_PREFIX_SIZE: usize = 2;

pub struct TcpResolver {
    timeout: Duration,
}

impl TcpResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn connect(&self, server: SocketAddr) -> Result<TcpStream, DomainError> {
        let stream = TcpStream::connect_timeout(&server, self.timeout)
            .map_err(|e| transport_error(server, e))?;
        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
            .and_then(|_| stream.set_nodelay(true))
            .map_err(|e| transport_error(server, e))?;
        Ok(stream)
    }
}

impl RequestResolver for TcpResolver {
    fn resolve(&self, request: &ClientRequest) -> Result<ClientResponse, DomainError> {
        let server = request.destination();
        let message = request.to_bytes()?;

        let mut stream = self.connect(server)?;
        write_with_length_prefix(&mut stream, server, &message)?;
        debug!(server = %server, message_len = message.len(), "TCP query sent");

        let raw = read_with_length_prefix(&mut stream, server)?;
        debug!(server = %server, response_len = raw.len(), "TCP response received");

        ClientResponse::from_bytes(server, raw)
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) fn write_with_length_prefix<S>(
    stream: &mut S,
    server: SocketAddr,
    message: &[u8],
) -> Result<(), DomainError>
where
    S: Write,
{
    let length = u16::try_from(message.len()).map_err(|_| {
        DomainError::InvalidMessage(format!(
            "message of {} bytes does not fit a TCP length prefix",
            message.len()
        ))
    })?;

    let mut framed = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + message.len());
    framed.put_u16(length);
    framed.put_slice(message);

    stream
        .write_all(&framed)
        .and_then(|_| stream.flush())
        .map_err(|e| transport_error(server, e))
}

/// Reads one length-prefixed message, failing with
/// `UnexpectedEndOfStream` if the peer closes before it is complete.
pub(crate) fn read_with_length_prefix<S>(
    stream: &mut S,
    server: SocketAddr,
) -> Result<Bytes, DomainError>
where
    S: Read,
{
    let mut len_buf = [0u8; LENGTH_PREFIX_SIZE];
    read_full(stream, server, &mut len_buf)?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    let mut response = vec![0u8; response_len];
    read_full(stream, server, &mut response)?;

    Ok(Bytes::from(response))
}

fn read_full<S>(stream: &mut S, server: SocketAddr, buf: &mut [u8]) -> Result<(), DomainError>
where
    S: Read,
{
    let mut received = 0;
    while received < buf.len() {
        match stream.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(DomainError::UnexpectedEndOfStream {
                    expected: buf.len(),
                    received,
                })
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(transport_error(server, e)),
        }
    }
    Ok(())
}
