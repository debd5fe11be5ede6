use super::ClientResponse;
use crate::ports::RequestResolver;
use bytes::Bytes;
use ferrous_resolve_domain::{DomainError, Message, ResponseCode};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// A request message bound to a destination and the resolver that carries it.
#[derive(Clone)]
pub struct ClientRequest {
    destination: SocketAddr,
    message: Message,
    resolver: Arc<dyn RequestResolver>,
}

impl ClientRequest {
    pub fn new(destination: SocketAddr, message: Message, resolver: Arc<dyn RequestResolver>) -> Self {
        Self {
            destination,
            message,
            resolver,
        }
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn id(&self) -> u16 {
        self.message.id()
    }

    pub fn size(&self) -> usize {
        self.message.size()
    }

    pub fn to_bytes(&self) -> Result<Bytes, DomainError> {
        self.message.to_bytes()
    }

    /// Performs the round trip and checks the reply belongs to this request
    /// and reports success.
    pub fn resolve(&self) -> Result<ClientResponse, DomainError> {
        let response = self.resolver.resolve(self)?;

        if response.id() != self.id() {
            return Err(DomainError::MismatchedId {
                expected: self.id(),
                actual: response.id(),
                response: Box::new(response.into_message()),
            });
        }

        let code = response.response_code();
        if code != ResponseCode::NoError {
            debug!(
                server = %self.destination,
                id = self.id(),
                rcode = %code,
                "DNS error response"
            );
            return Err(DomainError::ErrorResponse {
                code,
                response: Box::new(response.into_message()),
            });
        }

        Ok(response)
    }
}

impl fmt::Debug for ClientRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRequest")
            .field("destination", &self.destination)
            .field("message", &self.message)
            .field("resolver", &self.resolver.protocol_name())
            .finish()
    }
}
