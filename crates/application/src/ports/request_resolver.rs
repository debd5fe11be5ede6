use crate::client::{ClientRequest, ClientResponse};
use ferrous_resolve_domain::DomainError;

/// One blocking round trip for a request.
///
/// Implementations only move bytes and decode the reply; Id and response
/// code checks happen in [`ClientRequest::resolve`].
pub trait RequestResolver: Send + Sync {
    fn resolve(&self, request: &ClientRequest) -> Result<ClientResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
