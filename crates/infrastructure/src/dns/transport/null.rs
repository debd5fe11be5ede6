use ferrous_resolve_application::{ClientRequest, ClientResponse, RequestResolver};
use ferrous_resolve_domain::DomainError;

/// Resolver that fails every request. Used as the UDP fallback when TCP
/// retries are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl RequestResolver for NullResolver {
    fn resolve(&self, request: &ClientRequest) -> Result<ClientResponse, DomainError> {
        Err(DomainError::RequestFailed(format!(
            "no resolver available for request {} to {}",
            request.id(),
            request.destination()
        )))
    }

    fn protocol_name(&self) -> &'static str {
        "NULL"
    }
}
