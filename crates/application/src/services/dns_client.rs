use crate::client::{ClientRequest, ClientResponse};
use crate::ports::RequestResolver;
use ferrous_resolve_domain::{
    DomainError, DomainName, Header, Message, Question, RecordType,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Stub resolver client bound to one name server.
///
/// Every call builds a fresh request and performs a single blocking round
/// trip through the configured resolver; nothing is cached between calls.
pub struct DnsClient {
    destination: SocketAddr,
    resolver: Arc<dyn RequestResolver>,
    ids: Mutex<fastrand::Rng>,
    recursion_desired: bool,
}

impl DnsClient {
    pub fn new(destination: SocketAddr, resolver: Arc<dyn RequestResolver>) -> Self {
        Self {
            destination,
            resolver,
            ids: Mutex::new(fastrand::Rng::new()),
            recursion_desired: true,
        }
    }

    /// Seeds the transaction Id generator, making request Ids reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            ids: Mutex::new(fastrand::Rng::with_seed(seed)),
            ..self
        }
    }

    pub fn with_recursion_desired(self, recursion_desired: bool) -> Self {
        Self {
            recursion_desired,
            ..self
        }
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    fn next_id(&self) -> u16 {
        match self.ids.lock() {
            Ok(mut rng) => rng.u16(..),
            Err(poisoned) => poisoned.into_inner().u16(..),
        }
    }

    pub fn create_request(&self, question: Question) -> ClientRequest {
        self.create_request_with_id(question, self.next_id())
    }

    pub fn create_request_with_id(&self, question: Question, id: u16) -> ClientRequest {
        let header = Header {
            recursion_desired: self.recursion_desired,
            ..Header::query(id)
        };
        ClientRequest::new(
            self.destination,
            Message::request(header, vec![question]),
            Arc::clone(&self.resolver),
        )
    }

    /// Resolves `domain` to its A or AAAA addresses.
    pub fn lookup(&self, domain: &str, record_type: RecordType) -> Result<Vec<IpAddr>, DomainError> {
        if !record_type.is_address() {
            return Err(DomainError::UnsupportedQueryType(record_type));
        }

        let response = self.query(domain, record_type)?;
        let addresses: Vec<IpAddr> = response
            .answers_of(record_type)
            .filter_map(|record| record.address_value())
            .collect();

        debug!(
            domain = %domain,
            record_type = %record_type,
            addresses = addresses.len(),
            "Lookup resolved"
        );

        if addresses.is_empty() {
            return Err(DomainError::NoMatchingRecords {
                domain: domain.to_string(),
                record_type,
            });
        }
        Ok(addresses)
    }

    /// Resolves the PTR name for `ip`.
    pub fn reverse(&self, ip: IpAddr) -> Result<DomainName, DomainError> {
        let name = DomainName::pointer_name(ip);
        let request = self.create_request(Question::new(name.clone(), RecordType::PTR));
        let response = request.resolve()?;

        let result = response
            .answers_of(RecordType::PTR)
            .find_map(|record| record.target_name().cloned())
            .ok_or_else(|| DomainError::NoMatchingRecords {
                domain: name.to_string(),
                record_type: RecordType::PTR,
            });
        result
    }

    pub fn reverse_str(&self, ip: &str) -> Result<DomainName, DomainError> {
        let ip: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(ip.to_string()))?;
        self.reverse(ip)
    }

    /// Sends a single question and hands back the whole validated response.
    pub fn query(&self, domain: &str, record_type: RecordType) -> Result<ClientResponse, DomainError> {
        let name = DomainName::parse(domain)?;
        self.create_request(Question::new(name, record_type)).resolve()
    }
}
