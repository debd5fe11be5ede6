#![allow(dead_code)]
use bytes::Bytes;
use ferrous_resolve_application::{ClientRequest, ClientResponse, RequestResolver};
use ferrous_resolve_domain::{
    DomainError, DomainName, Header, Message, Record, ResponseCode,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;

type Responder = dyn Fn(&Message) -> Result<Vec<u8>, DomainError> + Send + Sync;

/// Resolver that answers from a closure instead of the network and keeps
/// every request it was handed.
pub struct MockResolver {
    responder: Box<Responder>,
    requests: Mutex<Vec<Message>>,
}

impl MockResolver {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Message) -> Result<Vec<u8>, DomainError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Echoes the question back with `answers` and `code`.
    pub fn answering(answers: Vec<Record>, code: ResponseCode) -> Self {
        Self::new(move |request| Ok(reply(request, answers.clone(), code)))
    }

    pub fn failing(error: DomainError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn requests(&self) -> Vec<Message> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl RequestResolver for MockResolver {
    fn resolve(&self, request: &ClientRequest) -> Result<ClientResponse, DomainError> {
        self.requests.lock().unwrap().push(request.message().clone());
        let raw = (self.responder)(request.message())?;
        ClientResponse::from_bytes(request.destination(), Bytes::from(raw))
    }

    fn protocol_name(&self) -> &'static str {
        "mock"
    }
}

pub fn reply(request: &Message, answers: Vec<Record>, code: ResponseCode) -> Vec<u8> {
    let header = Header {
        recursion_available: true,
        response_code: code,
        ..*request.header()
    };
    Message::response(header, request.questions().to_vec(), answers, vec![], vec![])
        .to_bytes()
        .unwrap()
        .to_vec()
}

pub fn server() -> SocketAddr {
    "192.0.2.53:53".parse().unwrap()
}

pub fn name(s: &str) -> DomainName {
    s.parse().unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}
