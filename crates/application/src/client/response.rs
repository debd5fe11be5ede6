use bytes::Bytes;
use ferrous_resolve_domain::{
    DomainError, Message, Question, Record, RecordType, ResponseCode,
};
use std::net::SocketAddr;

/// A decoded response together with the exact bytes it was decoded from.
#[derive(Debug, Clone)]
pub struct ClientResponse {
    source: SocketAddr,
    message: Message,
    raw: Bytes,
}

impl ClientResponse {
    pub fn from_bytes(source: SocketAddr, raw: Bytes) -> Result<Self, DomainError> {
        let message = Message::parse_response(&raw)?;
        Ok(Self {
            source,
            message,
            raw,
        })
    }

    pub fn source(&self) -> SocketAddr {
        self.source
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn id(&self) -> u16 {
        self.message.id()
    }

    pub fn response_code(&self) -> ResponseCode {
        self.message.response_code()
    }

    pub fn is_truncated(&self) -> bool {
        self.message.is_truncated()
    }

    pub fn questions(&self) -> &[Question] {
        self.message.questions()
    }

    pub fn answers(&self) -> &[Record] {
        self.message.answers()
    }

    pub fn authorities(&self) -> &[Record] {
        self.message.authorities()
    }

    pub fn additionals(&self) -> &[Record] {
        self.message.additionals()
    }

    pub fn answers_of(&self, record_type: RecordType) -> impl Iterator<Item = &Record> {
        self.answers()
            .iter()
            .filter(move |record| record.record_type() == record_type)
    }

    /// Size of the received message, not of a re-encoding.
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    pub fn to_bytes(&self) -> Bytes {
        self.raw.clone()
    }
}
