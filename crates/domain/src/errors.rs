use crate::dns_message::{Message, ResponseCode};
use crate::dns_record::RecordType;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Label '{label}' is {len} bytes long (max 63)")]
    LabelTooLong { label: String, len: usize },

    #[error("Domain name is {len} bytes long on the wire (max 255)")]
    NameTooLong { len: usize },

    #[error("Invalid label pattern 0x{byte:02x} at offset {offset}")]
    InvalidLabelPattern { offset: usize, byte: u8 },

    #[error("Compression pointer chain starting at offset {offset} does not terminate")]
    PointerLoop { offset: usize },

    #[error("Label at offset {offset} is not valid ASCII text")]
    InvalidLabelText { offset: usize },

    #[error("Unexpected end of buffer at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEndOfBuffer { offset: usize, needed: usize },

    #[error("Invalid DNS message: {0}")]
    InvalidMessage(String),

    #[error("Response id mismatch: expected {expected}, received {actual}")]
    MismatchedId {
        expected: u16,
        actual: u16,
        response: Box<Message>,
    },

    #[error("DNS server returned {code}")]
    ErrorResponse {
        code: ResponseCode,
        response: Box<Message>,
    },

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Unexpected end of stream: expected {expected} bytes, received {received}")]
    UnexpectedEndOfStream { expected: usize, received: usize },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unsupported query type for address lookup: {0}")]
    UnsupportedQueryType(RecordType),

    #[error("No matching {record_type} records for {domain}")]
    NoMatchingRecords {
        domain: String,
        record_type: RecordType,
    },
}

impl DomainError {
    /// Decoded message carried by protocol errors, if any.
    pub fn response(&self) -> Option<&Message> {
        match self {
            Self::MismatchedId { response, .. } | Self::ErrorResponse { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportIo { .. }
                | Self::UnexpectedEndOfStream { .. }
                | Self::RequestFailed(_)
        )
    }

    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomainName(_)
                | Self::LabelTooLong { .. }
                | Self::NameTooLong { .. }
                | Self::InvalidLabelPattern { .. }
                | Self::PointerLoop { .. }
                | Self::InvalidLabelText { .. }
                | Self::UnexpectedEndOfBuffer { .. }
        )
    }
}
