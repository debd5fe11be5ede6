//! ferrous-resolve domain layer: DNS wire model, record types and configuration.
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;

pub use config::Config;
pub use dns_message::{
    DomainName, Header, Message, MessageKind, OpCode, Question, Record, RecordData,
    ResourceRecord, ResponseCode,
};
pub use dns_record::{RecordClass, RecordType};
pub use errors::DomainError;
