//! DNS wire message model (RFC 1035 §4).
//!
//! Everything here is a plain value: a [`Message`] is assembled once, encoded
//! with [`Message::to_bytes`] and decoded with [`Message::from_bytes`]. Header
//! counts are always derived from the section lengths at encode time.

mod domain_name;
mod header;
mod message;
mod question;
mod reader;
mod record;
mod resource_record;

pub use domain_name::{DomainName, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use header::{Header, OpCode, ResponseCode, HEADER_SIZE};
pub use message::{Message, MessageKind};
pub use question::Question;
pub use reader::WireReader;
pub use record::{MailExchange, Record, RecordData, Service, StartOfAuthority};
pub use resource_record::{ResourceRecord, RECORD_TAIL_SIZE};
