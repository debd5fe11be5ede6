#![allow(dead_code)]
use ferrous_resolve_domain::{
    DomainName, Header, Message, Question, Record, RecordType, ResponseCode,
};
use std::net::IpAddr;

pub fn name(s: &str) -> DomainName {
    s.parse().unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub struct ResponseBuilder {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl ResponseBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            header: Header {
                recursion_available: true,
                ..Header::query(id)
            },
            questions: vec![],
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn question(mut self, domain: &str, record_type: RecordType) -> Self {
        self.questions.push(Question::new(name(domain), record_type));
        self
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.answers.push(record);
        self
    }

    pub fn authority(mut self, record: Record) -> Self {
        self.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: Record) -> Self {
        self.additionals.push(record);
        self
    }

    pub fn truncated(mut self, truncated: bool) -> Self {
        self.header.truncated = truncated;
        self
    }

    pub fn response_code(mut self, code: ResponseCode) -> Self {
        self.header.response_code = code;
        self
    }

    pub fn build(self) -> Message {
        Message::response(
            self.header,
            self.questions,
            self.answers,
            self.authorities,
            self.additionals,
        )
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.build().to_bytes().unwrap().to_vec()
    }
}

/// Response for `example.com A` whose answer owner name is a pointer back to
/// the question name at offset 12.
pub fn compressed_a_response(id: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.extend_from_slice(&[0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(b"\x07example\x03com\x00");
    bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    bytes.extend_from_slice(&[
        0xc0, 0x0c,
        0x00, 0x01,
        0x00, 0x01,
        0x00, 0x00, 0x00, 0x3c,
        0x00, 0x04,
        93, 184, 216, 34,
    ]);
    bytes
}
