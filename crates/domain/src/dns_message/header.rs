use super::WireReader;
use crate::DomainError;
use bytes::{BufMut, BytesMut};
use std::fmt;

pub const HEADER_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpCode {
    #[default]
    Query,
    InverseQuery,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl OpCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::InverseQuery => 1,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::Other(code) => code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => OpCode::Query,
            1 => OpCode::InverseQuery,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            other => OpCode::Other(other),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Query => f.write_str("QUERY"),
            OpCode::InverseQuery => f.write_str("IQUERY"),
            OpCode::Status => f.write_str("STATUS"),
            OpCode::Notify => f.write_str("NOTIFY"),
            OpCode::Update => f.write_str("UPDATE"),
            OpCode::Other(code) => write!(f, "OPCODE{}", code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn as_status(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormatError => "FORMERR",
            ResponseCode::ServerFailure => "SERVFAIL",
            ResponseCode::NameError => "NXDOMAIN",
            ResponseCode::NotImplemented => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Other(code) => write!(f, "RCODE{}", code),
            known => f.write_str(known.as_status()),
        }
    }
}

// Bit positions are counted from the least significant bit of each flag byte.
const QR: (u8, u8) = (7, 1);
const OPCODE: (u8, u8) = (3, 4);
const AA: (u8, u8) = (2, 1);
const TC: (u8, u8) = (1, 1);
const RD: (u8, u8) = (0, 1);
const RA: (u8, u8) = (7, 1);
const Z: (u8, u8) = (4, 3);
const RCODE: (u8, u8) = (0, 4);

fn get_bits(byte: u8, (offset, len): (u8, u8)) -> u8 {
    (byte >> offset) & ((1u8 << len) - 1)
}

fn set_bits(byte: u8, (offset, len): (u8, u8), value: u8) -> u8 {
    let mask = ((1u8 << len) - 1) << offset;
    (byte & !mask) | ((value << offset) & mask)
}

/// The fixed 12-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub response: bool,
    pub opcode: OpCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// The three Z bits, kept only so a decoded header re-encodes unchanged.
    pub reserved: u8,
    pub response_code: ResponseCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Standard recursive query header.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            ..Self::default()
        }
    }

    pub fn with_counts(self, questions: u16, answers: u16, authority: u16, additional: u16) -> Self {
        Self {
            question_count: questions,
            answer_count: answers,
            authority_count: authority,
            additional_count: additional,
            ..self
        }
    }

    pub fn flags(&self) -> u16 {
        let mut high = 0u8;
        high = set_bits(high, QR, self.response as u8);
        high = set_bits(high, OPCODE, self.opcode.to_u8());
        high = set_bits(high, AA, self.authoritative as u8);
        high = set_bits(high, TC, self.truncated as u8);
        high = set_bits(high, RD, self.recursion_desired as u8);

        let mut low = 0u8;
        low = set_bits(low, RA, self.recursion_available as u8);
        low = set_bits(low, Z, self.reserved);
        low = set_bits(low, RCODE, self.response_code.to_u8());

        u16::from_be_bytes([high, low])
    }

    /// Header carrying `id` and the unpacked `flags`, with all counts zero.
    pub fn from_flags(id: u16, flags: u16) -> Self {
        let [high, low] = flags.to_be_bytes();
        Self {
            id,
            response: get_bits(high, QR) == 1,
            opcode: OpCode::from_u8(get_bits(high, OPCODE)),
            authoritative: get_bits(high, AA) == 1,
            truncated: get_bits(high, TC) == 1,
            recursion_desired: get_bits(high, RD) == 1,
            recursion_available: get_bits(low, RA) == 1,
            reserved: get_bits(low, Z),
            response_code: ResponseCode::from_u8(get_bits(low, RCODE)),
            ..Self::default()
        }
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u16(self.id);
        buf.put_u16(self.flags());
        buf.put_u16(self.question_count);
        buf.put_u16(self.answer_count);
        buf.put_u16(self.authority_count);
        buf.put_u16(self.additional_count);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        self.write_to(&mut buf);
        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;
        let question_count = reader.read_u16()?;
        let answer_count = reader.read_u16()?;
        let authority_count = reader.read_u16()?;
        let additional_count = reader.read_u16()?;

        Ok(Self::from_flags(id, flags).with_counts(
            question_count,
            answer_count,
            authority_count,
            additional_count,
        ))
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, DomainError> {
        Self::decode(&mut WireReader::new(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_helpers() {
        assert_eq!(get_bits(0b0111_1000, OPCODE), 0b1111);
        assert_eq!(set_bits(0xFF, OPCODE, 0), 0b1000_0111);
        assert_eq!(set_bits(0x00, Z, 0xFF), 0b0111_0000);
    }

    #[test]
    fn test_query_header_flags() {
        let header = Header::query(0x1234);
        assert_eq!(header.flags(), 0x0100);
        assert_eq!(
            header.with_counts(1, 0, 0, 0).to_bytes(),
            [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_typical_response_flags() {
        let header = Header::from_flags(7, 0x8180);
        assert!(header.response);
        assert!(header.recursion_desired);
        assert!(header.recursion_available);
        assert!(!header.truncated);
        assert_eq!(header.opcode, OpCode::Query);
        assert_eq!(header.response_code, ResponseCode::NoError);
    }

    #[test]
    fn test_nxdomain_flags() {
        let header = Header::from_flags(7, 0x8183);
        assert_eq!(header.response_code, ResponseCode::NameError);
        assert_eq!(header.response_code.to_string(), "NXDOMAIN");
    }

    #[test]
    fn test_decode_short_header_fails() {
        assert!(Header::from_bytes(&[0u8; 11]).is_err());
    }
}
