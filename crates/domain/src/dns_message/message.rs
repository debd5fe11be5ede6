use super::{Header, Question, Record, ResourceRecord, ResponseCode, WireReader, HEADER_SIZE};
use crate::DomainError;
use bytes::{Bytes, BytesMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

impl MessageKind {
    fn is_response(self) -> bool {
        matches!(self, MessageKind::Response)
    }
}

/// A complete DNS message.
///
/// Requests carry only questions; responses additionally carry the
/// answer, authority and additional sections in the order received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl Message {
    pub fn request(header: Header, questions: Vec<Question>) -> Self {
        Self {
            header: Header {
                response: false,
                ..header
            },
            questions,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn response(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<Record>,
        authorities: Vec<Record>,
        additionals: Vec<Record>,
    ) -> Self {
        Self {
            header: Header {
                response: true,
                ..header
            },
            questions,
            answers,
            authorities,
            additionals,
        }
    }

    pub fn kind(&self) -> MessageKind {
        if self.header.response {
            MessageKind::Response
        } else {
            MessageKind::Request
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn response_code(&self) -> ResponseCode {
        self.header.response_code
    }

    pub fn is_truncated(&self) -> bool {
        self.header.truncated
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    pub fn authorities(&self) -> &[Record] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Header with every count taken from the current section lengths.
    pub fn recomputed_header(&self) -> Result<Header, DomainError> {
        Ok(self.header.with_counts(
            section_count("question", self.questions.len())?,
            section_count("answer", self.answers.len())?,
            section_count("authority", self.authorities.len())?,
            section_count("additional", self.additionals.len())?,
        ))
    }

    pub fn with_recomputed_counts(self) -> Result<Self, DomainError> {
        let header = self.recomputed_header()?;
        Ok(Self { header, ..self })
    }

    pub fn size(&self) -> usize {
        HEADER_SIZE
            + self.questions.iter().map(Question::size).sum::<usize>()
            + self
                .answers
                .iter()
                .chain(&self.authorities)
                .chain(&self.additionals)
                .map(Record::size)
                .sum::<usize>()
    }

    pub fn to_bytes(&self) -> Result<Bytes, DomainError> {
        let mut buf = BytesMut::with_capacity(self.size());
        self.recomputed_header()?.write_to(&mut buf);
        for question in &self.questions {
            question.write_to(&mut buf);
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.write_to(&mut buf)?;
        }
        Ok(buf.freeze())
    }

    /// Decodes a message, checking it is of the `expected` kind.
    ///
    /// A truncated response yields only its questions; the record sections
    /// are left empty so the caller retries over a stream transport.
    pub fn from_bytes(buf: &[u8], expected: MessageKind) -> Result<Self, DomainError> {
        let mut reader = WireReader::new(buf);
        let header = Header::decode(&mut reader)?;

        if header.response != expected.is_response() {
            return Err(DomainError::InvalidMessage(format!(
                "expected a {:?} but the response flag is {}",
                expected, header.response
            )));
        }
        if header.question_count == 0 {
            return Err(DomainError::InvalidMessage(
                "message carries no questions".to_string(),
            ));
        }

        let questions = (0..header.question_count)
            .map(|_| Question::decode(&mut reader))
            .collect::<Result<Vec<_>, _>>()?;

        if !expected.is_response() || header.truncated {
            return Ok(Self {
                header,
                questions,
                answers: Vec::new(),
                authorities: Vec::new(),
                additionals: Vec::new(),
            });
        }

        let answers = decode_records(&mut reader, header.answer_count)?;
        let authorities = decode_records(&mut reader, header.authority_count)?;
        let additionals = decode_records(&mut reader, header.additional_count)?;

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn parse_request(buf: &[u8]) -> Result<Self, DomainError> {
        Self::from_bytes(buf, MessageKind::Request)
    }

    pub fn parse_response(buf: &[u8]) -> Result<Self, DomainError> {
        Self::from_bytes(buf, MessageKind::Response)
    }
}

fn section_count(section: &str, len: usize) -> Result<u16, DomainError> {
    u16::try_from(len).map_err(|_| {
        DomainError::InvalidMessage(format!("{} section holds {} entries", section, len))
    })
}

fn decode_records(reader: &mut WireReader<'_>, count: u16) -> Result<Vec<Record>, DomainError> {
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (resource, data_offset) = ResourceRecord::decode(reader)?;
        records.push(Record::from_resource(resource, reader.buffer(), data_offset)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_record::RecordType;

    fn question(name: &str, record_type: RecordType) -> Question {
        Question::new(name.parse().unwrap(), record_type)
    }

    #[test]
    fn test_request_forces_response_flag_off() {
        let header = Header {
            response: true,
            ..Header::query(1)
        };
        let message = Message::request(header, vec![question("example.com", RecordType::A)]);
        assert_eq!(message.kind(), MessageKind::Request);
        assert!(!message.header().response);
    }

    #[test]
    fn test_counts_recomputed_on_encode() {
        let header = Header::query(9).with_counts(5, 5, 5, 5);
        let message = Message::request(header, vec![question("example.com", RecordType::A)]);
        let bytes = message.to_bytes().unwrap();
        let decoded = Header::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.question_count, 1);
        assert_eq!(decoded.answer_count, 0);
        assert_eq!(decoded.authority_count, 0);
        assert_eq!(decoded.additional_count, 0);
        assert_eq!(bytes.len(), message.size());
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let message = Message::request(Header::query(9), vec![question("example.com", RecordType::A)]);
        let bytes = message.to_bytes().unwrap();
        assert!(matches!(
            Message::parse_response(&bytes),
            Err(DomainError::InvalidMessage(_))
        ));
        assert!(Message::parse_request(&bytes).is_ok());
    }

    #[test]
    fn test_zero_questions_rejected() {
        let header = Header {
            response: true,
            ..Header::query(3)
        };
        let bytes = header.to_bytes();
        assert!(matches!(
            Message::parse_response(&bytes),
            Err(DomainError::InvalidMessage(_))
        ));
    }
}
