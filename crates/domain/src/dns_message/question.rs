use super::{DomainName, WireReader};
use crate::dns_record::{RecordClass, RecordType};
use crate::DomainError;
use bytes::{BufMut, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
        }
    }

    pub fn with_class(self, class: RecordClass) -> Self {
        Self { class, ..self }
    }

    pub fn size(&self) -> usize {
        self.name.wire_len() + 4
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        self.name.write_to(buf);
        buf.put_u16(self.record_type.to_u16());
        buf.put_u16(self.class.to_u16());
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let (name, end) = DomainName::decode(reader.buffer(), reader.position())?;
        reader.seek(end);
        let record_type = RecordType::from_u16(reader.read_u16()?);
        let class = RecordClass::from_u16(reader.read_u16()?);

        Ok(Self {
            name,
            record_type,
            class,
        })
    }
}
