use super::{DomainName, WireReader};
use crate::dns_record::{RecordClass, RecordType};
use crate::DomainError;
use bytes::{BufMut, Bytes, BytesMut};

/// Type, class, TTL and data length following the owner name.
pub const RECORD_TAIL_SIZE: usize = 10;

/// A resource record with its data kept as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub data: Bytes,
}

impl ResourceRecord {
    pub fn new(name: DomainName, record_type: RecordType, ttl: u32, data: impl Into<Bytes>) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
            ttl,
            data: data.into(),
        }
    }

    pub fn with_class(self, class: RecordClass) -> Self {
        Self { class, ..self }
    }

    pub fn size(&self) -> usize {
        self.name.wire_len() + RECORD_TAIL_SIZE + self.data.len()
    }

    pub fn write_to(&self, buf: &mut BytesMut) -> Result<(), DomainError> {
        let data_len = u16::try_from(self.data.len()).map_err(|_| {
            DomainError::InvalidMessage(format!(
                "record data for {} is {} bytes (max {})",
                self.name,
                self.data.len(),
                u16::MAX
            ))
        })?;

        self.name.write_to(buf);
        buf.put_u16(self.record_type.to_u16());
        buf.put_u16(self.class.to_u16());
        buf.put_u32(self.ttl);
        buf.put_u16(data_len);
        buf.put_slice(&self.data);
        Ok(())
    }

    /// Decodes one record and returns it with the absolute offset of its data.
    pub fn decode(reader: &mut WireReader<'_>) -> Result<(Self, usize), DomainError> {
        let (name, end) = DomainName::decode(reader.buffer(), reader.position())?;
        reader.seek(end);

        let record_type = RecordType::from_u16(reader.read_u16()?);
        let class = RecordClass::from_u16(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let data_len = reader.read_u16()? as usize;
        let data_offset = reader.position();
        let data = Bytes::copy_from_slice(reader.read_slice(data_len)?);

        Ok((
            Self {
                name,
                record_type,
                class,
                ttl,
                data,
            },
            data_offset,
        ))
    }
}
