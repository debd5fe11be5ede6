use super::{DomainName, ResourceRecord, WireReader};
use crate::dns_record::{RecordClass, RecordType};
use crate::DomainError;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailExchange {
    pub preference: u16,
    pub exchange: DomainName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOfAuthority {
    pub master: DomainName,
    pub responsible: DomainName,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum_ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: DomainName,
}

/// Parsed form of a record's data section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Generic,
    Address(IpAddr),
    Alias(DomainName),
    NameServer(DomainName),
    Pointer(DomainName),
    MailExchange(MailExchange),
    StartOfAuthority(StartOfAuthority),
    Text(Vec<String>),
    Service(Service),
}

/// A resource record together with its typed data.
///
/// The wire form is always the wrapped [`ResourceRecord`], so a decoded
/// record re-encodes to exactly the bytes it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    resource: ResourceRecord,
    data: RecordData,
}

impl Record {
    /// Wraps a record without interpreting its data.
    pub fn generic(resource: ResourceRecord) -> Self {
        Self {
            resource,
            data: RecordData::Generic,
        }
    }

    pub fn address(name: DomainName, ttl: u32, address: IpAddr) -> Self {
        let (record_type, bytes) = match address {
            IpAddr::V4(v4) => (RecordType::A, v4.octets().to_vec()),
            IpAddr::V6(v6) => (RecordType::AAAA, v6.octets().to_vec()),
        };
        Self {
            resource: ResourceRecord::new(name, record_type, ttl, bytes),
            data: RecordData::Address(address),
        }
    }

    pub fn alias(name: DomainName, ttl: u32, target: DomainName) -> Self {
        Self {
            resource: ResourceRecord::new(name, RecordType::CNAME, ttl, target.to_wire()),
            data: RecordData::Alias(target),
        }
    }

    pub fn name_server(name: DomainName, ttl: u32, server: DomainName) -> Self {
        Self {
            resource: ResourceRecord::new(name, RecordType::NS, ttl, server.to_wire()),
            data: RecordData::NameServer(server),
        }
    }

    pub fn pointer(name: DomainName, ttl: u32, target: DomainName) -> Self {
        Self {
            resource: ResourceRecord::new(name, RecordType::PTR, ttl, target.to_wire()),
            data: RecordData::Pointer(target),
        }
    }

    pub fn mail_exchange(name: DomainName, ttl: u32, preference: u16, exchange: DomainName) -> Self {
        let mut buf = BytesMut::with_capacity(2 + exchange.wire_len());
        buf.put_u16(preference);
        exchange.write_to(&mut buf);
        Self {
            resource: ResourceRecord::new(name, RecordType::MX, ttl, buf.freeze()),
            data: RecordData::MailExchange(MailExchange {
                preference,
                exchange,
            }),
        }
    }

    pub fn start_of_authority(name: DomainName, ttl: u32, soa: StartOfAuthority) -> Self {
        let mut buf = BytesMut::with_capacity(soa.master.wire_len() + soa.responsible.wire_len() + 20);
        soa.master.write_to(&mut buf);
        soa.responsible.write_to(&mut buf);
        buf.put_u32(soa.serial);
        buf.put_u32(soa.refresh);
        buf.put_u32(soa.retry);
        buf.put_u32(soa.expire);
        buf.put_u32(soa.minimum_ttl);
        Self {
            resource: ResourceRecord::new(name, RecordType::SOA, ttl, buf.freeze()),
            data: RecordData::StartOfAuthority(soa),
        }
    }

    pub fn text(name: DomainName, ttl: u32, strings: Vec<String>) -> Result<Self, DomainError> {
        let mut buf = BytesMut::new();
        for s in &strings {
            let len = u8::try_from(s.len()).map_err(|_| {
                DomainError::InvalidMessage(format!(
                    "TXT string of {} bytes exceeds 255",
                    s.len()
                ))
            })?;
            buf.put_u8(len);
            buf.put_slice(s.as_bytes());
        }
        Ok(Self {
            resource: ResourceRecord::new(name, RecordType::TXT, ttl, buf.freeze()),
            data: RecordData::Text(strings),
        })
    }

    pub fn service(name: DomainName, ttl: u32, service: Service) -> Self {
        let mut buf = BytesMut::with_capacity(6 + service.target.wire_len());
        buf.put_u16(service.priority);
        buf.put_u16(service.weight);
        buf.put_u16(service.port);
        service.target.write_to(&mut buf);
        Self {
            resource: ResourceRecord::new(name, RecordType::SRV, ttl, buf.freeze()),
            data: RecordData::Service(service),
        }
    }

    /// Builds the typed record for a decoded resource record.
    ///
    /// `message` is the full message the record was read from and
    /// `data_offset` the absolute position of its data, so that compressed
    /// names inside the data resolve against the whole message. Types with
    /// no typed form come back as [`RecordData::Generic`].
    pub fn from_resource(
        resource: ResourceRecord,
        message: &[u8],
        data_offset: usize,
    ) -> Result<Self, DomainError> {
        let data_end = data_offset + resource.data.len();
        let data = match resource.record_type {
            RecordType::A => RecordData::Address(IpAddr::V4(decode_ipv4(&resource)?)),
            RecordType::AAAA => RecordData::Address(IpAddr::V6(decode_ipv6(&resource)?)),
            RecordType::CNAME => RecordData::Alias(decode_name(message, data_offset, data_end)?.0),
            RecordType::NS => {
                RecordData::NameServer(decode_name(message, data_offset, data_end)?.0)
            }
            RecordType::PTR => RecordData::Pointer(decode_name(message, data_offset, data_end)?.0),
            RecordType::MX => {
                let mut reader = WireReader::at(scoped(message, data_end)?, data_offset);
                let preference = reader.read_u16()?;
                let (exchange, _) = decode_name(message, reader.position(), data_end)?;
                RecordData::MailExchange(MailExchange {
                    preference,
                    exchange,
                })
            }
            RecordType::SOA => {
                let (master, next) = decode_name(message, data_offset, data_end)?;
                let (responsible, next) = decode_name(message, next, data_end)?;
                let mut reader = WireReader::at(scoped(message, data_end)?, next);
                RecordData::StartOfAuthority(StartOfAuthority {
                    master,
                    responsible,
                    serial: reader.read_u32()?,
                    refresh: reader.read_u32()?,
                    retry: reader.read_u32()?,
                    expire: reader.read_u32()?,
                    minimum_ttl: reader.read_u32()?,
                })
            }
            RecordType::TXT => RecordData::Text(decode_text(&resource.data)?),
            RecordType::SRV => {
                let mut reader = WireReader::at(scoped(message, data_end)?, data_offset);
                let priority = reader.read_u16()?;
                let weight = reader.read_u16()?;
                let port = reader.read_u16()?;
                let (target, _) = decode_name(message, reader.position(), data_end)?;
                RecordData::Service(Service {
                    priority,
                    weight,
                    port,
                    target,
                })
            }
            _ => RecordData::Generic,
        };

        Ok(Self { resource, data })
    }

    pub fn resource(&self) -> &ResourceRecord {
        &self.resource
    }

    pub fn into_resource(self) -> ResourceRecord {
        self.resource
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn name(&self) -> &DomainName {
        &self.resource.name
    }

    pub fn record_type(&self) -> RecordType {
        self.resource.record_type
    }

    pub fn class(&self) -> RecordClass {
        self.resource.class
    }

    pub fn ttl(&self) -> u32 {
        self.resource.ttl
    }

    pub fn raw_data(&self) -> &Bytes {
        &self.resource.data
    }

    pub fn address_value(&self) -> Option<IpAddr> {
        match &self.data {
            RecordData::Address(ip) => Some(*ip),
            _ => None,
        }
    }

    /// Target name of alias, name-server and pointer records.
    pub fn target_name(&self) -> Option<&DomainName> {
        match &self.data {
            RecordData::Alias(name) | RecordData::NameServer(name) | RecordData::Pointer(name) => {
                Some(name)
            }
            _ => None,
        }
    }

    pub fn size(&self) -> usize {
        self.resource.size()
    }

    pub fn write_to(&self, buf: &mut BytesMut) -> Result<(), DomainError> {
        self.resource.write_to(buf)
    }

    pub fn to_bytes(&self) -> Result<Bytes, DomainError> {
        let mut buf = BytesMut::with_capacity(self.size());
        self.write_to(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Zone file presentation: `name. ttl CLASS TYPE data`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.\t{}\t{}\t{}\t",
            self.name(),
            self.ttl(),
            self.class(),
            self.record_type()
        )?;
        match &self.data {
            RecordData::Generic => {
                // RFC 3597 unknown-type notation
                write!(f, "\\# {}", self.resource.data.len())?;
                if !self.resource.data.is_empty() {
                    f.write_str(" ")?;
                }
                for byte in self.resource.data.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            RecordData::Address(address) => write!(f, "{}", address),
            RecordData::Alias(name) | RecordData::NameServer(name) | RecordData::Pointer(name) => {
                write!(f, "{}.", name)
            }
            RecordData::MailExchange(mx) => write!(f, "{} {}.", mx.preference, mx.exchange),
            RecordData::StartOfAuthority(soa) => write!(
                f,
                "{}. {}. {} {} {} {} {}",
                soa.master,
                soa.responsible,
                soa.serial,
                soa.refresh,
                soa.retry,
                soa.expire,
                soa.minimum_ttl
            ),
            RecordData::Text(strings) => {
                let quoted: Vec<String> = strings.iter().map(|s| format!("{:?}", s)).collect();
                f.write_str(&quoted.join(" "))
            }
            RecordData::Service(srv) => write!(
                f,
                "{} {} {} {}.",
                srv.priority, srv.weight, srv.port, srv.target
            ),
        }
    }
}

impl From<ResourceRecord> for Record {
    fn from(resource: ResourceRecord) -> Self {
        Self::generic(resource)
    }
}

fn decode_ipv4(resource: &ResourceRecord) -> Result<Ipv4Addr, DomainError> {
    let octets: [u8; 4] = resource.data.as_ref().try_into().map_err(|_| {
        DomainError::InvalidMessage(format!(
            "A record for {} has {} data bytes, expected 4",
            resource.name,
            resource.data.len()
        ))
    })?;
    Ok(Ipv4Addr::from(octets))
}

fn decode_ipv6(resource: &ResourceRecord) -> Result<Ipv6Addr, DomainError> {
    let octets: [u8; 16] = resource.data.as_ref().try_into().map_err(|_| {
        DomainError::InvalidMessage(format!(
            "AAAA record for {} has {} data bytes, expected 16",
            resource.name,
            resource.data.len()
        ))
    })?;
    Ok(Ipv6Addr::from(octets))
}

fn scoped(message: &[u8], data_end: usize) -> Result<&[u8], DomainError> {
    message.get(..data_end).ok_or(DomainError::UnexpectedEndOfBuffer {
        offset: message.len(),
        needed: data_end.saturating_sub(message.len()),
    })
}

/// Decodes a name that starts inside a record's data section.
///
/// Pointers may reach anywhere earlier in the message, but the name's own
/// bytes must not run past the end of the data section.
fn decode_name(
    message: &[u8],
    offset: usize,
    data_end: usize,
) -> Result<(DomainName, usize), DomainError> {
    let (name, end) = DomainName::decode(message, offset)?;
    if end > data_end {
        return Err(DomainError::InvalidMessage(format!(
            "name at offset {} overruns record data ending at {}",
            offset, data_end
        )));
    }
    Ok((name, end))
}

fn decode_text(data: &[u8]) -> Result<Vec<String>, DomainError> {
    let mut reader = WireReader::new(data);
    let mut strings = Vec::new();
    while reader.remaining() > 0 {
        let len = reader.read_u8()? as usize;
        let bytes = reader.read_slice(len)?;
        strings.push(String::from_utf8_lossy(bytes).into_owned());
    }
    Ok(strings)
}
