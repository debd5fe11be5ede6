use crate::DomainError;
use bytes::{BufMut, BytesMut};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
/// Longest name on the wire, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0xC0;
const LABEL_TAG: u8 = 0x00;

/// A domain name as an ordered list of ASCII labels.
///
/// Equality, hashing and ordering use the dotted form exactly as received;
/// no case folding is applied.
#[derive(Debug, Clone, Default)]
pub struct DomainName {
    labels: SmallVec<[String; 4]>,
}

impl DomainName {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        Self::from_labels(trimmed.split('.'))
    }

    pub fn from_labels<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = SmallVec::new();
        for label in labels {
            let label = label.into();
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName("empty label".to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::LabelTooLong {
                    len: label.len(),
                    label,
                });
            }
            if !label.is_ascii() {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' is not ASCII",
                    label
                )));
            }
            out.push(label);
        }
        let name = Self { labels: out };
        let len = name.wire_len();
        if len > MAX_NAME_LEN {
            return Err(DomainError::NameTooLong { len });
        }
        Ok(name)
    }

    /// Reverse-lookup name for an address: `in-addr.arpa` with the octets
    /// reversed for IPv4, `ip6.arpa` with the nibbles reversed for IPv6.
    pub fn pointer_name(ip: IpAddr) -> Self {
        let mut labels: SmallVec<[String; 4]> = SmallVec::new();
        match ip {
            IpAddr::V4(v4) => {
                labels.extend(v4.octets().iter().rev().map(|octet| octet.to_string()));
                labels.push("in-addr".to_string());
            }
            IpAddr::V6(v6) => {
                for byte in v6.octets().iter().rev() {
                    labels.push(format!("{:x}", byte & 0x0F));
                    labels.push(format!("{:x}", byte >> 4));
                }
                labels.push("ip6".to_string());
            }
        }
        labels.push("arpa".to_string());
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uncompressed wire length including the terminating zero byte.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        for label in &self.labels {
            buf.put_u8(label.len() as u8);
            buf.put_slice(label.as_bytes());
        }
        buf.put_u8(0);
    }

    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.to_vec()
    }

    /// Encodes a dotted name into length-prefixed labels.
    pub fn encode(name: &str) -> Result<Vec<u8>, DomainError> {
        Ok(Self::parse(name)?.to_wire())
    }

    /// Decodes a name starting at `offset`, following compression pointers.
    ///
    /// The returned offset is the position right after the terminating zero
    /// byte, or right after the first pointer when the name is compressed.
    pub fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let mut labels = SmallVec::new();
        let mut pos = offset;
        let mut end = None;
        let mut hops = 0usize;
        let mut wire_len = 1usize;

        loop {
            let tag = *buffer
                .get(pos)
                .ok_or(DomainError::UnexpectedEndOfBuffer {
                    offset: pos,
                    needed: 1,
                })?;

            match tag & POINTER_TAG {
                LABEL_TAG if tag == 0 => {
                    pos += 1;
                    break;
                }
                LABEL_TAG => {
                    let start = pos + 1;
                    let stop = start + tag as usize;
                    let bytes = buffer
                        .get(start..stop)
                        .ok_or(DomainError::UnexpectedEndOfBuffer {
                            offset: start,
                            needed: stop.saturating_sub(buffer.len()),
                        })?;
                    let label = std::str::from_utf8(bytes)
                        .ok()
                        .filter(|text| text.is_ascii())
                        .ok_or(DomainError::InvalidLabelText { offset: start })?;
                    wire_len += bytes.len() + 1;
                    if wire_len > MAX_NAME_LEN {
                        return Err(DomainError::NameTooLong { len: wire_len });
                    }
                    labels.push(label.to_string());
                    pos = stop;
                }
                POINTER_TAG => {
                    let low = *buffer
                        .get(pos + 1)
                        .ok_or(DomainError::UnexpectedEndOfBuffer {
                            offset: pos + 1,
                            needed: 1,
                        })?;
                    if end.is_none() {
                        end = Some(pos + 2);
                    }
                    // A chain that never revisits a position takes fewer
                    // hops than there are bytes in the message.
                    hops += 1;
                    if hops > buffer.len() {
                        return Err(DomainError::PointerLoop { offset });
                    }
                    pos = (((tag & !POINTER_TAG) as usize) << 8) | low as usize;
                }
                _ => {
                    return Err(DomainError::InvalidLabelPattern {
                        offset: pos,
                        byte: tag,
                    })
                }
            }
        }

        Ok((Self { labels }, end.unwrap_or(pos)))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for DomainName {}

impl Hash for DomainName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialOrd for DomainName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DomainName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}
