use crate::DomainError;

/// Bounds-checked big-endian cursor over a received message.
///
/// Offsets are always absolute positions in the full message so that
/// compression pointers can be resolved against the same buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn ensure(&self, len: usize) -> Result<(), DomainError> {
        if self.remaining() < len {
            return Err(DomainError::UnexpectedEndOfBuffer {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        self.ensure(1)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        self.ensure(2)?;
        let value = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DomainError> {
        self.ensure(len)?;
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian() {
        let buf = [0x01, 0x02, 0x00, 0x00, 0x01, 0x2c, 0xff];
        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_u32().unwrap(), 300);
        assert_eq!(reader.read_u8().unwrap(), 0xff);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let buf = [0x00, 0x01, 0x02];
        let mut reader = WireReader::at(&buf, 2);
        match reader.read_u16() {
            Err(DomainError::UnexpectedEndOfBuffer { offset, needed }) => {
                assert_eq!(offset, 2);
                assert_eq!(needed, 1);
            }
            other => panic!("expected end of buffer, got {:?}", other),
        }
        assert_eq!(reader.position(), 2, "failed read must not advance");
    }
}
