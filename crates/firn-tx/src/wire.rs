//! Primitive wire codec.
//!
//! All multi-byte integers are big-endian. Reads run against a framed
//! slice and never touch bytes past its end; writes append to a growable
//! buffer. Strings are u16-length-prefixed UTF-8; counts are u32.

use crate::TxError;
use firn_types::constants::{ID_LEN, SHORT_ID_LEN, SIGNATURE_LEN};
use firn_types::ids::{Id, ShortId, Signature};

/// Sequential reader over a framed byte slice.
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], TxError> {
        if count > self.remaining() {
            return Err(TxError::Truncated {
                expected: count,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, TxError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, TxError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, TxError> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, TxError> {
        let b = self.read_bytes(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_id(&mut self) -> Result<Id, TxError> {
        let b = self.read_bytes(ID_LEN)?;
        let mut bytes = [0u8; ID_LEN];
        bytes.copy_from_slice(b);
        Ok(Id(bytes))
    }

    pub fn read_short_id(&mut self) -> Result<ShortId, TxError> {
        let b = self.read_bytes(SHORT_ID_LEN)?;
        let mut bytes = [0u8; SHORT_ID_LEN];
        bytes.copy_from_slice(b);
        Ok(ShortId(bytes))
    }

    pub fn read_signature(&mut self) -> Result<Signature, TxError> {
        let b = self.read_bytes(SIGNATURE_LEN)?;
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes.copy_from_slice(b);
        Ok(Signature(bytes))
    }

    /// u16 length prefix followed by UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String, TxError> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| TxError::InvalidUtf8)
    }

    /// A u32 element count, with the capacity hint clamped to what the
    /// remaining bytes could actually hold.
    pub fn read_count(&mut self, min_elem_size: usize) -> Result<(usize, usize), TxError> {
        let count = self.read_u32()? as usize;
        let capacity = count.min(self.remaining() / min_elem_size.max(1));
        Ok((count, capacity))
    }

    /// Succeeds only when every framed byte was consumed.
    pub fn finish(self) -> Result<(), TxError> {
        if self.remaining() > 0 {
            return Err(TxError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

pub fn put_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

pub fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// u16 length prefix followed by UTF-8 bytes.
pub fn put_string(buf: &mut Vec<u8>, value: &str) {
    debug_assert!(value.len() <= u16::MAX as usize);
    put_u16(buf, value.len() as u16);
    buf.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_roundtrip() {
        let mut buf = Vec::new();
        put_u8(&mut buf, 0xab);
        put_u16(&mut buf, 0x0102);
        put_u32(&mut buf, 0xdeadbeef);
        put_u64(&mut buf, 0x0011223344556677);
        assert_eq!(buf.len(), 15);

        let mut c = Cursor::new(&buf);
        assert_eq!(c.read_u8().unwrap(), 0xab);
        assert_eq!(c.read_u16().unwrap(), 0x0102);
        assert_eq!(c.read_u32().unwrap(), 0xdeadbeef);
        assert_eq!(c.read_u64().unwrap(), 0x0011223344556677);
        c.finish().unwrap();
    }

    #[test]
    fn test_big_endian_layout() {
        let mut buf = Vec::new();
        put_u32(&mut buf, 3);
        assert_eq!(buf, [0x00, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn test_truncated() {
        let mut c = Cursor::new(&[0x01, 0x02]);
        let err = c.read_u32().unwrap_err();
        assert!(matches!(
            err,
            crate::TxError::Truncated {
                expected: 4,
                available: 2
            }
        ));
    }

    #[test]
    fn test_string_roundtrip() {
        let mut buf = Vec::new();
        put_string(&mut buf, "TestAsset");
        assert_eq!(&buf[..2], &[0x00, 0x09]);

        let mut c = Cursor::new(&buf);
        assert_eq!(c.read_string().unwrap(), "TestAsset");
        c.finish().unwrap();
    }

    #[test]
    fn test_invalid_utf8() {
        let buf = [0x00, 0x02, 0xff, 0xfe];
        let mut c = Cursor::new(&buf);
        assert!(matches!(
            c.read_string().unwrap_err(),
            crate::TxError::InvalidUtf8
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let buf = [0x00u8; 5];
        let mut c = Cursor::new(&buf);
        c.read_u32().unwrap();
        assert!(matches!(
            c.finish().unwrap_err(),
            crate::TxError::TrailingBytes { remaining: 1 }
        ));
    }
}
