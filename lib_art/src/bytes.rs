//! Fixed-width integer encoding shared by every container format.
//!
//! PNG fields are big-endian, BMP and ICO fields are little-endian. Record
//! types never call `to_be_bytes`/`to_le_bytes` themselves; they go through
//! [`ByteWriter`] and [`ByteReader`] so the byte order of every field is
//! decided here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ByteReadError {
    #[error("Unexpected end of data at offset {offset}: needed {needed}, {available} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends `count` zero bytes.
    pub fn put_zeros(&mut self, count: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + count, 0);
        self
    }

    pub fn put_u32_be(&mut self, value: u32) -> &mut Self {
        self.put_bytes(&value.to_be_bytes())
    }

    pub fn put_u16_le(&mut self, value: u16) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u32_le(&mut self, value: u32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_i32_le(&mut self, value: i32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ByteReadError> {
        if count > self.remaining() {
            return Err(ByteReadError::UnexpectedEof {
                offset: self.cursor,
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.cursor..self.cursor + count];
        self.cursor += count;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ByteReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ByteReadError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_tag(&mut self) -> Result<[u8; 4], ByteReadError> {
        self.read_array()
    }

    pub fn read_u32_be(&mut self) -> Result<u32, ByteReadError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ByteReadError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, ByteReadError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32, ByteReadError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order() {
        let mut writer = ByteWriter::new();
        writer
            .put_u32_be(0x0102_0304)
            .put_u32_le(0x0102_0304)
            .put_u16_le(0xABCD)
            .put_i32_le(-2);

        assert_eq!(
            writer.into_inner(),
            vec![1, 2, 3, 4, 4, 3, 2, 1, 0xCD, 0xAB, 0xFE, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_reader_reads_back_fields() {
        let data = [0, 0, 0, 64, 0xC6, 0xFE, 0xFF, 0xFF, 22, 0];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.read_u32_be().unwrap(), 64);
        assert_eq!(reader.read_i32_le().unwrap(), -314);
        assert_eq!(reader.read_u16_le().unwrap(), 22);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_reader_truncated() {
        let data = [1, 2, 3];
        let mut reader = ByteReader::new(&data);
        reader.read_u8().unwrap();

        assert_eq!(
            reader.read_u32_le(),
            Err(ByteReadError::UnexpectedEof {
                offset: 1,
                needed: 4,
                available: 2
            })
        );
        // A failed read does not move the cursor
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_put_zeros() {
        let mut writer = ByteWriter::new();
        writer.put_u8(7).put_zeros(3);
        assert_eq!(writer.len(), 4);
        assert_eq!(writer.into_inner(), vec![7, 0, 0, 0]);
    }
}
