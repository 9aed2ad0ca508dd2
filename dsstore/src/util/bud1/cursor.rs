/*!
 A bounds-checked reader over the raw bytes of a container.
*/

use crate::error::dsstore::DsStoreError;

/// Sequential big-endian reader over an immutable byte buffer
///
/// Every read advances [`ByteCursor::position`] by exactly the number of bytes consumed
/// and fails with [`DsStoreError::OutOfBounds`] if not enough bytes remain.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// The container we want to read
    buffer: &'a [u8],
    /// The current index we are at in the buffer
    idx: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, idx: 0 }
    }

    /// The current read position
    pub fn position(&self) -> usize {
        self.idx
    }

    /// The length of the underlying buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Move to an absolute offset
    ///
    /// This does not check the offset; the next read will fail if it is outside the buffer.
    pub fn seek(&mut self, offset: usize) {
        self.idx = offset;
    }

    /// Read exactly `n` bytes from the buffer
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DsStoreError> {
        let end = self
            .idx
            .checked_add(n)
            .ok_or(DsStoreError::OutOfBounds(usize::MAX, self.buffer.len()))?;
        let range = self
            .buffer
            .get(self.idx..end)
            .ok_or(DsStoreError::OutOfBounds(end, self.buffer.len()))?;
        self.idx = end;
        Ok(range)
    }

    /// Read a single byte
    pub fn read_byte(&mut self) -> Result<u8, DsStoreError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DsStoreError> {
        self.read_bytes(N)?
            .try_into()
            .map_err(DsStoreError::SliceError)
    }

    /// Read a big-endian [`u16`]
    pub fn read_u16(&mut self) -> Result<u16, DsStoreError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian [`u32`]
    pub fn read_u32(&mut self) -> Result<u32, DsStoreError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian [`u64`]
    pub fn read_u64(&mut self) -> Result<u64, DsStoreError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read `n` bytes that must all be ASCII, i.e. a block name, field code, or type tag
    pub fn read_ascii(&mut self, n: usize) -> Result<String, DsStoreError> {
        let bytes = self.read_bytes(n)?;
        if !bytes.is_ascii() {
            return Err(DsStoreError::AsciiParseError(bytes.to_vec()));
        }
        // ASCII is always valid UTF-8
        Ok(bytes.iter().map(|&byte| byte as char).collect())
    }

    /// Read `n` UTF-16 code units stored big-endian, i.e. `2 * n` bytes
    pub fn read_utf16(&mut self, n: usize) -> Result<String, DsStoreError> {
        let size = n
            .checked_mul(2)
            .ok_or(DsStoreError::OutOfBounds(usize::MAX, self.buffer.len()))?;
        let units: Vec<u16> = self
            .read_bytes(size)?
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(DsStoreError::Utf16ParseError)
    }
}
