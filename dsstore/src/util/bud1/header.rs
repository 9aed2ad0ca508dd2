/*!
 The fixed header at the start of every container.
*/

use crate::{
    error::dsstore::DsStoreError,
    util::bud1::{
        cursor::ByteCursor,
        models::{Diagnostic, Diagnostics},
    },
};

/// Expected value of the first 4 bytes of the file
pub const ALIGNMENT: u32 = 0x00000001;
/// `Bud1` as a big-endian integer
pub const MAGIC: u32 = 0x42756431;
/// Offsets in the container are relative to the end of the alignment int
pub const ADDRESS_BASE: usize = 0x4;

/// The container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub alignment: u32,
    pub magic: u32,
    /// Absolute position of the allocator block in the buffer
    pub allocator_offset: usize,
    /// Length of the allocator block
    pub allocator_length: u32,
}

impl Header {
    /// Read the header from the start of the buffer
    ///
    /// Unexpected constants are recorded as diagnostics; only a truncated header is an error.
    pub(crate) fn read(
        cursor: &mut ByteCursor,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, DsStoreError> {
        cursor.seek(0);

        let alignment = cursor.read_u32()?;
        if alignment != ALIGNMENT {
            diagnostics.warn(Diagnostic::InvalidAlignment(alignment));
        }

        let magic = cursor.read_u32()?;
        if magic != MAGIC {
            diagnostics.warn(Diagnostic::InvalidMagic(magic));
        }

        let allocator_offset = ADDRESS_BASE + cursor.read_u32()? as usize;
        let allocator_length = cursor.read_u32()?;
        let allocator_offset_repeat = ADDRESS_BASE + cursor.read_u32()? as usize;
        if allocator_offset_repeat != allocator_offset {
            diagnostics.warn(Diagnostic::AllocatorOffsetMismatch(
                allocator_offset,
                allocator_offset_repeat,
            ));
        }

        tracing::debug!(allocator_offset, allocator_length, "read header");

        Ok(Self {
            alignment,
            magic,
            allocator_offset,
            allocator_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::dsstore::DsStoreError,
        util::bud1::{
            cursor::ByteCursor,
            header::Header,
            models::{Diagnostic, Diagnostics},
        },
    };

    fn header_bytes(alignment: u32, magic: &[u8; 4], offset: u32, repeat: u32) -> Vec<u8> {
        let mut bytes = vec![];
        bytes.extend(alignment.to_be_bytes());
        bytes.extend(magic);
        bytes.extend(offset.to_be_bytes());
        bytes.extend(0x800u32.to_be_bytes());
        bytes.extend(repeat.to_be_bytes());
        bytes
    }

    #[test]
    fn can_read_header() {
        let bytes = header_bytes(1, b"Bud1", 0x1000, 0x1000);
        let mut diagnostics = Diagnostics::default();

        let header = Header::read(&mut ByteCursor::new(&bytes), &mut diagnostics).unwrap();

        assert_eq!(header.allocator_offset, 0x1004);
        assert_eq!(header.allocator_length, 0x800);
        assert!(diagnostics.into_inner().is_empty());
    }

    #[test]
    fn can_read_header_with_bad_constants() {
        let bytes = header_bytes(2, b"Bud2", 0x1000, 0x2000);
        let mut diagnostics = Diagnostics::default();

        let header = Header::read(&mut ByteCursor::new(&bytes), &mut diagnostics).unwrap();

        // The first copy of the offset wins
        assert_eq!(header.allocator_offset, 0x1004);
        assert_eq!(
            diagnostics.into_inner(),
            vec![
                Diagnostic::InvalidAlignment(2),
                Diagnostic::InvalidMagic(0x42756432),
                Diagnostic::AllocatorOffsetMismatch(0x1004, 0x2004),
            ]
        );
    }

    #[test]
    fn cant_read_truncated_header() {
        let bytes = header_bytes(1, b"Bud1", 0x1000, 0x1000);
        for length in 0..bytes.len() {
            let mut diagnostics = Diagnostics::default();
            let result = Header::read(&mut ByteCursor::new(&bytes[..length]), &mut diagnostics);
            assert!(matches!(result, Err(DsStoreError::OutOfBounds(_, _))));
        }
    }
}
