/*!
 Drives the decode of a whole container: header, allocator, then the tree.

 Logic referenced from the format descriptions located at:
   - [`DSStoreFormat.pod`](https://metacpan.org/dist/Mac-Finder-DSStore/view/DSStoreFormat.pod)
   - [`.DS_Store` file format](https://wiki.mozilla.org/DS_Store_File_Format)
*/

use crate::{
    error::dsstore::DsStoreError,
    util::bud1::{
        allocator::Allocator,
        cursor::ByteCursor,
        header::{Header, ALIGNMENT},
        models::{Diagnostic, Diagnostics, RecordSet},
        tree::{TreeInfo, TreeWalker},
    },
};

/// A fully decoded container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsStore {
    pub header: Header,
    pub allocator: Allocator,
    /// Metadata from the master node
    pub tree: TreeInfo,
    /// The decoded entries, merged by name
    pub records: RecordSet,
    /// Every non-fatal problem found while decoding, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

/// Contains the state used to decode a container
#[derive(Debug)]
pub struct DsStoreReader<'a> {
    /// The container we want to decode
    cursor: ByteCursor<'a>,
    diagnostics: Diagnostics,
}

impl<'a> DsStoreReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(buffer),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Decode the container
    ///
    /// Nothing is returned if any fatal error occurs, since a partially walked tree
    /// may be missing fields for any of its records.
    pub fn parse(mut self) -> Result<DsStore, DsStoreError> {
        let header = Header::read(&mut self.cursor, &mut self.diagnostics)?;
        let allocator = Allocator::read(
            &mut self.cursor,
            header.allocator_offset,
            &mut self.diagnostics,
        )?;

        let mut records = RecordSet::new();
        let tree =
            TreeWalker::new(&mut self.cursor, &allocator, &mut self.diagnostics).walk(&mut records)?;

        tracing::debug!(
            records = records.len(),
            fields = records.field_count(),
            "decoded container"
        );

        Ok(DsStore {
            header,
            allocator,
            tree,
            records,
            diagnostics: self.diagnostics.into_inner(),
        })
    }
}

/// Decode the bytes of a `.DS_Store` file
pub fn decode(buffer: &[u8]) -> Result<DsStore, DsStoreError> {
    DsStoreReader::new(buffer).parse()
}

/// Decode a container stored inside a field, which starts at the magic bytes
///
/// Embedded containers omit the leading alignment int, so it is restored before decoding.
pub fn decode_embedded(data: &[u8]) -> Result<DsStore, DsStoreError> {
    let mut buffer = Vec::with_capacity(data.len() + 4);
    buffer.extend(ALIGNMENT.to_be_bytes());
    buffer.extend(data);
    decode(&buffer)
}
