/*!
 The buddy allocator block: the block offset table, the table of contents, and the free lists.

 Every block in the container is addressed by its index into the offset table. Each table entry
 packs the block's offset and size together: blocks are aligned to 32 bytes, so the low 5 bits
 hold the base-2 logarithm of the size and the remaining bits hold the offset.
*/

use std::collections::BTreeMap;

use crate::{
    error::dsstore::DsStoreError,
    util::bud1::{
        cursor::ByteCursor,
        header::ADDRESS_BASE,
        models::{Diagnostic, Diagnostics},
    },
};

/// Distance from the start of the allocator to the table of contents
pub const DIRECTORY_OFFSET: usize = 0x408;
/// The only table of contents key the format uses, naming the master node
pub const MASTER_KEY: &str = "DSDB";
/// There is one free list for each size class from `2^0` to `2^31`
pub const NUM_FREE_LISTS: usize = 32;

/// A byte range in the container, resolved from the offset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: u32,
    /// Absolute position of the block in the buffer
    pub offset: usize,
    /// Declared size of the block; informational only, reads are not limited to it
    pub size: u64,
}

impl Block {
    /// Unpack an offset table entry
    pub fn from_entry(id: u32, entry: u32) -> Self {
        Self {
            id,
            offset: ADDRESS_BASE + (entry >> 5 << 5) as usize,
            size: 1 << (entry & 0x1F),
        }
    }
}

/// The parsed allocator block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocator {
    /// Raw offset table entries, indexed by block id
    pub offsets: Vec<u32>,
    /// Block names mapped to block ids
    pub directory: BTreeMap<String, u32>,
    /// Free block ids for each size class, indexed by the base-2 logarithm of the size
    pub free_lists: Vec<Vec<u32>>,
    /// The block id of the master node
    pub master_id: u32,
}

impl Allocator {
    /// Read the allocator block found at `allocator_offset`
    pub(crate) fn read(
        cursor: &mut ByteCursor,
        allocator_offset: usize,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, DsStoreError> {
        cursor.seek(allocator_offset);

        // Offsets
        let num_offsets = cursor.read_u32()?;
        let reserved = cursor.read_u32()?;
        if reserved != 0 {
            diagnostics.warn(Diagnostic::NonZeroAllocatorReserved(reserved));
        }
        let offsets = (0..num_offsets)
            .map(|_| cursor.read_u32())
            .collect::<Result<Vec<_>, _>>()?;

        // The table of contents is at a fixed position regardless of how many offsets there are
        cursor.seek(allocator_offset + DIRECTORY_OFFSET);
        let mut directory = BTreeMap::new();
        let num_keys = cursor.read_u32()?;
        for _ in 0..num_keys {
            let key_length = cursor.read_byte()? as usize;
            let key = cursor.read_ascii(key_length)?;
            let block_id = cursor.read_u32()?;
            if key != MASTER_KEY {
                diagnostics.warn(Diagnostic::UnexpectedDirectoryKey(key.clone(), block_id));
            }
            directory.insert(key, block_id);
        }

        let master_id = *directory
            .get(MASTER_KEY)
            .ok_or(DsStoreError::MissingMasterBlock)?;

        // Free lists
        let mut free_lists = Vec::with_capacity(NUM_FREE_LISTS);
        for _ in 0..NUM_FREE_LISTS {
            let count = cursor.read_u32()?;
            free_lists.push(
                (0..count)
                    .map(|_| cursor.read_u32())
                    .collect::<Result<Vec<_>, _>>()?,
            );
        }

        tracing::debug!(
            blocks = offsets.len(),
            keys = directory.len(),
            master_id,
            "read allocator"
        );

        Ok(Self {
            offsets,
            directory,
            free_lists,
            master_id,
        })
    }

    /// Find the offset and size of a block
    pub fn resolve(&self, block_id: u32) -> Result<Block, DsStoreError> {
        self.offsets
            .get(block_id as usize)
            .map(|&entry| Block::from_entry(block_id, entry))
            .ok_or(DsStoreError::InvalidBlockId(block_id, self.offsets.len()))
    }

    /// The free block ids for blocks of `size` bytes, if `size` is a power of two that has a list
    pub fn free_list(&self, size: u64) -> Option<&[u32]> {
        if !size.is_power_of_two() {
            return None;
        }
        self.free_lists
            .get(size.trailing_zeros() as usize)
            .map(Vec::as_slice)
    }
}
