/*!
 Traversal of the B-tree that holds the container's entries.

 The `DSDB` block is a master node describing the tree. Every other node starts with the id of
 its rightmost child (`0` for leaves) and an entry count. Internal nodes interleave child ids
 with entries, so an in-order walk visits `child, entry, child, entry, ..., rightmost child`.
 Each entry is a UTF-16 file name, a 4 character field code, and a [`TypedValue`].
*/

use std::collections::HashSet;

use crate::{
    error::dsstore::DsStoreError,
    util::bud1::{
        allocator::Allocator,
        cursor::ByteCursor,
        models::{Diagnostic, Diagnostics, RecordSet},
        value::read_value,
    },
};

/// Expected value of the last integer of the master node
pub const PAGE_SIZE: u32 = 0x1000;
/// How deep the walk may recurse before we treat the tree as corrupt
///
/// Real trees are rarely more than a few levels deep; the declared height is read from
/// the file and cannot be trusted on its own.
pub const MAX_TREE_DEPTH: usize = 64;

/// Metadata stored in the master node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInfo {
    pub root_id: u32,
    /// Number of levels below the master node
    pub height: u32,
    /// Number of entries in the whole tree
    pub num_records: u32,
    /// Number of nodes in the whole tree
    pub num_nodes: u32,
    pub page_size: u32,
}

/// Walks the tree, writing every entry it finds into a [`RecordSet`]
pub(crate) struct TreeWalker<'a, 'b> {
    cursor: &'b mut ByteCursor<'a>,
    allocator: &'b Allocator,
    diagnostics: &'b mut Diagnostics,
    /// The height declared by the master node, once read
    declared_height: Option<u32>,
    /// Whether we already warned about exceeding the declared height
    height_exceeded: bool,
    /// Number of entries emitted so far
    entries: usize,
    /// Ids of every node read so far, the master node included
    visited: HashSet<u32>,
}

impl<'a, 'b> TreeWalker<'a, 'b> {
    pub(crate) fn new(
        cursor: &'b mut ByteCursor<'a>,
        allocator: &'b Allocator,
        diagnostics: &'b mut Diagnostics,
    ) -> Self {
        Self {
            cursor,
            allocator,
            diagnostics,
            declared_height: None,
            height_exceeded: false,
            entries: 0,
            visited: HashSet::new(),
        }
    }

    /// Read the master node, then walk the whole tree below it
    pub(crate) fn walk(mut self, records: &mut RecordSet) -> Result<TreeInfo, DsStoreError> {
        let master = self.allocator.resolve(self.allocator.master_id)?;
        self.visited.insert(self.allocator.master_id);
        self.cursor.seek(master.offset);

        let info = TreeInfo {
            root_id: self.cursor.read_u32()?,
            height: self.cursor.read_u32()?,
            num_records: self.cursor.read_u32()?,
            num_nodes: self.cursor.read_u32()?,
            page_size: self.cursor.read_u32()?,
        };
        if info.page_size != PAGE_SIZE {
            self.diagnostics
                .warn(Diagnostic::UnexpectedPageSize(info.page_size));
        }
        tracing::debug!(
            root_id = info.root_id,
            height = info.height,
            num_records = info.num_records,
            num_nodes = info.num_nodes,
            "read master node"
        );

        self.declared_height = Some(info.height);
        self.walk_node(info.root_id, 0, records)?;

        if self.entries != info.num_records as usize {
            self.diagnostics.warn(Diagnostic::RecordCountMismatch {
                declared: info.num_records,
                found: self.entries,
            });
        }

        Ok(info)
    }

    /// Walk the node `node_id` and all of its children in order
    ///
    /// `depth` is the number of levels above this node; the root is at depth `0`.
    fn walk_node(
        &mut self,
        node_id: u32,
        depth: usize,
        records: &mut RecordSet,
    ) -> Result<(), DsStoreError> {
        if depth >= MAX_TREE_DEPTH {
            return Err(DsStoreError::TreeTooDeep(MAX_TREE_DEPTH));
        }
        // A B-tree never shares a node, so a second visit means a cycle or a shared child
        if !self.visited.insert(node_id) {
            return Err(DsStoreError::CyclicTree(node_id));
        }
        self.check_height(depth);

        let block = self.allocator.resolve(node_id)?;
        self.cursor.seek(block.offset);

        // The rightmost child, or `0` if this node is a leaf
        let next_id = self.cursor.read_u32()?;
        let num_entries = self.cursor.read_u32()?;
        tracing::debug!(node_id, depth, next_id, num_entries, "walking node");

        for _ in 0..num_entries {
            if next_id != 0 {
                let child_id = self.cursor.read_u32()?;
                let resume = self.cursor.position();
                self.walk_node(child_id, depth + 1, records)?;
                self.cursor.seek(resume);
            }
            self.read_entry(records)?;
        }

        if next_id != 0 {
            self.walk_node(next_id, depth + 1, records)?;
        }

        Ok(())
    }

    /// Read a single `(name, field, value)` entry at the cursor
    fn read_entry(&mut self, records: &mut RecordSet) -> Result<(), DsStoreError> {
        let name_length = self.cursor.read_u32()? as usize;
        let name = self.cursor.read_utf16(name_length)?;
        let field = self.cursor.read_ascii(4)?;
        let value = read_value(self.cursor)?;

        records.insert(name, field, value);
        self.entries += 1;
        Ok(())
    }

    fn check_height(&mut self, depth: usize) {
        if let Some(declared) = self.declared_height {
            // A tree of height `h` has nodes at depths `0` through `h`
            if depth > declared as usize && !self.height_exceeded {
                self.height_exceeded = true;
                self.diagnostics
                    .warn(Diagnostic::TreeHeightExceeded { declared, depth });
            }
        }
    }
}
