/*!
 Errors that can happen when decoding a `Bud1` container, i.e. a `.DS_Store` file.
*/

use std::{
    array::TryFromSliceError,
    fmt::{Display, Formatter, Result},
    string::FromUtf16Error,
};

/// Fatal errors that abort decoding of the whole container
#[derive(Debug)]
pub enum DsStoreError {
    /// A read needed bytes up to the first index, but the buffer has only the second index bytes
    OutOfBounds(usize, usize),
    /// The table of contents has no `DSDB` entry pointing at the master node
    MissingMasterBlock,
    /// A typed value used a tag we do not know the payload length of
    UnsupportedValueType(String),
    /// A block id that does not index the offset table, and the length of that table
    InvalidBlockId(u32, usize),
    /// The tree walk descended deeper than we are willing to recurse
    TreeTooDeep(usize),
    /// The tree walk reached the same node id twice
    CyclicTree(u32),
    SliceError(TryFromSliceError),
    Utf16ParseError(FromUtf16Error),
    AsciiParseError(Vec<u8>),
}

impl Display for DsStoreError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            DsStoreError::OutOfBounds(idx, len) => {
                write!(fmt, "Index {idx:x} is outside of range {len:x}!")
            }
            DsStoreError::MissingMasterBlock => {
                write!(fmt, "Key 'DSDB' not found in table of contents!")
            }
            DsStoreError::UnsupportedValueType(tag) => {
                write!(fmt, "Unrecognized data type {tag:?}!")
            }
            DsStoreError::InvalidBlockId(id, len) => {
                write!(fmt, "Block {id} is not in offset table of length {len}!")
            }
            DsStoreError::TreeTooDeep(depth) => {
                write!(fmt, "Tree nesting exceeded maximum depth of {depth}!")
            }
            DsStoreError::CyclicTree(id) => {
                write!(fmt, "Node {id} is reachable more than once in the tree!")
            }
            DsStoreError::SliceError(why) => {
                write!(fmt, "Unable to slice source buffer: {why}")
            }
            DsStoreError::Utf16ParseError(why) => write!(fmt, "Failed to parse name: {why}"),
            DsStoreError::AsciiParseError(bytes) => {
                write!(fmt, "Bytes 0x{} are not ASCII!", hex::encode(bytes))
            }
        }
    }
}

impl std::error::Error for DsStoreError {}
