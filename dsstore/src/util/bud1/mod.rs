/*!
 Contains logic and data structures used to decode `Bud1` containers, the format of `.DS_Store` files, into native Rust data structures.

 ## Overview

 Finder stores per-folder metadata (icon positions, window geometry, view settings, comments)
 in a hidden `.DS_Store` file. The file is a single container built on a buddy allocator: a
 table of blocks, a table of contents naming the blocks, and a B-tree whose entries associate
 a file name and a 4 character field code with a typed value.

 ## Layout

 - [`cursor`]: bounds-checked big-endian reads
 - [`header`]: the fixed header and its magic bytes
 - [`allocator`]: the block offset table, table of contents, and free lists
 - [`tree`]: the in-order walk of the B-tree
 - [`value`]: the typed values stored in tree entries
 - [`parser`]: ties the steps together, see [`parser::decode`]

 ## Features

 - Pure Rust implementation with no dependencies on Apple frameworks
 - Tolerant of the constants that drift between macOS releases, reported as [`models::Diagnostic`]s
 - Never reads outside of the source buffer
*/

pub mod allocator;
pub mod cursor;
pub mod header;
pub mod models;
pub mod parser;
pub mod tree;
pub mod value;
