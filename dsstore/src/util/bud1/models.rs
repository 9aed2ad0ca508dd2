/*!
 Data structures produced when decoding a `Bud1` container.
*/

use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
};

/// A self-describing value stored in a tree entry, keyed by its 4-byte type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// `bool`: the low bit of a single byte
    Bool(bool),
    /// `shor` or `long`: both are stored in 4 bytes, `shor` is padded with 2 `0x00` bytes
    ShortOrLong(u32),
    /// `comp`: an 8 byte integer
    Comp(u64),
    /// `dutc`: 1/65536 second ticks since 1904-01-01, see [`crate::util::dates`]
    Dutc(u64),
    /// `type`: a 4 character code
    Type(String),
    /// `blob`: opaque bytes, frequently a property list or a nested container
    Blob(Vec<u8>),
    /// `ustr`: UTF-16 text
    UnicodeString(String),
}

impl TypedValue {
    /// The type tag this value was stored with
    ///
    /// `shor` and `long` are not distinguished after decoding, so both report `long`.
    pub fn tag(&self) -> &'static str {
        match self {
            TypedValue::Bool(_) => "bool",
            TypedValue::ShortOrLong(_) => "long",
            TypedValue::Comp(_) => "comp",
            TypedValue::Dutc(_) => "dutc",
            TypedValue::Type(_) => "type",
            TypedValue::Blob(_) => "blob",
            TypedValue::UnicodeString(_) => "ustr",
        }
    }

    /// Any of the integer types
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            TypedValue::ShortOrLong(value) => Some(*value as u64),
            TypedValue::Comp(value) | TypedValue::Dutc(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Either kind of text, `type` codes or `ustr` strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Type(text) | TypedValue::UnicodeString(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TypedValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl Display for TypedValue {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            TypedValue::Bool(value) => write!(fmt, "{value}"),
            TypedValue::ShortOrLong(value) => write!(fmt, "{value}"),
            TypedValue::Comp(value) | TypedValue::Dutc(value) => write!(fmt, "{value}"),
            TypedValue::Type(text) | TypedValue::UnicodeString(text) => write!(fmt, "{text}"),
            TypedValue::Blob(bytes) => write!(fmt, "0x{}", hex::encode(bytes)),
        }
    }
}

/// All of the fields stored for a single directory entry name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The name of the file or folder the fields describe, `.` for the folder itself
    pub name: String,
    /// Field codes and their values, in the order they were first seen
    pub fields: Vec<(String, TypedValue)>,
}

impl Record {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: vec![],
        }
    }

    /// Set a field, overwriting the value if the code was already present
    pub(crate) fn update(&mut self, field: String, value: TypedValue) {
        match self.fields.iter_mut().find(|(code, _)| *code == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Get the value of a field by its 4 character code
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find(|(code, _)| code == field)
            .map(|(_, value)| value)
    }
}

/// Records in the order their names were first seen during traversal
///
/// Entries for one name may be spread across the tree, so lookups go through
/// an index instead of scanning every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the record for `name`, creating the record if this is the first field seen for it
    pub fn insert(&mut self, name: String, field: String, value: TypedValue) {
        match self.index.get(&name) {
            Some(&position) => self.records[position].update(field, value),
            None => {
                let mut record = Record::new(name.clone());
                record.update(field, value);
                self.index.insert(name, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.index
            .get(name)
            .and_then(|&position| self.records.get(position))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The total number of fields across all records
    pub fn field_count(&self) -> usize {
        self.records.iter().map(|record| record.fields.len()).sum()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Non-fatal deviations from the values the format usually contains
///
/// The format drifts between macOS releases, so these never stop decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The first 4 bytes were not `0x00000001`
    InvalidAlignment(u32),
    /// The magic bytes were not `Bud1`
    InvalidMagic(u32),
    /// The allocator offset and its repeated copy in the header
    AllocatorOffsetMismatch(usize, usize),
    /// The integer after the offset count in the allocator was not zero
    NonZeroAllocatorReserved(u32),
    /// A table of contents key other than `DSDB`, and the block it names
    UnexpectedDirectoryKey(String, u32),
    /// The last integer of the master node was not `0x1000`
    UnexpectedPageSize(u32),
    /// The walk reached a depth deeper than the master node declared
    TreeHeightExceeded { declared: u32, depth: usize },
    /// The number of entries found differs from the master node's count
    RecordCountMismatch { declared: u32, found: usize },
    /// A field payload had a length other than the ones it is known to have
    UnexpectedFieldLength {
        name: String,
        field: String,
        expected: Vec<usize>,
        found: usize,
    },
    /// A field held a sub-type or code we do not recognize
    UnrecognizedFieldData {
        name: String,
        field: String,
        data: String,
    },
    /// A field could not be described at all
    InvalidField {
        name: String,
        field: String,
        reason: String,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            Diagnostic::InvalidAlignment(value) => {
                write!(fmt, "Alignment int {value:#x} not 0x00000001")
            }
            Diagnostic::InvalidMagic(value) => {
                write!(fmt, "Magic bytes {value:#x} not 0x42756431 (Bud1)")
            }
            Diagnostic::AllocatorOffsetMismatch(first, second) => {
                write!(fmt, "Allocator offsets {first:#x} and {second:#x} unequal")
            }
            Diagnostic::NonZeroAllocatorReserved(value) => {
                write!(fmt, "Second int of allocator {value:#x} not 0x00000000")
            }
            Diagnostic::UnexpectedDirectoryKey(key, value) => write!(
                fmt,
                "Directory contains non-'DSDB' key {key:?} and value {value:#x}"
            ),
            Diagnostic::UnexpectedPageSize(value) => {
                write!(fmt, "Fifth int of master {value:#x} not 0x00001000")
            }
            Diagnostic::TreeHeightExceeded { declared, depth } => write!(
                fmt,
                "Tree declared height {declared} but reached depth {depth}"
            ),
            Diagnostic::RecordCountMismatch { declared, found } => write!(
                fmt,
                "Master node declared {declared} records but found {found}"
            ),
            Diagnostic::UnexpectedFieldLength {
                name,
                field,
                expected,
                found,
            } => {
                let expected = expected
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(fmt, "{name} {field} of length {found} not of length {expected}")
            }
            Diagnostic::UnrecognizedFieldData { name, field, data } => {
                write!(fmt, "{name} {field} has unrecognized data {data}")
            }
            Diagnostic::InvalidField {
                name,
                field,
                reason,
            } => write!(fmt, "{name} {field} could not be described: {reason}"),
        }
    }
}

/// Collects [`Diagnostic`]s, emitting each one as a warning when it is recorded
#[derive(Debug, Default)]
pub(crate) struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.0.push(diagnostic);
    }

    /// Add diagnostics that were already emitted elsewhere
    pub(crate) fn extend(&mut self, diagnostics: Vec<Diagnostic>) {
        self.0.extend(diagnostics);
    }

    pub(crate) fn into_inner(self) -> Vec<Diagnostic> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::util::bud1::models::{Diagnostic, RecordSet, TypedValue};

    #[test]
    fn can_merge_fields_by_name() {
        let mut records = RecordSet::new();
        records.insert(
            "a.txt".to_string(),
            "Iloc".to_string(),
            TypedValue::Blob(vec![0; 16]),
        );
        records.insert(
            "b.txt".to_string(),
            "cmmt".to_string(),
            TypedValue::UnicodeString("hi".to_string()),
        );
        records.insert(
            "a.txt".to_string(),
            "lg1S".to_string(),
            TypedValue::Comp(42),
        );

        assert_eq!(records.len(), 2);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let a = records.get("a.txt").unwrap();
        assert_eq!(a.fields.len(), 2);
        assert_eq!(a.get("lg1S"), Some(&TypedValue::Comp(42)));
        assert_eq!(records.field_count(), 3);
    }

    #[test]
    fn can_overwrite_repeated_field() {
        let mut records = RecordSet::new();
        records.insert(".".to_string(), "vstl".to_string(), TypedValue::Type("icnv".to_string()));
        records.insert(".".to_string(), "dscl".to_string(), TypedValue::Bool(true));
        records.insert(".".to_string(), "vstl".to_string(), TypedValue::Type("Nlsv".to_string()));

        let record = records.get(".").unwrap();
        assert_eq!(record.fields.len(), 2);
        // Overwriting keeps the original position
        assert_eq!(record.fields[0].0, "vstl");
        assert_eq!(record.get("vstl"), Some(&TypedValue::Type("Nlsv".to_string())));
    }

    #[test]
    fn can_display_values() {
        assert_eq!(TypedValue::Bool(true).to_string(), "true");
        assert_eq!(TypedValue::Blob(vec![0xde, 0xad]).to_string(), "0xdead");
        assert_eq!(TypedValue::ShortOrLong(7).tag(), "long");
    }

    #[test]
    fn can_display_length_diagnostic() {
        let diagnostic = Diagnostic::UnexpectedFieldLength {
            name: "a".to_string(),
            field: "Iloc".to_string(),
            expected: vec![16, 32],
            found: 3,
        };
        assert_eq!(
            diagnostic.to_string(),
            "a Iloc of length 3 not of length 16 or 32"
        );
    }
}
