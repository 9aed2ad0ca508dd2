use std::io::{BufWriter, Write};

use dsstore::util::bud1::models::Record;

use crate::app::{error::RuntimeError, runtime::Config};

/// Defines behavior for iterating over the decoded records and writing them out
pub trait Exporter<'a> {
    /// Create a new exporter with references to the decoded data
    fn new(config: &'a Config) -> Result<Self, RuntimeError>
    where
        Self: Sized;
    /// Write every record, in the order their names were first seen
    fn iter_records(&mut self) -> Result<(), RuntimeError>;
}

/// Defines behavior for formatting a record to the desired output format
pub(super) trait Writer<T> {
    /// Format a record with the description of each of its fields
    fn format_record(&self, record: &Record) -> T;
    fn write_to_file(file: &mut BufWriter<Box<dyn Write>>, output: T) -> Result<(), RuntimeError>;
}
