use std::io::{BufWriter, Write};

use dsstore::{
    fields::registry::FieldRegistry,
    util::bud1::models::{Record, RecordSet},
};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{Exporter, Writer},
};

pub struct TXT<'a> {
    /// Describes each field of a record
    pub registry: &'a FieldRegistry,
    /// The records we want to write
    pub records: &'a RecordSet,
    /// Buffered writer for the destination
    pub file: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for TXT<'a> {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(TXT {
            registry: &config.registry,
            records: &config.store.records,
            file: BufWriter::new(config.output()?),
        })
    }

    fn iter_records(&mut self) -> Result<(), RuntimeError> {
        for record in self.records {
            let text = self.format_record(record);
            TXT::write_to_file(&mut self.file, text)?;
        }
        self.file.flush().map_err(RuntimeError::DiskError)
    }
}

impl Writer<String> for TXT<'_> {
    fn format_record(&self, record: &Record) -> String {
        let description = self.registry.describe(record);
        let mut out_s = String::with_capacity(record.name.len() + 1);
        out_s.push_str(&record.name);
        out_s.push('\n');
        for line in description.lines() {
            out_s.push('\t');
            out_s.push_str(line);
            out_s.push('\n');
        }
        out_s
    }

    fn write_to_file(file: &mut BufWriter<Box<dyn Write>>, text: String) -> Result<(), RuntimeError> {
        file.write_all(text.as_bytes())
            .map_err(RuntimeError::DiskError)
    }
}
