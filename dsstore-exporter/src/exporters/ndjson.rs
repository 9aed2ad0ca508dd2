use std::io::{BufWriter, Write};

use base64::{prelude::BASE64_STANDARD, Engine};
use json::{object, JsonValue};

use dsstore::{
    fields::registry::FieldRegistry,
    util::{
        bud1::models::{Record, RecordSet, TypedValue},
        dates::get_date,
    },
};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{Exporter, Writer},
};

/// ISO 8601 without a time zone, `dutc` values carry none
const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct NDJSON<'a> {
    /// Describes each field of a record
    pub registry: &'a FieldRegistry,
    /// The records we want to write
    pub records: &'a RecordSet,
    /// Buffered writer for the destination
    pub file: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for NDJSON<'a> {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(NDJSON {
            registry: &config.registry,
            records: &config.store.records,
            file: BufWriter::new(config.output()?),
        })
    }

    fn iter_records(&mut self) -> Result<(), RuntimeError> {
        for record in self.records {
            let json = self.format_record(record);
            NDJSON::write_to_file(&mut self.file, json)?;
        }
        self.file.flush().map_err(RuntimeError::DiskError)
    }
}

impl NDJSON<'_> {
    /// The raw value of a field, without any interpretation of its code
    fn format_value(value: &TypedValue) -> JsonValue {
        match value {
            TypedValue::Bool(flag) => (*flag).into(),
            TypedValue::ShortOrLong(number) => (*number).into(),
            TypedValue::Comp(number) => (*number).into(),
            TypedValue::Dutc(ticks) => {
                let date: JsonValue = match get_date(*ticks) {
                    Some(date) => date.format(ISO_DATE_FORMAT).to_string().into(),
                    None => JsonValue::Null,
                };
                object! {
                    dutc: *ticks,
                    date: date,
                }
            }
            TypedValue::Type(text) | TypedValue::UnicodeString(text) => text.as_str().into(),
            TypedValue::Blob(data) => BASE64_STANDARD.encode(data).into(),
        }
    }
}

impl Writer<JsonValue> for NDJSON<'_> {
    fn format_record(&self, record: &Record) -> JsonValue {
        let mut fields = JsonValue::new_object();
        for (code, value) in &record.fields {
            fields[code.as_str()] = NDJSON::format_value(value);
        }

        let descriptions: Vec<String> = self
            .registry
            .describe(record)
            .lines()
            .map(str::to_string)
            .collect();

        object! {
            name: record.name.as_str(),
            fields: fields,
            descriptions: descriptions,
        }
    }

    fn write_to_file(file: &mut BufWriter<Box<dyn Write>>, json: JsonValue) -> Result<(), RuntimeError> {
        file.write_all((json.dump() + "\n").as_bytes())
            .map_err(RuntimeError::DiskError)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{sink, BufWriter};

    use dsstore::{
        fields::registry::FieldRegistry,
        util::{
            bud1::models::{RecordSet, TypedValue},
            dates::TIMESTAMP_FACTOR,
        },
    };

    use crate::exporters::{exporter::Writer, ndjson::NDJSON};

    fn format(records: &RecordSet, name: &str) -> json::JsonValue {
        let registry = FieldRegistry::default();
        let exporter = NDJSON {
            registry: &registry,
            records,
            file: BufWriter::new(Box::new(sink())),
        };
        exporter.format_record(records.get(name).unwrap())
    }

    #[test]
    fn can_format_scalars() {
        let mut records = RecordSet::new();
        records.insert(".".to_string(), "dscl".to_string(), TypedValue::Bool(true));
        records.insert(".".to_string(), "lg1S".to_string(), TypedValue::Comp(4096));
        records.insert(".".to_string(), "vstl".to_string(), TypedValue::Type("clmv".to_string()));

        let json = format(&records, ".");

        assert_eq!(json["name"], ".");
        assert_eq!(json["fields"]["dscl"], true);
        assert_eq!(json["fields"]["lg1S"], 4096);
        assert_eq!(json["fields"]["vstl"], "clmv");
        assert_eq!(json["descriptions"].len(), 3);
        assert_eq!(json["descriptions"][2], "View style: Column view");
    }

    #[test]
    fn can_format_blob_as_base64() {
        let mut records = RecordSet::new();
        records.insert(
            "a".to_string(),
            "icgo".to_string(),
            TypedValue::Blob(vec![0, 0, 0, 0, 0, 0, 0, 4]),
        );

        let json = format(&records, "a");

        assert_eq!(json["fields"]["icgo"], "AAAAAAAAAAQ=");
        assert_eq!(json["descriptions"][0], "icgo (unknown): 0x0000000000000004");
    }

    #[test]
    fn can_format_timestamp_with_date() {
        let mut records = RecordSet::new();
        let ticks = 3_640_172_640 * TIMESTAMP_FACTOR;
        records.insert("a".to_string(), "moDD".to_string(), TypedValue::Dutc(ticks));

        let json = format(&records, "a");

        assert_eq!(json["fields"]["moDD"]["dutc"], ticks);
        assert_eq!(json["fields"]["moDD"]["date"], "2019-05-08T15:04:00");
    }

    #[test]
    fn can_dump_single_line() {
        let mut records = RecordSet::new();
        records.insert(
            "a".to_string(),
            "cmmt".to_string(),
            TypedValue::UnicodeString("two\nlines".to_string()),
        );

        let dumped = format(&records, "a").dump();

        assert!(!dumped.contains('\n'));
        assert_eq!(
            dumped,
            r#"{"name":"a","fields":{"cmmt":"two\nlines"},"descriptions":["Comments: two\nlines"]}"#
        );
    }
}
