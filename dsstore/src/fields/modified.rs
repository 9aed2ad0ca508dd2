/*!
 Modification dates stored in `moDD` and `modD`.

 Older files store a `dutc` timestamp. Newer files store a `blob` holding a little-endian
 integer whose unit has not been identified.
*/

use crate::{
    error::field::FieldError,
    fields::registry::FieldWriter,
    util::{
        bud1::models::TypedValue,
        dates::{format, get_date},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationDate {
    /// 1/65536 second ticks since 1904
    Timestamp(u64),
    /// A little-endian integer of unknown unit
    LittleEndian(u64),
}

impl ModificationDate {
    pub fn from_value(field: &str, value: &TypedValue) -> Result<Self, FieldError> {
        match value {
            TypedValue::Blob(data) if data.len() <= 8 => {
                let mut bytes = [0; 8];
                bytes[..data.len()].copy_from_slice(data);
                Ok(Self::LittleEndian(u64::from_le_bytes(bytes)))
            }
            TypedValue::Blob(data) => Err(FieldError::InvalidData(
                field.to_string(),
                format!("{} bytes is too long for a timestamp", data.len()),
            )),
            other => other
                .as_integer()
                .map(Self::Timestamp)
                .ok_or_else(|| FieldError::InvalidType(field.to_string(), "integer or blob")),
        }
    }
}

fn describe_labelled(
    writer: &mut FieldWriter,
    value: &TypedValue,
    label: &str,
) -> Result<(), FieldError> {
    match ModificationDate::from_value(writer.field(), value)? {
        ModificationDate::Timestamp(ticks) => {
            let date = get_date(ticks).ok_or_else(|| {
                FieldError::InvalidData(writer.field().to_string(), format!("{ticks} is out of range"))
            })?;
            writer.line(format!("{label}: {}", format(&date)));
        }
        ModificationDate::LittleEndian(number) => {
            writer.line(format!("{label} (timestamp, format unknown): {number}"));
        }
    }
    Ok(())
}

pub(super) fn describe(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    describe_labelled(writer, value, "Modification date")
}

/// `modD` may appear next to `moDD`; how the two differ is unknown
pub(super) fn describe_alternative(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> Result<(), FieldError> {
    describe_labelled(writer, value, "Modification date, alternative")
}

#[cfg(test)]
mod tests {
    use crate::{
        error::field::FieldError,
        fields::{modified::ModificationDate, registry::FieldRegistry},
        util::{
            bud1::models::{RecordSet, TypedValue},
            dates::TIMESTAMP_FACTOR,
        },
    };

    fn describe(field: &str, value: TypedValue) -> Vec<String> {
        let mut records = RecordSet::new();
        records.insert("a".to_string(), field.to_string(), value);
        let description = FieldRegistry::default().describe(records.get("a").unwrap());
        let lines = description.lines().map(str::to_string).collect();
        lines
    }

    #[test]
    fn can_describe_timestamp() {
        let ticks = 3_640_172_640 * TIMESTAMP_FACTOR;
        assert_eq!(
            describe("moDD", TypedValue::Dutc(ticks)),
            vec!["Modification date: May 8, 2019 at 3:04 PM"]
        );
        assert_eq!(
            describe("modD", TypedValue::Dutc(ticks)),
            vec!["Modification date, alternative: May 8, 2019 at 3:04 PM"]
        );
    }

    #[test]
    fn can_describe_little_endian_blob() {
        assert_eq!(
            describe("moDD", TypedValue::Blob(vec![0x01, 0x02, 0, 0, 0, 0, 0, 0])),
            vec!["Modification date (timestamp, format unknown): 513"]
        );
        assert_eq!(
            describe("modD", TypedValue::Blob(vec![0xff])),
            vec!["Modification date, alternative (timestamp, format unknown): 255"]
        );
    }

    #[test]
    fn cant_parse_long_blob() {
        assert!(matches!(
            ModificationDate::from_value("moDD", &TypedValue::Blob(vec![0; 9])),
            Err(FieldError::InvalidData(_, _))
        ));
    }

    #[test]
    fn cant_parse_bool() {
        assert!(matches!(
            ModificationDate::from_value("moDD", &TypedValue::Bool(true)),
            Err(FieldError::InvalidType(_, "integer or blob"))
        ));
    }
}
