/*!
 Contains functions used to read property lists embedded in `.DS_Store` blobs.

 Newer releases of macOS store most view settings (`bwsp`, `icvp`, `lsvp`, `lsvP`, `lsvC`)
 as binary property lists inside `blob` values.
*/

use std::io::Cursor;

use plist::Value;

use crate::error::plist::PlistParseError;

/// Determine if some bytes are a binary property list, i.e. `bplist00`
pub fn is_binary_plist(data: &[u8]) -> bool {
    data.starts_with(b"bplist")
        && data
            .get(6..8)
            .is_some_and(|version| version.iter().all(u8::is_ascii_digit))
}

/// Parse a property list in any of the formats the `plist` crate supports
pub fn parse_plist(data: &[u8]) -> Result<Value, PlistParseError> {
    Value::from_reader(Cursor::new(data)).map_err(PlistParseError::ParseError)
}

#[cfg(test)]
mod tests {
    use plist::{Dictionary, Value};

    use crate::{
        error::plist::PlistParseError,
        util::plist::{is_binary_plist, parse_plist},
    };

    fn binary(value: &Value) -> Vec<u8> {
        let mut bytes = vec![];
        value.to_writer_binary(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn can_detect_binary_plist() {
        assert!(is_binary_plist(b"bplist00\x00"));
        assert!(!is_binary_plist(b"bplistXX"));
        assert!(!is_binary_plist(b"bplist"));
        assert!(!is_binary_plist(b"Bud1"));
    }

    #[test]
    fn can_parse_binary_dictionary() {
        let mut dict = Dictionary::new();
        dict.insert("ShowSidebar".to_string(), Value::Boolean(true));
        let bytes = binary(&Value::Dictionary(dict));

        assert!(is_binary_plist(&bytes));
        let parsed = parse_plist(&bytes).unwrap().into_dictionary().unwrap();
        assert_eq!(parsed.get("ShowSidebar"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn can_parse_array_root() {
        let bytes = binary(&Value::Array(vec![Value::Boolean(false)]));

        assert_eq!(
            parse_plist(&bytes).unwrap(),
            Value::Array(vec![Value::Boolean(false)])
        );
    }

    #[test]
    fn cant_parse_garbage() {
        assert!(matches!(
            parse_plist(b"bplist00 not really"),
            Err(PlistParseError::ParseError(_))
        ));
    }
}
