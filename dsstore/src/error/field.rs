/*!
 Errors that can happen when interpreting decoded `.DS_Store` field values.
*/

use std::fmt::{Display, Formatter, Result};

use crate::error::plist::PlistParseError;

/// Errors that can happen when building a description of a single field
#[derive(Debug)]
pub enum FieldError {
    /// The field code and the value type it was expected to hold
    InvalidType(String, &'static str),
    /// The field code and why its payload could not be read
    InvalidData(String, String),
    Plist(PlistParseError),
}

impl Display for FieldError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            FieldError::InvalidType(field, expected) => {
                write!(fmt, "{field} is not of type {expected}")
            }
            FieldError::InvalidData(field, why) => write!(fmt, "{field} is malformed: {why}"),
            FieldError::Plist(why) => write!(fmt, "{why}"),
        }
    }
}

impl std::error::Error for FieldError {}
