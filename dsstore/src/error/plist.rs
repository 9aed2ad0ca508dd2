/*!
 Errors that can happen when parsing property lists embedded in `.DS_Store` fields.
*/

use std::fmt::{Display, Formatter, Result};

/// Errors that can happen when parsing embedded `plist` data
#[derive(Debug)]
pub enum PlistParseError {
    /// The bytes could not be read as any property list format
    ParseError(plist::Error),
}

impl Display for PlistParseError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            PlistParseError::ParseError(why) => write!(fmt, "Failed to parse plist: {why}"),
        }
    }
}

impl std::error::Error for PlistParseError {}
