/*!
 The legacy folder background stored in `BKGD`.
*/

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::field::FieldError,
    fields::{code_at, registry::FieldWriter, u16_at},
    util::bud1::models::TypedValue,
};

/// The expected length of a `BKGD` blob
pub const BACKGROUND_LENGTH: usize = 12;

/// A folder's background in icon view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// `DefB`: the system default
    Default,
    /// `ClrB`: a solid color with 16 bits per channel
    Color { red: u16, green: u16, blue: u16 },
    /// `PctB`: an image, referenced by the `pict` field
    Picture,
    /// Any other kind of background
    Unrecognized(String),
}

impl Background {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, FieldError> {
        match code_at("BKGD", data, 0)?.as_str() {
            "DefB" => Ok(Self::Default),
            "ClrB" => Ok(Self::Color {
                red: u16_at("BKGD", data, 4)?,
                green: u16_at("BKGD", data, 6)?,
                blue: u16_at("BKGD", data, 8)?,
            }),
            "PctB" => Ok(Self::Picture),
            other => Ok(Self::Unrecognized(other.to_string())),
        }
    }
}

impl Display for Background {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            Background::Default => write!(fmt, "Default"),
            Background::Color { red, green, blue } => {
                write!(fmt, "Color #{red:04x}{green:04x}{blue:04x}")
            }
            Background::Picture => write!(fmt, "Picture, see \"Picture\" field"),
            Background::Unrecognized(kind) => write!(fmt, "(unrecognized) {kind}"),
        }
    }
}

pub(super) fn describe(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[BACKGROUND_LENGTH]);
    let background = Background::from_bytes(data)?;
    if let Background::Unrecognized(kind) = &background {
        writer.unrecognized(kind);
    }
    writer.line(format!("Background: {background}"));
    Ok(())
}
