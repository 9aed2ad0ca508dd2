/*!
 Interpretation of the values stored under each field code.

 The decoder in [`crate::util::bud1`] only knows about value types. This module knows what
 Finder means by each 4 character field code and turns the decoded values into human-readable
 descriptions through a [`registry::FieldRegistry`].

 Several codes have been superseded over the years: `BKGD` and `pict` by `bwsp`/`icvp`,
 `icvo` by `icvp`, `fwi0` partly by `vstl`, `bwsp`, `lsvp`, and `lsvP`, `lsvo` and `lsvt` by
 `lsvp`/`lsvP`, `logS` by `lg1S`, and `phyS` by `ph1S`. All of them are still understood since
 old files are never rewritten.
*/

pub mod background;
mod general;
pub mod icon;
pub mod modified;
mod render;
pub mod registry;
pub mod window;

use crate::{error::field::FieldError, util::bud1::cursor::ByteCursor};

/// Read a big-endian [`u16`] at `offset` of a field payload
fn u16_at(field: &str, data: &[u8], offset: usize) -> Result<u16, FieldError> {
    let mut cursor = ByteCursor::new(data);
    cursor.seek(offset);
    cursor
        .read_u16()
        .map_err(|why| FieldError::InvalidData(field.to_string(), why.to_string()))
}

/// Read a big-endian [`u32`] at `offset` of a field payload
fn u32_at(field: &str, data: &[u8], offset: usize) -> Result<u32, FieldError> {
    let mut cursor = ByteCursor::new(data);
    cursor.seek(offset);
    cursor
        .read_u32()
        .map_err(|why| FieldError::InvalidData(field.to_string(), why.to_string()))
}

/// Read a 4 character code at `offset` of a field payload
fn code_at(field: &str, data: &[u8], offset: usize) -> Result<String, FieldError> {
    let mut cursor = ByteCursor::new(data);
    cursor.seek(offset);
    cursor
        .read_ascii(4)
        .map_err(|why| FieldError::InvalidData(field.to_string(), why.to_string()))
}

/// Copy the bytes in `range` of a field payload
fn bytes_at(
    field: &str,
    data: &[u8],
    range: std::ops::Range<usize>,
) -> Result<Vec<u8>, FieldError> {
    data.get(range.clone()).map(<[u8]>::to_vec).ok_or_else(|| {
        FieldError::InvalidData(
            field.to_string(),
            format!("{range:?} is outside of {} bytes", data.len()),
        )
    })
}
