/*!
 Decodes the typed values stored at the end of every tree entry.
*/

use crate::{
    error::dsstore::DsStoreError,
    util::bud1::{cursor::ByteCursor, models::TypedValue},
};

/// Read a 4-byte type tag and the payload it describes
///
/// Unknown tags are fatal: the payload length depends on the tag, so there is no way to skip it.
pub fn read_value(cursor: &mut ByteCursor) -> Result<TypedValue, DsStoreError> {
    let tag = cursor.read_bytes(4)?;
    match tag {
        b"bool" => Ok(TypedValue::Bool(cursor.read_byte()? & 0x01 == 0x01)),
        // `shor` is also 4 bytes, padded with 2 `0x00` bytes
        b"shor" | b"long" => Ok(TypedValue::ShortOrLong(cursor.read_u32()?)),
        b"comp" => Ok(TypedValue::Comp(cursor.read_u64()?)),
        b"dutc" => Ok(TypedValue::Dutc(cursor.read_u64()?)),
        b"type" => Ok(TypedValue::Type(cursor.read_ascii(4)?)),
        b"blob" => {
            let length = cursor.read_u32()? as usize;
            Ok(TypedValue::Blob(cursor.read_bytes(length)?.to_vec()))
        }
        b"ustr" => {
            let length = cursor.read_u32()? as usize;
            Ok(TypedValue::UnicodeString(cursor.read_utf16(length)?))
        }
        other => Err(DsStoreError::UnsupportedValueType(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}
