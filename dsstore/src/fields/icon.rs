/*!
 Icon positions and the legacy icon view options.
*/

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::field::FieldError,
    fields::{bytes_at, code_at, registry::FieldWriter, render::hex_string, u16_at, u32_at},
    util::bud1::models::TypedValue,
};

/// Where an item sits in its folder's icon view, stored in `Iloc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLocation {
    /// Pixels from the left edge
    pub x: u32,
    /// Pixels from the top edge
    pub y: u32,
    /// Trailing bytes of unknown meaning, they vary between files
    pub rest: Vec<u8>,
}

impl IconLocation {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, FieldError> {
        Ok(Self {
            x: u32_at("Iloc", data, 0)?,
            y: u32_at("Iloc", data, 4)?,
            rest: bytes_at("Iloc", data, 8..16)?,
        })
    }
}

impl Display for IconLocation {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        write!(
            fmt,
            "x {}px, y {}px, {}",
            self.x,
            self.y,
            hex_string(&self.rest)
        )
    }
}

/// Where an item sits on the desktop, stored in `dilc`
///
/// Coordinates appear to be percentages of the screen with three decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopIconLocation {
    pub x: f64,
    pub y: f64,
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

impl DesktopIconLocation {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, FieldError> {
        Ok(Self {
            x: u32_at("dilc", data, 16)? as f64 / 1000.,
            y: u32_at("dilc", data, 20)? as f64 / 1000.,
            before: bytes_at("dilc", data, 0..16)?,
            after: bytes_at("dilc", data, 24..32)?,
        })
    }
}

impl Display for DesktopIconLocation {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        write!(
            fmt,
            "x {}%, y {}%, {}, {}",
            self.x,
            self.y,
            hex_string(&self.before),
            hex_string(&self.after)
        )
    }
}

/// How icons are kept arranged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrangement {
    None,
    Grid,
    Unknown(String),
}

impl Arrangement {
    fn from_code(code: &str) -> Self {
        match code {
            "none" => Self::None,
            "grid" => Self::Grid,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Display for Arrangement {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            Arrangement::None => write!(fmt, "None"),
            Arrangement::Grid => write!(fmt, "Snap to Grid"),
            Arrangement::Unknown(code) => write!(fmt, "(unknown) {code}"),
        }
    }
}

/// Where icon labels are drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPosition {
    Bottom,
    Right,
    Unknown(String),
}

impl LabelPosition {
    fn from_code(code: &str) -> Self {
        match code {
            "botm" => Self::Bottom,
            "rght" => Self::Right,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Display for LabelPosition {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            LabelPosition::Bottom => write!(fmt, "Bottom"),
            LabelPosition::Right => write!(fmt, "Right"),
            LabelPosition::Unknown(code) => write!(fmt, "(unknown) {code}"),
        }
    }
}

/// The `icvo` blob, which comes in two layouts identified by its first 4 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconViewOptions {
    /// The original 18 byte layout
    Legacy {
        flags: Vec<u8>,
        size: u16,
        arrangement: Arrangement,
    },
    /// The 26 byte layout tagged `icv4`
    Version4 {
        size: u16,
        arrangement: Arrangement,
        label_position: LabelPosition,
        flags: Vec<u8>,
    },
    /// A layout we have not seen, with its tag
    Unrecognized(String),
}

impl IconViewOptions {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, FieldError> {
        let tag = code_at("icvo", data, 0)?;
        match tag.as_str() {
            "icvo" => Ok(Self::Legacy {
                flags: bytes_at("icvo", data, 4..12)?,
                size: u16_at("icvo", data, 12)?,
                arrangement: Arrangement::from_code(&code_at("icvo", data, 14)?),
            }),
            "icv4" => Ok(Self::Version4 {
                size: u16_at("icvo", data, 4)?,
                arrangement: Arrangement::from_code(&code_at("icvo", data, 6)?),
                label_position: LabelPosition::from_code(&code_at("icvo", data, 10)?),
                flags: bytes_at("icvo", data, 14..26)?,
            }),
            _ => Ok(Self::Unrecognized(tag)),
        }
    }

    /// Whether item info is shown below icons; only known for the `icv4` layout
    pub fn show_item_info(&self) -> Option<bool> {
        match self {
            IconViewOptions::Version4 { flags, .. } => flags.get(1).map(|flag| flag & 1 == 1),
            _ => None,
        }
    }

    /// Whether icons show a preview of the file; only known for the `icv4` layout
    pub fn show_icon_preview(&self) -> Option<bool> {
        match self {
            IconViewOptions::Version4 { flags, .. } => flags.get(11).map(|flag| flag & 1 == 1),
            _ => None,
        }
    }
}

pub(super) fn describe_location(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[16]);
    let location = IconLocation::from_bytes(data)?;
    writer.line(format!("Icon location: {location}"));
    Ok(())
}

pub(super) fn describe_desktop_location(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[32]);
    let location = DesktopIconLocation::from_bytes(data)?;
    writer.line(format!("Icon location on desktop: {location}"));
    Ok(())
}

pub(super) fn describe_view_options(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let data = writer.blob(value)?;
    let options = IconViewOptions::from_bytes(data)?;
    writer.line("Icon view options:");

    match &options {
        IconViewOptions::Legacy {
            flags,
            size,
            arrangement,
        } => {
            writer.expect_length(data, &[18]);
            writer.line(format!("\tFlags (?): {}", hex_string(flags)));
            writer.line(format!("\tSize: {size}px"));
            writer.line(format!("\tKeep arranged by: {arrangement}"));
        }
        IconViewOptions::Version4 {
            size,
            arrangement,
            label_position,
            flags,
        } => {
            writer.expect_length(data, &[26]);
            writer.line(format!("\tSize: {size}px"));
            writer.line(format!("\tKeep arranged by: {arrangement}"));
            writer.line(format!("\tLabel position: {label_position}"));
            writer.line("\tFlags (partially known):");
            writer.line(format!("\t\tRaw flags: {}", hex_string(flags)));
            writer.line(format!(
                "\t\tShow item info: {}",
                options.show_item_info().unwrap_or_default()
            ));
            writer.line(format!(
                "\t\tShow icon preview: {}",
                options.show_icon_preview().unwrap_or_default()
            ));
        }
        IconViewOptions::Unrecognized(tag) => {
            writer.unrecognized(tag);
            writer.line(format!("\t(unrecognized): {}", hex_string(data)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        fields::{
            icon::{Arrangement, DesktopIconLocation, IconLocation, IconViewOptions, LabelPosition},
            registry::FieldRegistry,
        },
        util::bud1::models::{Diagnostic, RecordSet, TypedValue},
    };

    fn describe(field: &str, data: Vec<u8>) -> (Vec<String>, Vec<Diagnostic>) {
        let mut records = RecordSet::new();
        records.insert("a".to_string(), field.to_string(), TypedValue::Blob(data));
        let description = FieldRegistry::default().describe(records.get("a").unwrap());
        let lines = description.lines().map(str::to_string).collect();
        (lines, description.diagnostics)
    }

    fn icv4(label: &[u8; 4], flags: [u8; 12]) -> Vec<u8> {
        let mut data = b"icv4".to_vec();
        data.extend_from_slice(&64u16.to_be_bytes());
        data.extend_from_slice(b"grid");
        data.extend_from_slice(label);
        data.extend_from_slice(&flags);
        data
    }

    #[test]
    fn can_parse_icon_location() {
        let mut data = vec![];
        data.extend_from_slice(&100u32.to_be_bytes());
        data.extend_from_slice(&250u32.to_be_bytes());
        data.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0]);

        let location = IconLocation::from_bytes(&data).unwrap();
        assert_eq!(location.x, 100);
        assert_eq!(location.y, 250);

        let (lines, diagnostics) = describe("Iloc", data);
        assert_eq!(
            lines,
            vec!["Icon location: x 100px, y 250px, 0xffffffffffff0000"]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn cant_parse_short_icon_location() {
        let (lines, diagnostics) = describe("Iloc", vec![0; 8]);
        assert_eq!(lines, vec!["Iloc (invalid): 0x0000000000000000"]);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::UnexpectedFieldLength { found: 8, .. }
        ));
        assert!(matches!(diagnostics[1], Diagnostic::InvalidField { .. }));
    }

    #[test]
    fn can_parse_desktop_location() {
        let mut data = vec![0; 16];
        data.extend_from_slice(&12_345u32.to_be_bytes());
        data.extend_from_slice(&500u32.to_be_bytes());
        data.extend_from_slice(&[1; 8]);

        let location = DesktopIconLocation::from_bytes(&data).unwrap();
        assert_eq!(location.x, 12.345);
        assert_eq!(location.y, 0.5);

        let (lines, _) = describe("dilc", data);
        assert_eq!(
            lines,
            vec![
                "Icon location on desktop: x 12.345%, y 0.5%, 0x00000000000000000000000000000000, 0x0101010101010101"
            ]
        );
    }

    #[test]
    fn can_parse_legacy_view_options() {
        let mut data = b"icvo".to_vec();
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&48u16.to_be_bytes());
        data.extend_from_slice(b"none");

        let (lines, diagnostics) = describe("icvo", data);
        assert_eq!(
            lines,
            vec![
                "Icon view options:",
                "\tFlags (?): 0x0000000000000000",
                "\tSize: 48px",
                "\tKeep arranged by: None",
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn can_parse_version_4_view_options() {
        let mut flags = [0; 12];
        flags[1] = 1;
        let data = icv4(b"rght", flags);

        let options = IconViewOptions::from_bytes(&data).unwrap();
        assert_eq!(
            options,
            IconViewOptions::Version4 {
                size: 64,
                arrangement: Arrangement::Grid,
                label_position: LabelPosition::Right,
                flags: flags.to_vec(),
            }
        );
        assert_eq!(options.show_item_info(), Some(true));
        assert_eq!(options.show_icon_preview(), Some(false));

        let (lines, _) = describe("icvo", data);
        assert_eq!(
            lines,
            vec![
                "Icon view options:",
                "\tSize: 64px",
                "\tKeep arranged by: Snap to Grid",
                "\tLabel position: Right",
                "\tFlags (partially known):",
                "\t\tRaw flags: 0x000100000000000000000000",
                "\t\tShow item info: true",
                "\t\tShow icon preview: false",
            ]
        );
    }

    #[test]
    fn can_parse_unknown_label_position() {
        let options = IconViewOptions::from_bytes(&icv4(b"left", [0; 12])).unwrap();
        assert!(matches!(
            options,
            IconViewOptions::Version4 { label_position: LabelPosition::Unknown(code), .. } if code == "left"
        ));
    }

    #[test]
    fn can_warn_on_unrecognized_view_options() {
        let (lines, diagnostics) = describe("icvo", b"icv9".to_vec());
        assert_eq!(
            lines,
            vec!["Icon view options:", "\t(unrecognized): 0x69637639"]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnrecognizedFieldData {
                name: "a".to_string(),
                field: "icvo".to_string(),
                data: "icv9".to_string(),
            }]
        );
    }
}
