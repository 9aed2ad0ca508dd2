/*!
 Finder window geometry and view styles.
*/

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::field::FieldError,
    fields::{bytes_at, code_at, registry::FieldWriter, render::hex_string, u16_at},
    util::bud1::models::TypedValue,
};

/// The view a Finder window opens in
///
/// Gallery view replaced Coverflow view in newer releases, so a file usually only contains one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStyle {
    Icon,
    Column,
    Gallery,
    List,
    Coverflow,
    Unrecognized(String),
}

impl ViewStyle {
    pub fn from_code(code: &str) -> Self {
        match code {
            "icnv" => Self::Icon,
            "clmv" => Self::Column,
            "glyv" => Self::Gallery,
            "Nlsv" => Self::List,
            "Flwv" => Self::Coverflow,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Display for ViewStyle {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            ViewStyle::Icon => write!(fmt, "Icon view"),
            ViewStyle::Column => write!(fmt, "Column view"),
            ViewStyle::Gallery => write!(fmt, "Gallery view"),
            ViewStyle::List => write!(fmt, "List view"),
            ViewStyle::Coverflow => write!(fmt, "Coverflow view"),
            ViewStyle::Unrecognized(code) => write!(fmt, "(unrecognized) {code}"),
        }
    }
}

/// The legacy `fwi0` window record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
    /// Newer files override this with `vstl`
    pub view: ViewStyle,
    pub rest: Vec<u8>,
}

impl WindowInfo {
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, FieldError> {
        Ok(Self {
            top: u16_at("fwi0", data, 0)?,
            left: u16_at("fwi0", data, 2)?,
            bottom: u16_at("fwi0", data, 4)?,
            right: u16_at("fwi0", data, 6)?,
            view: ViewStyle::from_code(&code_at("fwi0", data, 8)?),
            rest: bytes_at("fwi0", data, 12..16)?,
        })
    }
}

pub(super) fn describe_window_info(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[16]);
    let info = WindowInfo::from_bytes(data)?;
    if let ViewStyle::Unrecognized(code) = &info.view {
        writer.unrecognized(code);
    }

    writer.line("Finder window information:");
    writer.line(format!(
        "\tWindow rectangle: top {}, left {}, bottom {}, right {}",
        info.top, info.left, info.bottom, info.right
    ));
    writer.line(format!("View style (might be overtaken): {}", info.view));
    writer.line(hex_string(&info.rest));
    Ok(())
}

pub(super) fn describe_view_style(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> std::result::Result<(), FieldError> {
    let view = ViewStyle::from_code(writer.text(value)?);
    if let ViewStyle::Unrecognized(code) = &view {
        writer.unrecognized(code);
    }
    writer.line(format!("View style: {view}"));
    Ok(())
}
