use std::fmt::Display;

/// Represents the type of output the exporter writes
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ExportType {
    /// Records and their tab-indented descriptions
    TXT,
    /// One JSON object per record per line
    JSON,
}

impl ExportType {
    /// Given user's input, return a variant if the input matches one
    pub fn from_cli(export_type: &str) -> Option<Self> {
        match export_type.to_lowercase().as_str() {
            "txt" => Some(Self::TXT),
            "json" | "ndjson" => Some(Self::JSON),
            _ => None,
        }
    }
}

impl Display for ExportType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportType::TXT => write!(fmt, "txt"),
            ExportType::JSON => write!(fmt, "json"),
        }
    }
}
