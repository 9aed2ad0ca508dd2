/*!
 Maps field codes to the functions that describe their values.
*/

use std::collections::HashMap;

use crate::{
    error::field::FieldError,
    fields::{background, general, icon, modified, window},
    util::bud1::models::{Diagnostic, Diagnostics, Record, TypedValue},
};

/// Builds the description of one field value
pub type Describer = fn(&mut FieldWriter, &TypedValue) -> Result<(), FieldError>;

/// The description of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    /// The 4 character field code
    pub field: String,
    /// Human-readable lines; nested lines are prefixed with tabs
    pub lines: Vec<String>,
}

/// The description of every field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescription {
    pub name: String,
    pub fields: Vec<FieldDescription>,
    /// Problems found while describing the fields
    pub diagnostics: Vec<Diagnostic>,
}

impl RecordDescription {
    /// All description lines, in field order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .flat_map(|field| field.lines.iter().map(String::as_str))
    }
}

/// Collects the lines describing a single field
pub struct FieldWriter<'a> {
    pub(super) registry: &'a FieldRegistry,
    pub(super) name: &'a str,
    pub(super) field: &'a str,
    pub(super) lines: Vec<String>,
    pub(super) diagnostics: &'a mut Diagnostics,
    /// How many property lists or containers enclose the bytes being rendered
    pub(super) nesting: usize,
}

impl FieldWriter<'_> {
    /// The code of the field being described
    pub fn field(&self) -> &str {
        self.field
    }

    /// Add a line of description
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Record a diagnostic found while describing the field
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.warn(diagnostic);
    }

    /// Warn if `data` is not one of the lengths the field usually has
    pub fn expect_length(&mut self, data: &[u8], lengths: &[usize]) {
        if !lengths.contains(&data.len()) {
            self.warn(Diagnostic::UnexpectedFieldLength {
                name: self.name.to_string(),
                field: self.field.to_string(),
                expected: lengths.to_vec(),
                found: data.len(),
            });
        }
    }

    /// Warn that the field holds a sub-type or code we do not know
    pub fn unrecognized(&mut self, data: &str) {
        self.warn(Diagnostic::UnrecognizedFieldData {
            name: self.name.to_string(),
            field: self.field.to_string(),
            data: data.to_string(),
        });
    }

    pub fn blob<'v>(&self, value: &'v TypedValue) -> Result<&'v [u8], FieldError> {
        value
            .as_bytes()
            .ok_or_else(|| FieldError::InvalidType(self.field.to_string(), "blob"))
    }

    pub fn integer(&self, value: &TypedValue) -> Result<u64, FieldError> {
        value
            .as_integer()
            .ok_or_else(|| FieldError::InvalidType(self.field.to_string(), "integer"))
    }

    pub fn boolean(&self, value: &TypedValue) -> Result<bool, FieldError> {
        value
            .as_bool()
            .ok_or_else(|| FieldError::InvalidType(self.field.to_string(), "bool"))
    }

    pub fn text<'v>(&self, value: &'v TypedValue) -> Result<&'v str, FieldError> {
        value
            .as_str()
            .ok_or_else(|| FieldError::InvalidType(self.field.to_string(), "string"))
    }
}

/// A lookup table from field code to [`Describer`]
#[derive(Clone)]
pub struct FieldRegistry {
    describers: HashMap<&'static str, Describer>,
}

impl FieldRegistry {
    /// A registry that knows no fields; every field is described as unrecognized
    pub fn empty() -> Self {
        Self {
            describers: HashMap::new(),
        }
    }

    /// Use `describer` for `field`, replacing any existing describer
    pub fn register(&mut self, field: &'static str, describer: Describer) -> &mut Self {
        self.describers.insert(field, describer);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.describers.contains_key(field)
    }

    /// Describe every field of a record
    ///
    /// A field that cannot be described does not stop the others; it is rendered
    /// with its raw value and reported in [`RecordDescription::diagnostics`].
    pub fn describe(&self, record: &Record) -> RecordDescription {
        let mut diagnostics = Diagnostics::default();
        let fields = record
            .fields
            .iter()
            .map(|(field, value)| {
                self.describe_field(&record.name, field, value, &mut diagnostics, 0)
            })
            .collect();

        RecordDescription {
            name: record.name.clone(),
            fields,
            diagnostics: diagnostics.into_inner(),
        }
    }

    pub(crate) fn describe_field(
        &self,
        name: &str,
        field: &str,
        value: &TypedValue,
        diagnostics: &mut Diagnostics,
        nesting: usize,
    ) -> FieldDescription {
        let Some(describer) = self.describers.get(field) else {
            return FieldDescription {
                field: field.to_string(),
                lines: vec![format!("{field} (unrecognized): {value}")],
            };
        };

        let mut writer = FieldWriter {
            registry: self,
            name,
            field,
            lines: vec![],
            diagnostics,
            nesting,
        };
        let lines = match describer(&mut writer, value) {
            Ok(()) => writer.lines,
            Err(why) => {
                writer.warn(Diagnostic::InvalidField {
                    name: name.to_string(),
                    field: field.to_string(),
                    reason: why.to_string(),
                });
                vec![format!("{field} (invalid): {value}")]
            }
        };

        FieldDescription {
            field: field.to_string(),
            lines,
        }
    }
}

impl Default for FieldRegistry {
    /// A registry that knows every field code Finder is known to write
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("BKGD", background::describe)
            .register("GRP0", general::describe_unknown_text)
            .register("ICVO", general::describe_unknown_bool)
            .register("Iloc", icon::describe_location)
            .register("LSVO", general::describe_unknown_bool)
            .register("bwsp", general::describe_layout)
            .register("cmmt", general::describe_comments)
            .register("dilc", icon::describe_desktop_location)
            .register("dscl", general::describe_list_view)
            .register("extn", general::describe_extension)
            .register("fwi0", window::describe_window_info)
            .register("fwsw", general::describe_sidebar_width)
            .register("fwvh", general::describe_window_height)
            .register("icgo", general::describe_unknown_blob)
            .register("icsp", general::describe_unknown_blob)
            .register("icvo", icon::describe_view_options)
            .register("icvp", general::describe_icon_view_plist)
            .register("info", general::describe_info)
            .register("logS", general::describe_logical_size)
            .register("lg1S", general::describe_logical_size)
            .register("lssp", general::describe_scroll_position)
            .register("lsvC", general::describe_list_view_plist_alternative)
            .register("lsvP", general::describe_list_view_plist_other)
            .register("lsvo", general::describe_list_view_options)
            .register("lsvp", general::describe_list_view_plist)
            .register("lsvt", general::describe_text_size)
            .register("moDD", modified::describe)
            .register("modD", modified::describe_alternative)
            .register("ph1S", general::describe_physical_size)
            .register("phyS", general::describe_physical_size)
            .register("pict", general::describe_picture)
            .register("vSrn", general::describe_unknown_integer)
            .register("vstl", window::describe_view_style);
        registry
    }
}
