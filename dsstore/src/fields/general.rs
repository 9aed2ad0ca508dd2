/*!
 Describers for fields that hold a single scalar, a property list, or data we cannot interpret.
*/

use crate::{
    error::field::FieldError,
    fields::{registry::FieldWriter, render::hex_string},
    util::bud1::models::TypedValue,
};

pub(super) fn describe_comments(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let text = writer.text(value)?;
    writer.line(format!("Comments: {text}"));
    Ok(())
}

pub(super) fn describe_extension(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let text = writer.text(value)?;
    writer.line(format!("Extension: {text}"));
    Ok(())
}

pub(super) fn describe_list_view(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let flag = writer.boolean(value)?;
    writer.line(format!("Open in list view: {flag}"));
    Ok(())
}

pub(super) fn describe_sidebar_width(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let width = writer.integer(value)?;
    writer.line(format!("Finder window sidebar width: {width}"));
    Ok(())
}

pub(super) fn describe_window_height(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let height = writer.integer(value)?;
    writer.line(format!(
        "Finder window vertical height (overrides Finder window information): {height}"
    ));
    Ok(())
}

/// `logS` was replaced by `lg1S`; both hold the same value
pub(super) fn describe_logical_size(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let size = writer.integer(value)?;
    writer.line(format!("Logical size: {size}B"));
    Ok(())
}

/// `phyS` was replaced by `ph1S`; both hold the same value
pub(super) fn describe_physical_size(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let size = writer.integer(value)?;
    writer.line(format!("Physical size: {size}B"));
    Ok(())
}

pub(super) fn describe_text_size(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let size = writer.integer(value)?;
    writer.line(format!("List view text size: {size}pt"));
    Ok(())
}

/// `pict` is an Apple Finder alias to the background image
pub(super) fn describe_picture(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.labelled_bytes("Picture:", data);
    Ok(())
}

pub(super) fn describe_info(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    let label = format!("{} (unknown):", writer.field());
    writer.labelled_bytes(&label, data);
    Ok(())
}

pub(super) fn describe_scroll_position(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[8]);
    writer.line(format!(
        "lssp (unknown, List view scroll position?): {}",
        hex_string(data)
    ));
    Ok(())
}

pub(super) fn describe_list_view_options(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[76]);
    writer.line(format!(
        "List view options (format unknown): {}",
        hex_string(data)
    ));
    Ok(())
}

fn describe_plist(
    writer: &mut FieldWriter,
    value: &TypedValue,
    title: &str,
) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.line(title);
    writer.plist(data, 1)
}

pub(super) fn describe_layout(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    describe_plist(writer, value, "Layout property list:")
}

pub(super) fn describe_icon_view_plist(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    describe_plist(writer, value, "Icon view property list:")
}

pub(super) fn describe_list_view_plist(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    describe_plist(writer, value, "List view properties:")
}

pub(super) fn describe_list_view_plist_alternative(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> Result<(), FieldError> {
    describe_plist(writer, value, "List view properties, alternative:")
}

pub(super) fn describe_list_view_plist_other(
    writer: &mut FieldWriter,
    value: &TypedValue,
) -> Result<(), FieldError> {
    describe_plist(writer, value, "List view properties, other alternative:")
}

// Fields whose meaning is unknown, only their type is checked

pub(super) fn describe_unknown_bool(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let flag = writer.boolean(value)?;
    writer.line(format!("{} (unknown): {flag}", writer.field()));
    Ok(())
}

pub(super) fn describe_unknown_text(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let text = writer.text(value)?;
    writer.line(format!("{} (unknown): {text}", writer.field()));
    Ok(())
}

pub(super) fn describe_unknown_integer(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let number = writer.integer(value)?;
    writer.line(format!("{} (unknown): {number}", writer.field()));
    Ok(())
}

/// `icgo` and `icsp` are always 8 bytes
pub(super) fn describe_unknown_blob(writer: &mut FieldWriter, value: &TypedValue) -> Result<(), FieldError> {
    let data = writer.blob(value)?;
    writer.expect_length(data, &[8]);
    writer.line(format!("{} (unknown): {}", writer.field(), hex_string(data)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use plist::Value;

    use crate::{
        fields::registry::FieldRegistry,
        util::bud1::models::{Diagnostic, RecordSet, TypedValue},
    };

    fn describe(field: &str, value: TypedValue) -> (Vec<String>, Vec<Diagnostic>) {
        let mut records = RecordSet::new();
        records.insert("a".to_string(), field.to_string(), value);
        let description = FieldRegistry::default().describe(records.get("a").unwrap());
        let lines = description.lines().map(str::to_string).collect();
        (lines, description.diagnostics)
    }

    #[test]
    fn can_describe_unknown_fields() {
        assert_eq!(
            describe("ICVO", TypedValue::Bool(false)).0,
            vec!["ICVO (unknown): false"]
        );
        assert_eq!(
            describe("GRP0", TypedValue::UnicodeString("group".to_string())).0,
            vec!["GRP0 (unknown): group"]
        );
        assert_eq!(
            describe("vSrn", TypedValue::ShortOrLong(1)).0,
            vec!["vSrn (unknown): 1"]
        );
    }

    #[test]
    fn can_describe_window_measurements() {
        assert_eq!(
            describe("fwsw", TypedValue::ShortOrLong(186)).0,
            vec!["Finder window sidebar width: 186"]
        );
        assert_eq!(
            describe("fwvh", TypedValue::ShortOrLong(480)).0,
            vec!["Finder window vertical height (overrides Finder window information): 480"]
        );
    }

    #[test]
    fn can_describe_list_view_options() {
        let (lines, diagnostics) = describe("lsvo", TypedValue::Blob(vec![0; 76]));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("List view options (format unknown): 0x0000"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn cant_describe_invalid_plist() {
        let (lines, diagnostics) = describe("lsvp", TypedValue::Blob(b"nope".to_vec()));
        assert_eq!(lines, vec!["lsvp (invalid): 0x6e6f7065"]);
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::InvalidField { field, .. }] if field == "lsvp"
        ));
    }

    #[test]
    fn can_describe_plist_with_array_root() {
        let mut bytes = vec![];
        Value::Array(vec![Value::String("name".to_string()), Value::Boolean(true)])
            .to_writer_binary(&mut bytes)
            .unwrap();

        let (lines, diagnostics) = describe("lsvp", TypedValue::Blob(bytes));

        assert_eq!(
            lines,
            vec!["List view properties:", "\t- name", "\t- true"]
        );
        assert!(diagnostics.is_empty());
    }
}
