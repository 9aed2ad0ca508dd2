/*!
 Renders nested data found inside field values: property lists, aliases, and embedded containers.
*/

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use plist::Value;

use crate::{
    error::field::FieldError,
    fields::registry::FieldWriter,
    util::{
        bud1::parser::{decode_embedded, DsStore},
        plist::{is_binary_plist, parse_plist},
    },
};

/// How many property lists or containers may enclose each other before the rest renders as hex
pub const MAX_NESTING: usize = 8;

/// Render bytes as `0x` followed by lowercase hex
pub(super) fn hex_string(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

impl FieldWriter<'_> {
    /// Add lines for a property list stored in `data`
    pub fn plist(&mut self, data: &[u8], depth: usize) -> Result<(), FieldError> {
        let value = parse_plist(data).map_err(FieldError::Plist)?;
        let lines = self.render_plist(&value, depth);
        self.lines.extend(lines);
        Ok(())
    }

    /// Add some bytes after `label`, on the same line when they render to a single line
    pub fn labelled_bytes(&mut self, label: &str, data: &[u8]) {
        let mut lines = self.render_bytes(data, 1);
        if lines.len() == 1 {
            let line = lines.remove(0);
            let text = line.strip_prefix('\t').unwrap_or(&line);
            self.lines.push(format!("{label} {text}"));
        } else {
            self.lines.push(label.to_string());
            self.lines.extend(lines);
        }
    }

    fn render_bytes(&mut self, data: &[u8], depth: usize) -> Vec<String> {
        let tabs = indent(depth);
        if data.starts_with(b"book") {
            // TODO: parse macOS alias records once the bookmark layout is documented
            return vec![format!(
                "{tabs}(in macOS alias type, unparsed) {}",
                hex_string(data)
            )];
        }

        let is_container = data.starts_with(b"Bud1");
        if self.nesting >= MAX_NESTING && (is_container || is_binary_plist(data)) {
            tracing::debug!(field = self.field, nesting = self.nesting, "nested too deep, rendering as hex");
        } else if is_binary_plist(data) {
            if let Ok(value) = parse_plist(data) {
                self.nesting += 1;
                let lines = self.render_plist(&value, depth);
                self.nesting -= 1;
                return lines;
            }
        } else if is_container {
            if let Ok(store) = decode_embedded(data) {
                return self.render_container(store, depth);
            }
        }
        vec![format!("{tabs}{}", hex_string(data))]
    }

    /// Render each record of an embedded container, with its fields indented below its name
    fn render_container(&mut self, store: DsStore, depth: usize) -> Vec<String> {
        let tabs = indent(depth);
        let registry = self.registry;
        let nesting = self.nesting + 1;
        self.diagnostics.extend(store.diagnostics);

        let mut lines = vec![];
        for record in &store.records {
            lines.push(format!("{tabs}{}", record.name));
            for (field, value) in &record.fields {
                let description = registry.describe_field(
                    &record.name,
                    field,
                    value,
                    self.diagnostics,
                    nesting,
                );
                lines.extend(
                    description
                        .lines
                        .into_iter()
                        .map(|line| format!("{tabs}\t{line}")),
                );
            }
        }
        lines
    }

    fn render_plist(&mut self, value: &Value, depth: usize) -> Vec<String> {
        let tabs = indent(depth);
        let mut lines = vec![];
        match value {
            Value::Dictionary(dict) => {
                for (key, item) in dict {
                    self.render_item(&mut lines, format!("{tabs}{key}:"), item, depth);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.render_item(&mut lines, format!("{tabs}-"), item, depth);
                }
            }
            other => lines.extend(self.render_scalar(other, depth)),
        }
        lines
    }

    /// Render a dictionary or array item after its `label`, on the same line when it fits on one
    fn render_item(&mut self, lines: &mut Vec<String>, label: String, item: &Value, depth: usize) {
        let nested = match item {
            Value::Dictionary(_) | Value::Array(_) => self.render_plist(item, depth + 1),
            scalar => {
                let mut rendered = self.render_scalar(scalar, depth + 1);
                if rendered.len() == 1 {
                    let child_tabs = indent(depth + 1);
                    let line = rendered.remove(0);
                    let text = line.strip_prefix(&child_tabs).unwrap_or(&line);
                    lines.push(format!("{label} {text}"));
                    return;
                }
                rendered
            }
        };
        lines.push(label);
        lines.extend(nested);
    }

    fn render_scalar(&mut self, value: &Value, depth: usize) -> Vec<String> {
        let tabs = indent(depth);
        match value {
            Value::Data(data) => self.render_bytes(data, depth),
            Value::Boolean(flag) => vec![format!("{tabs}{flag}")],
            Value::Integer(number) => match number.as_signed() {
                Some(signed) => vec![format!("{tabs}{signed}")],
                None => vec![format!("{tabs}{}", number.as_unsigned().unwrap_or_default())],
            },
            Value::Real(number) => vec![format!("{tabs}{number}")],
            Value::String(text) => vec![format!("{tabs}{text}")],
            Value::Date(date) => {
                let time: DateTime<Utc> = SystemTime::from(date.clone()).into();
                vec![format!("{tabs}{}", time.to_rfc3339())]
            }
            Value::Uid(uid) => vec![format!("{tabs}{}", uid.get())],
            other => vec![format!("{tabs}{other:?}")],
        }
    }
}
