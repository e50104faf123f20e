//! Schema-agnostic tree-to-XML rendering.
//!
//! Any `Serialize` value is rendered through its `serde_json::Value`
//! form. Element order follows the value's field order, so this path is
//! meant for free-form extension content, not for the fixed-order
//! FatturaPA blocks written by [`to_xml`](super::to_xml).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::xml_utils::{XmlResult, XmlWriter};
use crate::core::FatturaError;

/// Output options for [`to_xml_fragment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentOptions {
    /// Start with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub declaration: bool,
    pub pretty: bool,
    pub indent: usize,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            pretty: true,
            indent: 2,
        }
    }
}

/// Render `value` as an element named `name`.
///
/// - null fields are skipped, as are objects whose fields are all null
/// - strings, numbers and booleans become text elements
/// - arrays become repeated sibling elements sharing the same name
/// - object keys become element names with the first character uppercased
pub fn to_xml_fragment<T: Serialize + ?Sized>(
    name: &str,
    value: &T,
    options: &FragmentOptions,
) -> XmlResult {
    to_xml_fragment_with_attrs(name, value, &[], options)
}

/// Like [`to_xml_fragment`], with attributes on the outermost element.
pub fn to_xml_fragment_with_attrs<T: Serialize + ?Sized>(
    name: &str,
    value: &T,
    attrs: &[(&str, &str)],
    options: &FragmentOptions,
) -> XmlResult {
    let tree = serde_json::to_value(value)
        .map_err(|e| FatturaError::Xml(format!("cannot convert value to a tree: {e}")))?;

    let mut w = XmlWriter::new(options.pretty, options.indent);
    if options.declaration {
        w.declaration()?;
    }
    write_value(&mut w, name, &tree, attrs)?;
    w.into_string()
}

fn write_value(
    w: &mut XmlWriter,
    name: &str,
    value: &Value,
    attrs: &[(&str, &str)],
) -> Result<(), FatturaError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            w.text_element_with_attrs(name, if *b { "true" } else { "false" }, attrs)?;
        }
        Value::Number(n) => {
            w.text_element_with_attrs(name, &n.to_string(), attrs)?;
        }
        Value::String(s) => {
            w.text_element_with_attrs(name, s, attrs)?;
        }
        Value::Array(items) => {
            for item in items {
                write_value(w, name, item, &[])?;
            }
        }
        Value::Object(map) => {
            if map.values().all(Value::is_null) {
                return Ok(());
            }
            w.start_element_with_attrs(name, attrs)?;
            for (key, child) in map {
                write_value(w, &element_name(key), child, &[])?;
            }
            w.end_element(name)?;
        }
    }
    Ok(())
}

/// First character uppercased, the rest untouched.
fn element_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
