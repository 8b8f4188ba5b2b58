//! Compact JSON output.
//!
//! [`JsonWriter`] appends to a single buffer and tracks one flag: whether the
//! innermost open container has no items yet. Every item, nested container or
//! embedded writer first consults that flag to decide whether a `,` is needed,
//! so output never has leading or doubled separators.
//!
//! Strings are escaped conservatively: besides `"` and `\`, the writer escapes
//! `/`, all control characters, and every character above U+007F (as UTF-16
//! `\uXXXX` units), so the output is plain ASCII.

mod field_value;

use std::fmt;

pub use field_value::{FieldValue, FieldWriteable, SelfWriteable, ToFieldValue, WriteFields};

use crate::{
    binder::registry,
    error::WriteError,
    value::{Map, Value},
};

/// Field name reported for failures on values written without a tag.
const ARRAY_VALUE: &str = "[arrayvalue]";

/// Enclosing type reported for failures inside generic value trees.
const VALUE_TYPE: &str = "Value";

/// Builds one JSON text.
///
/// After a failed call the buffer holds partial output; [`reset`](Self::reset)
/// before reusing the writer.
///
/// ```
/// use jsonbind::JsonWriter;
///
/// let mut w = JsonWriter::new();
/// w.start_object(None);
/// w.add_item(Some("id"), 7_i64)?;
/// w.start_array(Some("tags"));
/// w.add_item(None, "a/b")?;
/// w.end_array();
/// w.end_object();
/// assert_eq!(w.as_str(), r#"{"id":7,"tags":["a\/b"]}"#);
/// # Ok::<(), jsonbind::WriteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWriter {
    out: String,
    at_start: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    /// An empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::new(),
            at_start: true,
        }
    }

    /// The text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Discards all output and starts over.
    pub fn reset(&mut self) {
        self.out.clear();
        self.at_start = true;
    }

    /// Emits the separator and member name that precede any item.
    fn begin_item(&mut self, tag: Option<&str>) {
        if !self.at_start {
            self.out.push(',');
        }
        self.at_start = false;
        if let Some(tag) = tag {
            write_escaped(&mut self.out, tag);
            self.out.push(':');
        }
    }

    /// Opens an object. Every item added until the matching
    /// [`end_object`](Self::end_object) must carry a tag.
    pub fn start_object(&mut self, tag: Option<&str>) {
        self.begin_item(tag);
        self.out.push('{');
        self.at_start = true;
    }

    /// Closes the innermost object.
    pub fn end_object(&mut self) {
        self.out.push('}');
        self.at_start = false;
    }

    /// Opens an array. Items added until [`end_array`](Self::end_array)
    /// take no tag.
    pub fn start_array(&mut self, tag: Option<&str>) {
        self.begin_item(tag);
        self.out.push('[');
        self.at_start = true;
    }

    /// Closes the innermost array.
    pub fn end_array(&mut self) {
        self.out.push(']');
        self.at_start = false;
    }

    /// Writes one item. `tag` names the member inside an object and must be
    /// `None` inside an array or at the root.
    ///
    /// # Errors
    ///
    /// Non-finite doubles, unsupported values, or failures inside nested
    /// objects.
    pub fn add_item<'a>(
        &mut self,
        tag: Option<&str>,
        value: impl Into<FieldValue<'a>>,
    ) -> Result<(), WriteError> {
        let field = tag.unwrap_or(ARRAY_VALUE);
        self.write_field(tag, &value.into(), field, VALUE_TYPE)
    }

    /// Writes a parsed value tree.
    ///
    /// # Errors
    ///
    /// [`WriteError::NonFiniteNumber`] if the tree holds a NaN or infinity.
    pub fn add_value(&mut self, tag: Option<&str>, value: &Value) -> Result<(), WriteError> {
        self.write_value(tag, value, tag.unwrap_or(ARRAY_VALUE))
    }

    /// Writes `value` as an object using its own [`SelfWriteable::to_json`].
    ///
    /// # Errors
    ///
    /// Whatever `to_json` reports.
    pub fn add_object<T: SelfWriteable + ?Sized>(
        &mut self,
        tag: Option<&str>,
        value: &T,
    ) -> Result<(), WriteError> {
        self.start_object(tag);
        value.to_json(self)?;
        self.end_object();
        Ok(())
    }

    /// Writes `value` as an object built from its field names and the getters
    /// in its descriptor.
    ///
    /// # Errors
    ///
    /// See [`write_fields_of`](Self::write_fields_of).
    pub fn add_fields_of<T: FieldWriteable>(
        &mut self,
        tag: Option<&str>,
        value: &T,
    ) -> Result<(), WriteError> {
        self.start_object(tag);
        self.write_fields_of(value)?;
        self.end_object();
        Ok(())
    }

    /// Writes the fields of `value` into the currently open object.
    ///
    /// # Errors
    ///
    /// [`WriteError::MissingFieldNames`] for an empty name list,
    /// [`WriteError::UnknownAccessor`] for a name without a getter, or a
    /// failure writing one of the values.
    pub fn write_fields_of<T: FieldWriteable>(&mut self, value: &T) -> Result<(), WriteError> {
        let descriptor = registry::descriptor::<T>();
        let type_name = descriptor.name();
        let names = value.field_names();
        if names.is_empty() {
            return Err(WriteError::MissingFieldNames {
                type_name: type_name.to_owned(),
            });
        }
        for &name in names {
            let Some(get) = descriptor.getter_for(name) else {
                return Err(WriteError::UnknownAccessor {
                    field: name.to_owned(),
                    type_name: type_name.to_owned(),
                });
            };
            self.write_field(Some(name), &get(value), name, type_name)?;
        }
        Ok(())
    }

    /// Writes `(name, value)` pairs into the currently open object, reporting
    /// failures against `type_name`.
    ///
    /// Lets a [`SelfWriteable`] type get field-driven output without a
    /// descriptor:
    ///
    /// ```
    /// use jsonbind::{FieldValue, JsonWriter, SelfWriteable, WriteError};
    ///
    /// struct Point(i64, i64);
    ///
    /// impl SelfWriteable for Point {
    ///     fn to_json(&self, w: &mut JsonWriter) -> Result<(), WriteError> {
    ///         w.add_fields("Point", &[("x", self.0.into()), ("y", self.1.into())])
    ///     }
    /// }
    ///
    /// assert_eq!(jsonbind::write_object(&Point(1, -2)).unwrap(), r#"{"x":1,"y":-2}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// [`WriteError::MissingFieldNames`] for an empty slice, or a failure
    /// writing one of the values.
    pub fn add_fields(
        &mut self,
        type_name: &str,
        fields: &[(&str, FieldValue<'_>)],
    ) -> Result<(), WriteError> {
        if fields.is_empty() {
            return Err(WriteError::MissingFieldNames {
                type_name: type_name.to_owned(),
            });
        }
        for (name, value) in fields {
            self.write_field(Some(*name), value, name, type_name)?;
        }
        Ok(())
    }

    /// Embeds the complete output of `other` as one item.
    pub fn add_writer(&mut self, tag: Option<&str>, other: &JsonWriter) {
        self.begin_item(tag);
        self.out.push_str(&other.out);
    }

    fn write_field(
        &mut self,
        tag: Option<&str>,
        value: &FieldValue<'_>,
        field: &str,
        type_name: &str,
    ) -> Result<(), WriteError> {
        let nest = |source: WriteError| WriteError::Nested {
            field: field.to_owned(),
            type_name: type_name.to_owned(),
            source: Box::new(source),
        };
        match value {
            FieldValue::Null => self.write_raw(tag, "null"),
            FieldValue::Bool(b) => self.write_raw(tag, if *b { "true" } else { "false" }),
            FieldValue::Int(n) => self.write_raw(tag, &n.to_string()),
            FieldValue::Double(d) => self.write_double(tag, *d, field, type_name)?,
            FieldValue::Str(s) => {
                self.begin_item(tag);
                write_escaped(&mut self.out, s);
            }
            FieldValue::Seq(items) => {
                self.start_array(tag);
                for item in items {
                    self.write_field(None, item, field, type_name)?;
                }
                self.end_array();
            }
            FieldValue::Object(object) => {
                self.start_object(tag);
                object.to_json(self).map_err(nest)?;
                self.end_object();
            }
            FieldValue::Fields(fields) => {
                self.start_object(tag);
                fields.write_fields(self).map_err(nest)?;
                self.end_object();
            }
            FieldValue::Json(json) => self.write_value(tag, json, field)?,
            FieldValue::Map(map) => self.write_members(tag, map)?,
            FieldValue::Unsupported(value_type) => {
                return Err(WriteError::UnsupportedType {
                    value_type: *value_type,
                    field: field.to_owned(),
                    type_name: type_name.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn write_value(
        &mut self,
        tag: Option<&str>,
        value: &Value,
        field: &str,
    ) -> Result<(), WriteError> {
        match value {
            Value::Null => self.write_raw(tag, "null"),
            Value::Boolean(b) => self.write_raw(tag, if *b { "true" } else { "false" }),
            Value::Integer(n) => self.write_raw(tag, &n.to_string()),
            Value::Double(d) => self.write_double(tag, *d, field, VALUE_TYPE)?,
            Value::String(s) => {
                self.begin_item(tag);
                write_escaped(&mut self.out, s);
            }
            Value::Array(items) => {
                self.start_array(tag);
                for item in items {
                    self.write_value(None, item, field)?;
                }
                self.end_array();
            }
            Value::Object(map) => self.write_members(tag, map)?,
        }
        Ok(())
    }

    fn write_members(&mut self, tag: Option<&str>, map: &Map) -> Result<(), WriteError> {
        self.start_object(tag);
        for (key, item) in map {
            self.write_value(Some(key.as_str()), item, key)?;
        }
        self.end_object();
        Ok(())
    }

    fn write_raw(&mut self, tag: Option<&str>, literal: &str) {
        self.begin_item(tag);
        self.out.push_str(literal);
    }

    fn write_double(
        &mut self,
        tag: Option<&str>,
        value: f64,
        field: &str,
        type_name: &str,
    ) -> Result<(), WriteError> {
        if !value.is_finite() {
            return Err(WriteError::NonFiniteNumber {
                value,
                field: field.to_owned(),
                type_name: type_name.to_owned(),
            });
        }
        self.begin_item(tag);
        let start = self.out.len();
        self.out.push_str(&value.to_string());
        if !self.out[start..].contains('.') {
            self.out.push_str(".0");
        }
        Ok(())
    }
}

impl fmt::Display for JsonWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.out)
    }
}

const HEX: &[u8; 16] = b"0123456789abcdef";

fn push_unicode_escape(out: &mut String, unit: u16) {
    out.push_str("\\u");
    for shift in [12, 8, 4, 0] {
        out.push(char::from(HEX[usize::from((unit >> shift) & 0xF)]));
    }
}

/// Appends `s` as a quoted, escaped JSON string.
fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' || c > '\u{7F}' => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_unicode_escape(out, *unit);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
