//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, the generic tree produced by
//! [`parse`](crate::parse) before any typed binding takes place.
//!
use std::collections::BTreeMap;

/// Object members, kept in key order.
pub type Map = BTreeMap<String, Value>;
/// Array elements.
pub type Array = Vec<Value>;

/// A parsed JSON value.
///
/// The `Value` enum can represent any value the grammar accepts:
///
/// - Null
/// - Boolean
/// - Integer (a literal without a fractional part)
/// - Double (a literal with a fractional part)
/// - String
/// - Array
/// - Object
///
/// Integers and doubles are kept apart: `42` parses as [`Value::Integer`] and
/// `42.0` as [`Value::Double`].
///
/// # Examples
///
/// ```
/// use jsonbind::{Value, Map};
///
/// // Creating a JSON object:
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A number literal without a fractional part.
    Integer(i64),
    /// A number literal with a fractional part.
    Double(f64),
    /// A string with its escapes decoded.
    String(String),
    /// An array.
    Array(Array),
    /// An object. A repeated key keeps its last value.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// A short description of the variant, used in diagnostics.
    ///
    /// ```
    /// use jsonbind::Value;
    ///
    /// assert_eq!(Value::Integer(1).kind_name(), "integer");
    /// assert_eq!(Value::Array(vec![]).kind_name(), "array");
    /// ```
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbind::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Integer`] or [`Double`].
    ///
    /// [`Integer`]: Value::Integer
    /// [`Double`]: Value::Double
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbind::Value;
    ///
    /// assert!(Value::Integer(42).is_number());
    /// assert!(Value::Double(4.2).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Double(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Looks up `key` when the value is an object.
    ///
    /// ```
    /// use jsonbind::{parse, Value};
    ///
    /// let v = parse(r#"{"retailer": {"id": "r7"}}"#).unwrap();
    /// let id = v.get("retailer").and_then(|r| r.get("id")).and_then(Value::as_str);
    /// assert_eq!(id, Some("r7"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// The boolean, if the value is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if the value is one. Doubles are not truncated.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`, widening integers.
    ///
    /// ```
    /// use jsonbind::Value;
    ///
    /// assert_eq!(Value::Integer(12).as_f64(), Some(12.0));
    /// assert_eq!(Value::Double(12.5).as_f64(), Some(12.5));
    /// assert_eq!(Value::String("12".into()).as_f64(), None);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The string contents, if the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if the value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if the value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Compact JSON text, as produced by [`write`](crate::write).
///
/// [`write`](crate::write) rejects non-finite doubles; here they are shown as
/// `null` so formatting never fails.
impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut writer = crate::JsonWriter::new();
        if writer.add_value(None, self).is_err() {
            writer.reset();
            let _ = writer.add_value(None, &self.with_finite_doubles());
        }
        f.write_str(writer.as_str())
    }
}

impl Value {
    fn with_finite_doubles(&self) -> Value {
        match self {
            Self::Double(d) if !d.is_finite() => Self::Null,
            Self::Array(items) => Self::Array(items.iter().map(Self::with_finite_doubles).collect()),
            Self::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.with_finite_doubles()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}
