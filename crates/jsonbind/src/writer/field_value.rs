use std::{any::type_name, collections::HashMap, fmt};

use super::JsonWriter;
use crate::{
    binder::Bindable,
    error::WriteError,
    value::{Map, Value},
};

/// A value that writes its own members into an open object.
///
/// [`JsonWriter::add_object`] opens and closes the object around the call.
pub trait SelfWriteable {
    /// Writes the members of `self`.
    ///
    /// # Errors
    ///
    /// Any [`WriteError`] from the writer calls made.
    fn to_json(&self, writer: &mut JsonWriter) -> Result<(), WriteError>;
}

/// A value written by looking up a getter for each of its field names.
///
/// Getters come from the type's [`TypeDescriptor`](crate::TypeDescriptor).
pub trait FieldWriteable: Bindable {
    /// Names of the fields to write, in output order.
    fn field_names(&self) -> &[&'static str];
}

/// Object-safe form of [`FieldWriteable`], so nested field-driven values can
/// be held as [`FieldValue::Fields`].
pub trait WriteFields {
    /// Writes the members of `self` into the currently open object.
    ///
    /// # Errors
    ///
    /// Any [`WriteError`] from the writer calls made.
    fn write_fields(&self, writer: &mut JsonWriter) -> Result<(), WriteError>;
}

impl<T: FieldWriteable> WriteFields for T {
    fn write_fields(&self, writer: &mut JsonWriter) -> Result<(), WriteError> {
        writer.write_fields_of(self)
    }
}

/// A borrowed value handed to the writer by a getter or by
/// [`JsonWriter::add_item`].
#[derive(Clone)]
pub enum FieldValue<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// Written without a fractional part.
    Int(i64),
    /// Written with a fractional part; must be finite.
    Double(f64),
    /// Written quoted and escaped.
    Str(&'a str),
    /// Written as an array, one item per element.
    Seq(Vec<FieldValue<'a>>),
    /// Written as a nested object through its own logic.
    Object(&'a dyn SelfWriteable),
    /// Written as a nested object from its field names.
    Fields(&'a dyn WriteFields),
    /// A parsed value tree.
    Json(&'a Value),
    /// A parsed object, written with its keys in sorted order.
    Map(&'a Map),
    /// A type the writer cannot represent; writing it fails.
    Unsupported(&'static str),
}

impl<'a> FieldValue<'a> {
    /// Wraps a [`SelfWriteable`] value.
    #[must_use]
    pub fn object<T: SelfWriteable>(value: &'a T) -> Self {
        Self::Object(value)
    }

    /// Wraps a field-driven value.
    #[must_use]
    pub fn fields<T: WriteFields>(value: &'a T) -> Self {
        Self::Fields(value)
    }

    /// Collects any iterator of convertible items into [`FieldValue::Seq`].
    #[must_use]
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue<'a>>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Double(d) => f.debug_tuple("Double").field(d).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
            Self::Fields(_) => f.write_str("Fields(..)"),
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
            Self::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Self::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

/// Borrowed conversion into a [`FieldValue`].
///
/// Implemented for the scalar, string and tree types the writer represents
/// directly and for optional and sequence wrappers of them, so a getter can
/// hand out `&Option<T>`, `&Vec<T>` or `&Box<[T]>` fields with
/// [`FieldValue::from`].
pub trait ToFieldValue {
    /// Views `self` as a value the writer can emit.
    fn to_field_value(&self) -> FieldValue<'_>;
}

macro_rules! scalar_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl ToFieldValue for $ty {
            fn to_field_value(&self) -> FieldValue<'_> {
                FieldValue::$variant((*self).into())
            }
        }

        impl From<$ty> for FieldValue<'_> {
            fn from(v: $ty) -> Self {
                Self::$variant(v.into())
            }
        }

        impl From<&$ty> for FieldValue<'_> {
            fn from(v: &$ty) -> Self {
                Self::$variant((*v).into())
            }
        }

        impl From<Option<$ty>> for FieldValue<'_> {
            fn from(v: Option<$ty>) -> Self {
                v.map_or(Self::Null, |v| Self::$variant(v.into()))
            }
        }
    )*};
}

scalar_field_value! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    i16 => Int,
    f64 => Double,
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl ToFieldValue for Value {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Json(self)
    }
}

impl ToFieldValue for Map {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_ref().map_or(FieldValue::Null, T::to_field_value)
    }
}

impl<T: ToFieldValue> ToFieldValue for [T] {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.iter().map(T::to_field_value).collect())
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_slice().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Box<[T]> {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(v)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(v: Option<&'a str>) -> Self {
        v.map_or(Self::Null, Self::Str)
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(v: &'a Value) -> Self {
        Self::Json(v)
    }
}

/// Parsed objects are written as JSON objects, keys in sorted order.
impl<'a> From<&'a Map> for FieldValue<'a> {
    fn from(v: &'a Map) -> Self {
        Self::Map(v)
    }
}

impl<'a, T: ToFieldValue> From<&'a Option<T>> for FieldValue<'a> {
    fn from(v: &'a Option<T>) -> Self {
        v.to_field_value()
    }
}

impl<'a, T: ToFieldValue> From<&'a [T]> for FieldValue<'a> {
    fn from(v: &'a [T]) -> Self {
        v.to_field_value()
    }
}

impl<'a, T: ToFieldValue> From<&'a Vec<T>> for FieldValue<'a> {
    fn from(v: &'a Vec<T>) -> Self {
        v.to_field_value()
    }
}

impl<'a, T: ToFieldValue> From<&'a Box<[T]>> for FieldValue<'a> {
    fn from(v: &'a Box<[T]>) -> Self {
        v.to_field_value()
    }
}

/// Hash maps have no stable key order; collect into a [`Map`] to write one.
impl<K, V, S> From<&HashMap<K, V, S>> for FieldValue<'_> {
    fn from(_: &HashMap<K, V, S>) -> Self {
        Self::Unsupported(type_name::<HashMap<K, V, S>>())
    }
}
