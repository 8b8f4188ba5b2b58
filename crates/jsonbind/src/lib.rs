//! A small JSON codec with typed object binding.
//!
//! Text is parsed into a generic [`Value`] tree by a hand-written lexer and a
//! recursive-descent parser. Types that implement [`Bindable`] can be built
//! from a parsed object, either by pulling their own fields or through
//! setters, and written back out through [`JsonWriter`] without building an
//! intermediate tree.
//!
//! The accepted grammar is JSON without exponent notation: numbers are
//! `-? digit+ ( . digit+ )?`. Output is compact and pure ASCII.
//!
//! ```
//! use jsonbind::{BindContext, Bindable, TypeDescriptor};
//!
//! struct Pet {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! impl Bindable for Pet {
//!     fn describe() -> TypeDescriptor<Self> {
//!         TypeDescriptor::constructed("Pet", |ctx: &mut BindContext<'_>| {
//!             Ok(Pet {
//!                 name: ctx.get_value("name")?,
//!                 age: ctx.get_value("age")?,
//!             })
//!         })
//!         .field::<String>("name")
//!         .field::<Option<i32>>("age")
//!     }
//! }
//!
//! let pet: Pet = jsonbind::parse_as(r#"{"name": "Rex", "age": 4}"#).unwrap();
//! assert_eq!(pet.name, "Rex");
//! assert_eq!(pet.age, Some(4));
//!
//! let v = jsonbind::parse("[6, 7, true]").unwrap();
//! assert_eq!(jsonbind::write(&v).unwrap(), "[6,7,true]");
//! ```

pub mod binder;
mod error;
pub mod lexer;
mod options;
pub mod parser;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use binder::{
    BindContext, BindStyle, Bindable, FieldKind, FieldType, ScalarKind, Site, TypeDescriptor,
};
pub use error::{BindError, Error, LexError, SyntaxError, WriteError};
pub use options::ParserOptions;
use tracing::{debug, instrument};
pub use value::{Array, Map, Value};
pub use writer::{
    FieldValue, FieldWriteable, JsonWriter, SelfWriteable, ToFieldValue, WriteFields,
};

/// Parses `text` as a single JSON value.
///
/// # Errors
///
/// [`Error::Lex`] or [`Error::Syntax`] with the byte offset of the failure.
pub fn parse(text: &str) -> Result<Value, Error> {
    parse_with_options(text, ParserOptions::default())
}

/// Parses `text` with explicit [`ParserOptions`].
///
/// # Errors
///
/// As [`parse`], plus [`SyntaxError::DepthLimitExceeded`] when
/// [`ParserOptions::max_depth`] is set and exceeded.
#[instrument(level = "trace", skip_all, fields(len = text.len()))]
pub fn parse_with_options(text: &str, options: ParserOptions) -> Result<Value, Error> {
    parser::Parser::new(text, options)
        .parse()
        .inspect_err(|err| debug!(%err, "parse failed"))
}

/// Writes a parsed value as compact JSON text.
///
/// # Errors
///
/// [`WriteError::NonFiniteNumber`] for NaN or infinite doubles.
pub fn write(value: &Value) -> Result<String, Error> {
    let mut writer = JsonWriter::new();
    finish(writer.add_value(None, value), writer)
}

/// Binds an already parsed object onto `T`.
///
/// # Errors
///
/// [`Error::Bind`] describing the first field that could not be bound.
pub fn bind<T: Bindable>(value: &Value) -> Result<T, Error> {
    binder::bind(value)
        .inspect_err(|err| debug!(%err, "bind failed"))
        .map_err(Error::from)
}

/// Parses `text` and binds the result onto `T`.
///
/// # Errors
///
/// Any parse or bind error.
pub fn parse_as<T: Bindable>(text: &str) -> Result<T, Error> {
    bind(&parse(text)?)
}

/// Writes `value` field by field through the getters in its descriptor.
///
/// # Errors
///
/// [`Error::Write`] for missing field names or getters and unsupported or
/// non-finite values.
pub fn write_fields<T: FieldWriteable>(value: &T) -> Result<String, Error> {
    let mut writer = JsonWriter::new();
    finish(writer.add_fields_of(None, value), writer)
}

/// Writes a value that serializes itself.
///
/// # Errors
///
/// Whatever the value's [`SelfWriteable::to_json`] reports.
pub fn write_object<T: SelfWriteable + ?Sized>(value: &T) -> Result<String, Error> {
    let mut writer = JsonWriter::new();
    finish(writer.add_object(None, value), writer)
}

/// Partial output is discarded on failure.
fn finish(result: Result<(), WriteError>, writer: JsonWriter) -> Result<String, Error> {
    match result {
        Ok(()) => Ok(writer.into_string()),
        Err(err) => {
            debug!(%err, "write failed");
            Err(err.into())
        }
    }
}
