//! Error types shared by the lexer, parser, binder and writer.
//!
//! Every public entry point returns [`Error`]. The four inner enums keep the
//! failure taxonomy typed so callers can match on what went wrong without
//! parsing messages.

use thiserror::Error;

use crate::binder::{FieldKind, ScalarKind};

/// The single error surface of the crate.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// A literal could not be tokenized.
    #[error("lex error at offset {offset}: {source}")]
    Lex {
        /// What was malformed.
        source: LexError,
        /// Byte offset of the offending token.
        offset: usize,
    },
    /// The token stream does not follow the grammar.
    #[error("syntax error at offset {offset}: {source}")]
    Syntax {
        /// What was out of place.
        source: SyntaxError,
        /// Byte offset of the offending token.
        offset: usize,
    },
    /// A parsed tree could not be mapped onto a typed object.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),
    /// A value could not be serialized.
    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

impl Error {
    /// Returns `true` for [`Error::Lex`].
    #[must_use]
    pub fn is_lex(&self) -> bool {
        matches!(self, Self::Lex { .. })
    }

    /// Returns `true` for [`Error::Syntax`].
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns `true` for [`Error::Bind`].
    #[must_use]
    pub fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(..))
    }

    /// Returns `true` for [`Error::Write`].
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(..))
    }

    /// Byte offset of the failure, for lex and syntax errors.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Lex { offset, .. } | Self::Syntax { offset, .. } => Some(*offset),
            Self::Bind(_) | Self::Write(_) => None,
        }
    }
}

/// Malformed literals, reported through [`Error::Lex`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A string literal runs to the end of input.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash followed by a character with no escape meaning.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// `\u` not followed by four hex digits; holds what was found.
    #[error("invalid unicode escape sequence '\\u{0}'")]
    InvalidUnicodeEscape(String),
    /// A lone `-`, a missing integer part or a `.` without digits.
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    /// An integer beyond `i64`, or a decimal that overflows `f64`.
    #[error("number '{0}' out of range")]
    NumberOutOfRange(String),
    /// `t`, `f` or `n` not starting the keyword it promises.
    #[error("invalid literal, expected '{0}'")]
    InvalidLiteral(&'static str),
    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

/// Grammar violations, reported through [`Error::Syntax`].
///
/// Variants carrying a `&'static str` name the token that was found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A token that cannot start a value.
    #[error("unexpected token {0}")]
    UnexpectedToken(&'static str),
    /// Input ended inside an array or object, or before any value.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// Something other than `,` or `]` after an array element.
    #[error("array elements not separated by comma, found {0}")]
    ArrayElementsNotSeparated(&'static str),
    /// Something other than `,` or `}` after an object member.
    #[error("object values not separated properly after: {context}")]
    ObjectMembersNotSeparated {
        /// Input immediately preceding the failure.
        context: String,
    },
    /// A member that does not start with a string key.
    #[error("did not see identifying string when parsing object, found {0}")]
    ExpectedKey(&'static str),
    /// A key not followed by `:`.
    #[error("did not get expected ':' when parsing object, found {0}")]
    ExpectedKeyDelimiter(&'static str),
    /// More than whitespace after the root value.
    #[error("trailing input after root value, found {0}")]
    TrailingInput(&'static str),
    /// Nesting deeper than [`ParserOptions::max_depth`](crate::ParserOptions::max_depth).
    #[error("maximum nesting depth of {0} exceeded")]
    DepthLimitExceeded(usize),
}

/// Failures while mapping a parsed object onto a typed object graph.
///
/// Field-level variants name the field and the enclosing type. Failures inside
/// nested objects are wrapped in [`BindError::Nested`] so the whole path from
/// the root can be read off the error chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// A parsed key with no setter on a setter-bound type.
    #[error("no setter for `{field}` when reading `{type_name}`")]
    NoSetter {
        /// The parsed key.
        field: String,
        /// The type being bound.
        type_name: &'static str,
    },
    /// A constructed type asked for a field it never declared.
    #[error("no type discoverable for `{field}` when reading `{type_name}`")]
    UndeclaredField {
        /// The requested field.
        field: String,
        /// The type being bound.
        type_name: &'static str,
    },
    /// A field requested as a different type than it was declared with.
    #[error(
        "`{field}` of `{type_name}` is declared as {declared} but was requested as {requested}"
    )]
    DeclaredKindMismatch {
        /// The requested field.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// Kind recorded in the descriptor.
        declared: FieldKind,
        /// Kind of the type passed to `get_value`.
        requested: FieldKind,
    },
    /// An object target given a parsed value of another shape.
    #[error("did not have object value for `{field}` when reading `{type_name}`, found {found}")]
    ExpectedObject {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// Kind of the parsed value.
        found: &'static str,
    },
    /// A list or array target given a parsed value of another shape.
    #[error("did not have list value for `{field}` when reading `{type_name}`, found {found}")]
    ExpectedArray {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// Kind of the parsed value.
        found: &'static str,
    },
    /// A scalar target given a different scalar or a container.
    #[error("expected {expected} for `{field}` when reading `{type_name}`, found {found}")]
    TypeMismatch {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// The scalar the target needs.
        expected: ScalarKind,
        /// Kind of the parsed value.
        found: &'static str,
    },
    /// `null`, or a missing key, for a target that is not an `Option`.
    #[error("null for non-nullable `{field}` when reading `{type_name}`")]
    NullValue {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
    },
    /// An integer that does not fit a narrower integer target.
    #[error("integer {value} out of range for `{field}` when reading `{type_name}`")]
    OutOfRange {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// The parsed integer.
        value: i64,
    },
    /// A list or array whose element type is abstract.
    #[error(
        "cannot instantiate interface elements `{interface}` - field `{field}` when reading `{type_name}`"
    )]
    InterfaceElement {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// Name of the abstract element type.
        interface: &'static str,
    },
    /// An attempt to instantiate an abstract type.
    #[error("cannot instantiate interface type `{type_name}`")]
    Interface {
        /// Name of the abstract type.
        type_name: &'static str,
    },
    /// A list or array whose elements are lists.
    #[error("{container} of lists not supported - field `{field}` when reading `{type_name}`")]
    NestedList {
        /// The field being bound.
        field: String,
        /// The type being bound.
        type_name: &'static str,
        /// `"list"` or `"array"`.
        container: &'static str,
    },
    /// The root of a bind was not an object.
    #[error("expected an object to bind `{type_name}`, found {found}")]
    ExpectedRootObject {
        /// The type being bound.
        type_name: &'static str,
        /// Kind of the parsed value.
        found: &'static str,
    },
    /// A constructed type refused its input.
    #[error("`{type_name}` rejected its input: {reason}")]
    Rejected {
        /// The type being bound.
        type_name: &'static str,
        /// Why, in the type's own words.
        reason: String,
    },
    /// A failure inside a nested object.
    #[error("failed binding `{field}` of `{type_name}`: {source}")]
    Nested {
        /// The field holding the nested object.
        field: String,
        /// The enclosing type.
        type_name: &'static str,
        /// What went wrong inside.
        source: Box<BindError>,
    },
}

/// Failures while serializing values or typed objects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    /// Field-driven writing with an empty list of field names.
    #[error("no field names when writing `{type_name}`")]
    MissingFieldNames {
        /// The type being written.
        type_name: String,
    },
    /// A listed field name with no registered getter.
    #[error("unknown accessor for `{field}` when writing `{type_name}`")]
    UnknownAccessor {
        /// The listed field.
        field: String,
        /// The type being written.
        type_name: String,
    },
    /// A value the writer has no representation for.
    #[error("unsupported type `{value_type}` for `{field}` when writing `{type_name}`")]
    UnsupportedType {
        /// Rust type name of the value.
        value_type: &'static str,
        /// The field being written.
        field: String,
        /// The type being written.
        type_name: String,
    },
    /// A NaN or infinite double, which the grammar cannot express.
    #[error("non-finite number {value} for `{field}` when writing `{type_name}`")]
    NonFiniteNumber {
        /// The offending double.
        value: f64,
        /// The field being written.
        field: String,
        /// The type being written.
        type_name: String,
    },
    /// A failure inside a nested object.
    #[error("cannot write `{field}` of `{type_name}`: {source}")]
    Nested {
        /// The field holding the nested object.
        field: String,
        /// The enclosing type.
        type_name: String,
        /// What went wrong inside.
        source: Box<WriteError>,
    },
}
