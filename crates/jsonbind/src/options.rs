/// Configuration options for the JSON parser.
///
/// # Examples
///
/// ```rust
/// use jsonbind::{parse_with_options, ParserOptions, Value};
///
/// let options = ParserOptions {
///     allow_unicode_whitespace: true,
///     ..Default::default()
/// };
/// let value = parse_with_options("\u{2003}[1]\u{2003}", options).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Integer(1)]));
/// ```
///
/// # Default
///
/// Only JSON whitespace is skipped and nesting depth is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the lexer only recognizes the four whitespace characters
    /// defined by the JSON grammar: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Maximum nesting depth of arrays and objects.
    ///
    /// The parser is recursive, so without a limit its stack usage grows with
    /// the nesting depth of the input. Callers handling untrusted input should
    /// set a limit or bound the input size.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub max_depth: Option<usize>,
}
