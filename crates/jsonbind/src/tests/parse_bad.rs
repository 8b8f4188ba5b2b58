use rstest::rstest;

use crate::{Error, LexError, ParserOptions, SyntaxError, parse, parse_with_options};

fn syntax_error(input: &str) -> (SyntaxError, usize) {
    match parse(input) {
        Err(Error::Syntax { source, offset }) => (source, offset),
        other => panic!("expected a syntax error for {input:?}, got {other:?}"),
    }
}

fn lex_error(input: &str) -> (LexError, usize) {
    match parse(input) {
        Err(Error::Lex { source, offset }) => (source, offset),
        other => panic!("expected a lex error for {input:?}, got {other:?}"),
    }
}

#[test]
fn trailing_comma_in_array() {
    assert_eq!(
        syntax_error("[1,]"),
        (SyntaxError::UnexpectedToken("`]`"), 3)
    );
}

#[test]
fn unterminated_object() {
    assert_eq!(
        syntax_error(r#"{"a":1"#),
        (SyntaxError::UnexpectedEnd, 6)
    );
}

#[test]
fn bad_escape_is_a_lex_error() {
    assert_eq!(
        lex_error(r#""ab\q""#),
        (LexError::InvalidEscape('q'), 0)
    );
}

#[rstest]
#[case("", SyntaxError::UnexpectedEnd, 0)]
#[case("]", SyntaxError::UnexpectedToken("`]`"), 0)]
#[case("[1 2]", SyntaxError::ArrayElementsNotSeparated("integer"), 3)]
#[case("[1", SyntaxError::UnexpectedEnd, 2)]
#[case("{1:2}", SyntaxError::ExpectedKey("integer"), 1)]
#[case(r#"{"a" 1}"#, SyntaxError::ExpectedKeyDelimiter("integer"), 5)]
#[case(r#"{"a":}"#, SyntaxError::UnexpectedToken("`}`"), 5)]
#[case(r#"{"a":1,}"#, SyntaxError::ExpectedKey("`}`"), 7)]
#[case(r#"{,"a":1}"#, SyntaxError::ExpectedKey("`,`"), 1)]
#[case("1 2", SyntaxError::TrailingInput("integer"), 2)]
#[case("{} {}", SyntaxError::TrailingInput("`{`"), 3)]
#[case(":", SyntaxError::UnexpectedToken("`:`"), 0)]
fn structural_errors(
    #[case] input: &str,
    #[case] expected: SyntaxError,
    #[case] offset: usize,
) {
    assert_eq!(syntax_error(input), (expected, offset));
}

#[test]
fn missing_member_separator_reports_context() {
    let (err, offset) = syntax_error(r#"{"a":1 "b":2}"#);
    assert_eq!(offset, 7);
    assert_eq!(
        err,
        SyntaxError::ObjectMembersNotSeparated {
            context: r#"{"a":1 "b""#.into()
        }
    );
}

#[rstest]
#[case("1e10", LexError::UnexpectedCharacter('e'), 1)]
#[case("[1.]", LexError::MalformedNumber("1.".into()), 1)]
#[case("-", LexError::MalformedNumber("-".into()), 0)]
#[case("[tru]", LexError::InvalidLiteral("true"), 1)]
#[case("nul", LexError::InvalidLiteral("null"), 0)]
#[case(r#"["abc"#, LexError::UnterminatedString, 1)]
#[case(r#""\u00zz""#, LexError::InvalidUnicodeEscape("00zz".into()), 0)]
#[case("99999999999999999999", LexError::NumberOutOfRange("99999999999999999999".into()), 0)]
#[case("'a'", LexError::UnexpectedCharacter('\''), 0)]
#[case(r#"{"a":1,"b":@}"#, LexError::UnexpectedCharacter('@'), 11)]
fn lexical_errors(#[case] input: &str, #[case] expected: LexError, #[case] offset: usize) {
    assert_eq!(lex_error(input), (expected, offset));
}

#[test]
fn unicode_whitespace_needs_opt_in() {
    assert_eq!(
        lex_error("\u{00A0}1"),
        (LexError::UnexpectedCharacter('\u{00A0}'), 0)
    );
}

#[test]
fn depth_limit() {
    let options = ParserOptions {
        max_depth: Some(2),
        ..ParserOptions::default()
    };
    let err = parse_with_options("[[[]]]", options).unwrap_err();
    assert_eq!(
        err,
        Error::Syntax {
            source: SyntaxError::DepthLimitExceeded(2),
            offset: 2,
        }
    );
}

#[test]
fn errors_render_with_offsets() {
    let err = parse("[1,]").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.to_string(), "syntax error at offset 3: unexpected token `]`");

    let err = parse(r#""ab\q""#).unwrap_err();
    assert!(err.is_lex());
    assert_eq!(
        err.to_string(),
        r"lex error at offset 0: invalid escape sequence '\q'"
    );
}
