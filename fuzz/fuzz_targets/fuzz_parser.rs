#![no_main]

use arbitrary::Arbitrary;
use jsonbind::{Error, ParserOptions, parse_with_options, write};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    unicode_whitespace: bool,
    max_depth: u8,
    text: String,
}

fn check(input: &Input) {
    let options = ParserOptions {
        allow_unicode_whitespace: input.unicode_whitespace,
        max_depth: Some(usize::from(input.max_depth)),
    };
    let value = match parse_with_options(&input.text, options) {
        Ok(value) => value,
        Err(Error::Lex { offset, .. } | Error::Syntax { offset, .. }) => {
            assert!(offset <= input.text.len(), "offset {offset} past end");
            return;
        }
        Err(other) => panic!("parse reported a non-syntax error: {other}"),
    };

    // The lexer rejects non-finite doubles, so anything parsed can be written.
    let written = write(&value).expect("parsed values are writable");
    assert!(written.is_ascii());

    let reparsed = parse_with_options(&written, options).expect("written output re-parses");
    assert_eq!(reparsed, value);
}

fuzz_target!(|input: Input| check(&input));
