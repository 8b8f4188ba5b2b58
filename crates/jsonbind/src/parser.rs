//! Recursive-descent parser from tokens to a [`Value`] tree.

use crate::{
    error::{Error, SyntaxError},
    lexer::{Lexer, Token, TokenKind},
    options::ParserOptions,
    value::{Array, Map, Value},
};

/// Parser over a single input string.
///
/// Each instance parses one document; construct a new one per input.
#[derive(Debug)]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `src`. Nothing is read until
    /// [`parse`](Self::parse) or [`parse_value`](Self::parse_value).
    #[must_use]
    pub fn new(src: &'src str, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(src, options),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Parses exactly one value followed by the end of input.
    ///
    /// # Errors
    ///
    /// Any lex or syntax error, including [`SyntaxError::TrailingInput`] when
    /// something other than whitespace follows the root value.
    pub fn parse(mut self) -> Result<Value, Error> {
        let value = self.parse_value()?;
        let token = self.lexer.next_token();
        match token.kind {
            TokenKind::End => Ok(value),
            TokenKind::Unknown(source) => Err(Error::Lex {
                source,
                offset: token.offset,
            }),
            ref kind => Err(syntax(
                SyntaxError::TrailingInput(kind.describe()),
                token.offset,
            )),
        }
    }

    /// Parses the next value in the token stream.
    ///
    /// # Errors
    ///
    /// Fails on malformed literals, structural tokens out of place and
    /// premature end of input.
    pub fn parse_value(&mut self) -> Result<Value, Error> {
        let token = self.lexer.next_token();
        let offset = token.offset;
        match token.kind {
            TokenKind::ArrayStart => self.nested(offset, Self::parse_array),
            TokenKind::ObjectStart => self.nested(offset, Self::parse_object),
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Integer(n) => Ok(Value::Integer(n)),
            TokenKind::Double(d) => Ok(Value::Double(d)),
            TokenKind::Boolean(b) => Ok(Value::Boolean(b)),
            TokenKind::Null => Ok(Value::Null),
            other => Err(unexpected(other, offset)),
        }
    }

    /// Parses array elements; the opening `[` has been consumed.
    ///
    /// # Errors
    ///
    /// A missing separator between elements, or a bad element.
    pub fn parse_array(&mut self) -> Result<Value, Error> {
        let mut items = Array::new();
        if self.lexer.peek().kind == TokenKind::ArrayEnd {
            self.lexer.next_token();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::ArrayEnd => return Ok(Value::Array(items)),
                TokenKind::Separator => {}
                TokenKind::Unknown(source) => {
                    return Err(Error::Lex {
                        source,
                        offset: token.offset,
                    });
                }
                TokenKind::End => return Err(syntax(SyntaxError::UnexpectedEnd, token.offset)),
                ref other => {
                    return Err(syntax(
                        SyntaxError::ArrayElementsNotSeparated(other.describe()),
                        token.offset,
                    ));
                }
            }
        }
    }

    /// Parses object members; the opening `{` has been consumed.
    ///
    /// A repeated key replaces the earlier value.
    ///
    /// # Errors
    ///
    /// A missing separator, a non-string key, a missing `:` or a bad value.
    pub fn parse_object(&mut self) -> Result<Value, Error> {
        let mut map = Map::new();
        loop {
            let token = self.lexer.next_token();
            if token.kind == TokenKind::ObjectEnd {
                return Ok(Value::Object(map));
            }
            let key_token = if map.is_empty() {
                token
            } else {
                match token.kind {
                    TokenKind::Separator => self.lexer.next_token(),
                    TokenKind::Unknown(source) => {
                        return Err(Error::Lex {
                            source,
                            offset: token.offset,
                        });
                    }
                    TokenKind::End => {
                        return Err(syntax(SyntaxError::UnexpectedEnd, token.offset));
                    }
                    _ => {
                        let context = self.lexer.previous_content().to_owned();
                        return Err(syntax(
                            SyntaxError::ObjectMembersNotSeparated { context },
                            token.offset,
                        ));
                    }
                }
            };

            let key = expect_key(key_token)?;

            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::KeyDelimiter => {}
                TokenKind::Unknown(source) => {
                    return Err(Error::Lex {
                        source,
                        offset: token.offset,
                    });
                }
                ref other => {
                    return Err(syntax(
                        SyntaxError::ExpectedKeyDelimiter(other.describe()),
                        token.offset,
                    ));
                }
            }

            let value = self.parse_value()?;
            map.insert(key, value);
        }
    }

    fn nested(
        &mut self,
        offset: usize,
        parse: fn(&mut Self) -> Result<Value, Error>,
    ) -> Result<Value, Error> {
        if let Some(max) = self.max_depth {
            if self.depth >= max {
                return Err(syntax(SyntaxError::DepthLimitExceeded(max), offset));
            }
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}

fn expect_key(token: Token) -> Result<String, Error> {
    match token.kind {
        TokenKind::String(key) => Ok(key),
        TokenKind::Unknown(source) => Err(Error::Lex {
            source,
            offset: token.offset,
        }),
        TokenKind::End => Err(syntax(SyntaxError::UnexpectedEnd, token.offset)),
        ref other => Err(syntax(
            SyntaxError::ExpectedKey(other.describe()),
            token.offset,
        )),
    }
}

fn syntax(source: SyntaxError, offset: usize) -> Error {
    Error::Syntax { source, offset }
}

fn unexpected(kind: TokenKind, offset: usize) -> Error {
    match kind {
        TokenKind::Unknown(source) => Error::Lex { source, offset },
        TokenKind::End => syntax(SyntaxError::UnexpectedEnd, offset),
        other => syntax(SyntaxError::UnexpectedToken(other.describe()), offset),
    }
}
