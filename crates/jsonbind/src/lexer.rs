//! Character stream to token stream.
//!
//! The lexer owns literal recognition: string escapes, numbers and the
//! `true`/`false`/`null` keywords. Malformed literals do not abort lexing;
//! they come back as [`TokenKind::Unknown`] carrying the reason, and the
//! parser turns that into an error at the token's offset.
//!
//! The grammar is deliberately narrower than RFC 8259: numbers are
//! `-? digit+ ( . digit+ )?` with no exponent part.

use crate::{error::LexError, options::ParserOptions};

/// What a token is, with the decoded value for literals.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A string literal, escapes decoded.
    String(String),
    /// A number without a fractional part.
    Integer(i64),
    /// A number with a fractional part.
    Double(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `,`
    Separator,
    /// `:`
    KeyDelimiter,
    /// No input left; returned on every call once reached.
    End,
    /// A malformed literal or a character that starts no token.
    Unknown(LexError),
}

impl TokenKind {
    /// Short description used in syntax error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
            Self::ArrayStart => "`[`",
            Self::ArrayEnd => "`]`",
            Self::ObjectStart => "`{`",
            Self::ObjectEnd => "`}`",
            Self::Separator => "`,`",
            Self::KeyDelimiter => "`:`",
            Self::End => "end of input",
            Self::Unknown(_) => "unknown token",
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token and its decoded value.
    pub kind: TokenKind,
    /// Byte offset of the token's first character.
    pub offset: usize,
}

/// How far back [`Lexer::previous_content`] reaches, in characters.
const CONTEXT_CHARS: usize = 80;

/// Tokenizer over an in-memory string.
///
/// The cursor only moves forward. A single token of lookahead is available
/// through [`peek`](Self::peek) or [`push_back`](Self::push_back); the slot
/// holds at most one token.
#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    lookahead: Option<Token>,
    options: ParserOptions,
}

impl<'src> Lexer<'src> {
    /// Starts lexing at the beginning of `src`.
    #[must_use]
    pub fn new(src: &'src str, options: ParserOptions) -> Self {
        Self {
            src,
            pos: 0,
            lookahead: None,
            options,
        }
    }

    /// Offset of the next unconsumed token, or of the cursor when nothing is
    /// buffered.
    #[must_use]
    pub fn current_offset(&self) -> usize {
        self.lookahead.as_ref().map_or(self.pos, |t| t.offset)
    }

    /// Up to 80 characters of input preceding the cursor, for diagnostics.
    #[must_use]
    pub fn previous_content(&self) -> &'src str {
        let before = &self.src[..self.pos];
        let start = before
            .char_indices()
            .rev()
            .nth(CONTEXT_CHARS - 1)
            .map_or(0, |(i, _)| i);
        &before[start..]
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.lookahead.insert(token)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Token {
        match self.lookahead.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }

    /// Returns `token` to the stream so the next [`next_token`](Self::next_token)
    /// yields it again.
    ///
    /// # Errors
    ///
    /// The lookahead slot holds one token. If it is already occupied the token
    /// is handed back unchanged.
    pub fn push_back(&mut self, token: Token) -> Result<(), Token> {
        if self.lookahead.is_some() {
            return Err(token);
        }
        self.lookahead = Some(token);
        Ok(())
    }

    fn is_whitespace(&self, c: char) -> bool {
        match c {
            ' ' | '\t' | '\n' | '\r' => true,
            c => self.options.allow_unicode_whitespace && c.is_whitespace(),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start_matches(|c| self.is_whitespace(c));
        self.pos += rest.len() - trimmed.len();
    }

    fn scan(&mut self) -> Token {
        self.skip_whitespace();
        let offset = self.pos;
        let Some(c) = self.src[self.pos..].chars().next() else {
            return Token {
                kind: TokenKind::End,
                offset,
            };
        };
        self.pos += c.len_utf8();

        let kind = match c {
            '[' => TokenKind::ArrayStart,
            ']' => TokenKind::ArrayEnd,
            '{' => TokenKind::ObjectStart,
            '}' => TokenKind::ObjectEnd,
            ',' => TokenKind::Separator,
            ':' => TokenKind::KeyDelimiter,
            '"' => self.lex_string(),
            't' => self.lex_literal("true", TokenKind::Boolean(true)),
            'f' => self.lex_literal("false", TokenKind::Boolean(false)),
            'n' => self.lex_literal("null", TokenKind::Null),
            '-' | '0'..='9' => self.lex_number(offset),
            other => TokenKind::Unknown(LexError::UnexpectedCharacter(other)),
        };
        Token { kind, offset }
    }

    /// Called with the first character of `expected` already consumed.
    fn lex_literal(&mut self, expected: &'static str, kind: TokenKind) -> TokenKind {
        let start = self.pos - 1;
        if self.src[start..].starts_with(expected) {
            self.pos = start + expected.len();
            kind
        } else {
            TokenKind::Unknown(LexError::InvalidLiteral(expected))
        }
    }

    fn lex_number(&mut self, start: usize) -> TokenKind {
        let bytes = self.src.as_bytes();
        let digits_from = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let int_start = if bytes[start] == b'-' { start + 1 } else { start };
        let mut end = digits_from(int_start);
        let mut has_fraction = false;
        let well_formed = if end == int_start {
            false
        } else if bytes.get(end) == Some(&b'.') {
            has_fraction = true;
            let frac_start = end + 1;
            end = digits_from(frac_start);
            end > frac_start
        } else {
            true
        };
        self.pos = end.max(self.pos);

        let literal = &self.src[start..self.pos];
        if !well_formed {
            return TokenKind::Unknown(LexError::MalformedNumber(literal.into()));
        }
        let out_of_range = || TokenKind::Unknown(LexError::NumberOutOfRange(literal.into()));
        if has_fraction {
            match literal.parse::<f64>() {
                Ok(d) if d.is_finite() => TokenKind::Double(d),
                _ => out_of_range(),
            }
        } else {
            literal.parse::<i64>().map_or_else(|_| out_of_range(), TokenKind::Integer)
        }
    }

    /// Called with the opening quote already consumed.
    fn lex_string(&mut self) -> TokenKind {
        let mut out = String::new();
        loop {
            let rest = &self.src[self.pos..];
            // Copy the run up to the next quote or backslash in one go.
            let run = rest.find(['"', '\\']).unwrap_or(rest.len());
            out.push_str(&rest[..run]);
            self.pos += run;

            let Some(c) = self.bump() else {
                return TokenKind::Unknown(LexError::UnterminatedString);
            };
            if c == '"' {
                return TokenKind::String(out);
            }

            let Some(escaped) = self.bump() else {
                return TokenKind::Unknown(LexError::UnterminatedString);
            };
            let decoded = match escaped {
                '"' | '\\' | '/' => escaped,
                'b' => '\u{0008}',
                'f' => '\u{000C}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'u' => match self.lex_unicode_escape() {
                    Ok(c) => c,
                    Err(err) => return TokenKind::Unknown(err),
                },
                other => return TokenKind::Unknown(LexError::InvalidEscape(other)),
            };
            out.push(decoded);
        }
    }

    /// Decodes the four hex digits following `\u` as one UTF-16 code unit.
    ///
    /// A high surrogate directly followed by an escaped low surrogate yields
    /// the combined character. Unpaired surrogates become U+FFFD.
    fn lex_unicode_escape(&mut self) -> Result<char, LexError> {
        let unit = self.hex_unit()?;
        if !(0xD800..=0xDFFF).contains(&unit) {
            return Ok(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        if unit <= 0xDBFF && self.src[self.pos..].starts_with("\\u") {
            let resume = self.pos;
            self.pos += 2;
            if let Ok(low @ 0xDC00..=0xDFFF) = self.hex_unit() {
                let combined = char::decode_utf16([unit, low])
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Ok(combined);
            }
            // Not a low surrogate; leave the next escape for the main loop.
            self.pos = resume;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn hex_unit(&mut self) -> Result<u16, LexError> {
        let rest = &self.src[self.pos..];
        let digits: String = rest.chars().take(4).collect();
        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LexError::InvalidUnicodeEscape(digits));
        }
        self.pos += 4;
        u16::from_str_radix(&digits, 16).map_err(|_| LexError::InvalidUnicodeEscape(digits))
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.src[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}
