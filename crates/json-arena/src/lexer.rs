//! Lexer: turns a character source into tokens, one per call.
//!
//! Token classes:
//!
//! - `[A-Za-z_][A-Za-z0-9_]*` → `Word`
//! - a digit run → `Integer`, or `Float` when a `.` or an exponent follows
//!   the digits (`12.37`, `1e-7`). Signs are never part of a number token;
//!   `-12` lexes as `Punct('-')` then `Integer(12)`.
//! - `"..."` → `Str` with escapes resolved
//! - `'.'` → `Character`, same escape table
//! - whitespace runs → skipped, or `Space` when `LexOptions::skip_whitespace`
//!   is off
//! - anything else → `Punct` carrying the character itself
//!
//! The first error halts the lexer: every later call returns the same error.

use crate::error::LexError;
use crate::options::LexOptions;
use crate::source::{CharSource, CharStream};
use std::fmt;
use std::str::Chars;

/// Integer discriminators for token classes. Punctuation tokens use their
/// own (non-negative) character code instead.
pub mod codes {
    pub const END: i32 = -1;
    pub const WORD: i32 = -2;
    pub const INTEGER: i32 = -3;
    pub const FLOAT: i32 = -4;
    pub const SPACE: i32 = -5;
    pub const STRING: i32 = -6;
    pub const CHARACTER: i32 = -7;
    pub const ERROR: i32 = -8;
}

/// A lexed token together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    End,
    Word(String),
    /// Unsigned magnitude; the parser applies any leading `-`.
    Integer(u64),
    Float(f64),
    Str(String),
    Character(char),
    Space(String),
    Punct(char),
}

impl Token {
    /// The integer discriminator of this token (see [`codes`]).
    pub fn code(&self) -> i32 {
        match self {
            Token::End => codes::END,
            Token::Word(_) => codes::WORD,
            Token::Integer(_) => codes::INTEGER,
            Token::Float(_) => codes::FLOAT,
            Token::Str(_) => codes::STRING,
            Token::Character(_) => codes::CHARACTER,
            Token::Space(_) => codes::SPACE,
            Token::Punct(c) => *c as i32,
        }
    }

    pub fn is_punct(&self, expected: char) -> bool {
        matches!(self, Token::Punct(c) if *c == expected)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::End => write!(f, "end of input"),
            Token::Word(w) => write!(f, "word '{w}'"),
            Token::Integer(n) => write!(f, "integer {n}"),
            Token::Float(x) => write!(f, "float {x:?}"),
            Token::Str(s) => write!(f, "string {s:?}"),
            Token::Character(c) => write!(f, "character {c:?}"),
            Token::Space(_) => write!(f, "whitespace"),
            Token::Punct(c) => write!(f, "'{c}'"),
        }
    }
}

/// Resolve the character following a backslash.
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'e' => Some('\x1b'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '?' => Some('?'),
        _ => None,
    }
}

/// Inverse of [`resolve_escape`] for characters that must be escaped inside a
/// double-quoted literal.
pub(crate) fn escape_code(c: char) -> Option<char> {
    match c {
        '\x07' => Some('a'),
        '\x08' => Some('b'),
        '\x1b' => Some('e'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        '\x0b' => Some('v'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

pub struct Lexer<S: CharSource> {
    source: S,
    options: LexOptions,
    failed: Option<LexError>,
    done: bool,
}

impl<'a> Lexer<CharStream<Chars<'a>>> {
    /// Lex a string with default options.
    pub fn from_text(text: &'a str) -> Self {
        Lexer::new(CharStream::from(text), LexOptions::default())
    }
}

impl<S: CharSource> Lexer<S> {
    pub fn new(source: S, options: LexOptions) -> Self {
        Self {
            source,
            options,
            failed: None,
            done: false,
        }
    }

    /// Characters consumed so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Produce the next token and advance past it.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        let result = self.lex();
        if let Err(err) = &result {
            self.failed = Some(err.clone());
        }
        result
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        let mut current = self.source.peek();

        if matches!(current, Some(c) if c.is_ascii_whitespace()) {
            let space = self.lex_whitespace();
            if !self.options.skip_whitespace {
                return Ok(Token::Space(space));
            }
            current = self.source.peek();
        }

        let Some(c) = current else {
            return Ok(Token::End);
        };

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.lex_word());
        }
        if c.is_ascii_digit() {
            return self.lex_number();
        }
        if c == '"' {
            return self.lex_quoted('"').map(Token::Str);
        }
        if c == '\'' {
            return self.lex_character();
        }

        self.source.advance();
        Ok(Token::Punct(c))
    }

    fn lex_whitespace(&mut self) -> String {
        let mut space = String::new();
        while let Some(c) = self.source.peek() {
            if !c.is_ascii_whitespace() {
                break;
            }
            space.push(c);
            self.source.advance();
        }
        space
    }

    fn lex_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.source.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            word.push(c);
            self.source.advance();
        }
        Token::Word(word)
    }

    /// Append a run of ASCII digits to `text`, returning how many were read.
    fn take_digits(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.source.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.source.advance();
            count += 1;
        }
        count
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.source.position();
        let mut text = String::new();
        let mut is_float = false;

        self.take_digits(&mut text);

        if self.source.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.source.advance();
            if self.take_digits(&mut text) == 0 {
                text.push('0');
            }
        }

        if matches!(self.source.peek(), Some('e' | 'E')) {
            is_float = true;
            text.push('e');
            self.source.advance();
            if let Some(sign @ ('+' | '-')) = self.source.peek() {
                text.push(sign);
                self.source.advance();
            }
            if self.take_digits(&mut text) == 0 {
                return Err(LexError::MalformedNumber {
                    position: self.source.position(),
                });
            }
        }

        if is_float {
            return match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::Float(value)),
                _ => Err(LexError::MalformedNumber { position: start }),
            };
        }

        text.parse::<u64>()
            .map(Token::Integer)
            .map_err(|_| LexError::NumberOverflow { position: start })
    }

    /// Read a delimited literal, resolving escapes. The source must be on the
    /// opening delimiter.
    fn lex_quoted(&mut self, delimiter: char) -> Result<String, LexError> {
        self.source.advance();
        let mut text = String::new();

        loop {
            match self.source.peek() {
                None => {
                    return Err(LexError::Unterminated {
                        delimiter,
                        position: self.source.position(),
                    })
                }
                Some(c) if c == delimiter => {
                    self.source.advance();
                    return Ok(text);
                }
                Some('\\') => {
                    self.source.advance();
                    let position = self.source.position();
                    let Some(escape) = self.source.peek() else {
                        return Err(LexError::Unterminated {
                            delimiter,
                            position,
                        });
                    };
                    let resolved = resolve_escape(escape)
                        .ok_or(LexError::UnknownEscape { escape, position })?;
                    text.push(resolved);
                    self.source.advance();
                }
                Some(c) => {
                    text.push(c);
                    self.source.advance();
                }
            }
        }
    }

    fn lex_character(&mut self) -> Result<Token, LexError> {
        let start = self.source.position();
        let text = self.lex_quoted('\'')?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Token::Character(c)),
            _ => Err(LexError::MalformedCharacter { position: start }),
        }
    }
}

impl<S: CharSource> Iterator for Lexer<S> {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to and including `End`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if matches!(result, Ok(Token::End) | Err(_)) {
            self.done = true;
        }
        Some(result)
    }
}
