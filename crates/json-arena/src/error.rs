//! Error types for lexing, parsing and querying.

use crate::arena::Kind;
use thiserror::Error;

/// Errors raised by the lexer. Lexing halts at the recorded position; there
/// is no recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A backslash was followed by a character outside the escape table.
    #[error("unknown escape sequence '\\{escape}' at position {position}")]
    UnknownEscape { escape: char, position: usize },

    /// The input ended before the closing delimiter of a literal.
    #[error("unterminated literal (expected closing {delimiter:?}) at position {position}")]
    Unterminated { delimiter: char, position: usize },

    /// A single-quoted literal did not hold exactly one character.
    #[error("character literal must hold exactly one character at position {position}")]
    MalformedCharacter { position: usize },

    /// A dangling exponent, or a float that does not fit in `f64`.
    #[error("malformed number at position {position}")]
    MalformedNumber { position: usize },

    /// An integer digit run that does not fit in 64 bits.
    #[error("integer literal overflows at position {position}")]
    NumberOverflow { position: usize },
}

impl LexError {
    /// Character position at which lexing stopped.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnknownEscape { position, .. }
            | LexError::Unterminated { position, .. }
            | LexError::MalformedCharacter { position }
            | LexError::MalformedNumber { position }
            | LexError::NumberOverflow { position } => *position,
        }
    }
}

/// Errors raised while parsing a token stream. Any of these means the whole
/// document is absent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// A token that the grammar does not allow at this point.
    #[error("unexpected {found} at position {position}, expected {expected}")]
    Unexpected {
        found: String,
        expected: &'static str,
        position: usize,
    },

    /// A bare word other than `true`, `false` or `null`.
    #[error("unknown keyword '{word}' at position {position}")]
    UnknownKeyword { word: String, position: usize },

    /// Nesting went past `ParseOptions::max_depth`.
    #[error("nesting deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },

    /// An integer magnitude that does not fit in `i64` once signed.
    #[error("integer out of range at position {position}")]
    IntegerOverflow { position: usize },

    /// The document root was not an object while one was required.
    #[error("document root must be an object (position {position})")]
    RootNotObject { position: usize },
}

impl ParseError {
    /// Character position at which the parse was abandoned.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.position(),
            ParseError::Unexpected { position, .. }
            | ParseError::UnknownKeyword { position, .. }
            | ParseError::TooDeep { position, .. }
            | ParseError::IntegerOverflow { position }
            | ParseError::RootNotObject { position } => *position,
        }
    }
}

/// Why a navigation or extraction produced nothing. Only the `try_*` methods
/// of [`ResultSet`](crate::ResultSet) report these; the chainable methods
/// degrade to NIL or `None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("no key '{key}' in object")]
    LookupMiss { key: String },

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Navigation or extraction against a pointer of another type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
}

/// Convenience alias used throughout json-arena.
pub type Result<T> = std::result::Result<T, ParseError>;
