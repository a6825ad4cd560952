//! Recursive-descent JSON parser, generic over the tree it builds.
//!
//! Grammar:
//!
//! ```text
//! Value     → Object | List | Primitive
//! Object    → '{' [ Pair (',' Pair)* ] '}'
//! List      → '[' [ Value (',' Value)* ] ']'
//! Pair      → STRING ':' Value
//! Primitive → STRING | true | false | null | ['-'] (INTEGER | FLOAT)
//! ```
//!
//! Every node is produced through a [`TreeFactory`], so the same grammar can
//! build a [`Tree`](crate::Tree), a `serde_json::Value`, or anything else.
//!
//! # Key design decisions
//!
//! - **Current-token convention**: each `parse_*` method starts with
//!   `self.token` on the first token of its production and returns with
//!   `self.token` on the last one (`}` for an object, the number for a
//!   number). Callers advance past it.
//! - **No partial trees**: the first violation returns `Err` and nothing
//!   built so far escapes.
//! - **`null` is not a node**: it parses to `None` and the parent keeps the
//!   empty slot.
//! - Content after the root value is never read.

use crate::error::{ParseError, Result};
use crate::homonumeric::Homonumeric;
use crate::lexer::{Lexer, Token};
use crate::options::{LexOptions, ParseOptions};
use crate::source::{CharSource, CharStream};
use std::str::Chars;
use tracing::debug;

/// The four constructors the parser needs from a tree representation.
pub trait TreeFactory {
    type Node;

    /// `keys[i]` names `values[i]`, in source order, duplicates included.
    fn new_object(&mut self, keys: Vec<String>, values: Vec<Option<Self::Node>>) -> Self::Node;

    fn new_list(&mut self, values: Vec<Option<Self::Node>>) -> Self::Node;

    fn new_string(&mut self, text: String) -> Self::Node;

    fn new_numeric(&mut self, value: Homonumeric) -> Self::Node;
}

pub struct Parser<S: CharSource, F: TreeFactory> {
    lexer: Lexer<S>,
    factory: F,
    options: ParseOptions,
    token: Token,
    depth: usize,
}

impl<'a, F: TreeFactory> Parser<CharStream<Chars<'a>>, F> {
    /// Parser over a string slice.
    pub fn from_text(text: &'a str, factory: F, options: ParseOptions) -> Self {
        let lexer = Lexer::new(CharStream::from(text), LexOptions::default());
        Parser::new(lexer, factory, options)
    }
}

impl<S: CharSource, F: TreeFactory> Parser<S, F> {
    pub fn new(lexer: Lexer<S>, factory: F, options: ParseOptions) -> Self {
        Self {
            lexer,
            factory,
            options,
            token: Token::End,
            depth: 0,
        }
    }

    /// Parse one document. `Ok(None)` means the root was `null`, which can
    /// only happen when `require_object_root` is off.
    pub fn parse(mut self) -> Result<Option<F::Node>> {
        let result = self.parse_root();
        if let Err(err) = &result {
            debug!(error = %err, position = err.position(), "parse failed");
        }
        result
    }

    fn parse_root(&mut self) -> Result<Option<F::Node>> {
        self.bump()?;
        if self.options.require_object_root && !self.token.is_punct('{') {
            return Err(ParseError::RootNotObject {
                position: self.lexer.position(),
            });
        }
        self.parse_value()
    }

    /// Advance to the next significant token.
    fn bump(&mut self) -> Result<()> {
        loop {
            self.token = self.lexer.next_token()?;
            if !matches!(self.token, Token::Space(_)) {
                return Ok(());
            }
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            found: self.token.to_string(),
            expected,
            position: self.lexer.position(),
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                position: self.lexer.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Option<F::Node>> {
        if self.token.is_punct('{') {
            return self.parse_object().map(Some);
        }
        if self.token.is_punct('[') {
            return self.parse_list().map(Some);
        }
        self.parse_primitive()
    }

    fn parse_object(&mut self) -> Result<F::Node> {
        self.enter()?;
        let mut keys = Vec::new();
        let mut values = Vec::new();

        self.bump()?;
        if !self.token.is_punct('}') {
            loop {
                let (key, value) = self.parse_pair()?;
                keys.push(key);
                values.push(value);

                self.bump()?;
                if !self.token.is_punct(',') {
                    break;
                }
                self.bump()?;
            }
            if !self.token.is_punct('}') {
                return Err(self.unexpected("',' or '}'"));
            }
        }

        self.leave();
        Ok(self.factory.new_object(keys, values))
    }

    fn parse_list(&mut self) -> Result<F::Node> {
        self.enter()?;
        let mut values = Vec::new();

        self.bump()?;
        if !self.token.is_punct(']') {
            loop {
                values.push(self.parse_value()?);

                self.bump()?;
                if !self.token.is_punct(',') {
                    break;
                }
                self.bump()?;
            }
            if !self.token.is_punct(']') {
                return Err(self.unexpected("',' or ']'"));
            }
        }

        self.leave();
        Ok(self.factory.new_list(values))
    }

    fn parse_pair(&mut self) -> Result<(String, Option<F::Node>)> {
        let key = match &self.token {
            Token::Str(key) => key.clone(),
            _ => return Err(self.unexpected("a string key")),
        };

        self.bump()?;
        if !self.token.is_punct(':') {
            return Err(self.unexpected("':'"));
        }

        self.bump()?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    fn parse_primitive(&mut self) -> Result<Option<F::Node>> {
        match &self.token {
            Token::Str(text) => {
                let text = text.clone();
                Ok(Some(self.factory.new_string(text)))
            }
            Token::Word(_) => self.parse_keyword(),
            Token::Punct('-') => {
                self.bump()?;
                self.parse_number(true).map(Some)
            }
            Token::Integer(_) | Token::Float(_) => self.parse_number(false).map(Some),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn parse_number(&mut self, negative: bool) -> Result<F::Node> {
        let value = match self.token {
            Token::Integer(magnitude) => Homonumeric::Integer(self.signed(magnitude, negative)?),
            Token::Float(value) if negative => Homonumeric::Float(-value),
            Token::Float(value) => Homonumeric::Float(value),
            _ => return Err(self.unexpected("a number")),
        };
        Ok(self.factory.new_numeric(value))
    }

    fn signed(&self, magnitude: u64, negative: bool) -> Result<i64> {
        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        };
        value.ok_or(ParseError::IntegerOverflow {
            position: self.lexer.position(),
        })
    }

    fn parse_keyword(&mut self) -> Result<Option<F::Node>> {
        let Token::Word(word) = &self.token else {
            return Err(self.unexpected("a keyword"));
        };
        let value = match word.as_str() {
            "null" => return Ok(None),
            "true" => true,
            "false" => false,
            _ => {
                return Err(ParseError::UnknownKeyword {
                    word: word.clone(),
                    position: self.lexer.position(),
                })
            }
        };
        Ok(Some(self.factory.new_numeric(Homonumeric::Boolean(value))))
    }
}
