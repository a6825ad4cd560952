//! Character sources feeding the lexer.
//!
//! The lexer needs exactly three things from its input: the current
//! character, a way to move past it, and how far it has come. Anything that
//! yields `char`s (a string, a decoded file, a socket reader) can sit behind
//! [`CharStream`].

use std::iter::Peekable;
use std::str::Chars;

/// A forward-only character cursor with one character of lookahead.
pub trait CharSource {
    /// The current character, or `None` once the source is exhausted.
    fn peek(&mut self) -> Option<char>;

    /// Move past the current character. No-op at end of input.
    fn advance(&mut self);

    /// Number of characters consumed so far.
    fn position(&self) -> usize;
}

/// Adapts any `char` iterator into a [`CharSource`].
#[derive(Debug, Clone)]
pub struct CharStream<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    position: usize,
}

impl<I: Iterator<Item = char>> CharStream<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            position: 0,
        }
    }
}

impl<'a> From<&'a str> for CharStream<Chars<'a>> {
    fn from(text: &'a str) -> Self {
        CharStream::new(text.chars())
    }
}

impl<I: Iterator<Item = char>> CharSource for CharStream<I> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.position += 1;
        }
    }

    fn position(&self) -> usize {
        self.position
    }
}
