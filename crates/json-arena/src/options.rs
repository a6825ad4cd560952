//! Lexer and parser configuration.

use serde::{Deserialize, Serialize};

/// Default nesting limit for [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Controls how the lexer treats whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexOptions {
    /// Skip runs of whitespace instead of returning them as `Token::Space`.
    pub skip_whitespace: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            skip_whitespace: true,
        }
    }
}

impl LexOptions {
    pub fn with_skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }
}

/// Controls the recursive-descent parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest allowed nesting of objects and lists. Exceeding it aborts the
    /// parse with `ParseError::TooDeep`.
    pub max_depth: usize,
    /// Reject documents whose root is not an object.
    pub require_object_root: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            require_object_root: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_require_object_root(mut self, require: bool) -> Self {
        self.require_object_root = require;
        self
    }
}
