//! Scalar payload carried from the parser to the arena.

use crate::arena::Kind;
use std::fmt;

/// A boolean, integer or float, tagged with which one it is. The tag chosen
/// by the parser is the tag the arena commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Homonumeric {
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

impl Homonumeric {
    /// The arena column this value will be committed to.
    pub fn kind(&self) -> Kind {
        match self {
            Homonumeric::Boolean(_) => Kind::Boolean,
            Homonumeric::Integer(_) => Kind::Integer,
            Homonumeric::Float(_) => Kind::Float,
        }
    }
}

impl fmt::Display for Homonumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Homonumeric::Boolean(b) => write!(f, "{b}"),
            Homonumeric::Integer(n) => write!(f, "{n}"),
            // Debug keeps a '.' or exponent so the text lexes back as a float.
            Homonumeric::Float(x) => write!(f, "{x:?}"),
        }
    }
}
