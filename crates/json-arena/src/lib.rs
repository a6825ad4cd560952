//! # json-arena
//!
//! A hand-built JSON lexer and recursive-descent parser whose output is
//! committed to a flat, columnar [`Arena`] and queried through chainable
//! [`ResultSet`] views.
//!
//! Parsing happens in two passes over one document:
//!
//! 1. [`Parser`] drives the [`Lexer`] and builds a transient tree through a
//!    [`TreeFactory`]. The grammar never names a concrete node type.
//! 2. The tree accepts a postorder [`Visitor`]; [`ArenaBuilder`] is the one
//!    that stores every node in the arena and returns a tagged [`Pointer`].
//!
//! After that the arena is read-only.
//!
//! ## Quick start
//!
//! ```rust
//! use json_arena::{parse, Kind};
//!
//! let arena = parse(r#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
//! let root = arena.result_set();
//!
//! assert_eq!(root.at("a").as_integer(), Some(1));
//! assert_eq!(root.at("b").at(0).type_code(), Kind::Boolean);
//! assert!(root.at("b").at(1).is_nil());
//! assert_eq!(root.at("b").at(2).as_string(), Some("x"));
//! assert_eq!(root.to_string(), r#"{ "a": 1, "b": [ true, null, "x" ] }"#);
//! ```
//!
//! ## Modules
//!
//! - [`source`]: character sources the lexer reads from
//! - [`lexer`]: characters → tokens, escape resolution
//! - [`parser`]: tokens → tree, via a [`TreeFactory`]
//! - [`tree`]: syntax tree nodes and the postorder [`Visitor`] contract
//! - [`arena`]: typed columns and the tagged [`Pointer`]
//! - [`builder`]: the arena-building visitor and parse entry points
//! - [`result_set`]: read-only navigation, extraction and serialization
//! - [`value`]: an alternate factory producing `serde_json::Value`
//! - [`options`]: lexer and parser configuration
//! - [`error`]: error types

pub mod arena;
pub mod builder;
pub mod error;
pub mod homonumeric;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod result_set;
pub mod source;
pub mod tree;
pub mod value;

pub use arena::{Arena, Kind, ListRecord, ObjectRecord, Pointer};
pub use builder::ArenaBuilder;
pub use error::{LexError, ParseError, QueryError, Result};
pub use homonumeric::Homonumeric;
pub use lexer::{Lexer, Token};
pub use options::{LexOptions, ParseOptions};
pub use parser::{Parser, TreeFactory};
pub use result_set::{Locate, ResultSet};
pub use source::{CharSource, CharStream};
pub use tree::{AstFactory, ListNode, ObjectNode, Tree, Visitor};
pub use value::{parse_value, ValueFactory};

/// Parse a JSON document (object root) into a new arena.
pub fn parse(text: &str) -> Result<Arena> {
    Arena::parse(text)
}
