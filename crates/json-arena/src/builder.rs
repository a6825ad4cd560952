//! Commits a parsed tree into an [`Arena`].
//!
//! [`ArenaBuilder`] is the visitor that turns a [`Tree`] into arena entries.
//! Because the walk is postorder, every child pointer already exists by the
//! time its parent's record is allocated; records are filled once and never
//! revisited.

use crate::arena::{Arena, Kind, Pointer};
use crate::error::Result;
use crate::homonumeric::Homonumeric;
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::source::CharSource;
use crate::tree::{AstFactory, Tree, Visitor};
use tracing::{debug, trace};

/// Visitor that stores each node in the arena and returns its pointer.
pub struct ArenaBuilder<'a> {
    arena: &'a mut Arena,
}

impl<'a> ArenaBuilder<'a> {
    pub fn new(arena: &'a mut Arena) -> Self {
        Self { arena }
    }
}

impl Visitor for ArenaBuilder<'_> {
    type Output = Pointer;

    fn for_string(&mut self, text: &str) -> Pointer {
        self.arena.new_string(text)
    }

    fn for_numeric(&mut self, value: Homonumeric) -> Pointer {
        let pointer = match value {
            Homonumeric::Boolean(b) => self.arena.new_boolean(b),
            Homonumeric::Integer(n) => self.arena.new_integer(n),
            Homonumeric::Float(x) => self.arena.new_float(x),
        };
        debug_assert_eq!(pointer.kind, value.kind());
        pointer
    }

    fn for_object(&mut self, keys: &[String], values: Vec<Option<Pointer>>) -> Pointer {
        let pointer = self.arena.new_object();
        if let Some(object) = self.arena.object_mut(pointer.key) {
            for (key, value) in keys.iter().zip(values) {
                if !object.insert(key.as_str(), value.unwrap_or(Pointer::NIL)) {
                    trace!(key = %key, object = pointer.key, "dropped duplicate key");
                }
            }
        }
        pointer
    }

    fn for_list(&mut self, values: Vec<Option<Pointer>>) -> Pointer {
        let pointer = self.arena.new_list();
        if let Some(list) = self.arena.list_mut(pointer.key) {
            list.extend(values.into_iter().map(|value| value.unwrap_or(Pointer::NIL)));
        }
        pointer
    }
}

impl Arena {
    /// Parse `text` into a fresh arena with default options.
    pub fn parse(text: &str) -> Result<Arena> {
        Arena::parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Arena> {
        let mut arena = Arena::new();
        arena.ingest(text, options)?;
        Ok(arena)
    }

    /// Parse another document into this arena and return its root pointer.
    ///
    /// The document is parsed completely before anything is stored, so a
    /// failed parse leaves the arena exactly as it was.
    pub fn ingest(&mut self, text: &str, options: &ParseOptions) -> Result<Pointer> {
        let tree = Parser::from_text(text, AstFactory, *options).parse()?;
        Ok(self.commit(tree.as_ref()))
    }

    /// Like [`ingest`](Arena::ingest), reading from an arbitrary lexer.
    pub fn ingest_from<S: CharSource>(
        &mut self,
        lexer: Lexer<S>,
        options: &ParseOptions,
    ) -> Result<Pointer> {
        let tree = Parser::new(lexer, AstFactory, *options).parse()?;
        Ok(self.commit(tree.as_ref()))
    }

    /// Store an already-parsed tree. `None` (a `null` root) stores nothing.
    pub fn commit(&mut self, tree: Option<&Tree>) -> Pointer {
        let root = match tree {
            Some(tree) => tree.accept(&mut ArenaBuilder::new(self)),
            None => Pointer::NIL,
        };
        debug!(
            root = %root.kind,
            objects = self.len(Kind::Object),
            lists = self.len(Kind::List),
            "committed document to arena"
        );
        root
    }
}
