//! Read-only query views over an [`Arena`].
//!
//! A [`ResultSet`] is an `(arena, pointer)` pair. Navigation never fails
//! loudly: a missing key, an out-of-range index or a type mismatch produces a
//! NIL view, and further navigation from NIL stays NIL, so paths chain
//! without intermediate checks:
//!
//! ```
//! use json_arena::Arena;
//!
//! let arena = Arena::parse(r#"{"a":{"b":[10,20]}}"#).unwrap();
//! let root = arena.result_set();
//! assert_eq!(root.at("a").at("b").at(1).as_integer(), Some(20));
//! assert!(root.at("z").at("y").is_nil());
//! ```
//!
//! When the reason matters, the `try_*` methods return a [`QueryError`]
//! instead.
//!
//! # Canonical text
//!
//! `Display` renders the compact canonical form: `{ "k": v, "k2": v2 }`,
//! `[ v, v2 ]`, `{}` and `[]` for empty containers. A string at the top of
//! the view renders bare while nested strings are quoted and escaped; a NIL
//! view renders as nothing while a nested NIL renders `null`.
//!
//! Escapes come from the lexer's table, which has no `\u` form. `\a`, `\e`
//! and `\v` are not standard JSON, and other control characters are written
//! raw, so text holding them reparses with this crate but not with strict
//! JSON readers. Use the `Serialize` impl when interchange matters.

use crate::arena::{Arena, Kind, ListRecord, ObjectRecord, Pointer};
use crate::error::QueryError;
use crate::lexer::escape_code;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Something a [`ResultSet`] can be navigated by: a list index or an object
/// key.
pub trait Locate {
    fn locate<'a>(&self, from: &ResultSet<'a>) -> Result<ResultSet<'a>, QueryError>;
}

impl Locate for usize {
    fn locate<'a>(&self, from: &ResultSet<'a>) -> Result<ResultSet<'a>, QueryError> {
        let list = from.list_record().ok_or_else(|| from.mismatch(Kind::List))?;
        list.get(*self)
            .map(|&pointer| from.child(pointer))
            .ok_or(QueryError::IndexOutOfRange {
                index: *self,
                len: list.len(),
            })
    }
}

impl Locate for str {
    fn locate<'a>(&self, from: &ResultSet<'a>) -> Result<ResultSet<'a>, QueryError> {
        let object = from
            .object_record()
            .ok_or_else(|| from.mismatch(Kind::Object))?;
        object
            .get(self)
            .map(|pointer| from.child(pointer))
            .ok_or_else(|| QueryError::LookupMiss {
                key: self.to_string(),
            })
    }
}

impl Locate for String {
    fn locate<'a>(&self, from: &ResultSet<'a>) -> Result<ResultSet<'a>, QueryError> {
        self.as_str().locate(from)
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    fn locate<'a>(&self, from: &ResultSet<'a>) -> Result<ResultSet<'a>, QueryError> {
        (**self).locate(from)
    }
}

/// An immutable view of one arena location.
#[derive(Debug, Clone, Copy)]
pub struct ResultSet<'a> {
    arena: &'a Arena,
    pointer: Pointer,
}

impl Arena {
    /// View rooted at the last object created in this arena, or NIL if the
    /// arena holds no objects.
    pub fn result_set(&self) -> ResultSet<'_> {
        ResultSet::new(self, self.last_object())
    }

    /// View of an arbitrary pointer, e.g. a root returned by
    /// [`ingest`](Arena::ingest).
    pub fn view(&self, pointer: Pointer) -> ResultSet<'_> {
        ResultSet::new(self, pointer)
    }
}

impl<'a> ResultSet<'a> {
    pub fn new(arena: &'a Arena, pointer: Pointer) -> Self {
        Self { arena, pointer }
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn type_code(&self) -> Kind {
        self.pointer.kind
    }

    pub fn is_nil(&self) -> bool {
        self.pointer.is_nil()
    }

    /// Navigate by index (lists) or key (objects). Anything that does not
    /// resolve, including an index past the end, yields a NIL view.
    pub fn at<L: Locate>(&self, location: L) -> ResultSet<'a> {
        self.try_at(location).unwrap_or_else(|_| self.child(Pointer::NIL))
    }

    /// Like [`at`](ResultSet::at) but reports why nothing was found.
    pub fn try_at<L: Locate>(&self, location: L) -> Result<ResultSet<'a>, QueryError> {
        location.locate(self)
    }

    pub fn get(&self, key: &str) -> ResultSet<'a> {
        self.at(key)
    }

    pub fn try_get(&self, key: &str) -> Result<ResultSet<'a>, QueryError> {
        self.try_at(key)
    }

    pub fn index(&self, index: usize) -> ResultSet<'a> {
        self.at(index)
    }

    pub fn try_index(&self, index: usize) -> Result<ResultSet<'a>, QueryError> {
        self.try_at(index)
    }

    pub fn as_integer(&self) -> Option<i64> {
        self.try_integer().ok()
    }

    pub fn as_float(&self) -> Option<f64> {
        self.try_float().ok()
    }

    pub fn as_string(&self) -> Option<&'a str> {
        self.try_string().ok()
    }

    pub fn as_boolean(&self) -> Option<bool> {
        self.try_boolean().ok()
    }

    pub fn try_integer(&self) -> Result<i64, QueryError> {
        self.expect(Kind::Integer)?;
        self.arena
            .integer(self.pointer.key)
            .ok_or_else(|| self.mismatch(Kind::Integer))
    }

    pub fn try_float(&self) -> Result<f64, QueryError> {
        self.expect(Kind::Float)?;
        self.arena
            .float(self.pointer.key)
            .ok_or_else(|| self.mismatch(Kind::Float))
    }

    pub fn try_string(&self) -> Result<&'a str, QueryError> {
        self.expect(Kind::String)?;
        self.arena
            .string(self.pointer.key)
            .ok_or_else(|| self.mismatch(Kind::String))
    }

    pub fn try_boolean(&self) -> Result<bool, QueryError> {
        self.expect(Kind::Boolean)?;
        self.arena
            .boolean(self.pointer.key)
            .ok_or_else(|| self.mismatch(Kind::Boolean))
    }

    /// True when this view is a string equal to `other`.
    pub fn equals_str(&self, other: &str) -> bool {
        self.as_string() == Some(other)
    }

    /// Number of children of a list or object; 0 for anything else.
    pub fn len(&self) -> usize {
        match (self.list_record(), self.object_record()) {
            (Some(list), _) => list.len(),
            (_, Some(object)) => object.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of an object in insertion order; empty for anything else.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.object_record().into_iter().flat_map(ObjectRecord::keys)
    }

    /// `(key, child)` pairs of an object in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, ResultSet<'a>)> + 'a {
        let arena = self.arena;
        self.object_record()
            .into_iter()
            .flat_map(ObjectRecord::iter)
            .map(move |(key, pointer)| (key, ResultSet::new(arena, pointer)))
    }

    /// Children of a list, or values of an object, in order. Callers filter
    /// with ordinary iterator adapters:
    ///
    /// ```
    /// use json_arena::Arena;
    ///
    /// let arena = Arena::parse(r#"{"people":[{"who":"Ann"},{"who":"Bo"}]}"#).unwrap();
    /// let bo = arena
    ///     .result_set()
    ///     .at("people")
    ///     .iter()
    ///     .filter(|p| p.at("who").equals_str("Bo"))
    ///     .last();
    /// assert!(bo.is_some());
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = ResultSet<'a>> + 'a {
        let arena = self.arena;
        let list: &'a [Pointer] = self.list_record().map(Vec::as_slice).unwrap_or(&[]);
        let values = self
            .object_record()
            .into_iter()
            .flat_map(|object| object.iter().map(|(_, pointer)| pointer));
        list.iter()
            .copied()
            .chain(values)
            .map(move |pointer| ResultSet::new(arena, pointer))
    }

    /// Convert the viewed subtree into a `serde_json::Value`. NIL becomes
    /// `Value::Null`.
    pub fn to_value(&self) -> Value {
        match self.pointer.kind {
            Kind::String => self.as_string().map_or(Value::Null, Value::from),
            Kind::Integer => self.as_integer().map_or(Value::Null, Value::from),
            Kind::Float => self
                .as_float()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
            Kind::Boolean => self.as_boolean().map_or(Value::Null, Value::Bool),
            Kind::List => Value::Array(self.iter().map(|child| child.to_value()).collect()),
            Kind::Object => Value::Object(
                self.entries()
                    .map(|(key, child)| (key.to_string(), child.to_value()))
                    .collect(),
            ),
            Kind::Nil => Value::Null,
        }
    }

    fn child(&self, pointer: Pointer) -> ResultSet<'a> {
        ResultSet::new(self.arena, pointer)
    }

    fn list_record(&self) -> Option<&'a ListRecord> {
        match self.pointer.kind {
            Kind::List => self.arena.list(self.pointer.key),
            _ => None,
        }
    }

    fn object_record(&self) -> Option<&'a ObjectRecord> {
        match self.pointer.kind {
            Kind::Object => self.arena.object(self.pointer.key),
            _ => None,
        }
    }

    fn expect(&self, kind: Kind) -> Result<(), QueryError> {
        if self.pointer.kind == kind {
            Ok(())
        } else {
            Err(self.mismatch(kind))
        }
    }

    fn mismatch(&self, expected: Kind) -> QueryError {
        QueryError::TypeMismatch {
            expected,
            found: self.pointer.kind,
        }
    }
}

impl fmt::Display for ResultSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pointer.kind {
            Kind::String => f.write_str(self.as_string().unwrap_or_default()),
            Kind::Nil => Ok(()),
            _ => write_value(self.arena, self.pointer, f),
        }
    }
}

/// Render a value in nested position: strings quoted, NIL as `null`.
fn write_value(arena: &Arena, pointer: Pointer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let key = pointer.key;
    match pointer.kind {
        Kind::String => match arena.string(key) {
            Some(text) => write_quoted(text, f),
            None => f.write_str("null"),
        },
        Kind::Integer => match arena.integer(key) {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("null"),
        },
        // Debug formatting keeps a '.' or an exponent, so floats stay floats
        // when the text is parsed again.
        Kind::Float => match arena.float(key) {
            Some(x) => write!(f, "{x:?}"),
            None => f.write_str("null"),
        },
        Kind::Boolean => match arena.boolean(key) {
            Some(b) => write!(f, "{b}"),
            None => f.write_str("null"),
        },
        Kind::Object => match arena.object(key) {
            Some(object) if object.is_empty() => f.write_str("{}"),
            Some(object) => {
                f.write_str("{ ")?;
                for (i, (name, value)) in object.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(name, f)?;
                    f.write_str(": ")?;
                    write_value(arena, value, f)?;
                }
                f.write_str(" }")
            }
            None => f.write_str("null"),
        },
        Kind::List => match arena.list(key) {
            Some(list) if list.is_empty() => f.write_str("[]"),
            Some(list) => {
                f.write_str("[ ")?;
                for (i, value) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_value(arena, *value, f)?;
                }
                f.write_str(" ]")
            }
            None => f.write_str("null"),
        },
        Kind::Nil => f.write_str("null"),
    }
}

fn write_quoted(text: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use fmt::Write;

    f.write_char('"')?;
    for c in text.chars() {
        match escape_code(c) {
            Some(code) => {
                f.write_char('\\')?;
                f.write_char(code)?;
            }
            None => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl Serialize for ResultSet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.pointer.kind {
            Kind::String => match self.as_string() {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_unit(),
            },
            Kind::Integer => match self.as_integer() {
                Some(n) => serializer.serialize_i64(n),
                None => serializer.serialize_unit(),
            },
            Kind::Float => match self.as_float() {
                Some(x) => serializer.serialize_f64(x),
                None => serializer.serialize_unit(),
            },
            Kind::Boolean => match self.as_boolean() {
                Some(b) => serializer.serialize_bool(b),
                None => serializer.serialize_unit(),
            },
            Kind::List => {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for child in self.iter() {
                    seq.serialize_element(&child)?;
                }
                seq.end()
            }
            Kind::Object => {
                let mut map = serializer.serialize_map(Some(self.len()))?;
                for (key, child) in self.entries() {
                    map.serialize_entry(key, &child)?;
                }
                map.end()
            }
            Kind::Nil => serializer.serialize_unit(),
        }
    }
}
