//! Columnar value store addressed by tagged indices.
//!
//! Every parsed value lives in one of six append-only columns, one per type.
//! Values refer to each other through [`Pointer`]s (a type tag plus an index
//! into that type's column), never through references, so the whole graph is
//! a handful of flat vectors.
//!
//! # Invariants
//!
//! - A non-NIL pointer handed out by the arena indexes a live entry of its
//!   kind's column. Columns never shrink, so pointers stay valid.
//! - NIL has no column. Its key is always 0 and must never be read as
//!   storage index 0 of anything.
//! - An object holds each key at most once; the first insertion wins.

use std::collections::HashMap;
use std::fmt::{self, Write};

/// Type tag of a [`Pointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    List,
    Nil,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "String",
            Kind::Integer => "Integer",
            Kind::Float => "Float",
            Kind::Boolean => "Boolean",
            Kind::Object => "Object",
            Kind::List => "List",
            Kind::Nil => "Nil",
        };
        f.write_str(name)
    }
}

/// A typed reference into one arena column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub kind: Kind,
    pub key: usize,
}

impl Pointer {
    /// "Absent": the result of a failed lookup or a JSON `null`.
    pub const NIL: Pointer = Pointer {
        kind: Kind::Nil,
        key: 0,
    };

    pub fn new(kind: Kind, key: usize) -> Self {
        Self { kind, key }
    }

    pub fn is_nil(&self) -> bool {
        self.kind == Kind::Nil
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::NIL
    }
}

/// An object record: keys in insertion order, each mapped to a pointer.
#[derive(Debug, Clone, Default)]
pub struct ObjectRecord {
    entries: Vec<(String, Pointer)>,
    index: HashMap<String, usize>,
}

impl ObjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` unless it is already present. Returns whether the entry
    /// was added; a rejected duplicate leaves the record untouched.
    pub fn insert(&mut self, key: impl Into<String>, value: Pointer) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<Pointer> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Pointer)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// A list record: child pointers in order.
pub type ListRecord = Vec<Pointer>;

/// The backing store for parsed documents.
///
/// Populated by [`ArenaBuilder`](crate::ArenaBuilder) during a parse, then
/// read through [`ResultSet`](crate::ResultSet) views. Nothing on the read
/// side mutates it, so a finished arena can be shared across threads by
/// reference.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    strings: Vec<String>,
    integers: Vec<i64>,
    floats: Vec<f64>,
    booleans: Vec<bool>,
    lists: Vec<ListRecord>,
    objects: Vec<ObjectRecord>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_object(&mut self) -> Pointer {
        self.objects.push(ObjectRecord::new());
        Pointer::new(Kind::Object, self.objects.len() - 1)
    }

    pub fn new_list(&mut self) -> Pointer {
        self.lists.push(ListRecord::new());
        Pointer::new(Kind::List, self.lists.len() - 1)
    }

    pub fn new_string(&mut self, value: impl Into<String>) -> Pointer {
        self.strings.push(value.into());
        Pointer::new(Kind::String, self.strings.len() - 1)
    }

    pub fn new_integer(&mut self, value: i64) -> Pointer {
        self.integers.push(value);
        Pointer::new(Kind::Integer, self.integers.len() - 1)
    }

    pub fn new_float(&mut self, value: f64) -> Pointer {
        self.floats.push(value);
        Pointer::new(Kind::Float, self.floats.len() - 1)
    }

    pub fn new_boolean(&mut self, value: bool) -> Pointer {
        self.booleans.push(value);
        Pointer::new(Kind::Boolean, self.booleans.len() - 1)
    }

    pub fn object(&self, key: usize) -> Option<&ObjectRecord> {
        self.objects.get(key)
    }

    pub fn object_mut(&mut self, key: usize) -> Option<&mut ObjectRecord> {
        self.objects.get_mut(key)
    }

    pub fn list(&self, key: usize) -> Option<&ListRecord> {
        self.lists.get(key)
    }

    pub fn list_mut(&mut self, key: usize) -> Option<&mut ListRecord> {
        self.lists.get_mut(key)
    }

    pub fn string(&self, key: usize) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn integer(&self, key: usize) -> Option<i64> {
        self.integers.get(key).copied()
    }

    pub fn float(&self, key: usize) -> Option<f64> {
        self.floats.get(key).copied()
    }

    pub fn boolean(&self, key: usize) -> Option<bool> {
        self.booleans.get(key).copied()
    }

    /// Number of entries in the column for `kind`. NIL has no column.
    pub fn len(&self, kind: Kind) -> usize {
        match kind {
            Kind::String => self.strings.len(),
            Kind::Integer => self.integers.len(),
            Kind::Float => self.floats.len(),
            Kind::Boolean => self.booleans.len(),
            Kind::Object => self.objects.len(),
            Kind::List => self.lists.len(),
            Kind::Nil => 0,
        }
    }

    /// True when no value of any kind has been stored.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
            && self.integers.is_empty()
            && self.floats.is_empty()
            && self.booleans.is_empty()
            && self.lists.is_empty()
            && self.objects.is_empty()
    }

    /// Whether `pointer` is NIL or indexes a live entry of its kind.
    pub fn contains(&self, pointer: Pointer) -> bool {
        pointer.is_nil() || pointer.key < self.len(pointer.kind)
    }

    /// The most recently created object, or NIL when there is none.
    ///
    /// Objects are created in postorder, so for a single document with an
    /// object root this is the root. When several documents share an arena
    /// it is the root of the last one ingested (if that root is an object).
    pub fn last_object(&self) -> Pointer {
        match self.objects.len() {
            0 => Pointer::NIL,
            n => Pointer::new(Kind::Object, n - 1),
        }
    }

    /// Column-by-column listing of the arena contents, for debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out);
        out
    }

    fn write_dump(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "Objects:")?;
        for (i, object) in self.objects.iter().enumerate() {
            writeln!(out, "  Object {i}:")?;
            for (j, (key, value)) in object.iter().enumerate() {
                writeln!(out, "    {j}: [{key}] -> {} {}", value.kind, value.key)?;
            }
        }

        writeln!(out, "Lists:")?;
        for (i, list) in self.lists.iter().enumerate() {
            writeln!(out, "  List {i}:")?;
            for (j, value) in list.iter().enumerate() {
                writeln!(out, "    {j}: {} {}", value.kind, value.key)?;
            }
        }

        writeln!(out, "Strings:")?;
        for (i, value) in self.strings.iter().enumerate() {
            writeln!(out, "  {i}: [{value}]")?;
        }

        writeln!(out, "Integers:")?;
        for (i, value) in self.integers.iter().enumerate() {
            writeln!(out, "  {i}: [{value}]")?;
        }

        writeln!(out, "Floats:")?;
        for (i, value) in self.floats.iter().enumerate() {
            writeln!(out, "  {i}: [{value:?}]")?;
        }

        writeln!(out, "Booleans:")?;
        for (i, value) in self.booleans.iter().enumerate() {
            writeln!(out, "  {i}: [{value}]")?;
        }
        Ok(())
    }
}
