//! Transient syntax tree and its postorder visitor.
//!
//! A [`Tree`] lives for one parse and one visit. Each node owns its
//! children outright. A JSON `null` produces no node, so children are
//! `Option<Tree>`; the visitor sees the same slots as `Option<Output>`.

use crate::homonumeric::Homonumeric;
use crate::parser::TreeFactory;

/// Postorder callbacks. Composite callbacks run only after every child has
/// been visited, and receive the children's results in source order.
pub trait Visitor {
    type Output;

    fn for_string(&mut self, text: &str) -> Self::Output;

    fn for_numeric(&mut self, value: Homonumeric) -> Self::Output;

    /// `keys[i]` names `values[i]`. Duplicate keys are passed through as
    /// they appeared in the source.
    fn for_object(&mut self, keys: &[String], values: Vec<Option<Self::Output>>) -> Self::Output;

    fn for_list(&mut self, values: Vec<Option<Self::Output>>) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    keys: Vec<String>,
    values: Vec<Option<Tree>>,
}

impl ObjectNode {
    /// Pairs `keys` with `values` by position; both must be the same length.
    pub fn new(keys: Vec<String>, values: Vec<Option<Tree>>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[Option<Tree>] {
        &self.values
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        let values = accept_all(&self.values, visitor);
        visitor.for_object(&self.keys, values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    values: Vec<Option<Tree>>,
}

impl ListNode {
    pub fn new(values: Vec<Option<Tree>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<Tree>] {
        &self.values
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        let values = accept_all(&self.values, visitor);
        visitor.for_list(values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Object(ObjectNode),
    List(ListNode),
    String(String),
    Numeric(Homonumeric),
}

impl Tree {
    /// Walk this tree in postorder, returning the visitor's result for the
    /// root.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Tree::Object(node) => node.accept(visitor),
            Tree::List(node) => node.accept(visitor),
            Tree::String(text) => visitor.for_string(text),
            Tree::Numeric(value) => visitor.for_numeric(*value),
        }
    }
}

fn accept_all<V: Visitor>(children: &[Option<Tree>], visitor: &mut V) -> Vec<Option<V::Output>> {
    children
        .iter()
        .map(|child| child.as_ref().map(|node| node.accept(visitor)))
        .collect()
}

/// Builds [`Tree`] nodes from parser callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstFactory;

impl TreeFactory for AstFactory {
    type Node = Tree;

    fn new_object(&mut self, keys: Vec<String>, values: Vec<Option<Tree>>) -> Tree {
        Tree::Object(ObjectNode::new(keys, values))
    }

    fn new_list(&mut self, values: Vec<Option<Tree>>) -> Tree {
        Tree::List(ListNode::new(values))
    }

    fn new_string(&mut self, text: String) -> Tree {
        Tree::String(text)
    }

    fn new_numeric(&mut self, value: Homonumeric) -> Tree {
        Tree::Numeric(value)
    }
}
