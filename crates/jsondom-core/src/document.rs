//! Document root and borrow-checked cursors.
//!
//! A [`Document`] owns one node arena and the root value of one JSON tree,
//! the non-aliased top-level owner the read/write entry points operate on.
//! It deliberately does not implement `Clone`: the root is never rebound or
//! aliased, only replaced through explicit operations (`read_from`,
//! `clear`, root-cursor mutation).
//!
//! Navigation goes through two cursor types instead of references into
//! arena storage:
//!
//! - [`ValueRef`] for shared access: tag-checked accessors, iteration,
//!   structural equality.
//! - [`ValueMut`] for exclusive access: all mutation, plus auto-vivifying
//!   [`key`](ValueMut::key) so nested construction reads naturally:
//!
//! ```
//! use jsondom_core::Document;
//!
//! let mut doc = Document::new();
//! doc.root_mut().key("server")?.key("port")?.set_i64(8080);
//! assert_eq!(doc.to_json(0)?, r#"{"server":{"port":8080}}"#);
//! # Ok::<(), jsondom_core::Error>(())
//! ```

use std::io::Read;
use std::str::FromStr;

use crate::arena::{ArrayNode, Node, NodeArena, NodeId, ObjectNode};
use crate::error::{Error, Result};
use crate::stream::{ReadSource, SliceSource, Sink, Source, VecSink};
use crate::value::{Kind, Number, Value};
use crate::{reader, writer};

/// Root-level owner of a complete JSON tree and the arena backing it.
#[derive(Debug, Default)]
pub struct Document {
    arena: NodeArena,
    root: Value,
}

impl Document {
    /// An empty document with a fresh arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the arena; the explicit stand-in for a process-wide
    /// default allocator.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(nodes),
            root: Value::Empty,
        }
    }

    /// Parses a document from a byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut doc = Self::new();
        doc.read_from(&mut ReadSource::new(reader))?;
        Ok(doc)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Mutable arena access, for building standalone [`Value`]s to `push`,
    /// `insert` or `assign` into the tree.
    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    /// Container nodes currently allocated. Zero for a cleared document.
    pub fn live_nodes(&self) -> usize {
        self.arena.live_nodes()
    }

    pub fn root(&self) -> ValueRef<'_> {
        ValueRef {
            arena: &self.arena,
            value: &self.root,
        }
    }

    pub fn root_mut(&mut self) -> ValueMut<'_> {
        ValueMut {
            arena: &mut self.arena,
            loc: Loc::Root(&mut self.root),
        }
    }

    /// Releases the whole tree; `live_nodes` drops to zero.
    pub fn clear(&mut self) {
        let mut old = std::mem::take(&mut self.root);
        old.clear(&mut self.arena);
    }

    /// Replaces this document's tree with one value parsed from `src`.
    ///
    /// On failure the document is left empty: the previous tree is
    /// released up front and a failed parse releases everything it
    /// allocated, never leaving a half-populated root.
    pub fn read_from<S: Source>(&mut self, src: &mut S) -> Result<()> {
        self.clear();
        self.root = reader::read_value(&mut self.arena, src)?;
        Ok(())
    }

    /// Writes the tree to `sink`; `tab == 0` compact, `tab > 0` pretty.
    pub fn write_to<S: Sink>(&self, sink: &mut S, tab: u32) -> Result<()> {
        writer::write_value(&self.arena, &self.root, sink, tab)
    }

    /// Serializes to an owned string.
    pub fn to_json(&self, tab: u32) -> Result<String> {
        let mut sink = VecSink::new();
        self.write_to(&mut sink, tab)?;
        sink.into_string()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        doc.read_from(&mut SliceSource::from(text))?;
        Ok(doc)
    }
}

fn mismatch(expected: Kind, found: Kind) -> Error {
    Error::TypeMismatch { expected, found }
}

/// Shared cursor over one value in a document.
#[derive(Clone, Copy)]
pub struct ValueRef<'a> {
    arena: &'a NodeArena,
    value: &'a Value,
}

impl<'a> ValueRef<'a> {
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, Value::Object(_))
    }

    /// Succeeds only on an exact `Null` tag.
    pub fn as_null(&self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            v => Err(mismatch(Kind::Null, v.kind())),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            v => Err(mismatch(Kind::Boolean, v.kind())),
        }
    }

    pub fn as_number(&self) -> Result<Number> {
        match self.value {
            Value::Number(n) => Ok(*n),
            v => Err(mismatch(Kind::Number, v.kind())),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        Ok(self.as_number()?.as_f64())
    }

    pub fn as_i64(&self) -> Result<i64> {
        Ok(self.as_number()?.as_i64())
    }

    pub fn as_u64(&self) -> Result<u64> {
        Ok(self.as_number()?.as_u64())
    }

    pub fn as_str(&self) -> Result<&'a str> {
        match self.value {
            Value::String(s) => Ok(s),
            v => Err(mismatch(Kind::String, v.kind())),
        }
    }

    /// Element count of an array or entry count of an object.
    pub fn len(&self) -> Result<usize> {
        match self.value {
            Value::Array(id) => Ok(self.arena.array(*id).len()),
            Value::Object(id) => Ok(self.arena.object(*id).len()),
            v => Err(mismatch(Kind::Array, v.kind())),
        }
    }

    /// Child at `index`; requires the array tag.
    pub fn at(&self, index: usize) -> Result<ValueRef<'a>> {
        let id = self.expect_array()?;
        let node = self.arena.array(id);
        if index >= node.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: node.len(),
            });
        }
        Ok(ValueRef {
            arena: self.arena,
            value: node.item(index),
        })
    }

    /// First entry with `key`; requires the object tag. A missing key is
    /// [`Error::MissingKey`]; the shared path never inserts.
    pub fn key(&self, key: &str) -> Result<ValueRef<'a>> {
        let id = self.expect_object()?;
        let node = self.arena.object(id);
        match node.position(key) {
            Some(index) => Ok(ValueRef {
                arena: self.arena,
                value: node.entry_value(index),
            }),
            None => Err(Error::MissingKey(key.to_string())),
        }
    }

    /// Like [`key`](Self::key), but any miss (wrong tag or absent key)
    /// is `None`.
    pub fn get(&self, key: &str) -> Option<ValueRef<'a>> {
        match self.value {
            Value::Object(id) => {
                let node = self.arena.object(*id);
                node.position(key).map(|index| ValueRef {
                    arena: self.arena,
                    value: node.entry_value(index),
                })
            }
            _ => None,
        }
    }

    /// Iterates array elements in insertion order; requires the array tag.
    pub fn elements(&self) -> Result<Elements<'a>> {
        let id = self.expect_array()?;
        Ok(Elements {
            arena: self.arena,
            items: self.arena.array(id).items(),
            next: 0,
        })
    }

    /// Iterates object entries in insertion order; requires the object tag.
    pub fn entries(&self) -> Result<Entries<'a>> {
        let id = self.expect_object()?;
        Ok(Entries {
            arena: self.arena,
            entries: self.arena.object(id).entries(),
            next: 0,
        })
    }

    fn expect_array(&self) -> Result<NodeId> {
        match self.value {
            Value::Array(id) => Ok(*id),
            v => Err(mismatch(Kind::Array, v.kind())),
        }
    }

    fn expect_object(&self) -> Result<NodeId> {
        match self.value {
            Value::Object(id) => Ok(*id),
            v => Err(mismatch(Kind::Object, v.kind())),
        }
    }
}

/// Structural equality: scalars by value (number categories are distinct),
/// containers element-wise in insertion order.
impl PartialEq for ValueRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.value, other.value) {
            (Value::Empty, Value::Empty) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                let a = self.arena.array(*a).items();
                let b = other.arena.array(*b).items();
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| {
                        ValueRef {
                            arena: self.arena,
                            value: x,
                        } == ValueRef {
                            arena: other.arena,
                            value: y,
                        }
                    })
            }
            (Value::Object(a), Value::Object(b)) => {
                let a = self.arena.object(*a).entries();
                let b = other.arena.object(*b).entries();
                a.len() == b.len()
                    && a.iter().zip(b).all(|((ka, va), (kb, vb))| {
                        ka == kb
                            && ValueRef {
                                arena: self.arena,
                                value: va,
                            } == ValueRef {
                                arena: other.arena,
                                value: vb,
                            }
                    })
            }
            _ => false,
        }
    }
}

/// Iterator over array elements.
pub struct Elements<'a> {
    arena: &'a NodeArena,
    items: &'a [Value],
    next: usize,
}

impl<'a> Iterator for Elements<'a> {
    type Item = ValueRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.items.get(self.next)?;
        self.next += 1;
        Some(ValueRef {
            arena: self.arena,
            value,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.items.len() - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Elements<'_> {}

/// Iterator over object entries as `(key, value)` pairs.
pub struct Entries<'a> {
    arena: &'a NodeArena,
    entries: &'a [(String, Value)],
    next: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, ValueRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.get(self.next)?;
        self.next += 1;
        Some((
            key.as_str(),
            ValueRef {
                arena: self.arena,
                value,
            },
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.entries.len() - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Entries<'_> {}

enum Loc<'a> {
    /// The document root, which lives outside the arena.
    Root(&'a mut Value),
    /// A child slot inside a container node.
    Slot { id: NodeId, index: usize },
}

/// Exclusive cursor over one value in a document.
///
/// All mutation funnels through here. Replacing a value always releases the
/// old payload first, so container nodes are freed exactly once. Navigation
/// (`at`, `key`) consumes the cursor and returns one for the child.
pub struct ValueMut<'a> {
    arena: &'a mut NodeArena,
    loc: Loc<'a>,
}

impl<'a> ValueMut<'a> {
    fn value(&self) -> &Value {
        match &self.loc {
            Loc::Root(v) => v,
            Loc::Slot { id, index } => self.arena.child(*id, *index),
        }
    }

    fn value_mut(&mut self) -> &mut Value {
        match &mut self.loc {
            Loc::Root(v) => v,
            Loc::Slot { id, index } => self.arena.child_mut(*id, *index),
        }
    }

    /// Releases the current payload and installs `new`.
    fn replace(&mut self, new: Value) {
        let mut old = std::mem::replace(self.value_mut(), new);
        old.clear(self.arena);
    }

    pub fn kind(&self) -> Kind {
        self.value().kind()
    }

    /// A shared cursor over the same value, for accessors and comparison.
    pub fn as_ref(&self) -> ValueRef<'_> {
        ValueRef {
            arena: self.arena,
            value: self.value(),
        }
    }

    pub fn set_null(&mut self) {
        self.replace(Value::Null);
    }

    pub fn set_bool(&mut self, v: bool) {
        self.replace(Value::Bool(v));
    }

    pub fn set_i64(&mut self, v: i64) {
        self.replace(Value::Number(Number::Int(v)));
    }

    pub fn set_u64(&mut self, v: u64) {
        self.replace(Value::Number(Number::Uint(v)));
    }

    pub fn set_f64(&mut self, v: f64) {
        self.replace(Value::Number(Number::Float(v)));
    }

    pub fn set_number(&mut self, v: Number) {
        self.replace(Value::Number(v));
    }

    pub fn set_str(&mut self, v: &str) {
        self.replace(Value::String(v.to_string()));
    }

    pub fn set_string(&mut self, v: String) {
        self.replace(Value::String(v));
    }

    /// Replaces the payload with a fresh empty array node.
    pub fn set_array(&mut self) {
        let id = self.arena.insert(Node::Array(ArrayNode::default()));
        self.replace(Value::Array(id));
    }

    /// Replaces the payload with a fresh empty object node.
    pub fn set_object(&mut self) {
        let id = self.arena.insert(Node::Object(ObjectNode::default()));
        self.replace(Value::Object(id));
    }

    /// Replaces the payload with an array built from `items`.
    pub fn set_array_from(&mut self, items: Vec<Value>) {
        let value = Value::array_from(self.arena, items);
        self.replace(value);
    }

    /// Replaces the payload with an object built from `pairs`.
    pub fn set_object_from(&mut self, pairs: Vec<(String, Value)>) {
        let value = Value::object_from(self.arena, pairs);
        self.replace(value);
    }

    /// Replaces the payload with a container inferred from a flat literal
    /// list; see [`Value::from_list`] for the (ambiguous) inference rule.
    pub fn set_list(&mut self, items: Vec<Value>) {
        let value = Value::from_list(self.arena, items);
        self.replace(value);
    }

    /// Installs `value`, releasing the old payload. Ownership of any
    /// container subtree inside `value` transfers to this slot.
    pub fn assign(&mut self, value: Value) {
        self.replace(value);
    }

    /// Moves the value out in O(1), leaving `Empty` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self.value_mut())
    }

    /// Deep copy of this subtree into fresh nodes of the same arena. The
    /// copy and the original are independently mutable and releasable.
    pub fn to_value(&mut self) -> Value {
        let alias = self.value().alias();
        alias.deep_clone(self.arena)
    }

    /// Releases the payload, leaving `Empty`. Idempotent.
    pub fn clear(&mut self) {
        let mut old = std::mem::take(self.value_mut());
        old.clear(self.arena);
    }

    /// Element/entry count, as [`ValueRef::len`].
    pub fn len(&self) -> Result<usize> {
        self.as_ref().len()
    }

    /// Appends to an array.
    pub fn push(&mut self, value: Value) -> Result<()> {
        let id = self.expect_array()?;
        self.arena.array_mut(id).push(value);
        Ok(())
    }

    /// Appends an entry to an object. Duplicate keys are permitted; lookup
    /// always returns the first occurrence.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        let id = self.expect_object()?;
        self.arena.object_mut(id).insert(key.to_string(), value);
        Ok(())
    }

    /// Removes the array element at `index`, releasing its subtree.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        let id = self.expect_array()?;
        let len = self.arena.array(id).len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let mut removed = self.arena.array_mut(id).erase(index);
        removed.clear(self.arena);
        Ok(())
    }

    /// Removes the first entry with `key`, releasing its subtree. Returns
    /// whether an entry was found.
    pub fn remove_key(&mut self, key: &str) -> Result<bool> {
        let id = self.expect_object()?;
        match self.arena.object(id).position(key) {
            Some(index) => {
                let (_, mut removed) = self.arena.object_mut(id).erase(index);
                removed.clear(self.arena);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Descends to the array element at `index`.
    pub fn at(self, index: usize) -> Result<ValueMut<'a>> {
        let id = self.expect_array()?;
        let len = self.arena.array(id).len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        Ok(ValueMut {
            arena: self.arena,
            loc: Loc::Slot { id, index },
        })
    }

    /// Descends to the first entry with `key`, auto-vivifying: a missing
    /// key is appended bound to `Empty` and the cursor lands on it, and an
    /// `Empty` value promotes itself to an empty object first, so
    /// `root.key("a")?.key("b")?.set_i64(1)` builds the nested path in one
    /// chain. Any other non-object tag is a type mismatch.
    pub fn key(mut self, key: &str) -> Result<ValueMut<'a>> {
        if self.value().is_empty() {
            let id = self.arena.insert(Node::Object(ObjectNode::default()));
            *self.value_mut() = Value::Object(id);
        }
        let id = self.expect_object()?;
        let node = self.arena.object_mut(id);
        let index = match node.position(key) {
            Some(index) => index,
            None => {
                node.insert(key.to_string(), Value::Empty);
                node.len() - 1
            }
        };
        Ok(ValueMut {
            arena: self.arena,
            loc: Loc::Slot { id, index },
        })
    }

    fn expect_array(&self) -> Result<NodeId> {
        match self.value() {
            Value::Array(id) => Ok(*id),
            v => Err(mismatch(Kind::Array, v.kind())),
        }
    }

    fn expect_object(&self) -> Result<NodeId> {
        match self.value() {
            Value::Object(id) => Ok(*id),
            v => Err(mismatch(Kind::Object, v.kind())),
        }
    }
}
