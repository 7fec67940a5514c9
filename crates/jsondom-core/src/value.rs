//! The tagged-union value model and its ownership rules.
//!
//! A [`Value`] is the universal JSON datum: empty, null, boolean, number,
//! string, or a handle to an arena-allocated array/object node. Scalars are
//! held inline and never touch the arena; containers are reached through a
//! [`NodeId`] into the document's [`NodeArena`].
//!
//! Ownership is strict: a value owns its container subtree outright, and no
//! two independently releasable values ever share a node. `Value` therefore
//! has no `Clone` impl; duplication is the explicit [`Value::deep_clone`],
//! which copies the whole subtree into fresh nodes, while moves transfer the
//! handle in O(1) and leave `Empty` behind (`Value` implements `Default` so
//! `std::mem::take` is the move primitive). All releases funnel through the
//! single choke point [`Value::clear`].

use std::fmt;

use crate::arena::{ArrayNode, Node, NodeArena, NodeId, ObjectNode};

/// Tag of a [`Value`], used in type-mismatch reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Empty,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Empty => "empty",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A JSON number in one of three storage categories.
///
/// The category is chosen at parse time, not by a static type: a literal
/// containing a decimal point is `Float`; otherwise a leading `-` makes it
/// `Int`, and non-negative digit strings collating byte-wise greater than
/// `"9223372036854775807"` are `Uint`, else `Int`. Casts between categories
/// are plain `as` conversions with no overflow checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Float(f64),
    Int(i64),
    Uint(u64),
}

impl Number {
    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn is_uint(self) -> bool {
        matches!(self, Number::Uint(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Float(v) => v,
            Number::Int(v) => v as f64,
            Number::Uint(v) => v as f64,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Number::Float(v) => v as i64,
            Number::Int(v) => v,
            Number::Uint(v) => v as i64,
        }
    }

    pub fn as_u64(self) -> u64 {
        match self {
            Number::Float(v) => v as u64,
            Number::Int(v) => v as u64,
            Number::Uint(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Float(v) => write!(f, "{v}"),
            Number::Int(v) => write!(f, "{v}"),
            Number::Uint(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! number_from_int {
    ($variant:ident: $($ty:ty),+) => {
        $(impl From<$ty> for Number {
            fn from(v: $ty) -> Self {
                Number::$variant(v.into())
            }
        })+
    };
}

number_from_int!(Int: i8, i16, i32, i64);
number_from_int!(Uint: u8, u16, u32, u64);

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// The universal JSON datum.
///
/// Scalar variants are self-contained; `Array` and `Object` hold handles
/// into the owning document's arena. A container-tagged value must be
/// released through [`clear`](Value::clear) (or transferred into a node that
/// will be); dropping one on the floor leaks its slots until the document
/// itself is dropped, but never dangles.
#[derive(Debug, Default)]
pub enum Value {
    /// No value at all. Distinct from `Null`, which is a parsed JSON datum.
    #[default]
    Empty,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(NodeId),
    Object(NodeId),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Empty,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Builds an array value owning `items`. Ownership of any container
    /// handles inside `items` transfers into the new node.
    pub fn array_from(arena: &mut NodeArena, items: Vec<Value>) -> Value {
        let mut node = ArrayNode::default();
        for item in items {
            node.push(item);
        }
        Value::Array(arena.insert(Node::Array(node)))
    }

    /// Builds an object value from key/value pairs, preserving order and
    /// permitting duplicate keys.
    pub fn object_from(arena: &mut NodeArena, pairs: Vec<(String, Value)>) -> Value {
        let mut node = ObjectNode::default();
        for (key, value) in pairs {
            node.insert(key, value);
        }
        Value::Object(arena.insert(Node::Object(node)))
    }

    /// Builds a container from a flat literal list, inferring array vs
    /// object: a list of even length whose every even-index element is a
    /// string is treated as flattened `key, value, key, value` pairs.
    ///
    /// The inference is inherently ambiguous: an even-length array of
    /// strings (say four string elements) is always classified as an
    /// object, even if an array was intended. Use [`Value::array_from`]
    /// when the distinction matters.
    pub fn from_list(arena: &mut NodeArena, items: Vec<Value>) -> Value {
        let is_object = items.len() % 2 == 0
            && items
                .iter()
                .step_by(2)
                .all(|v| matches!(v, Value::String(_)));

        if !is_object {
            return Value::array_from(arena, items);
        }

        let mut node = ObjectNode::default();
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            // Every even-index element was checked to be a string above.
            if let Value::String(key) = key {
                node.insert(key, value);
            }
        }
        Value::Object(arena.insert(Node::Object(node)))
    }

    /// Releases any container subtree this value owns and resets the tag to
    /// `Empty`. Idempotent; the single choke point every mutating operation
    /// funnels through. Scalar tags only reset.
    pub fn clear(&mut self, arena: &mut NodeArena) {
        match std::mem::take(self) {
            Value::Array(id) => {
                if let Node::Array(node) = arena.remove(id) {
                    for mut child in node.into_items() {
                        child.clear(arena);
                    }
                }
            }
            Value::Object(id) => {
                if let Node::Object(node) = arena.remove(id) {
                    for (_, mut child) in node.into_entries() {
                        child.clear(arena);
                    }
                }
            }
            _ => {}
        }
    }

    /// Recursively duplicates this value into fresh arena nodes.
    ///
    /// The copy is fully independent: mutating or clearing it never touches
    /// the original, and both sides release their own nodes.
    pub fn deep_clone(&self, arena: &mut NodeArena) -> Value {
        match self {
            Value::Empty => Value::Empty,
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(id) => {
                let len = arena.array(*id).len();
                let mut copies = Vec::with_capacity(len);
                for i in 0..len {
                    let child = arena.array(*id).item(i).alias();
                    copies.push(child.deep_clone(arena));
                }
                Value::array_from(arena, copies)
            }
            Value::Object(id) => {
                let len = arena.object(*id).len();
                let mut copies = Vec::with_capacity(len);
                for i in 0..len {
                    let (key, child) = {
                        let entries = arena.object(*id).entries();
                        (entries[i].0.clone(), entries[i].1.alias())
                    };
                    copies.push((key, child.deep_clone(arena)));
                }
                Value::object_from(arena, copies)
            }
        }
    }

    /// Shallow bitwise-style copy sharing any container handle. Strictly an
    /// internal stepping stone for `deep_clone` traversal: an alias must
    /// never be cleared, or the original's handle would dangle.
    pub(crate) fn alias(&self) -> Value {
        match self {
            Value::Empty => Value::Empty,
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(id) => Value::Array(*id),
            Value::Object(id) => Value::Object(*id),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Number(Number::from(v))
            }
        })+
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
