//! Per-document node arena.
//!
//! Array and object payloads are not boxed individually: they live in a
//! slab owned by the document, and values reference them through stable
//! [`NodeId`] handles. Slots freed by [`Value::clear`](crate::Value::clear)
//! are recycled through a free list, and the arena keeps a live-node count
//! so the allocate/release pairing is observable: every inserted node must
//! be removed exactly once, an invariant the value layer upholds by routing
//! all releases through `clear`.
//!
//! Handles are plain indices, not borrows: the arena never hands out a
//! reference that outlives a mutation. Freeing a node behind a live handle
//! is a caller bug and panics on next access rather than dangling.

use crate::value::Value;

/// Stable handle to a container node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A container node: the heap-indirected payload of an array or object value.
#[derive(Debug)]
pub(crate) enum Node {
    Array(ArrayNode),
    Object(ObjectNode),
}

/// Ordered sequence of child values; insertion order is semantic order.
#[derive(Debug, Default)]
pub(crate) struct ArrayNode {
    items: Vec<Value>,
}

impl ArrayNode {
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn items(&self) -> &[Value] {
        &self.items
    }

    pub(crate) fn item(&self, index: usize) -> &Value {
        &self.items[index]
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> &mut Value {
        &mut self.items[index]
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Removes the item at `index`, shifting later items left.
    /// The caller is responsible for clearing the returned value.
    pub(crate) fn erase(&mut self, index: usize) -> Value {
        self.items.remove(index)
    }

    pub(crate) fn into_items(self) -> Vec<Value> {
        self.items
    }
}

/// Ordered sequence of key/value pairs. Insertion order is preserved (not
/// sorted), key lookup is a linear scan, and duplicate keys are permitted:
/// `insert` always appends, lookups return the first match.
#[derive(Debug, Default)]
pub(crate) struct ObjectNode {
    entries: Vec<(String, Value)>,
}

impl ObjectNode {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub(crate) fn entry_value(&self, index: usize) -> &Value {
        &self.entries[index].1
    }

    pub(crate) fn entry_value_mut(&mut self, index: usize) -> &mut Value {
        &mut self.entries[index].1
    }

    /// Index of the first entry with this key, if any.
    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Appends an entry unconditionally; a duplicate key shadows nothing,
    /// it simply sits after the first occurrence.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.entries.push((key, value));
    }

    /// Removes the entry at `index`. The caller clears the returned value.
    pub(crate) fn erase(&mut self, index: usize) -> (String, Value) {
        self.entries.remove(index)
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

/// Slab allocator for container nodes, one per document.
///
/// `insert` returns a handle that stays valid until the matching `remove`;
/// freed slots are reused for later insertions. [`live_nodes`] reports the
/// number of outstanding nodes, which drops back to zero when a document is
/// cleared, including after a failed parse.
///
/// [`live_nodes`]: NodeArena::live_nodes
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the slab for documents whose node count is roughly known.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(nodes),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of container nodes currently allocated and not yet released.
    pub fn live_nodes(&self) -> usize {
        self.live
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(node);
            return NodeId(slot);
        }
        let slot = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("node arena exceeded {} slots", u32::MAX);
        });
        self.slots.push(Some(node));
        NodeId(slot)
    }

    /// Releases a node, recycling its slot. Children inside the returned
    /// node are still live values; `Value::clear` walks them afterwards.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node {
        match self.slots[id.index()].take() {
            Some(node) => {
                self.live -= 1;
                self.free.push(id.0);
                node
            }
            None => panic!("double release of node {id:?}"),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        match self.slots[id.index()] {
            Some(ref node) => node,
            None => panic!("stale node handle {id:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots[id.index()] {
            Some(ref mut node) => node,
            None => panic!("stale node handle {id:?}"),
        }
    }

    /// Child value at `index` of a container node: array item or object
    /// entry value, by position.
    pub(crate) fn child(&self, id: NodeId, index: usize) -> &Value {
        match self.node(id) {
            Node::Array(node) => node.item(index),
            Node::Object(node) => node.entry_value(index),
        }
    }

    pub(crate) fn child_mut(&mut self, id: NodeId, index: usize) -> &mut Value {
        match self.node_mut(id) {
            Node::Array(node) => node.item_mut(index),
            Node::Object(node) => node.entry_value_mut(index),
        }
    }

    pub(crate) fn array(&self, id: NodeId) -> &ArrayNode {
        match self.node(id) {
            Node::Array(node) => node,
            Node::Object(_) => panic!("array handle {id:?} resolved to an object node"),
        }
    }

    pub(crate) fn array_mut(&mut self, id: NodeId) -> &mut ArrayNode {
        match self.node_mut(id) {
            Node::Array(node) => node,
            Node::Object(_) => panic!("array handle {id:?} resolved to an object node"),
        }
    }

    pub(crate) fn object(&self, id: NodeId) -> &ObjectNode {
        match self.node(id) {
            Node::Object(node) => node,
            Node::Array(_) => panic!("object handle {id:?} resolved to an array node"),
        }
    }

    pub(crate) fn object_mut(&mut self, id: NodeId) -> &mut ObjectNode {
        match self.node_mut(id) {
            Node::Object(node) => node,
            Node::Array(_) => panic!("object handle {id:?} resolved to an array node"),
        }
    }
}
