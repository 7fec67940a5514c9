//! Recursive JSON writer.
//!
//! Mirrors the grammar over the value tree. A single `tab` parameter picks
//! the output mode: `0` is fully compact (no whitespace anywhere, bare
//! colons), any other width pretty-prints with every element on its own
//! line indented `depth × tab` spaces and `": "` between keys and values.
//! Depth is threaded as a recursion parameter rather than shared state, so
//! the writer is reentrant and its only effect is appending to the sink.
//!
//! String payloads are emitted verbatim between quotes, with no output
//! escaping. A payload containing `"` or control bytes therefore produces
//! invalid JSON; that is accepted behavior of this model, the mirror image
//! of the parser's escape-free string scan.

use crate::arena::{NodeArena, NodeId};
use crate::error::Result;
use crate::stream::Sink;
use crate::value::Value;

/// Writes one value tree to the sink. `tab == 0` → compact, `tab > 0` →
/// pretty-printed with that many spaces per indent level.
pub fn write_value<S: Sink>(arena: &NodeArena, value: &Value, sink: &mut S, tab: u32) -> Result<()> {
    write_at_depth(arena, value, sink, 0, tab)
}

fn write_at_depth<S: Sink>(
    arena: &NodeArena,
    value: &Value,
    sink: &mut S,
    depth: u32,
    tab: u32,
) -> Result<()> {
    match value {
        // An empty value writes nothing, matching the parser's inability to
        // ever produce one.
        Value::Empty => Ok(()),
        Value::Null => put_str(sink, "null"),
        Value::Bool(true) => put_str(sink, "true"),
        Value::Bool(false) => put_str(sink, "false"),
        Value::Number(number) => put_str(sink, &number.to_string()),
        Value::String(text) => {
            sink.put(b'"')?;
            put_str(sink, text)?;
            sink.put(b'"')
        }
        Value::Array(id) => write_array(arena, *id, sink, depth, tab),
        Value::Object(id) => write_object(arena, *id, sink, depth, tab),
    }
}

fn write_array<S: Sink>(
    arena: &NodeArena,
    id: NodeId,
    sink: &mut S,
    depth: u32,
    tab: u32,
) -> Result<()> {
    sink.put(b'[')?;
    let len = arena.array(id).len();
    for i in 0..len {
        if tab != 0 {
            sink.put(b'\n')?;
        }
        put_indent(sink, depth + 1, tab)?;
        write_at_depth(arena, arena.array(id).item(i), sink, depth + 1, tab)?;
        if i + 1 < len {
            sink.put(b',')?;
        }
    }
    if tab != 0 {
        sink.put(b'\n')?;
    }
    put_indent(sink, depth, tab)?;
    sink.put(b']')
}

fn write_object<S: Sink>(
    arena: &NodeArena,
    id: NodeId,
    sink: &mut S,
    depth: u32,
    tab: u32,
) -> Result<()> {
    sink.put(b'{')?;
    let len = arena.object(id).len();
    for i in 0..len {
        if tab != 0 {
            sink.put(b'\n')?;
        }
        put_indent(sink, depth + 1, tab)?;

        sink.put(b'"')?;
        put_str(sink, &arena.object(id).entries()[i].0)?;
        sink.put(b'"')?;

        sink.put(b':')?;
        if tab != 0 {
            sink.put(b' ')?;
        }

        write_at_depth(arena, arena.object(id).entry_value(i), sink, depth + 1, tab)?;
        if i + 1 < len {
            sink.put(b',')?;
        }
    }
    if tab != 0 {
        sink.put(b'\n')?;
    }
    put_indent(sink, depth, tab)?;
    sink.put(b'}')
}

fn put_str<S: Sink>(sink: &mut S, text: &str) -> Result<()> {
    for byte in text.bytes() {
        sink.put(byte)?;
    }
    Ok(())
}

fn put_indent<S: Sink>(sink: &mut S, depth: u32, tab: u32) -> Result<()> {
    if tab == 0 {
        return Ok(());
    }
    for _ in 0..depth.saturating_mul(tab) {
        sink.put(b' ')?;
    }
    Ok(())
}
