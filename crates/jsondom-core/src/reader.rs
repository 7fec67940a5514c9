//! Recursive-descent JSON parser.
//!
//! Single pass, one character of lookahead: every decision is made by
//! peeking the next significant byte and dispatching to the variant reader.
//! Whitespace is skipped between all structural tokens through one shared
//! primitive. The parser is not recoverable: any mismatch aborts the whole
//! parse immediately, and container nodes allocated during a failed attempt
//! are released before the error propagates, so a failed read never leaves
//! dangling allocations behind.
//!
//! Strings are copied as raw bytes up to the closing `"`; backslash escape
//! sequences are not interpreted, a deliberate scope limitation of this
//! model rather than an oversight.

use crate::arena::{ArrayNode, Node, NodeArena, NodeId, ObjectNode};
use crate::error::{Error, Result};
use crate::stream::Source;
use crate::value::{Number, Value};

/// Reads one JSON value from the source, skipping leading whitespace.
///
/// Dispatch on the first significant character: `n` → null, `t`/`f` →
/// boolean, `"` → string, `-`/`.`/digit → number, `[` → array, `{` →
/// object. Anything else is a parse error.
pub fn read_value<S: Source>(arena: &mut NodeArena, src: &mut S) -> Result<Value> {
    skip_whitespace(src);

    match peek(src, "while expecting a value")? {
        b'n' => {
            expect_literal(src, "null")?;
            Ok(Value::Null)
        }
        b't' | b'f' => read_boolean(src),
        b'"' => Ok(Value::String(read_quoted(src)?)),
        b'-' | b'.' | b'0'..=b'9' => Ok(Value::Number(read_number(src)?)),
        b'[' => read_array(arena, src),
        b'{' => read_object(arena, src),
        other => Err(Error::Parse {
            offset: src.pos(),
            message: format!("unexpected character {:?}", char::from(other)),
        }),
    }
}

fn read_boolean<S: Source>(src: &mut S) -> Result<Value> {
    if peek(src, "while expecting a boolean")? == b't' {
        expect_literal(src, "true")?;
        Ok(Value::Bool(true))
    } else {
        expect_literal(src, "false")?;
        Ok(Value::Bool(false))
    }
}

/// Reads a `"`-delimited string as raw bytes. No escape decoding: the scan
/// stops at the first `"`, so a backslash before a quote does not extend
/// the string.
fn read_quoted<S: Source>(src: &mut S) -> Result<String> {
    let offset = src.pos();
    expect(src, b'"', "expected opening '\"'")?;
    let mut bytes = Vec::new();
    while peek(src, "inside a string")? != b'"' {
        bytes.push(src.get()?);
    }
    expect(src, b'"', "expected closing '\"'")?;
    String::from_utf8(bytes).map_err(|_| Error::Parse {
        offset,
        message: "string is not valid UTF-8".to_string(),
    })
}

/// Reads a number literal and picks its storage category.
///
/// A literal containing `.` (including the leading-fraction form `.5`,
/// which is read as `0.5`) is a float. Otherwise a leading `-` selects
/// signed; non-negative digit strings collating byte-wise greater than
/// `"9223372036854775807"` select unsigned, else signed.
fn read_number<S: Source>(src: &mut S) -> Result<Number> {
    let offset = src.pos();
    let mut buf = String::new();
    let mut is_float = false;

    if peek_is(src, b'-') {
        buf.push(char::from(src.get()?));
    }

    if peek_is(src, b'.') {
        is_float = true;
        buf.push('0');
        buf.push(char::from(src.get()?));
        push_digits(src, &mut buf)?;
    } else {
        loop {
            match src.peek() {
                Ok(c) if c.is_ascii_digit() => buf.push(char::from(src.get()?)),
                Ok(b'.') => {
                    is_float = true;
                    buf.push(char::from(src.get()?));
                    push_digits(src, &mut buf)?;
                    break;
                }
                _ => break,
            }
        }
    }

    if is_float {
        Ok(Number::Float(
            buf.parse().map_err(|_| invalid_number(offset, &buf))?,
        ))
    } else if buf.starts_with('-') {
        Ok(Number::Int(
            buf.parse().map_err(|_| invalid_number(offset, &buf))?,
        ))
    } else if buf.as_str() > "9223372036854775807" {
        Ok(Number::Uint(
            buf.parse().map_err(|_| invalid_number(offset, &buf))?,
        ))
    } else {
        Ok(Number::Int(
            buf.parse().map_err(|_| invalid_number(offset, &buf))?,
        ))
    }
}

fn invalid_number(offset: usize, literal: &str) -> Error {
    Error::Parse {
        offset,
        message: format!("invalid number literal {literal:?}"),
    }
}

/// Reads an array. The node is allocated up front and child values parse
/// directly into it; on failure the partial node (and every child already
/// in it) is released before the error escapes.
fn read_array<S: Source>(arena: &mut NodeArena, src: &mut S) -> Result<Value> {
    src.get()?; // dispatch saw '['
    let id = arena.insert(Node::Array(ArrayNode::default()));
    match read_array_items(arena, src, id) {
        Ok(()) => Ok(Value::Array(id)),
        Err(err) => {
            Value::Array(id).clear(arena);
            Err(err)
        }
    }
}

fn read_array_items<S: Source>(
    arena: &mut NodeArena,
    src: &mut S,
    id: NodeId,
) -> Result<()> {
    loop {
        skip_whitespace(src);
        if peek(src, "inside an array")? == b']' {
            break;
        }
        let item = read_value(arena, src)?;
        arena.array_mut(id).push(item);
        skip_whitespace(src);
        // Separating comma is optional; the closing bracket decides the end.
        eat(src, b',')?;
    }
    src.get()?; // ']'
    Ok(())
}

/// Reads an object: quoted key, `:`, value, optional `,`, until `}`.
fn read_object<S: Source>(arena: &mut NodeArena, src: &mut S) -> Result<Value> {
    src.get()?; // dispatch saw '{'
    let id = arena.insert(Node::Object(ObjectNode::default()));
    match read_object_entries(arena, src, id) {
        Ok(()) => Ok(Value::Object(id)),
        Err(err) => {
            Value::Object(id).clear(arena);
            Err(err)
        }
    }
}

fn read_object_entries<S: Source>(
    arena: &mut NodeArena,
    src: &mut S,
    id: NodeId,
) -> Result<()> {
    loop {
        skip_whitespace(src);
        if peek(src, "inside an object")? == b'}' {
            break;
        }
        let key = read_quoted(src)?;
        skip_whitespace(src);
        expect(src, b':', "expected ':' after object key")?;
        let value = read_value(arena, src)?;
        arena.object_mut(id).insert(key, value);
        skip_whitespace(src);
        eat(src, b',')?;
    }
    src.get()?; // '}'
    Ok(())
}

/// Consumes bytes while the lookahead is ASCII whitespace. Tolerates end of
/// input; the surrounding grammar decides whether running out is an error.
fn skip_whitespace<S: Source>(src: &mut S) {
    while let Ok(c) = src.peek() {
        // `is_ascii_whitespace` omits vertical tab, which counts here.
        if !c.is_ascii_whitespace() && c != b'\x0B' {
            break;
        }
        let _ = src.get();
    }
}

/// Peek that promotes source exhaustion to a contextual parse error.
fn peek<S: Source>(src: &mut S, context: &str) -> Result<u8> {
    match src.peek() {
        Err(Error::OutOfBounds) => Err(Error::Parse {
            offset: src.pos(),
            message: format!("unexpected end of input {context}"),
        }),
        other => other,
    }
}

fn peek_is<S: Source>(src: &mut S, byte: u8) -> bool {
    matches!(src.peek(), Ok(b) if b == byte)
}

/// Consumes `byte` if it is next; end of input counts as "not present".
fn eat<S: Source>(src: &mut S, byte: u8) -> Result<bool> {
    match src.peek() {
        Ok(b) if b == byte => {
            src.get()?;
            Ok(true)
        }
        Ok(_) | Err(Error::OutOfBounds) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Requires `byte` next, or fails with a parse error carrying `message`.
fn expect<S: Source>(src: &mut S, byte: u8, message: &str) -> Result<()> {
    if eat(src, byte)? {
        Ok(())
    } else {
        Err(Error::Parse {
            offset: src.pos(),
            message: message.to_string(),
        })
    }
}

/// Requires the exact literal text next (`null`, `true`, `false`).
fn expect_literal<S: Source>(src: &mut S, literal: &str) -> Result<()> {
    let offset = src.pos();
    for &expected in literal.as_bytes() {
        let matched = match src.get() {
            Ok(byte) => byte == expected,
            Err(Error::OutOfBounds) => false,
            Err(err) => return Err(err),
        };
        if !matched {
            return Err(Error::Parse {
                offset,
                message: format!("expected literal {literal:?}"),
            });
        }
    }
    Ok(())
}

fn push_digits<S: Source>(src: &mut S, buf: &mut String) -> Result<()> {
    while let Ok(c) = src.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        buf.push(char::from(src.get()?));
    }
    Ok(())
}
