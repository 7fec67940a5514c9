//! Character source and sink abstractions.
//!
//! The parser and writer never touch a concrete buffer type: they see only
//! the [`Source`] capability (`get`/`peek` with error-on-exhaustion) and the
//! [`Sink`] capability (`put`/`len`). Adapters cover the three concrete
//! shapes the entry points support: raw byte slices, growable buffers, and
//! generic `std::io` byte streams.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// A readable character stream with one byte of lookahead.
///
/// `get` and `peek` fail with [`Error::OutOfBounds`] once the input is
/// exhausted; the grammar always peeks before a matching get, so a bare
/// `peek` failure marks end of input, not corruption.
pub trait Source {
    /// Consumes and returns the next byte.
    fn get(&mut self) -> Result<u8>;

    /// Returns the next byte without consuming it.
    fn peek(&mut self) -> Result<u8>;

    /// Byte offset of the next unread position, for error reporting.
    fn pos(&self) -> usize;
}

/// A writable character stream.
pub trait Sink {
    /// Appends one byte. Fixed-size sinks fail with
    /// [`Error::CapacityExceeded`] when full.
    fn put(&mut self, byte: u8) -> Result<()>;

    /// Number of bytes written so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source over a borrowed byte buffer of known length.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl Source for SliceSource<'_> {
    fn get(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(Error::OutOfBounds),
        }
    }

    fn peek(&mut self) -> Result<u8> {
        self.data.get(self.pos).copied().ok_or(Error::OutOfBounds)
    }

    fn pos(&self) -> usize {
        self.pos
    }
}

/// Source over an arbitrary `io::Read`, buffering one byte for lookahead.
#[derive(Debug)]
pub struct ReadSource<R: Read> {
    inner: R,
    peeked: Option<u8>,
    pos: usize,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
            pos: 0,
        }
    }

    fn fetch(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => Ok(byte[0]),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(Error::OutOfBounds),
            Err(err) => Err(Error::Io(err)),
        }
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn get(&mut self) -> Result<u8> {
        if let Some(byte) = self.peeked.take() {
            self.pos += 1;
            return Ok(byte);
        }
        let byte = self.fetch()?;
        self.pos += 1;
        Ok(byte)
    }

    fn peek(&mut self) -> Result<u8> {
        if let Some(byte) = self.peeked {
            return Ok(byte);
        }
        let byte = self.fetch()?;
        self.peeked = Some(byte);
        Ok(byte)
    }

    fn pos(&self) -> usize {
        self.pos
    }
}

/// Growable output buffer.
#[derive(Debug, Default)]
pub struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// The written bytes as a string. The writer emits string payloads
    /// verbatim, so this only fails if a payload itself was built from
    /// non-UTF-8, impossible through this crate's own parser.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.buf)?)
    }
}

impl Sink for VecSink {
    fn put(&mut self, byte: u8) -> Result<()> {
        self.buf.push(byte);
        Ok(())
    }

    fn len(&self) -> usize {
        self.buf.len()
    }
}

/// Fixed-capacity sink over a borrowed byte buffer.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The written prefix of the buffer.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl Sink for SliceSink<'_> {
    fn put(&mut self, byte: u8) -> Result<()> {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = byte;
                self.pos += 1;
                Ok(())
            }
            None => Err(Error::CapacityExceeded { written: self.pos }),
        }
    }

    fn len(&self) -> usize {
        self.pos
    }
}

/// Sink over an arbitrary `io::Write`.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn put(&mut self, byte: u8) -> Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    fn len(&self) -> usize {
        self.written
    }
}
