//! # jsondom-core
//!
//! In-memory JSON document model with an arena-backed value tree: a
//! recursive-descent parser (text → document), a recursive writer
//! (document → text, compact or pretty), and a tagged-union [`Value`] whose
//! array/object payloads live in a per-document [`NodeArena`] instead of
//! being boxed individually.
//!
//! ## Quick start
//!
//! ```rust
//! use jsondom_core::Document;
//!
//! let doc: Document = r#"{"name":"Alice","scores":[95,87,92]}"#.parse()?;
//! assert_eq!(doc.root().key("name")?.as_str()?, "Alice");
//! assert_eq!(doc.root().key("scores")?.at(1)?.as_i64()?, 87);
//!
//! // Roundtrip, compact
//! assert_eq!(doc.to_json(0)?, r#"{"name":"Alice","scores":[95,87,92]}"#);
//! # Ok::<(), jsondom_core::Error>(())
//! ```
//!
//! ## Scope
//!
//! This is a small-document model, single-threaded by design. String
//! payloads are copied verbatim in both directions; backslash escape
//! sequences are neither decoded on parse nor produced on write, a
//! deliberate limitation documented on [`reader`] and [`writer`]. Numbers
//! fold into three storage categories (f64 / i64 / u64) chosen at parse
//! time; there is no big-number support.
//!
//! ## Modules
//!
//! - [`document`]: `Document` root wrapper and the `ValueRef`/`ValueMut` cursors
//! - [`value`]: `Value` tagged union, `Number` categories, ownership rules
//! - [`arena`]: per-document node arena and handles
//! - [`reader`]: text → value tree
//! - [`writer`]: value tree → text
//! - [`stream`]: character source/sink traits and adapters
//! - [`error`]: error types

pub mod arena;
pub mod document;
pub mod error;
pub mod reader;
pub mod stream;
pub mod value;
pub mod writer;

pub use arena::{NodeArena, NodeId};
pub use document::{Document, Elements, Entries, ValueMut, ValueRef};
pub use error::{Error, Result};
pub use reader::read_value;
pub use stream::{ReadSource, Sink, SliceSink, SliceSource, Source, VecSink, WriteSink};
pub use value::{Kind, Number, Value};
pub use writer::write_value;
