//! ASF (Advanced Systems Format) container metadata reader and writer.
//!
//! This crate parses the Header Object of WMA/WMV files, exposes the
//! metadata it carries through a uniform tag interface, and serializes
//! edited headers while keeping every size field in the container
//! consistent. The media payload is never touched: saving rewrites the
//! header and copies the rest of the file through verbatim.
//!
//! # Features
//!
//! - GUID-dispatched parsing of the ASF object tree
//! - Uniform tag read/write over the Content Description, Extended
//!   Content Description, and File Properties objects
//! - Lazy value materialization: attribute bytes stay in the source
//!   until something asks for them
//! - Value coercion between physical storage types and requested
//!   logical types
//! - Opaque preservation of unrecognized header children
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::Cursor;
//! use asf_tag::{AsfTagEditor, Tag, TagValue};
//!
//! let file = File::open("song.wma").unwrap();
//! let mut editor = AsfTagEditor::new(file).unwrap();
//!
//! if let Some(TagValue::String(title)) = editor.read(Tag::Title).unwrap() {
//!     println!("title: {title}");
//! }
//!
//! editor
//!     .write(Tag::Artist, Some(&TagValue::String("Someone".into())))
//!     .unwrap();
//! let mut out = Cursor::new(Vec::new());
//! editor.save(&mut out).unwrap();
//! ```

mod editor;
mod error;
pub mod object;
mod source;
pub mod tags;
mod text;
pub mod time;
mod value;

pub use editor::{AsfTagEditor, TagValue};
pub use error::{AsfError, Result};
pub use source::{Sink, Source, SourceExt, guid_bytes};
pub use tags::{AsfTagDataType, AsfTagInfo, ObjectKind, Tag, TagDataType, asf_tag, asf_tag_by_name};
pub use value::{AsfValue, StorageType, TagValueCell};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
