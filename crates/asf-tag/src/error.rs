//! Error types for ASF container operations.

use thiserror::Error;

use crate::tags::AsfTagDataType;

/// Errors that can occur when reading or editing an ASF container.
#[derive(Debug, Error)]
pub enum AsfError {
    /// A lazily stored value needed its backing source, but none was supplied.
    #[error("no source available to read a deferred value")]
    MissingSource,

    /// The stream does not start with the ASF Header Object identifier.
    #[error("not an ASF container: unexpected root object identifier")]
    NotAContainer,

    /// Write attempted on a tag that is not editable.
    #[error("tag '{name}' is read-only")]
    ReadOnlyTag { name: String },

    /// Write attempted on an object that supports no tag edits.
    #[error("{object} is read-only")]
    ReadOnlyObject { object: &'static str },

    /// Tag access on an object that is never tag-addressable.
    #[error("{object} does not support tag access")]
    UnsupportedOperation { object: &'static str },

    /// A new value's runtime type does not match the tag's declared type.
    #[error("value of type {actual} cannot encode as {expected:?}")]
    InvalidValueCombination {
        expected: AsfTagDataType,
        actual: &'static str,
    },

    /// A value exceeds the 16-bit length field the wire format allows.
    #[error("value for tag '{name}' is {len} bytes; the format caps values at 65535")]
    ValueTooLarge { name: &'static str, len: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsfError {
    /// Create a `ReadOnlyTag` error.
    pub fn read_only_tag(name: impl Into<String>) -> Self {
        Self::ReadOnlyTag { name: name.into() }
    }
}

/// Result type alias for ASF operations.
pub type Result<T> = std::result::Result<T, AsfError>;
