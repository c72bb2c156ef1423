//! Opaque preservation of unrecognized header children.

use std::io::SeekFrom;

use uuid::Uuid;

use crate::error::{AsfError, Result};
use crate::source::{Sink, Source, copy_exact};
use crate::tags::AsfTagInfo;
use crate::value::AsfValue;

use super::header::{OBJECT_HEADER_LEN, ObjectHeader};

const OBJECT_NAME: &str = "unrecognized header object";

/// A header child this implementation does not interpret. Only its
/// identity and extent are held; the body stays in the source and is
/// copied through verbatim on save.
#[derive(Debug, Clone)]
pub struct UnknownObject {
    guid: Uuid,
    size: u64,
    /// Position of the body (past the object header) in the source.
    body_position: u64,
}

impl UnknownObject {
    /// Record an object whose header was just read; the cursor sits at
    /// the body start.
    pub fn parse(header: ObjectHeader, src: &mut dyn Source) -> Result<Self> {
        Ok(Self {
            guid: header.guid,
            size: header.size,
            body_position: src.stream_position()?,
        })
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Serialized size, unchanged from parse.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn has(&self, _info: &AsfTagInfo) -> bool {
        false
    }

    pub fn read(&self, _info: &AsfTagInfo) -> Option<AsfValue> {
        None
    }

    pub fn write(&mut self, _info: &AsfTagInfo, _value: Option<&AsfValue>) -> Result<i64> {
        Err(AsfError::UnsupportedOperation {
            object: OBJECT_NAME,
        })
    }

    /// Re-emit the header and copy the body from the source.
    pub fn save(&self, dest: &mut dyn Sink, src: Option<&mut dyn Source>) -> Result<()> {
        let src = src.ok_or(AsfError::MissingSource)?;
        ObjectHeader {
            guid: self.guid,
            size: self.size,
        }
        .write(dest)?;
        src.seek(SeekFrom::Start(self.body_position))?;
        copy_exact(src, dest, self.size - OBJECT_HEADER_LEN)
    }
}
