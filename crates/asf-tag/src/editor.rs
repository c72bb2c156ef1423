//! The tag editor: generic tag access over a parsed container.
//!
//! [`AsfTagEditor`] owns the backing source, parses the Header Object up
//! front, and exposes tags through format-independent identities and
//! value types. Reads translate the container's physical representation
//! into generic values; writes translate back. Saving rewrites the
//! header and then copies the untouched remainder of the file, so the
//! media payload is never re-encoded.

use std::io::{self, SeekFrom};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{AsfError, Result};
use crate::object::{HEADER_OBJECT_GUID, HeaderObject, ObjectHeader};
use crate::source::{Sink, Source};
use crate::tags::{self, AsfTagDataType, AsfTagInfo, ObjectKind, Tag, TagDataType};
use crate::time;
use crate::value::AsfValue;

/// A format-independent tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    String(String),
    Int32(i32),
    Int64(i64),
    Duration(Duration),
    DateTime(DateTime<Utc>),
    Picture(Vec<u8>),
}

impl TagValue {
    fn type_name(&self) -> &'static str {
        match self {
            TagValue::String(_) => "string",
            TagValue::Int32(_) => "i32",
            TagValue::Int64(_) => "i64",
            TagValue::Duration(_) => "duration",
            TagValue::DateTime(_) => "datetime",
            TagValue::Picture(_) => "picture",
        }
    }
}

/// Tag editor over a seekable ASF source.
pub struct AsfTagEditor<S> {
    src: S,
    header: HeaderObject,
    /// Serialized length of the header as it sits in the source; the
    /// media payload starts here.
    data_offset: u64,
}

impl<S: Source> AsfTagEditor<S> {
    /// Parse the container and build an editor over it.
    pub fn new(mut src: S) -> Result<Self> {
        let header = HeaderObject::parse(&mut src)?;
        let data_offset = header.size();
        Ok(Self {
            src,
            header,
            data_offset,
        })
    }

    /// Probe whether the source starts with an ASF Header Object.
    ///
    /// The cursor position is restored; probe failures of any kind read
    /// as "not supported".
    pub fn is_supported(src: &mut S) -> bool {
        fn probe(src: &mut dyn Source) -> Result<bool> {
            let prior = src.stream_position()?;
            src.seek(SeekFrom::Start(0))?;
            let header = ObjectHeader::read(src);
            src.seek(SeekFrom::Start(prior))?;
            Ok(matches!(header, Ok(header) if header.guid == HEADER_OBJECT_GUID))
        }
        probe(src).unwrap_or(false)
    }

    /// The parsed Header Object.
    pub fn header(&self) -> &HeaderObject {
        &self.header
    }

    /// Whether the container holds a value for the tag.
    pub fn has(&self, tag: Tag) -> bool {
        tags::asf_tag(tag)
            .map(|info| self.header.has(info))
            .unwrap_or(false)
    }

    /// Read a tag as its generic value.
    pub fn read(&mut self, tag: Tag) -> Result<Option<TagValue>> {
        let Some(info) = tags::asf_tag(tag) else {
            return Ok(None);
        };
        if info.owner == ObjectKind::Unknown {
            return Ok(None);
        }
        let value = match tag.data_type() {
            TagDataType::Picture => None,
            TagDataType::String => self
                .read_raw(info, AsfTagDataType::String)?
                .and_then(|value| match value {
                    AsfValue::String(text) => Some(TagValue::String(text)),
                    _ => None,
                }),
            TagDataType::Int32 => self
                .read_raw(info, AsfTagDataType::UInt32)?
                .and_then(|value| match value {
                    AsfValue::UInt32(n) => Some(TagValue::Int32(n as i32)),
                    _ => None,
                }),
            TagDataType::Int64 => self
                .read_raw(info, AsfTagDataType::UInt64)?
                .and_then(|value| match value {
                    AsfValue::UInt64(n) => Some(TagValue::Int64(n as i64)),
                    _ => None,
                }),
            TagDataType::Duration => self
                .read_raw(info, AsfTagDataType::UInt64)?
                .and_then(|value| match value {
                    AsfValue::UInt64(ticks) => {
                        Some(TagValue::Duration(time::ticks_to_duration(ticks)))
                    }
                    _ => None,
                }),
            TagDataType::DateTime => self.read_datetime(info)?,
        };
        Ok(value)
    }

    fn read_raw(
        &mut self,
        info: &AsfTagInfo,
        logical: AsfTagDataType,
    ) -> Result<Option<AsfValue>> {
        self.header.read_as(info, logical, Some(&mut self.src))
    }

    /// Timestamps are stored either as FILETIME ticks (encoding time)
    /// or as a plain year string (release dates).
    fn read_datetime(&mut self, info: &AsfTagInfo) -> Result<Option<TagValue>> {
        if info.data_type == AsfTagDataType::UInt64 {
            let value = self.read_raw(info, AsfTagDataType::UInt64)?;
            Ok(value.and_then(|value| match value {
                AsfValue::UInt64(ticks) => {
                    time::filetime_to_datetime(ticks).map(TagValue::DateTime)
                }
                _ => None,
            }))
        } else {
            let value = self.read_raw(info, AsfTagDataType::String)?;
            Ok(value.and_then(|value| match value {
                AsfValue::String(year) => time::year_to_datetime(&year).map(TagValue::DateTime),
                _ => None,
            }))
        }
    }

    /// Write or remove a tag.
    ///
    /// `None` removes the tag. Pictures have no home in this format and
    /// are dropped; tags the format marks read-only reject the write.
    pub fn write(&mut self, tag: Tag, value: Option<&TagValue>) -> Result<()> {
        let Some(info) = tags::asf_tag(tag) else {
            return Ok(());
        };
        let raw = match value {
            None => None,
            Some(value) => match convert_for_write(tag, info, value) {
                Converted::Value(raw) => Some(raw),
                Converted::Dropped => {
                    debug!(tag = info.name, "dropping value with no representation");
                    return Ok(());
                }
                Converted::Mismatch => {
                    return Err(AsfError::InvalidValueCombination {
                        expected: info.data_type,
                        actual: value.type_name(),
                    });
                }
            },
        };
        self.header.write(info, raw.as_ref())
    }

    /// Serialize the edited container to `dest`.
    ///
    /// The rewritten header goes first; the media payload is then copied
    /// verbatim from where the original header ended. The output length
    /// always matches the `FileSize` the header advertises.
    pub fn save(&mut self, dest: &mut dyn Sink) -> Result<()> {
        self.header.save(dest, Some(&mut self.src))?;
        self.src.seek(SeekFrom::Start(self.data_offset))?;
        io::copy(&mut self.src, dest)?;
        dest.flush()?;
        Ok(())
    }

    /// Consume the editor and return the backing source.
    pub fn into_inner(self) -> S {
        self.src
    }
}

enum Converted {
    Value(AsfValue),
    Dropped,
    Mismatch,
}

/// Translate a generic value into the representation the descriptor
/// stores, or report that no translation exists.
fn convert_for_write(tag: Tag, info: &AsfTagInfo, value: &TagValue) -> Converted {
    match (tag.data_type(), value) {
        (TagDataType::String, TagValue::String(text)) => {
            Converted::Value(AsfValue::String(text.clone()))
        }
        // Track number and BPM are numeric to callers but stored as
        // decimal strings.
        (TagDataType::Int32, TagValue::Int32(n)) => {
            Converted::Value(AsfValue::String(n.to_string()))
        }
        (TagDataType::Int64, TagValue::Int64(n)) => {
            Converted::Value(AsfValue::UInt64(*n as u64))
        }
        (TagDataType::Duration, TagValue::Duration(duration)) => {
            Converted::Value(AsfValue::UInt64(time::duration_to_ticks(*duration)))
        }
        (TagDataType::DateTime, TagValue::DateTime(at)) => {
            if info.data_type == AsfTagDataType::UInt64 {
                Converted::Value(AsfValue::UInt64(time::datetime_to_filetime(*at)))
            } else {
                Converted::Value(AsfValue::String(time::datetime_year(*at)))
            }
        }
        (TagDataType::Picture, TagValue::Picture(_)) => Converted::Dropped,
        _ => Converted::Mismatch,
    }
}
