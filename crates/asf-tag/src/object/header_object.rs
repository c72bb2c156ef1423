//! The Header Object: the root of the container's metadata tree.
//!
//! The root's body is a 32-bit child count, two reserved bytes, and the
//! children back to back. Its size field spans itself and every child,
//! so any edit that grows or shrinks a child propagates here; the same
//! delta is applied to the File Properties `FileSize` field, which
//! mirrors the length of the whole file.

use std::io::SeekFrom;

use tracing::debug;
use uuid::{Uuid, uuid};

use crate::error::{AsfError, Result};
use crate::source::{Sink, Source, SourceExt};
use crate::tags::{AsfTagDataType, AsfTagInfo, ObjectKind};
use crate::value::AsfValue;

use super::content_description::{
    CONTENT_DESCRIPTION_BASE_LEN, CONTENT_DESCRIPTION_GUID, ContentDescriptionObject,
};
use super::extended_content_description::{
    EXTENDED_CONTENT_DESCRIPTION_BASE_LEN, EXTENDED_CONTENT_DESCRIPTION_GUID,
    ExtendedContentDescriptionObject,
};
use super::file_properties::{FILE_PROPERTIES_GUID, FilePropertiesObject};
use super::header::{OBJECT_HEADER_LEN, ObjectHeader};
use super::unknown::UnknownObject;

/// GUID identifying the Header Object.
pub const HEADER_OBJECT_GUID: Uuid = uuid!("75B22630-668E-11CF-A6D9-00AA0062CE6C");

/// Size of a root with no children: header, child count, reserved bytes.
const HEADER_OBJECT_BASE_LEN: u64 = OBJECT_HEADER_LEN + 6;

/// The Header Object and its parsed children.
#[derive(Debug, Clone)]
pub struct HeaderObject {
    size: u64,
    reserved: [u8; 2],
    file_properties: Option<FilePropertiesObject>,
    content_description: Option<ContentDescriptionObject>,
    extended_content_description: Option<ExtendedContentDescriptionObject>,
    unknown: Vec<UnknownObject>,
}

impl HeaderObject {
    /// Parse the root and its children from the start of the source.
    ///
    /// Child values stay deferred; after parsing, the source is only
    /// needed again to materialize them. Each child is reparsed from its
    /// declared extent, so a child whose parser stops short of its own
    /// size does not derail the children after it.
    pub fn parse(src: &mut dyn Source) -> Result<Self> {
        src.seek(SeekFrom::Start(0))?;
        let root = ObjectHeader::read(src)?;
        if root.guid != HEADER_OBJECT_GUID {
            return Err(AsfError::NotAContainer);
        }
        let count = src.read_u32()?;
        let reserved_bytes = src.read_bytes(2)?;
        let reserved = [reserved_bytes[0], reserved_bytes[1]];

        let mut object = Self {
            size: HEADER_OBJECT_BASE_LEN,
            reserved,
            file_properties: None,
            content_description: None,
            extended_content_description: None,
            unknown: Vec::new(),
        };
        for _ in 0..count {
            let start = src.stream_position()?;
            let header = ObjectHeader::read(src)?;
            match header.guid {
                FILE_PROPERTIES_GUID => {
                    object.file_properties = Some(FilePropertiesObject::parse(src)?);
                }
                CONTENT_DESCRIPTION_GUID => {
                    object.content_description = Some(ContentDescriptionObject::parse(src)?);
                }
                EXTENDED_CONTENT_DESCRIPTION_GUID => {
                    object.extended_content_description =
                        Some(ExtendedContentDescriptionObject::parse(src)?);
                }
                guid => {
                    debug!(%guid, size = header.size, "preserving unrecognized header child");
                    object.unknown.push(UnknownObject::parse(header, src)?);
                }
            }
            src.seek(SeekFrom::Start(start + header.size))?;
        }
        object.size = object.children_len() + HEADER_OBJECT_BASE_LEN;
        Ok(object)
    }

    /// An empty root with no children.
    pub fn new() -> Self {
        Self {
            size: HEADER_OBJECT_BASE_LEN,
            reserved: [0x01, 0x02],
            file_properties: None,
            content_description: None,
            extended_content_description: None,
            unknown: Vec::new(),
        }
    }

    /// Current serialized size, children included.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_properties(&self) -> Option<&FilePropertiesObject> {
        self.file_properties.as_ref()
    }

    pub fn extended_content_description(&self) -> Option<&ExtendedContentDescriptionObject> {
        self.extended_content_description.as_ref()
    }

    fn children_len(&self) -> u64 {
        self.file_properties.as_ref().map(|o| o.size()).unwrap_or(0)
            + self
                .content_description
                .as_ref()
                .map(|o| o.size())
                .unwrap_or(0)
            + self
                .extended_content_description
                .as_ref()
                .map(|o| o.size())
                .unwrap_or(0)
            + self.unknown.iter().map(|o| o.size()).sum::<u64>()
    }

    fn child_count(&self) -> u32 {
        u32::from(self.file_properties.is_some())
            + u32::from(self.content_description.is_some())
            + u32::from(self.extended_content_description.is_some())
            + self.unknown.len() as u32
    }

    /// Whether the owning child holds a value for the tag.
    pub fn has(&self, info: &AsfTagInfo) -> bool {
        match info.owner {
            ObjectKind::FileProperties => self
                .file_properties
                .as_ref()
                .is_some_and(|o| o.has(info)),
            ObjectKind::ContentDescription => self
                .content_description
                .as_ref()
                .is_some_and(|o| o.has(info)),
            ObjectKind::ExtendedContentDescription => self
                .extended_content_description
                .as_ref()
                .is_some_and(|o| o.has(info)),
            ObjectKind::Unknown => false,
        }
    }

    /// Read a tag value under its declared data type.
    pub fn read(
        &self,
        info: &AsfTagInfo,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        self.read_as(info, info.data_type, src)
    }

    /// Read a tag value coerced to an arbitrary logical type. File
    /// Properties values are fixed-width integers and ignore the
    /// requested type.
    pub fn read_as(
        &self,
        info: &AsfTagInfo,
        logical: AsfTagDataType,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        match info.owner {
            ObjectKind::FileProperties => Ok(self
                .file_properties
                .as_ref()
                .and_then(|o| o.read(info))),
            ObjectKind::ContentDescription => match &self.content_description {
                Some(object) => object.read_as(info, logical, src),
                None => Ok(None),
            },
            ObjectKind::ExtendedContentDescription => {
                match &self.extended_content_description {
                    Some(object) => object.read_as(info, logical, src),
                    None => Ok(None),
                }
            }
            ObjectKind::Unknown => Ok(None),
        }
    }

    /// Write or remove a tag value, creating the owning child on first
    /// write. Size fields stay consistent: the delta flows into the root
    /// size and into the File Properties `FileSize` mirror.
    pub fn write(&mut self, info: &AsfTagInfo, value: Option<&AsfValue>) -> Result<()> {
        if info.owner == ObjectKind::Unknown {
            debug!(tag = info.name, "dropping write to unmapped tag");
            return Ok(());
        }
        if !info.editable {
            return Err(AsfError::read_only_tag(info.name));
        }
        let delta = match info.owner {
            ObjectKind::ContentDescription => {
                if value.is_none() && self.content_description.is_none() {
                    return Ok(());
                }
                // Install the child only after the write succeeded; a
                // failed encode must leave the root untouched.
                let existing = self.content_description.take();
                let created = existing.is_none();
                let mut object = existing.unwrap_or_default();
                match object.write(info, value) {
                    Ok(delta) => {
                        self.content_description = Some(object);
                        delta + if created {
                            CONTENT_DESCRIPTION_BASE_LEN as i64
                        } else {
                            0
                        }
                    }
                    Err(error) => {
                        if !created {
                            self.content_description = Some(object);
                        }
                        return Err(error);
                    }
                }
            }
            ObjectKind::ExtendedContentDescription => {
                if value.is_none() && self.extended_content_description.is_none() {
                    return Ok(());
                }
                let existing = self.extended_content_description.take();
                let created = existing.is_none();
                let mut object = existing.unwrap_or_default();
                match object.write(info, value) {
                    Ok(delta) => {
                        self.extended_content_description = Some(object);
                        delta + if created {
                            EXTENDED_CONTENT_DESCRIPTION_BASE_LEN as i64
                        } else {
                            0
                        }
                    }
                    Err(error) => {
                        if !created {
                            self.extended_content_description = Some(object);
                        }
                        return Err(error);
                    }
                }
            }
            ObjectKind::FileProperties => {
                // Unreachable while all File Properties tags are
                // read-only, but routed for completeness.
                match &mut self.file_properties {
                    Some(object) => object.write(info, value)?,
                    None => 0,
                }
            }
            ObjectKind::Unknown => 0,
        };
        self.apply_delta(delta);
        Ok(())
    }

    fn apply_delta(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        self.size = (self.size as i64 + delta) as u64;
        if let Some(fp) = &mut self.file_properties {
            fp.file_size = (fp.file_size as i64 + delta) as u64;
        }
    }

    /// Serialize the root and every child. Children holding deferred
    /// values or opaque bodies pull their bytes from `src`.
    pub fn save(&self, dest: &mut dyn Sink, mut src: Option<&mut dyn Source>) -> Result<()> {
        ObjectHeader {
            guid: HEADER_OBJECT_GUID,
            size: self.size,
        }
        .write(dest)?;
        dest.write_all(&self.child_count().to_le_bytes())?;
        dest.write_all(&self.reserved)?;
        if let Some(object) = &self.file_properties {
            object.save(dest)?;
        }
        if let Some(object) = &self.content_description {
            object.save(dest, src.as_mut().map(|s| &mut **s as &mut dyn Source))?;
        }
        if let Some(object) = &self.extended_content_description {
            object.save(dest, src.as_mut().map(|s| &mut **s as &mut dyn Source))?;
        }
        for object in &self.unknown {
            object.save(dest, src.as_mut().map(|s| &mut **s as &mut dyn Source))?;
        }
        Ok(())
    }
}

impl Default for HeaderObject {
    fn default() -> Self {
        Self::new()
    }
}
