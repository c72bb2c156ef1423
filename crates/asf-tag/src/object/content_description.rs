//! The Content Description object.
//!
//! Five fixed string slots in wire order: Title, Author, Copyright,
//! Description, Rating. The body is five 16-bit lengths followed by the
//! concatenated UTF-16LE values. A zero length on disk means the slot is
//! absent, and absent slots write a zero length back.

use uuid::{Uuid, uuid};

use crate::error::{AsfError, Result};
use crate::source::{Sink, Source, SourceExt};
use crate::tags::{AsfTagDataType, AsfTagInfo};
use crate::value::{AsfValue, StorageType, TagValueCell};

use super::header::{OBJECT_HEADER_LEN, ObjectHeader};

/// GUID identifying the Content Description object.
pub const CONTENT_DESCRIPTION_GUID: Uuid = uuid!("75B22633-668E-11CF-A6D9-00AA0062CE6C");

/// Size of an object with all five slots absent: header plus five
/// 16-bit lengths.
pub const CONTENT_DESCRIPTION_BASE_LEN: u64 = OBJECT_HEADER_LEN + 10;

const SLOT_COUNT: usize = 5;

/// Slot attribute names, in wire order.
const SLOT_NAMES: [&str; SLOT_COUNT] = ["Title", "Author", "Copyright", "Description", "Rating"];

/// The Content Description object.
#[derive(Debug, Clone)]
pub struct ContentDescriptionObject {
    size: u64,
    slots: [Option<TagValueCell>; SLOT_COUNT],
}

impl ContentDescriptionObject {
    /// Parse the body following an already-read object header. Values
    /// stay deferred in the source.
    pub fn parse(src: &mut dyn Source) -> Result<Self> {
        let mut lengths = [0u16; SLOT_COUNT];
        for length in &mut lengths {
            *length = src.read_u16()?;
        }
        let mut position = src.stream_position()?;
        let mut slots: [Option<TagValueCell>; SLOT_COUNT] = Default::default();
        for (slot, length) in slots.iter_mut().zip(lengths) {
            if length > 0 {
                *slot = Some(TagValueCell::deferred(
                    StorageType::String,
                    position,
                    u32::from(length),
                ));
                position += u64::from(length);
            }
        }
        let size = CONTENT_DESCRIPTION_BASE_LEN
            + lengths.iter().map(|l| u64::from(*l)).sum::<u64>();
        Ok(Self { size, slots })
    }

    /// An empty object with all slots absent.
    pub fn new() -> Self {
        Self {
            size: CONTENT_DESCRIPTION_BASE_LEN,
            slots: Default::default(),
        }
    }

    /// Current serialized size.
    pub fn size(&self) -> u64 {
        self.size
    }

    fn slot_index(name: &str) -> Option<usize> {
        SLOT_NAMES.iter().position(|slot| *slot == name)
    }

    pub fn has(&self, info: &AsfTagInfo) -> bool {
        Self::slot_index(info.name)
            .map(|idx| self.slots[idx].is_some())
            .unwrap_or(false)
    }

    pub fn read(
        &self,
        info: &AsfTagInfo,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        self.read_as(info, info.data_type, src)
    }

    /// Read a slot coerced to an arbitrary logical type.
    pub fn read_as(
        &self,
        info: &AsfTagInfo,
        logical: AsfTagDataType,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        let Some(cell) = Self::slot_index(info.name).and_then(|idx| self.slots[idx].as_ref())
        else {
            return Ok(None);
        };
        cell.read_as(logical, src)
    }

    /// Replace or remove a slot value. Returns the signed change in
    /// serialized size.
    pub fn write(&mut self, info: &AsfTagInfo, value: Option<&AsfValue>) -> Result<i64> {
        let Some(idx) = Self::slot_index(info.name) else {
            return Ok(0);
        };
        let old_len = self.slots[idx].as_ref().map(|cell| cell.len()).unwrap_or(0);
        let new = match value {
            Some(value) => Some(TagValueCell::encode(info.data_type, value)?),
            None => None,
        };
        let new_len = new.as_ref().map(|cell| cell.len()).unwrap_or(0);
        // The slot length fields on disk are 16 bits wide.
        if new_len > u64::from(u16::MAX) {
            return Err(AsfError::ValueTooLarge {
                name: info.name,
                len: new_len,
            });
        }
        self.slots[idx] = new;
        let delta = new_len as i64 - old_len as i64;
        self.size = (self.size as i64 + delta) as u64;
        Ok(delta)
    }

    /// Serialize header and body. Deferred slots are pulled from `src`.
    pub fn save(&self, dest: &mut dyn Sink, mut src: Option<&mut dyn Source>) -> Result<()> {
        ObjectHeader {
            guid: CONTENT_DESCRIPTION_GUID,
            size: self.size,
        }
        .write(dest)?;
        for slot in &self.slots {
            let length = slot.as_ref().map(|cell| cell.len()).unwrap_or(0) as u16;
            dest.write_all(&length.to_le_bytes())?;
        }
        for slot in self.slots.iter().flatten() {
            let bytes = slot.bytes(src.as_mut().map(|s| &mut **s as &mut dyn Source))?;
            dest.write_all(&bytes)?;
        }
        Ok(())
    }
}

impl Default for ContentDescriptionObject {
    fn default() -> Self {
        Self::new()
    }
}
