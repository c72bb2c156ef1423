//! The Extended Content Description object.
//!
//! An open-ended list of named attributes. Each entry carries a
//! NUL-terminated UTF-16LE name, a 16-bit storage type code, and the
//! value bytes. Entries are kept sorted by name; an attribute name that
//! uses a type code this implementation does not know is preserved as
//! binary.

use std::collections::BTreeMap;
use std::io::SeekFrom;

use uuid::{Uuid, uuid};

use crate::error::{AsfError, Result};
use crate::source::{Sink, Source, SourceExt};
use crate::tags::{AsfTagDataType, AsfTagInfo};
use crate::text;
use crate::value::{AsfValue, StorageType, TagValueCell};

use super::header::{OBJECT_HEADER_LEN, ObjectHeader};

/// GUID identifying the Extended Content Description object.
pub const EXTENDED_CONTENT_DESCRIPTION_GUID: Uuid =
    uuid!("D2D0A440-E307-11D2-97F0-00A0C95EA850");

/// Size of an object with no entries: header plus the 16-bit count.
pub const EXTENDED_CONTENT_DESCRIPTION_BASE_LEN: u64 = OBJECT_HEADER_LEN + 2;

/// The Extended Content Description object.
#[derive(Debug, Clone)]
pub struct ExtendedContentDescriptionObject {
    size: u64,
    entries: BTreeMap<String, TagValueCell>,
}

/// Serialized footprint of one entry: name length field, the
/// NUL-terminated name, type code, value length field, and the value.
fn entry_len(name: &str, cell: &TagValueCell) -> u64 {
    let name_len = (name.encode_utf16().count() as u64 + 1) * 2;
    2 + name_len + 2 + 2 + cell.len()
}

impl ExtendedContentDescriptionObject {
    /// Parse the body following an already-read object header. Attribute
    /// names are read eagerly; values stay deferred in the source.
    pub fn parse(src: &mut dyn Source) -> Result<Self> {
        let count = src.read_u16()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let name_len = src.read_u16()?;
            let name = text::decode_utf16(&src.read_bytes(usize::from(name_len))?);
            let code = src.read_u16()?;
            let storage = StorageType::from_code(code).unwrap_or(StorageType::Binary);
            let value_len = src.read_u16()?;
            let position = src.stream_position()?;
            src.seek(SeekFrom::Start(position + u64::from(value_len)))?;
            entries.insert(
                name,
                TagValueCell::deferred(storage, position, u32::from(value_len)),
            );
        }
        let size = EXTENDED_CONTENT_DESCRIPTION_BASE_LEN
            + entries
                .iter()
                .map(|(name, cell)| entry_len(name, cell))
                .sum::<u64>();
        Ok(Self { size, entries })
    }

    /// An empty object with no entries.
    pub fn new() -> Self {
        Self {
            size: EXTENDED_CONTENT_DESCRIPTION_BASE_LEN,
            entries: BTreeMap::new(),
        }
    }

    /// Current serialized size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Attribute entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValueCell)> {
        self.entries.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn has(&self, info: &AsfTagInfo) -> bool {
        self.entries.contains_key(info.name)
    }

    pub fn read(
        &self,
        info: &AsfTagInfo,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        self.read_as(info, info.data_type, src)
    }

    /// Read an attribute coerced to an arbitrary logical type.
    pub fn read_as(
        &self,
        info: &AsfTagInfo,
        logical: AsfTagDataType,
        src: Option<&mut dyn Source>,
    ) -> Result<Option<AsfValue>> {
        match self.entries.get(info.name) {
            Some(cell) => cell.read_as(logical, src),
            None => Ok(None),
        }
    }

    /// Insert, replace, or remove an attribute. Returns the signed
    /// change in serialized size.
    pub fn write(&mut self, info: &AsfTagInfo, value: Option<&AsfValue>) -> Result<i64> {
        let old_len = self
            .entries
            .get(info.name)
            .map(|cell| entry_len(info.name, cell))
            .unwrap_or(0);
        let new_len = match value {
            Some(value) => {
                let cell = TagValueCell::encode(info.data_type, value)?;
                // The entry value length field on disk is 16 bits wide.
                if cell.len() > u64::from(u16::MAX) {
                    return Err(AsfError::ValueTooLarge {
                        name: info.name,
                        len: cell.len(),
                    });
                }
                let len = entry_len(info.name, &cell);
                self.entries.insert(info.name.to_owned(), cell);
                len
            }
            None => {
                self.entries.remove(info.name);
                0
            }
        };
        let delta = new_len as i64 - old_len as i64;
        self.size = (self.size as i64 + delta) as u64;
        Ok(delta)
    }

    /// Serialize header and body. Deferred values are pulled from `src`.
    pub fn save(&self, dest: &mut dyn Sink, mut src: Option<&mut dyn Source>) -> Result<()> {
        ObjectHeader {
            guid: EXTENDED_CONTENT_DESCRIPTION_GUID,
            size: self.size,
        }
        .write(dest)?;
        dest.write_all(&(self.entries.len() as u16).to_le_bytes())?;
        for (name, cell) in &self.entries {
            let name_bytes = text::encode_utf16z(name);
            dest.write_all(&(name_bytes.len() as u16).to_le_bytes())?;
            dest.write_all(&name_bytes)?;
            dest.write_all(&cell.storage().code().to_le_bytes())?;
            dest.write_all(&(cell.len() as u16).to_le_bytes())?;
            let bytes = cell.bytes(src.as_mut().map(|s| &mut **s as &mut dyn Source))?;
            dest.write_all(&bytes)?;
        }
        Ok(())
    }
}

impl Default for ExtendedContentDescriptionObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::tags;

    use super::*;

    #[test]
    fn empty_object_is_base_length() {
        let object = ExtendedContentDescriptionObject::new();
        assert_eq!(object.size(), 26);
    }

    #[test]
    fn entry_size_accounts_for_every_field() {
        let mut object = ExtendedContentDescriptionObject::new();
        let value = AsfValue::String("Rock".into());
        let delta = object.write(&tags::GENRE, Some(&value)).unwrap();
        // "WM/Genre" is 8 units + NUL = 18 name bytes; "Rock" is 10
        // value bytes; plus three 16-bit fields.
        assert_eq!(delta, 2 + 18 + 2 + 2 + 10);
        assert_eq!(object.size(), 26 + delta as u64);
    }

    #[test]
    fn removing_one_of_two_entries_keeps_the_other() {
        let mut object = ExtendedContentDescriptionObject::new();
        object
            .write(&tags::GENRE, Some(&AsfValue::String("Rock".into())))
            .unwrap();
        let track_delta = object
            .write(&tags::TRACK_NUMBER, Some(&AsfValue::String("3".into())))
            .unwrap();
        let size_with_both = object.size();

        let removed = object.write(&tags::TRACK_NUMBER, None).unwrap();
        assert_eq!(removed, -track_delta);
        assert_eq!(object.size(), size_with_both - track_delta as u64);
        assert!(object.has(&tags::GENRE));
        assert!(!object.has(&tags::TRACK_NUMBER));
    }

    #[test]
    fn oversized_values_are_rejected_before_insertion() {
        let mut object = ExtendedContentDescriptionObject::new();
        let oversized = AsfValue::Binary(vec![0u8; 70_000]);
        let result = object.write(&tags::MCDI, Some(&oversized));
        assert!(matches!(result, Err(AsfError::ValueTooLarge { .. })));
        assert_eq!(object.size(), 26);
        assert!(!object.has(&tags::MCDI));
    }

    #[test]
    fn save_and_parse_round_trip() {
        let mut object = ExtendedContentDescriptionObject::new();
        object
            .write(&tags::ALBUM_TITLE, Some(&AsfValue::String("Album".into())))
            .unwrap();
        object
            .write(
                &tags::SHARED_USER_RATING,
                Some(&AsfValue::UInt32(75)),
            )
            .unwrap();

        let mut bytes = Cursor::new(Vec::new());
        object.save(&mut bytes, None).unwrap();
        assert_eq!(bytes.get_ref().len() as u64, object.size());

        let mut cur = Cursor::new(bytes.into_inner());
        let header = ObjectHeader::read(&mut cur).unwrap();
        assert_eq!(header.guid, EXTENDED_CONTENT_DESCRIPTION_GUID);
        assert_eq!(header.size, object.size());
        let parsed = ExtendedContentDescriptionObject::parse(&mut cur).unwrap();
        assert_eq!(parsed.size(), object.size());

        let mut cur = Cursor::new(cur.into_inner());
        let value = parsed.read(&tags::ALBUM_TITLE, Some(&mut cur)).unwrap();
        assert_eq!(value, Some(AsfValue::String("Album".into())));
        let value = parsed
            .read(&tags::SHARED_USER_RATING, Some(&mut cur))
            .unwrap();
        assert_eq!(value, Some(AsfValue::UInt32(75)));
    }

    #[test]
    fn unknown_type_codes_parse_as_binary() {
        // One entry named "X" with type code 9 and a two-byte value.
        let mut body = Vec::new();
        body.extend_from_slice(&1u16.to_le_bytes());
        let name = text::encode_utf16z("X");
        body.extend_from_slice(&(name.len() as u16).to_le_bytes());
        body.extend_from_slice(&name);
        body.extend_from_slice(&9u16.to_le_bytes());
        body.extend_from_slice(&2u16.to_le_bytes());
        body.extend_from_slice(&[0xaa, 0xbb]);

        let mut cur = Cursor::new(body);
        let parsed = ExtendedContentDescriptionObject::parse(&mut cur).unwrap();
        let (_, cell) = parsed.iter().next().unwrap();
        assert_eq!(cell.storage(), StorageType::Binary);
    }
}
