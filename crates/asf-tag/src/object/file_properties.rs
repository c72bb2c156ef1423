//! The File Properties object.
//!
//! A fixed 104-byte object describing the file as a whole. Two of its
//! fields surface as tags (`Duration` and `FileSize`); both are
//! read-only through the tag interface because they describe the file
//! rather than annotate it. `FileSize` is nevertheless kept in sync by
//! the root object whenever edits change the serialized length.

use chrono::{DateTime, Utc};
use uuid::{Uuid, uuid};

use crate::error::{AsfError, Result};
use crate::source::{Sink, Source, SourceExt, guid_bytes};
use crate::tags::AsfTagInfo;
use crate::time;
use crate::value::AsfValue;

use super::header::ObjectHeader;

/// GUID identifying the File Properties object.
pub const FILE_PROPERTIES_GUID: Uuid = uuid!("8CABDCA1-A947-11CF-8EE4-00C00C205365");

/// Serialized length. The object is fixed-size.
pub const FILE_PROPERTIES_LEN: u64 = 104;

/// Milliseconds-to-ticks factor for the preroll adjustment.
const TICKS_PER_MS: u64 = 10_000;

const OBJECT_NAME: &str = "file properties object";

/// The File Properties object.
///
/// `play_duration` holds the effective playback duration in ticks, with
/// the preroll already subtracted; serialization adds it back.
#[derive(Debug, Clone)]
pub struct FilePropertiesObject {
    pub file_id: Uuid,
    /// Size of the entire file in bytes, mirrored from the container.
    pub file_size: u64,
    /// Creation timestamp, in FILETIME ticks.
    pub creation_date: u64,
    pub data_packets_count: u64,
    /// Effective playback duration in ticks (preroll excluded).
    pub play_duration: u64,
    pub send_duration: u64,
    /// Preroll in milliseconds.
    pub preroll: u64,
    pub flags: u32,
    pub minimum_data_packet_size: u32,
    pub maximum_data_packet_size: u32,
    pub maximum_bitrate: u32,
}

impl FilePropertiesObject {
    /// Parse the 80-byte body following an already-read object header.
    pub fn parse(src: &mut dyn Source) -> Result<Self> {
        let file_id = src.read_guid()?;
        let file_size = src.read_u64()?;
        let creation_date = src.read_u64()?;
        let data_packets_count = src.read_u64()?;
        let raw_duration = src.read_u64()?;
        let send_duration = src.read_u64()?;
        let preroll = src.read_u64()?;
        let flags = src.read_u32()?;
        let minimum_data_packet_size = src.read_u32()?;
        let maximum_data_packet_size = src.read_u32()?;
        let maximum_bitrate = src.read_u32()?;
        Ok(Self {
            file_id,
            file_size,
            creation_date,
            data_packets_count,
            play_duration: raw_duration.saturating_sub(preroll.saturating_mul(TICKS_PER_MS)),
            send_duration,
            preroll,
            flags,
            minimum_data_packet_size,
            maximum_data_packet_size,
            maximum_bitrate,
        })
    }

    /// A fresh object for a container built from scratch. The file size
    /// starts at the object's own length and grows with the container.
    pub fn new() -> Self {
        Self {
            file_id: Uuid::new_v4(),
            file_size: FILE_PROPERTIES_LEN,
            creation_date: 0,
            data_packets_count: 0,
            play_duration: 0,
            send_duration: 0,
            preroll: 0,
            flags: 0,
            minimum_data_packet_size: 0,
            maximum_data_packet_size: 0,
            maximum_bitrate: 0,
        }
    }

    /// Serialized size. Always [`FILE_PROPERTIES_LEN`].
    pub fn size(&self) -> u64 {
        FILE_PROPERTIES_LEN
    }

    /// Creation timestamp as an absolute time, when representable.
    pub fn creation_date_time(&self) -> Option<DateTime<Utc>> {
        time::filetime_to_datetime(self.creation_date)
    }

    pub fn has(&self, info: &AsfTagInfo) -> bool {
        matches!(info.name, "Duration" | "FileSize")
    }

    pub fn read(&self, info: &AsfTagInfo) -> Option<AsfValue> {
        match info.name {
            "Duration" => Some(AsfValue::UInt64(self.play_duration)),
            "FileSize" => Some(AsfValue::UInt64(self.file_size)),
            _ => None,
        }
    }

    /// Tag writes never reach this object; both of its tags are
    /// read-only.
    pub fn write(&mut self, _info: &AsfTagInfo, _value: Option<&AsfValue>) -> Result<i64> {
        Err(AsfError::ReadOnlyObject {
            object: OBJECT_NAME,
        })
    }

    /// Serialize header and body.
    pub fn save(&self, dest: &mut dyn Sink) -> Result<()> {
        ObjectHeader {
            guid: FILE_PROPERTIES_GUID,
            size: FILE_PROPERTIES_LEN,
        }
        .write(dest)?;
        let raw_duration = self
            .play_duration
            .saturating_add(self.preroll.saturating_mul(TICKS_PER_MS));
        dest.write_all(&guid_bytes(self.file_id))?;
        dest.write_all(&self.file_size.to_le_bytes())?;
        dest.write_all(&self.creation_date.to_le_bytes())?;
        dest.write_all(&self.data_packets_count.to_le_bytes())?;
        dest.write_all(&raw_duration.to_le_bytes())?;
        dest.write_all(&self.send_duration.to_le_bytes())?;
        dest.write_all(&self.preroll.to_le_bytes())?;
        dest.write_all(&self.flags.to_le_bytes())?;
        dest.write_all(&self.minimum_data_packet_size.to_le_bytes())?;
        dest.write_all(&self.maximum_data_packet_size.to_le_bytes())?;
        dest.write_all(&self.maximum_bitrate.to_le_bytes())?;
        Ok(())
    }
}

impl Default for FilePropertiesObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::tags;

    use super::*;

    fn round_trip(object: &FilePropertiesObject) -> FilePropertiesObject {
        let mut bytes = Cursor::new(Vec::new());
        object.save(&mut bytes).unwrap();
        let mut cur = Cursor::new(bytes.into_inner());
        let header = ObjectHeader::read(&mut cur).unwrap();
        assert_eq!(header.guid, FILE_PROPERTIES_GUID);
        assert_eq!(header.size, FILE_PROPERTIES_LEN);
        FilePropertiesObject::parse(&mut cur).unwrap()
    }

    #[test]
    fn preroll_is_subtracted_on_parse_and_restored_on_save() {
        let mut object = FilePropertiesObject::new();
        object.play_duration = 103_250_000;
        object.preroll = 5;
        let parsed = round_trip(&object);
        assert_eq!(parsed.play_duration, 103_250_000);
        assert_eq!(parsed.preroll, 5);

        // The raw field on disk carries the preroll.
        let mut bytes = Cursor::new(Vec::new());
        object.save(&mut bytes).unwrap();
        let raw = &bytes.get_ref()[24 + 16 + 24..][..8];
        assert_eq!(
            u64::from_le_bytes(raw.try_into().unwrap()),
            103_250_000 + 5 * TICKS_PER_MS
        );
    }

    #[test]
    fn tag_reads_surface_duration_and_file_size() {
        let mut object = FilePropertiesObject::new();
        object.file_size = 2048;
        object.play_duration = 7;
        assert_eq!(
            object.read(&tags::FILE_SIZE),
            Some(AsfValue::UInt64(2048))
        );
        assert_eq!(object.read(&tags::DURATION), Some(AsfValue::UInt64(7)));
        assert!(object.has(&tags::DURATION));
    }

    #[test]
    fn tag_writes_are_rejected() {
        let mut object = FilePropertiesObject::new();
        let result = object.write(&tags::FILE_SIZE, Some(&AsfValue::UInt64(1)));
        assert!(matches!(result, Err(AsfError::ReadOnlyObject { .. })));
    }
}
