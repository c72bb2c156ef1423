//! The 24-byte object header shared by every ASF object.

use std::io::Write;

use uuid::Uuid;

use crate::error::Result;
use crate::source::{Source, SourceExt, guid_bytes};

/// Length of the object header: 16-byte GUID plus 64-bit size.
pub const OBJECT_HEADER_LEN: u64 = 24;

/// Identity and extent of one ASF object.
///
/// `size` is the object's total serialized length, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub guid: Uuid,
    pub size: u64,
}

impl ObjectHeader {
    /// Read a header at the current cursor position.
    pub fn read(src: &mut dyn Source) -> Result<Self> {
        let guid = src.read_guid()?;
        let size = src.read_u64()?;
        Ok(Self { guid, size })
    }

    /// Serialize the header.
    pub fn write<W: Write + ?Sized>(&self, dest: &mut W) -> Result<()> {
        dest.write_all(&guid_bytes(self.guid))?;
        dest.write_all(&self.size.to_le_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn header_round_trips() {
        let header = ObjectHeader {
            guid: Uuid::new_v4(),
            size: 0x0102_0304_0506,
        };
        let mut bytes = Vec::new();
        header.write(&mut bytes).unwrap();
        assert_eq!(bytes.len() as u64, OBJECT_HEADER_LEN);
        let mut cur = Cursor::new(bytes);
        assert_eq!(ObjectHeader::read(&mut cur).unwrap(), header);
    }
}
