//! Byte-cursor primitives over the backing stream.
//!
//! Every object parser works against a seekable byte source through the
//! small fixed-width readers defined here. All integers in an ASF
//! container are little-endian; GUIDs use the Microsoft mixed-endian
//! field layout, which `uuid` exposes as `from_bytes_le`/`to_bytes_le`.

use std::io::{Read, Seek, Write};

use uuid::Uuid;

use crate::error::Result;

/// Buffer size for bounded copy loops. Opaque object bodies (attached
/// pictures and the like) can be large, so copies never materialize more
/// than this many bytes at once.
pub(crate) const COPY_BUFFER_LEN: usize = 1024;

/// A random-access byte source backing a container.
pub trait Source: Read + Seek {}

impl<T: Read + Seek> Source for T {}

/// A seekable destination for serialized containers.
pub trait Sink: Write + Seek {}

impl<T: Write + Seek> Sink for T {}

/// Fixed-width little-endian read primitives.
///
/// Each call advances the cursor by the number of bytes read.
pub trait SourceExt {
    /// Read exactly `count` bytes.
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>>;

    /// Read a little-endian `u16`.
    fn read_u16(&mut self) -> Result<u16>;

    /// Read a little-endian `u32`.
    fn read_u32(&mut self) -> Result<u32>;

    /// Read a little-endian `u64`.
    fn read_u64(&mut self) -> Result<u64>;

    /// Read a 16-byte GUID in ASF wire layout.
    fn read_guid(&mut self) -> Result<Uuid>;
}

impl<R: Read + ?Sized> SourceExt for R {
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_guid(&mut self) -> Result<Uuid> {
        let mut buf = [0u8; 16];
        self.read_exact(&mut buf)?;
        Ok(Uuid::from_bytes_le(buf))
    }
}

/// Serialize a GUID in ASF wire layout.
pub fn guid_bytes(guid: Uuid) -> [u8; 16] {
    guid.to_bytes_le()
}

/// Copy exactly `len` bytes from `src` to `dest` through a fixed-size
/// buffer. Fails if `src` ends before `len` bytes were copied.
pub(crate) fn copy_exact<W: Write + ?Sized>(
    src: &mut dyn Source,
    dest: &mut W,
    len: u64,
) -> Result<()> {
    let mut buf = [0u8; COPY_BUFFER_LEN];
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(COPY_BUFFER_LEN as u64) as usize;
        src.read_exact(&mut buf[..chunk])?;
        dest.write_all(&buf[..chunk])?;
        remaining -= chunk as u64;
    }
    Ok(())
}
